//! Skidpad Environment Abstraction Layer
//!
//! The geometry pipeline in `skidpad_core` never touches the filesystem.
//! Everything it consumes arrives through the two source traits defined here:
//!
//! - [`ConeSource`]: cone positions tagged with a colour label
//! - [`PathSource`]: the precomputed base path of one full skidpad run
//!
//! Production runs read CSV files ([`CsvConeSource`], [`CsvPathSource`]);
//! tests and built-in scenarios use [`InMemorySource`].
//!
//! # Example
//!
//! ```ignore
//! use skidpad_env::{ConeSource, CsvConeSource};
//!
//! let cones = CsvConeSource::new("cones.csv").load_cones()?;
//! println!("loaded {} cones", cones.len());
//! ```

mod csv_impl;
mod error;
mod memory;
mod source;
mod types;

pub use csv_impl::{parse_cones, parse_path, CsvConeSource, CsvPathSource};
pub use error::EnvError;
pub use memory::InMemorySource;
pub use source::{ConeSource, PathSource};
pub use types::{ConeRecord, PathRecord};
