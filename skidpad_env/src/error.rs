//! Error types for the skidpad source layer.

use thiserror::Error;

/// Errors that can occur while loading cones or a base path.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The underlying file could not be opened or read
    #[error("I/O error on {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be decoded (malformed number, missing column, ...)
    #[error("Parse error in {origin} at line {line}: {message}")]
    Parse {
        origin: String,
        line: u64,
        message: String,
    },

    /// The source produced no records at all
    #[error("Source is empty: {0}")]
    EmptySource(String),
}

impl EnvError {
    /// Creates a parse error.
    pub fn parse(origin: impl Into<String>, line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            origin: origin.into(),
            line,
            message: message.into(),
        }
    }

    /// Maps a `csv` error onto the source error kinds, keeping the line number.
    pub(crate) fn from_csv(origin: &str, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::Io {
                origin: origin.to_string(),
                source,
            },
            csv::ErrorKind::Deserialize { err, .. } => Self::parse(origin, line, err.to_string()),
            other => Self::parse(origin, line, format!("{:?}", other)),
        }
    }
}
