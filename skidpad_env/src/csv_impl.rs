//! CSV-backed sources.
//!
//! Cone files carry a header row `x,y,color`; base path files are headerless
//! `x,y` pairs, one sample per line.

use crate::{ConeRecord, ConeSource, EnvError, PathRecord, PathSource};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parses cone records from any reader.
pub fn parse_cones<R: Read>(reader: R, origin: &str) -> Result<Vec<ConeRecord>, EnvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut cones = Vec::new();
    for record in rdr.deserialize::<ConeRecord>() {
        cones.push(record.map_err(|e| EnvError::from_csv(origin, e))?);
    }

    debug!("Parsed {} cones from {}", cones.len(), origin);
    Ok(cones)
}

/// Parses headerless `x,y` path samples from any reader.
pub fn parse_path<R: Read>(reader: R, origin: &str) -> Result<Vec<PathRecord>, EnvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut path = Vec::new();
    for record in rdr.deserialize::<PathRecord>() {
        path.push(record.map_err(|e| EnvError::from_csv(origin, e))?);
    }

    if path.is_empty() {
        return Err(EnvError::EmptySource(origin.to_string()));
    }

    debug!("Parsed {} path samples from {}", path.len(), origin);
    Ok(path)
}

fn open(path: &Path) -> Result<File, EnvError> {
    File::open(path).map_err(|source| EnvError::Io {
        origin: path.display().to_string(),
        source,
    })
}

/// Cone source reading a `x,y,color` CSV file.
#[derive(Debug, Clone)]
pub struct CsvConeSource {
    path: PathBuf,
}

impl CsvConeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConeSource for CsvConeSource {
    fn load_cones(&self) -> Result<Vec<ConeRecord>, EnvError> {
        parse_cones(open(&self.path)?, &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Base path source reading a headerless `x,y` CSV file.
#[derive(Debug, Clone)]
pub struct CsvPathSource {
    path: PathBuf,
}

impl CsvPathSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PathSource for CsvPathSource {
    fn load_path(&self) -> Result<Vec<PathRecord>, EnvError> {
        parse_path(open(&self.path)?, &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_cones() {
        let data = "x,y,color\n0,-1.5,orange\n1.0, 0.5 ,blue\n2.0,0.2,orange_big\n";
        let cones = parse_cones(data.as_bytes(), "inline").unwrap();

        assert_eq!(cones.len(), 3);
        assert_eq!(cones[1], ConeRecord::new(1.0, 0.5, "blue"));
        assert_eq!(cones[2].color, "orange_big");
    }

    #[test]
    fn test_malformed_cone_number_fails() {
        let data = "x,y,color\n0,-1.5,orange\nabc,0.5,blue\n";
        let err = parse_cones(data.as_bytes(), "inline").unwrap_err();

        match err {
            EnvError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_path_headerless() {
        let data = "0.0,0.0\n1.0,0.0\n2.0,0.5\n";
        let path = parse_path(data.as_bytes(), "inline").unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path[2], PathRecord::new(2.0, 0.5));
    }

    #[test]
    fn test_malformed_path_number_fails() {
        let data = "0.0,0.0\n1.0,nope\n";
        assert!(matches!(
            parse_path(data.as_bytes(), "inline"),
            Err(EnvError::Parse { .. })
        ));
    }

    #[test]
    fn test_empty_path_file_fails() {
        assert!(matches!(
            parse_path("".as_bytes(), "inline"),
            Err(EnvError::EmptySource(_))
        ));
    }

    #[test]
    fn test_csv_sources_read_files() {
        let mut cones = tempfile::NamedTempFile::new().unwrap();
        writeln!(cones, "x,y,color").unwrap();
        writeln!(cones, "3,1.5,orange").unwrap();

        let mut path = tempfile::NamedTempFile::new().unwrap();
        writeln!(path, "0,0").unwrap();
        writeln!(path, "1,1").unwrap();

        let cone_source = CsvConeSource::new(cones.path());
        let path_source = CsvPathSource::new(path.path());

        assert_eq!(cone_source.load_cones().unwrap().len(), 1);
        assert_eq!(path_source.load_path().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CsvPathSource::new("/definitely/not/here.csv");
        assert!(matches!(source.load_path(), Err(EnvError::Io { .. })));
    }
}
