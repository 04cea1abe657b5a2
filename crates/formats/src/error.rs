use std::fmt;
use std::path::PathBuf;

use crate::region_geojson::RegionParseError;

/// Any failure while reading one of the three input sources.
///
/// Every variant is fatal for startup; there is no partial-data fallback.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    MissingColumn {
        path: PathBuf,
        column: &'static str,
    },
    InvalidCoordinate {
        path: PathBuf,
        row: usize,
        reason: String,
    },
    DuplicateSpecies {
        path: PathBuf,
        species: String,
    },
    Regions {
        path: PathBuf,
        source: RegionParseError,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            LoadError::Csv { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
            LoadError::MissingColumn { path, column } => {
                write!(f, "{} is missing required column {column:?}", path.display())
            }
            LoadError::InvalidCoordinate { path, row, reason } => {
                write!(
                    f,
                    "{} row {row}: cannot build point geometry: {reason}",
                    path.display()
                )
            }
            LoadError::DuplicateSpecies { path, species } => {
                write!(f, "{} lists species {species:?} more than once", path.display())
            }
            LoadError::Regions { path, source } => {
                write!(f, "failed to load regions from {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Csv { source, .. } => Some(source),
            LoadError::Regions { source, .. } => Some(source),
            _ => None,
        }
    }
}
