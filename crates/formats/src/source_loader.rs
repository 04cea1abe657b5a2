use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::LoadError;
use crate::occurrence::{OccurrenceCollection, read_occurrences};
use crate::region_geojson::{RegionCollection, read_regions};
use crate::species::{SpeciesTable, read_species};

/// Locations of the three input datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub occurrences: PathBuf,
    pub species: PathBuf,
    pub regions: PathBuf,
}

/// Parsed but not yet joined inputs.
#[derive(Debug, Clone)]
pub struct RawSources {
    pub occurrences: OccurrenceCollection,
    pub species: SpeciesTable,
    pub regions: RegionCollection,
}

pub fn load_sources(paths: &SourcePaths) -> Result<RawSources, LoadError> {
    let occurrences = load_occurrences(&paths.occurrences)?;
    let species = load_species(&paths.species)?;
    let regions = load_regions(&paths.regions)?;

    info!(
        occurrences = occurrences.len(),
        species = species.len(),
        regions = regions.regions.len(),
        "loaded sources"
    );

    Ok(RawSources {
        occurrences,
        species,
        regions,
    })
}

pub fn load_occurrences(path: impl AsRef<Path>) -> Result<OccurrenceCollection, LoadError> {
    let path = path.as_ref();
    read_occurrences(open(path)?, path)
}

pub fn load_species(path: impl AsRef<Path>) -> Result<SpeciesTable, LoadError> {
    let path = path.as_ref();
    read_species(open(path)?, path)
}

pub fn load_regions(path: impl AsRef<Path>) -> Result<RegionCollection, LoadError> {
    let path = path.as_ref();
    read_regions(open(path)?, path)
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}
