use std::io::Read;
use std::path::Path;

use foundation::{Crs, GeoPoint};
use serde::Serialize;
use tracing::warn;

use crate::delimited::{DelimitedTable, cell};
use crate::error::LoadError;

pub const COL_SPECIES: &str = "species";
pub const COL_EVENT_DATE: &str = "eventDate";
pub const COL_YEAR: &str = "year";
pub const COL_IUCN: &str = "iucnRedListCategory";
pub const COL_LON: &str = "decimalLongitude";
pub const COL_LAT: &str = "decimalLatitude";

/// A single observed presence record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    /// Absent for records identified only above species rank.
    pub species: Option<String>,
    pub event_date: Option<String>,
    pub year: Option<i32>,
    pub iucn_category: Option<String>,
    pub location: GeoPoint,
}

/// Occurrence points tagged with the CRS their coordinates are expressed in.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceCollection {
    pub crs: Crs,
    pub occurrences: Vec<Occurrence>,
    /// Non-empty year cells that could not be coerced to an integer.
    pub unparsed_years: usize,
}

impl OccurrenceCollection {
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

pub fn read_occurrences<R: Read>(
    reader: R,
    origin: &Path,
) -> Result<OccurrenceCollection, LoadError> {
    let table = DelimitedTable::read(reader, origin)?;
    let species_ix = table.column(COL_SPECIES, origin)?;
    let date_ix = table.column(COL_EVENT_DATE, origin)?;
    let year_ix = table.column(COL_YEAR, origin)?;
    let iucn_ix = table.column(COL_IUCN, origin)?;
    let lon_ix = table.column(COL_LON, origin)?;
    let lat_ix = table.column(COL_LAT, origin)?;

    let mut occurrences = Vec::with_capacity(table.rows.len());
    let mut unparsed_years = 0usize;

    for (i, record) in table.rows.iter().enumerate() {
        let row = i + 1;
        let invalid = |reason: String| LoadError::InvalidCoordinate {
            path: origin.to_path_buf(),
            row,
            reason,
        };
        let lon = parse_coordinate(cell(record, lon_ix), COL_LON).map_err(invalid)?;
        let lat = parse_coordinate(cell(record, lat_ix), COL_LAT).map_err(invalid)?;
        let location = GeoPoint::wgs84(lon, lat).map_err(invalid)?;

        let year_raw = cell(record, year_ix);
        let year = year_raw.and_then(coerce_year);
        if year_raw.is_some() && year.is_none() {
            unparsed_years += 1;
        }

        occurrences.push(Occurrence {
            species: cell(record, species_ix).map(str::to_string),
            event_date: cell(record, date_ix).map(str::to_string),
            year,
            iucn_category: cell(record, iucn_ix).map(str::to_string),
            location,
        });
    }

    if unparsed_years > 0 {
        warn!(
            "{}: {unparsed_years} year values were not integers and were treated as absent",
            origin.display()
        );
    }

    Ok(OccurrenceCollection {
        crs: Crs::WGS84,
        occurrences,
        unparsed_years,
    })
}

fn parse_coordinate(raw: Option<&str>, column: &str) -> Result<f64, String> {
    let raw = raw.ok_or_else(|| format!("{column} is empty"))?;
    raw.parse::<f64>()
        .map_err(|e| format!("{column} {raw:?} is not a number: {e}"))
}

/// Integer strings pass through; whole-valued floats (`"2005.0"`) are
/// truncated; anything else is absent.
pub fn coerce_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(y) = raw.parse::<i32>() {
        return Some(y);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}
