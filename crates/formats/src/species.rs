use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::delimited::{DelimitedTable, cell};
use crate::error::LoadError;
use crate::occurrence::COL_SPECIES;

/// Species metadata row: the identifier plus every other column in header order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Species {
    pub id: String,
    pub attributes: Vec<(String, Option<String>)>,
}

impl Species {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .and_then(|(_, v)| v.as_deref())
    }
}

/// Species lookup keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesTable {
    columns: Vec<String>,
    records: Vec<Species>,
    index: HashMap<String, usize>,
}

impl SpeciesTable {
    pub fn from_records(
        columns: Vec<String>,
        records: Vec<Species>,
    ) -> Result<Self, String> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, rec) in records.iter().enumerate() {
            if index.insert(rec.id.clone(), i).is_some() {
                return Err(rec.id.clone());
            }
        }
        Ok(Self {
            columns,
            records,
            index,
        })
    }

    /// Attribute column names (the identifier column excluded).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Species] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Species> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn read_species<R: Read>(reader: R, origin: &Path) -> Result<SpeciesTable, LoadError> {
    let table = DelimitedTable::read(reader, origin)?;
    let id_ix = table.column(COL_SPECIES, origin)?;

    let columns: Vec<(usize, String)> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != id_ix)
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let records = table
        .rows
        .iter()
        .map(|record| Species {
            id: record.get(id_ix).unwrap_or_default().to_string(),
            attributes: columns
                .iter()
                .map(|(i, name)| (name.clone(), cell(record, *i).map(str::to_string)))
                .collect(),
        })
        .collect();

    SpeciesTable::from_records(columns.into_iter().map(|(_, name)| name).collect(), records)
        .map_err(|species| LoadError::DuplicateSpecies {
            path: origin.to_path_buf(),
            species,
        })
}
