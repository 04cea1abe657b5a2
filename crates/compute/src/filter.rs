use foundation::YearRange;
use serde::{Deserialize, Serialize};

use crate::record::EnrichedOccurrence;

/// Wire value of the "no species filter" choice.
pub const ALL_SPECIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpeciesSelection {
    #[default]
    All,
    Only(String),
}

impl SpeciesSelection {
    pub fn as_choice(&self) -> &str {
        match self {
            SpeciesSelection::All => ALL_SPECIES,
            SpeciesSelection::Only(s) => s,
        }
    }

    /// `All` accepts every record, including unidentified ones; a concrete
    /// choice never matches a record without a species.
    pub fn matches(&self, species: Option<&str>) -> bool {
        match self {
            SpeciesSelection::All => true,
            SpeciesSelection::Only(s) => species == Some(s.as_str()),
        }
    }
}

impl From<&str> for SpeciesSelection {
    fn from(choice: &str) -> Self {
        if choice == ALL_SPECIES {
            SpeciesSelection::All
        } else {
            SpeciesSelection::Only(choice.to_string())
        }
    }
}

impl From<String> for SpeciesSelection {
    fn from(choice: String) -> Self {
        if choice == ALL_SPECIES {
            SpeciesSelection::All
        } else {
            SpeciesSelection::Only(choice)
        }
    }
}

impl From<SpeciesSelection> for String {
    fn from(selection: SpeciesSelection) -> Self {
        match selection {
            SpeciesSelection::All => ALL_SPECIES.to_string(),
            SpeciesSelection::Only(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub species: SpeciesSelection,
    pub year_min: i32,
    pub year_max: i32,
}

impl FilterCriteria {
    pub fn new(species: impl Into<SpeciesSelection>, years: YearRange) -> Self {
        Self {
            species: species.into(),
            year_min: years.min,
            year_max: years.max,
        }
    }

    pub fn years(&self) -> YearRange {
        YearRange::new(self.year_min, self.year_max)
    }

    /// Species match, `year >= year_min` and `year <= year_max`. A record
    /// without a year fails both bounds.
    pub fn accepts(&self, record: &EnrichedOccurrence) -> bool {
        self.species.matches(record.species())
            && record.year().is_some_and(|y| y >= self.year_min)
            && record.year().is_some_and(|y| y <= self.year_max)
    }
}

/// Records accepted by `criteria`, in input order.
///
/// Borrows from the input so the base collection is never copied or
/// mutated; feeding the output back in yields the same selection.
pub fn filter_records<'a>(
    records: impl IntoIterator<Item = &'a EnrichedOccurrence>,
    criteria: &FilterCriteria,
) -> Vec<&'a EnrichedOccurrence> {
    records.into_iter().filter(|r| criteria.accepts(r)).collect()
}
