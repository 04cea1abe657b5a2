use std::sync::Arc;

use formats::{Occurrence, Species};
use foundation::GeoPoint;

/// An occurrence with its species metadata (left join) and containing region
/// (spatial join). Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedOccurrence {
    pub occurrence: Occurrence,
    pub species_info: Option<Arc<Species>>,
    pub region: Option<String>,
}

impl EnrichedOccurrence {
    pub fn species(&self) -> Option<&str> {
        self.occurrence.species.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.occurrence.year
    }

    pub fn event_date(&self) -> Option<&str> {
        self.occurrence.event_date.as_deref()
    }

    pub fn iucn_category(&self) -> Option<&str> {
        self.occurrence.iucn_category.as_deref()
    }

    pub fn location(&self) -> GeoPoint {
        self.occurrence.location
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Species attribute by column name; absent when unmatched or empty.
    pub fn species_attribute(&self, name: &str) -> Option<&str> {
        self.species_info.as_ref()?.attribute(name)
    }
}
