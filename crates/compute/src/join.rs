use std::collections::HashMap;
use std::sync::Arc;

use formats::{Occurrence, OccurrenceCollection, Region, RegionCollection, SpeciesTable};
use serde::Serialize;
use tracing::info;

use crate::analysis::SpatialAnalysis;
use crate::record::EnrichedOccurrence;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    pub total: usize,
    pub unmatched_species: usize,
    pub outside_regions: usize,
}

#[derive(Debug, Clone)]
pub struct JoinOutput {
    pub records: Vec<EnrichedOccurrence>,
    pub stats: JoinStats,
}

/// Left join of occurrences onto species metadata by identifier.
///
/// Unmatched occurrences are kept with no species metadata. Output order and
/// length match the input.
pub fn attribute_join(
    occurrences: &[Occurrence],
    species: &SpeciesTable,
) -> Vec<EnrichedOccurrence> {
    let shared: HashMap<&str, Arc<_>> = species
        .records()
        .iter()
        .map(|s| (s.id.as_str(), Arc::new(s.clone())))
        .collect();

    occurrences
        .iter()
        .map(|occ| EnrichedOccurrence {
            occurrence: occ.clone(),
            species_info: occ.species.as_deref().and_then(|id| shared.get(id)).cloned(),
            region: None,
        })
        .collect()
}

/// Tags every record with the name of the region containing its point.
///
/// Records outside every region keep `region = None`. Never adds or drops
/// records, even when regions overlap.
pub fn spatial_join(
    records: Vec<EnrichedOccurrence>,
    regions: &[Region],
) -> Vec<EnrichedOccurrence> {
    records
        .into_iter()
        .map(|mut rec| {
            rec.region = SpatialAnalysis::containing_region(regions, rec.location())
                .and_then(|r| r.name.clone());
            rec
        })
        .collect()
}

/// Attribute join followed by spatial join.
pub fn join_sources(
    occurrences: &OccurrenceCollection,
    species: &SpeciesTable,
    regions: &RegionCollection,
) -> JoinOutput {
    let records = spatial_join(
        attribute_join(&occurrences.occurrences, species),
        &regions.regions,
    );

    let stats = JoinStats {
        total: records.len(),
        unmatched_species: records.iter().filter(|r| r.species_info.is_none()).count(),
        outside_regions: records.iter().filter(|r| r.region.is_none()).count(),
    };
    info!(
        total = stats.total,
        unmatched_species = stats.unmatched_species,
        outside_regions = stats.outside_regions,
        "joined occurrences"
    );

    JoinOutput { records, stats }
}

#[cfg(test)]
mod tests {
    use formats::{
        Occurrence, OccurrenceCollection, Region, RegionCollection, Species, SpeciesTable,
    };
    use foundation::{Crs, GeoPoint};
    use geo::{MultiPolygon, polygon};
    use pretty_assertions::assert_eq;

    use super::{JoinStats, attribute_join, join_sources};

    fn occ(species: &str, lon: f64, lat: f64) -> Occurrence {
        Occurrence {
            species: Some(species.to_string()),
            event_date: Some("2004-05-01".to_string()),
            year: Some(2004),
            iucn_category: Some("LC".to_string()),
            location: GeoPoint::new(lon, lat),
        }
    }

    fn species_table() -> SpeciesTable {
        SpeciesTable::from_records(
            vec!["category".to_string()],
            vec![Species {
                id: "Iguana iguana".to_string(),
                attributes: vec![("category".to_string(), Some("Reptile".to_string()))],
            }],
        )
        .unwrap()
    }

    fn regions() -> RegionCollection {
        let andina = polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
        ];
        RegionCollection {
            crs: Crs::WGS84,
            regions: vec![Region::new(
                Some("Andina".to_string()),
                MultiPolygon::new(vec![andina]),
            )],
        }
    }

    #[test]
    fn attribute_join_is_left_join() {
        let occurrences = vec![occ("Iguana iguana", 1.0, 1.0), occ("Ara macao", 2.0, 2.0)];
        let out = attribute_join(&occurrences, &species_table());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].species_attribute("category"), Some("Reptile"));
        assert!(out[1].species_info.is_none());
        assert_eq!(out[1].species(), Some("Ara macao"));
    }

    #[test]
    fn unidentified_records_join_to_nothing() {
        let mut unidentified = occ("Iguana iguana", 1.0, 1.0);
        unidentified.species = None;
        let out = attribute_join(&[unidentified], &species_table());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].species(), None);
        assert!(out[0].species_info.is_none());
    }

    #[test]
    fn join_preserves_cardinality_and_tags_regions() {
        let collection = OccurrenceCollection {
            crs: Crs::WGS84,
            occurrences: vec![
                occ("Iguana iguana", 1.0, 1.0),
                occ("Ara macao", 20.0, 20.0),
                occ("Iguana iguana", 10.0, 5.0),
            ],
            unparsed_years: 0,
        };
        let out = join_sources(&collection, &species_table(), &regions());
        assert_eq!(out.records.len(), collection.len());
        assert_eq!(out.records[0].region(), Some("Andina"));
        // Outside every polygon, and on the boundary.
        assert_eq!(out.records[1].region(), None);
        assert_eq!(out.records[2].region(), None);
        assert_eq!(
            out.stats,
            JoinStats {
                total: 3,
                unmatched_species: 1,
                outside_regions: 2,
            }
        );
    }

    #[test]
    fn empty_inputs_join_to_nothing() {
        let collection = OccurrenceCollection {
            crs: Crs::WGS84,
            occurrences: Vec::new(),
            unparsed_years: 0,
        };
        let out = join_sources(&collection, &SpeciesTable::default(), &regions());
        assert!(out.records.is_empty());
        assert_eq!(out.stats, JoinStats::default());
    }
}
