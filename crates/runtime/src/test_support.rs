use formats::{
    Occurrence, OccurrenceCollection, RawSources, Region, RegionCollection, Species,
    SpeciesTable,
};
use foundation::{Crs, GeoPoint};
use geo::{MultiPolygon, polygon};

use crate::dashboard::Dashboard;

fn occ(species: &str, year: Option<i32>, lon: f64, lat: f64) -> Occurrence {
    Occurrence {
        species: Some(species.to_string()),
        event_date: year.map(|y| format!("{y}-06-01")),
        year,
        iucn_category: Some("LC".to_string()),
        location: GeoPoint::new(lon, lat),
    }
}

/// Two adjacent regions, three species (one without metadata), one point
/// outside every region and one record without a year.
pub fn sample_sources() -> RawSources {
    let andina = polygon![
        (x: 0.0, y: 0.0),
        (x: 10.0, y: 0.0),
        (x: 10.0, y: 10.0),
        (x: 0.0, y: 10.0),
    ];
    let caribe = polygon![
        (x: 0.0, y: 10.0),
        (x: 10.0, y: 10.0),
        (x: 10.0, y: 20.0),
        (x: 0.0, y: 20.0),
    ];

    RawSources {
        occurrences: OccurrenceCollection {
            crs: Crs::WGS84,
            occurrences: vec![
                occ("Iguana iguana", Some(2001), 1.0, 1.0),
                occ("Iguana iguana", Some(2005), 2.0, 15.0),
                occ("Ara macao", Some(1998), 3.0, 3.0),
                occ("Iguana iguana", Some(2012), 50.0, 50.0),
                occ("Boa constrictor", Some(2008), 4.0, 12.0),
                occ("Ara macao", None, 5.0, 5.0),
            ],
            unparsed_years: 0,
        },
        species: SpeciesTable::from_records(
            vec!["category".to_string()],
            vec![
                Species {
                    id: "Iguana iguana".to_string(),
                    attributes: vec![("category".to_string(), Some("Reptile".to_string()))],
                },
                Species {
                    id: "Ara macao".to_string(),
                    attributes: vec![("category".to_string(), Some("Bird".to_string()))],
                },
            ],
        )
        .expect("unique species"),
        regions: RegionCollection {
            crs: Crs::WGS84,
            regions: vec![
                Region::new(Some("Andina".to_string()), MultiPolygon::new(vec![andina])),
                Region::new(Some("Caribe".to_string()), MultiPolygon::new(vec![caribe])),
            ],
        },
    }
}

pub fn sample_dashboard() -> Dashboard {
    Dashboard::from_sources(sample_sources(), 2)
}
