use std::fs;

use formats::SourcePaths;
use runtime::Dashboard;

const OCCURRENCES: &str = "\
species,eventDate,year,iucnRedListCategory,decimalLongitude,decimalLatitude
Iguana iguana,2001-03-04,2001,LC,1.0,1.0
Iguana iguana,2008-05-01,2008,LC,50.0,50.0
Iguana iguana,2015-01-01,2015,LC,2.0,15.0
Ara macao,2003-07-07,2003,VU,3.0,3.0
Ara macao,,,VU,4.0,4.0
";

const SPECIES: &str = "\
species,category
Iguana iguana,Reptile
Ara macao,Bird
";

const REGIONS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "region": "Andina" },
      "geometry": { "type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]] }
    },
    {
      "type": "Feature",
      "properties": { "region": "Caribe" },
      "geometry": { "type": "Polygon", "coordinates": [[[0,10],[10,10],[10,20],[0,20],[0,10]]] }
    }
  ]
}"#;

/// Writes a small dataset to a temp dir and loads it: four dated records in
/// 2001..=2015, one undated, one outside every region.
pub fn fixture_dashboard() -> Dashboard {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let paths = SourcePaths {
        occurrences: dir.join("occurrences.csv"),
        species: dir.join("species.csv"),
        regions: dir.join("regions.geojson"),
    };
    fs::write(&paths.occurrences, OCCURRENCES).unwrap();
    fs::write(&paths.species, SPECIES).unwrap();
    fs::write(&paths.regions, REGIONS).unwrap();
    Dashboard::load(&paths, 2).unwrap()
}
