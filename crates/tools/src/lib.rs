use std::fs;
use std::path::{Path, PathBuf};

use compute::JoinStats;
use compute::analysis::{Statistics, TemporalAnalysis};
use foundation::YearRange;
use runtime::{ControlEvent, ControlState, Dashboard, Revision, Views};
use serde::Serialize;

pub const MAP_FILE_NAME: &str = "map.geojson";
pub const TABLE_FILE_NAME: &str = "table.json";
pub const CHART_SVG_FILE_NAME: &str = "chart.svg";
pub const CHART_JSON_FILE_NAME: &str = "chart.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub undated_records: usize,
    pub regions: usize,
    pub year_extent: Option<YearRange>,
    pub species_columns: Vec<String>,
    pub join: JoinStats,
    /// Records per species, most frequent first.
    pub species_counts: Vec<(String, usize)>,
}

pub fn summarize(dashboard: &Dashboard) -> DatasetSummary {
    let data = dashboard.dataset();
    DatasetSummary {
        records: data.records().len(),
        undated_records: TemporalAnalysis::missing_years(data.records()),
        regions: data.regions().len(),
        year_extent: data.year_extent(),
        species_columns: data.species_columns().to_vec(),
        join: data.join_stats(),
        species_counts: Statistics::species_counts(data.records()),
    }
}

/// Control state for a headless selection, validated and clamped like the
/// interactive controls.
pub fn selection(
    dashboard: &Dashboard,
    species: Option<&str>,
    years: Option<YearRange>,
) -> Result<ControlState, String> {
    let spec = dashboard.control_spec();
    let mut state = ControlState::initial(spec);
    if let Some(species) = species {
        state = state
            .apply(
                spec,
                &ControlEvent::SelectSpecies {
                    species: species.to_string(),
                },
            )
            .map_err(|e| e.to_string())?;
    }
    if let Some(years) = years {
        state = state
            .apply(
                spec,
                &ControlEvent::SetYearRange {
                    min: years.min,
                    max: years.max,
                },
            )
            .map_err(|e| e.to_string())?;
    }
    Ok(state)
}

/// Writes the map, table and chart artifacts for `state` into `out_dir`.
/// The table is exported unpaginated.
pub fn export_views(
    dashboard: &Dashboard,
    state: &ControlState,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, String> {
    let everything = dashboard.clone().with_page_size(usize::MAX);
    let views: Views = everything.render(state, Revision::INITIAL);

    fs::create_dir_all(out_dir).map_err(|e| format!("create {out_dir:?}: {e}"))?;

    let outputs = [
        (MAP_FILE_NAME, to_pretty(&views.map.to_geojson())?),
        (TABLE_FILE_NAME, to_pretty(&views.table)?),
        (CHART_SVG_FILE_NAME, views.chart_svg.clone()),
        (CHART_JSON_FILE_NAME, to_pretty(&views.chart)?),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (name, payload) in outputs {
        let path = out_dir.join(name);
        fs::write(&path, payload).map_err(|e| format!("write {path:?}: {e}"))?;
        written.push(path);
    }
    Ok(written)
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("json: {e}"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use foundation::YearRange;
    use formats::SourcePaths;
    use runtime::Dashboard;
    use serde_json::Value;

    use super::{export_views, selection, summarize};

    fn dashboard() -> Dashboard {
        let tmp = tempfile::tempdir().unwrap();
        let paths = SourcePaths {
            occurrences: tmp.path().join("occ.tsv"),
            species: tmp.path().join("species.csv"),
            regions: tmp.path().join("regions.geojson"),
        };
        let mut occ = String::from(
            "species\teventDate\tyear\tiucnRedListCategory\tdecimalLongitude\tdecimalLatitude\n",
        );
        for i in 0..12 {
            let species = if i % 3 == 0 { "Ara macao" } else { "Iguana iguana" };
            occ.push_str(&format!("{species}\t\t{}\tLC\t{}.5\t1.5\n", 2000 + i, i % 4));
        }
        occ.push_str("Boa constrictor\t\t\tNT\t-3\t-3\n");
        fs::write(&paths.occurrences, occ).unwrap();
        fs::write(
            &paths.species,
            "species,category\nIguana iguana,Reptile\nAra macao,Bird\n",
        )
        .unwrap();
        fs::write(
            &paths.regions,
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"region":"Andina"},"geometry":{"type":"Polygon","coordinates":[[[0,0],[2,0],[2,2],[0,2],[0,0]]]}}]}"#,
        )
        .unwrap();
        Dashboard::load(&paths, 5).unwrap()
    }

    #[test]
    fn summary_reports_join_and_counts() {
        let summary = summarize(&dashboard());
        assert_eq!(summary.records, 13);
        assert_eq!(summary.undated_records, 1);
        assert_eq!(summary.regions, 1);
        assert_eq!(summary.year_extent, Some(YearRange::new(2000, 2011)));
        assert_eq!(summary.join.unmatched_species, 1);
        // Longitudes 2.5 and 3.5 plus the negative point fall outside.
        assert_eq!(summary.join.outside_regions, 7);
        assert_eq!(summary.species_counts[0], ("Iguana iguana".to_string(), 8));
    }

    #[test]
    fn export_writes_all_artifacts_unpaginated() {
        let dashboard = dashboard();
        let out = tempfile::tempdir().unwrap();
        let state = selection(
            &dashboard,
            Some("Iguana iguana"),
            Some(YearRange::new(2000, 2005)),
        )
        .unwrap();
        let written = export_views(&dashboard, &state, out.path()).unwrap();
        assert_eq!(written.len(), 4);

        let table_text = fs::read_to_string(out.path().join("table.json")).unwrap();
        let table: Value = serde_json::from_str(&table_text).unwrap();
        assert_eq!(table["total_rows"], 4);
        assert_eq!(table["rows"].as_array().unwrap().len(), 4);

        let map_text = fs::read_to_string(out.path().join("map.geojson")).unwrap();
        let map: Value = serde_json::from_str(&map_text).unwrap();
        assert_eq!(map["type"], "FeatureCollection");

        let svg = fs::read_to_string(out.path().join("chart.svg")).unwrap();
        assert!(svg.contains("Iguana iguana"));
    }

    #[test]
    fn unknown_species_is_rejected() {
        let err = selection(&dashboard(), Some("Homo sapiens"), None).unwrap_err();
        assert!(err.contains("Homo sapiens"));
    }
}
