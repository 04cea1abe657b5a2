use std::sync::Arc;

use compute::analysis::{Statistics, TemporalAnalysis};
use compute::{EnrichedOccurrence, JoinStats, filter_records, join_sources};
use formats::{LoadError, RawSources, Region, SourcePaths, load_sources};
use foundation::YearRange;
use layers::{
    BarChart, ChartRenderer, DEFAULT_PAGE_SIZE, MapArtifact, MapRenderer, TablePage,
    TableRenderer, ViewRenderer,
};
use serde::Serialize;
use tracing::debug;

use crate::controls::{ControlSpec, ControlState};
use crate::frame::Revision;

/// The joined, immutable data a dashboard serves.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<EnrichedOccurrence>,
    regions: Vec<Region>,
    species_columns: Vec<String>,
    distinct_species: Vec<String>,
    year_extent: Option<YearRange>,
    join_stats: JoinStats,
}

impl Dataset {
    pub fn from_sources(raw: RawSources) -> Self {
        let joined = join_sources(&raw.occurrences, &raw.species, &raw.regions);
        let distinct_species = Statistics::distinct_species(&joined.records);
        let year_extent = TemporalAnalysis::year_extent(&joined.records);
        Self {
            records: joined.records,
            regions: raw.regions.regions,
            species_columns: raw.species.columns().to_vec(),
            distinct_species,
            year_extent,
            join_stats: joined.stats,
        }
    }

    pub fn records(&self) -> &[EnrichedOccurrence] {
        &self.records
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn species_columns(&self) -> &[String] {
        &self.species_columns
    }

    pub fn distinct_species(&self) -> &[String] {
        &self.distinct_species
    }

    pub fn year_extent(&self) -> Option<YearRange> {
        self.year_extent
    }

    pub fn join_stats(&self) -> JoinStats {
        self.join_stats
    }
}

/// Everything the three linked views show for one set of control inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Views {
    pub revision: Revision,
    pub controls: ControlState,
    pub matching: usize,
    pub map: MapArtifact,
    pub table: TablePage,
    pub chart: BarChart,
    pub chart_svg: String,
}

/// Shared read-only context handed to every session and renderer.
///
/// Cloning is cheap; all clones see the same dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    spec: Arc<ControlSpec>,
    page_size: usize,
}

impl Dashboard {
    pub fn load(paths: &SourcePaths, page_size: usize) -> Result<Self, LoadError> {
        Ok(Self::from_sources(load_sources(paths)?, page_size))
    }

    pub fn from_sources(raw: RawSources, page_size: usize) -> Self {
        let dataset = Dataset::from_sources(raw);
        let spec = ControlSpec::new(dataset.distinct_species(), dataset.year_extent());
        Self {
            dataset: Arc::new(dataset),
            spec: Arc::new(spec),
            page_size: DEFAULT_PAGE_SIZE,
        }
        .with_page_size(page_size)
    }

    /// Same dataset, different table page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn control_spec(&self) -> &ControlSpec {
        &self.spec
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filtered(&self, controls: &ControlState) -> Vec<&EnrichedOccurrence> {
        filter_records(self.dataset.records(), &controls.criteria())
    }

    /// The single recomputation path: filter once, then run each renderer
    /// on the same selection.
    pub fn render(&self, controls: &ControlState, revision: Revision) -> Views {
        let selected = self.filtered(controls);
        debug!(
            revision = revision.0,
            species = controls.species.as_choice(),
            years = %controls.years,
            matching = selected.len(),
            "recomputing views"
        );

        let map = MapRenderer::new(self.dataset.regions()).render(&selected);
        let table = TableRenderer::new(controls.page, self.page_size).render(&selected);
        let chart = ChartRenderer::default().render(&selected);
        let chart_svg = chart.to_svg();

        Views {
            revision,
            controls: ControlState {
                page: table.page,
                ..controls.clone()
            },
            matching: selected.len(),
            map,
            table,
            chart,
            chart_svg,
        }
    }
}

#[cfg(test)]
mod tests {
    use compute::SpeciesSelection;
    use foundation::YearRange;
    use pretty_assertions::assert_eq;

    use crate::controls::{ControlState, DEFAULT_YEARS};
    use crate::frame::Revision;
    use crate::test_support::sample_dashboard;

    #[test]
    fn dataset_is_joined_once_with_cardinality() {
        let dashboard = sample_dashboard();
        let data = dashboard.dataset();
        assert_eq!(data.records().len(), 6);
        assert_eq!(data.join_stats().total, 6);
        assert_eq!(data.join_stats().unmatched_species, 1);
        assert_eq!(data.join_stats().outside_regions, 1);
        assert_eq!(data.year_extent(), Some(YearRange::new(1998, 2012)));
        assert_eq!(data.species_columns().to_vec(), vec!["category".to_string()]);
        assert_eq!(
            dashboard.control_spec().species_choices,
            vec!["all", "Ara macao", "Boa constrictor", "Iguana iguana"]
        );
    }

    #[test]
    fn default_controls_show_every_dated_record() {
        let dashboard = sample_dashboard();
        let state = ControlState::initial(dashboard.control_spec());
        assert_eq!(state.years, DEFAULT_YEARS);
        let views = dashboard.render(&state, Revision::INITIAL);
        // One record has no year and is excluded by the year bounds.
        assert_eq!(views.matching, 5);
        assert_eq!(views.map.markers.len(), 5);
        assert_eq!(views.table.total_rows, 5);
        assert_eq!(views.chart.bars[0].species, "Iguana iguana");
    }

    #[test]
    fn empty_selection_renders_empty_artifacts() {
        let dashboard = sample_dashboard();
        let state = ControlState {
            species: SpeciesSelection::All,
            years: YearRange::new(1801, 1802),
            page: 0,
        };
        let views = dashboard.render(&state, Revision(3));
        assert_eq!(views.revision, Revision(3));
        assert_eq!(views.matching, 0);
        assert!(views.map.markers.is_empty());
        assert!(!views.map.regions.is_empty());
        assert!(views.table.rows.is_empty());
        assert!(views.chart.bars.is_empty());
        assert!(views.chart_svg.contains("No records"));
    }

    #[test]
    fn clones_share_one_dataset() {
        let a = sample_dashboard();
        let b = a.clone();
        assert!(std::ptr::eq(a.dataset(), b.dataset()));

        let c = a.clone().with_page_size(0);
        assert_eq!(c.page_size(), 10);
        assert_eq!(a.page_size(), 2);
        assert!(std::ptr::eq(a.dataset(), c.dataset()));
    }
}
