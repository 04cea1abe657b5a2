use compute::EnrichedOccurrence;
use serde::Serialize;

use crate::layer::ViewRenderer;

pub const TABLE_COLUMNS: [&str; 4] = ["species", "eventDate", "iucnRedListCategory", "region"];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub species: String,
    pub event_date: String,
    pub iucn_category: String,
    pub region: String,
}

/// One page of the occurrence listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePage {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    /// 0-based page index actually served.
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub page_count: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TableRenderer {
    page: usize,
    page_size: usize,
}

impl TableRenderer {
    /// A zero page size falls back to the default.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl ViewRenderer for TableRenderer {
    type Artifact = TablePage;

    /// Requested pages past the end clamp to the last page.
    fn render(&self, records: &[&EnrichedOccurrence]) -> TablePage {
        let total_rows = records.len();
        let page_count = total_rows.div_ceil(self.page_size);
        let page = self.page.min(page_count.saturating_sub(1));

        let rows = records
            .iter()
            .skip(page * self.page_size)
            .take(self.page_size)
            .map(|rec| TableRow {
                species: rec.species().unwrap_or_default().to_string(),
                event_date: rec.event_date().unwrap_or_default().to_string(),
                iucn_category: rec.iucn_category().unwrap_or_default().to_string(),
                region: rec.region().unwrap_or_default().to_string(),
            })
            .collect();

        TablePage {
            columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
            page,
            page_size: self.page_size,
            total_rows,
            page_count,
        }
    }
}
