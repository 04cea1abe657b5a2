use compute::EnrichedOccurrence;
use compute::analysis::Statistics;
use serde::Serialize;

use crate::labels::escape_markup;
use crate::layer::ViewRenderer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub species: String,
    pub count: usize,
}

/// Occurrence counts per species, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRenderer {
    title: String,
}

impl ChartRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new("Occurrences per species")
    }
}

impl ViewRenderer for ChartRenderer {
    type Artifact = BarChart;

    fn render(&self, records: &[&EnrichedOccurrence]) -> BarChart {
        let bars = Statistics::species_counts(records.iter().copied())
            .into_iter()
            .map(|(species, count)| Bar { species, count })
            .collect();
        BarChart {
            title: self.title.clone(),
            x_label: "Occurrences".to_string(),
            y_label: "Species".to_string(),
            bars,
        }
    }
}

const WIDTH: usize = 680;
const MARGIN_LEFT: usize = 200;
const MARGIN_RIGHT: usize = 40;
const MARGIN_TOP: usize = 40;
const MARGIN_BOTTOM: usize = 40;
const BAR_PITCH: usize = 24;

impl BarChart {
    /// Horizontal bar chart, one row per species, top row = largest count.
    pub fn to_svg(&self) -> String {
        let rows = self.bars.len().max(1);
        let chart_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let chart_height = rows * BAR_PITCH;
        let height = MARGIN_TOP + chart_height + MARGIN_BOTTOM;
        let max_count = self.bars.iter().map(|b| b.count).max().unwrap_or(0).max(1);

        let mut body = String::new();
        for (i, bar) in self.bars.iter().enumerate() {
            let y = MARGIN_TOP + i * BAR_PITCH;
            let w = bar.count as f64 / max_count as f64 * chart_width as f64;
            let label = escape_markup(&bar.species);
            body.push_str(&format!(
                r##"<text x="{}" y="{}" text-anchor="end" font-size="12" fill="#374151">{}</text>"##,
                MARGIN_LEFT - 8,
                y + BAR_PITCH / 2 + 4,
                label
            ));
            body.push_str(&format!(
                r##"<rect x="{}" y="{}" width="{:.1}" height="{}" fill="#1f4e79" opacity="0.85"><title>{}: {}</title></rect>"##,
                MARGIN_LEFT,
                y + 3,
                w,
                BAR_PITCH - 6,
                label,
                bar.count
            ));
            body.push_str(&format!(
                r##"<text x="{:.1}" y="{}" font-size="11" fill="#6b7280">{}</text>"##,
                MARGIN_LEFT as f64 + w + 4.0,
                y + BAR_PITCH / 2 + 4,
                bar.count
            ));
        }
        if self.bars.is_empty() {
            body.push_str(&format!(
                r##"<text x="{}" y="{}" text-anchor="middle" font-size="12" fill="#9ca3af">No records</text>"##,
                MARGIN_LEFT + chart_width / 2,
                MARGIN_TOP + chart_height / 2 + 4
            ));
        }

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" style="background:white">
  <text x="{cx}" y="24" text-anchor="middle" font-size="14" font-weight="600" fill="#374151">{title}</text>
  <line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="#e5e7eb" stroke-width="2"/>
  <line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="#e5e7eb" stroke-width="2"/>
  {body}
  <text x="{cx}" y="{xl}" text-anchor="middle" font-size="12" fill="#6b7280">{x_label}</text>
</svg>"##,
            w = WIDTH,
            h = height,
            cx = WIDTH / 2,
            title = escape_markup(&self.title),
            l = MARGIN_LEFT,
            r = WIDTH - MARGIN_RIGHT,
            t = MARGIN_TOP,
            b = MARGIN_TOP + chart_height,
            body = body,
            xl = height - 12,
            x_label = escape_markup(&self.x_label),
        )
    }
}
