use std::collections::BTreeMap;

use serde::Serialize;

/// Twelve-class qualitative palette (ColorBrewer Set3).
pub const SET3: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

pub const UNNAMED_COLOR: &str = "#bdbdbd";

/// Maps category names to palette colors by sorted name order, cycling when
/// there are more names than colors.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalPalette {
    colors: BTreeMap<String, &'static str>,
}

impl CategoricalPalette {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut sorted: Vec<&str> = names.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        let colors = sorted
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), SET3[i % SET3.len()]))
            .collect();
        Self { colors }
    }

    pub fn color(&self, name: Option<&str>) -> &'static str {
        name.and_then(|n| self.colors.get(n).copied())
            .unwrap_or(UNNAMED_COLOR)
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.colors
            .iter()
            .map(|(name, color)| LegendEntry {
                label: name.clone(),
                color: color.to_string(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaStyle {
    pub fill_opacity: f32,
    pub stroke_color: &'static str,
    pub stroke_weight: f32,
}

impl Default for AreaStyle {
    fn default() -> Self {
        Self {
            fill_opacity: 0.5,
            stroke_color: "#555555",
            stroke_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub radius_px: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: "#1f4e79",
            radius_px: 5.0,
        }
    }
}
