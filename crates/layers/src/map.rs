use compute::EnrichedOccurrence;
use formats::{Region, multi_polygon_to_geojson};
use foundation::Aabb2;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::labels::popup_text;
use crate::layer::ViewRenderer;
use crate::symbology::{AreaStyle, CategoricalPalette, LegendEntry, MarkerStyle};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionFeature {
    pub name: Option<String>,
    pub color: &'static str,
    pub geometry: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lon: f64,
    pub lat: f64,
    pub species: Option<String>,
    pub iucn_category: Option<String>,
    pub region: Option<String>,
    pub year: Option<i32>,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapArtifact {
    pub regions: Vec<RegionFeature>,
    pub markers: Vec<Marker>,
    pub legend: Vec<LegendEntry>,
    pub area_style: AreaStyle,
    pub marker_style: MarkerStyle,
    /// Extent of the markers, for fitting the viewport. `None` when empty.
    pub marker_bounds: Option<Aabb2>,
}

impl MapArtifact {
    /// Single FeatureCollection: region polygons first, then one point per
    /// marker, distinguished by the `layer` property.
    pub fn to_geojson(&self) -> Value {
        let mut features: Vec<Value> = Vec::with_capacity(self.regions.len() + self.markers.len());
        for region in &self.regions {
            features.push(json!({
                "type": "Feature",
                "properties": {
                    "layer": "region",
                    "region": region.name,
                    "fill": region.color,
                    "fill-opacity": self.area_style.fill_opacity,
                    "stroke": self.area_style.stroke_color,
                    "stroke-width": self.area_style.stroke_weight,
                },
                "geometry": region.geometry,
            }));
        }
        for marker in &self.markers {
            features.push(json!({
                "type": "Feature",
                "properties": {
                    "layer": "occurrence",
                    "species": marker.species,
                    "iucnRedListCategory": marker.iucn_category,
                    "region": marker.region,
                    "year": marker.year,
                    "popup": marker.popup,
                    "marker-color": self.marker_style.color,
                },
                "geometry": { "type": "Point", "coordinates": [marker.lon, marker.lat] },
            }));
        }

        let mut root = Map::new();
        root.insert(
            "type".to_string(),
            Value::String("FeatureCollection".to_string()),
        );
        root.insert("features".to_string(), Value::Array(features));
        Value::Object(root)
    }
}

/// Region polygons colored by name plus one marker per record.
#[derive(Debug, Clone)]
pub struct MapRenderer<'a> {
    regions: &'a [Region],
    palette: CategoricalPalette,
    area_style: AreaStyle,
    marker_style: MarkerStyle,
}

impl<'a> MapRenderer<'a> {
    pub fn new(regions: &'a [Region]) -> Self {
        let palette = CategoricalPalette::new(regions.iter().filter_map(|r| r.name.as_deref()));
        Self {
            regions,
            palette,
            area_style: AreaStyle::default(),
            marker_style: MarkerStyle::default(),
        }
    }
}

impl ViewRenderer for MapRenderer<'_> {
    type Artifact = MapArtifact;

    fn render(&self, records: &[&EnrichedOccurrence]) -> MapArtifact {
        let regions = self
            .regions
            .iter()
            .map(|r| RegionFeature {
                name: r.name.clone(),
                color: self.palette.color(r.name.as_deref()),
                geometry: multi_polygon_to_geojson(&r.geometry),
            })
            .collect();

        let markers: Vec<Marker> = records
            .iter()
            .map(|rec| {
                let p = rec.location();
                Marker {
                    lon: p.lon_deg,
                    lat: p.lat_deg,
                    species: rec.species().map(str::to_string),
                    iucn_category: rec.iucn_category().map(str::to_string),
                    region: rec.region().map(str::to_string),
                    year: rec.year(),
                    popup: popup_text(rec),
                }
            })
            .collect();

        let locations: Vec<_> = records.iter().map(|r| r.location()).collect();

        MapArtifact {
            regions,
            markers,
            legend: self.palette.legend(),
            area_style: self.area_style.clone(),
            marker_style: self.marker_style.clone(),
            marker_bounds: Aabb2::from_points(&locations),
        }
    }
}
