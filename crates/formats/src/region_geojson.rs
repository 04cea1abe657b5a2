use std::io::Read;
use std::path::Path;

use foundation::{Aabb2, Crs};
use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value};

use crate::error::LoadError;

pub const REGION_PROPERTY: &str = "region";

/// A named socioeconomic zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: Option<String>,
    pub geometry: MultiPolygon<f64>,
    pub bounds: Option<Aabb2>,
}

impl Region {
    pub fn new(name: Option<String>, geometry: MultiPolygon<f64>) -> Self {
        let bounds = geometry
            .bounding_rect()
            .map(|r| Aabb2::new([r.min().x, r.min().y], [r.max().x, r.max().y]));
        Self {
            name,
            geometry,
            bounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionCollection {
    pub crs: Crs,
    pub regions: Vec<Region>,
}

#[derive(Debug)]
pub enum RegionParseError {
    Json(serde_json::Error),
    NotAFeatureCollection,
    CrsMismatch { found: String },
    MissingProperty { index: usize, key: &'static str },
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for RegionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionParseError::Json(e) => write!(f, "JSON parse error: {e}"),
            RegionParseError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            RegionParseError::CrsMismatch { found } => {
                write!(f, "regions use CRS {found}, expected {}", Crs::WGS84)
            }
            RegionParseError::MissingProperty { index, key } => {
                write!(f, "feature at index {index} has no {key:?} property")
            }
            RegionParseError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for RegionParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegionParseError::Json(e) => Some(e),
            _ => None,
        }
    }
}

pub fn read_regions<R: Read>(reader: R, origin: &Path) -> Result<RegionCollection, LoadError> {
    let value: Value = serde_json::from_reader(reader).map_err(|e| LoadError::Regions {
        path: origin.to_path_buf(),
        source: RegionParseError::Json(e),
    })?;
    RegionCollection::from_geojson_value(&value).map_err(|source| LoadError::Regions {
        path: origin.to_path_buf(),
        source,
    })
}

impl RegionCollection {
    pub fn from_geojson_value(value: &Value) -> Result<Self, RegionParseError> {
        let obj = value
            .as_object()
            .ok_or(RegionParseError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(RegionParseError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(RegionParseError::NotAFeatureCollection);
        }

        let crs = match declared_crs(obj) {
            None => Crs::WGS84,
            Some(name) => {
                Crs::from_identifier(&name).ok_or(RegionParseError::CrsMismatch { found: name })?
            }
        };

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(RegionParseError::NotAFeatureCollection)?;

        let mut regions = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let invalid = |reason: String| RegionParseError::InvalidFeature { index, reason };
            let feat_obj = feat_val
                .as_object()
                .ok_or_else(|| invalid("feature must be an object".to_string()))?;

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .ok_or(RegionParseError::MissingProperty {
                    index,
                    key: REGION_PROPERTY,
                })?;
            let name = match properties.get(REGION_PROPERTY) {
                None => {
                    return Err(RegionParseError::MissingProperty {
                        index,
                        key: REGION_PROPERTY,
                    });
                }
                Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => Some(other.to_string()),
            };

            let geometry_val = feat_obj
                .get("geometry")
                .ok_or_else(|| invalid("feature missing geometry".to_string()))?;
            let geometry = parse_area_geometry(geometry_val).map_err(invalid)?;

            regions.push(Region::new(name, geometry));
        }

        Ok(Self { crs, regions })
    }
}

/// Legacy GeoJSON 2008 `crs` member (`{"type":"name","properties":{"name":...}}`).
fn declared_crs(obj: &Map<String, Value>) -> Option<String> {
    obj.get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}

fn parse_area_geometry(value: &Value) -> Result<MultiPolygon<f64>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;
    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => Ok(MultiPolygon::new(vec![parse_polygon(coords)?])),
        "MultiPolygon" => {
            let polys = coords
                .as_array()
                .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
            let mut out = Vec::with_capacity(polys.len());
            for poly in polys {
                out.push(parse_polygon(poly)?);
            }
            Ok(MultiPolygon::new(out))
        }
        other => Err(format!("unsupported region geometry type: {other}")),
    }
}

fn parse_polygon(coords: &Value) -> Result<Polygon<f64>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut parsed = Vec::with_capacity(rings.len());
    for ring in rings {
        parsed.push(parse_ring(ring)?);
    }
    let mut iter = parsed.into_iter();
    let exterior = iter
        .next()
        .ok_or("Polygon must have an exterior ring".to_string())?;
    Ok(Polygon::new(exterior, iter.collect()))
}

fn parse_ring(coords: &Value) -> Result<LineString<f64>, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    if arr.len() < 3 {
        return Err(format!("ring has {} positions, need at least 3", arr.len()));
    }
    let mut out = Vec::with_capacity(arr.len());
    for pos in arr {
        let pair = pos
            .as_array()
            .filter(|p| p.len() >= 2)
            .ok_or("position must be [lon, lat]".to_string())?;
        let x = pair[0].as_f64().ok_or("lon must be a number".to_string())?;
        let y = pair[1].as_f64().ok_or("lat must be a number".to_string())?;
        out.push(Coord { x, y });
    }
    // geo closes rings itself.
    Ok(LineString::new(out))
}

/// GeoJSON geometry object for a region outline.
pub fn multi_polygon_to_geojson(geometry: &MultiPolygon<f64>) -> Value {
    let ring_coords = |ring: &LineString<f64>| {
        Value::Array(
            ring.coords()
                .map(|c| Value::Array(vec![Value::from(c.x), Value::from(c.y)]))
                .collect(),
        )
    };
    let polys = geometry
        .0
        .iter()
        .map(|poly| {
            let mut rings = vec![ring_coords(poly.exterior())];
            rings.extend(poly.interiors().iter().map(ring_coords));
            Value::Array(rings)
        })
        .collect();

    let mut obj = Map::new();
    obj.insert(
        "type".to_string(),
        Value::String("MultiPolygon".to_string()),
    );
    obj.insert("coordinates".to_string(), Value::Array(polys));
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use foundation::Aabb2;
    use serde_json::json;

    use super::{RegionCollection, RegionParseError, multi_polygon_to_geojson, read_regions};
    use crate::error::LoadError;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> serde_json::Value {
        json!([[[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]])
    }

    #[test]
    fn parses_polygons_and_multipolygons() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "region": "Andina" },
                    "geometry": { "type": "Polygon", "coordinates": square(0.0, 0.0, 2.0, 2.0) }
                },
                {
                    "type": "Feature",
                    "properties": { "region": 7 },
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [square(5.0, 5.0, 6.0, 6.0), square(8.0, 8.0, 9.0, 9.0)]
                    }
                },
                {
                    "type": "Feature",
                    "properties": { "region": null },
                    "geometry": { "type": "Polygon", "coordinates": square(-1.0, -1.0, 0.0, 0.0) }
                }
            ]
        });
        let set = RegionCollection::from_geojson_value(&doc).expect("parse");
        assert_eq!(set.regions.len(), 3);
        assert_eq!(set.regions[0].name.as_deref(), Some("Andina"));
        assert_eq!(set.regions[0].bounds, Some(Aabb2::new([0.0, 0.0], [2.0, 2.0])));
        assert_eq!(set.regions[1].name.as_deref(), Some("7"));
        assert_eq!(set.regions[1].geometry.0.len(), 2);
        assert_eq!(set.regions[2].name, None);
    }

    #[test]
    fn missing_region_property_is_fatal() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "name": "Andina" },
                "geometry": { "type": "Polygon", "coordinates": square(0.0, 0.0, 1.0, 1.0) }
            }]
        });
        let err = RegionCollection::from_geojson_value(&doc).unwrap_err();
        assert!(matches!(
            err,
            RegionParseError::MissingProperty {
                index: 0,
                key: "region"
            }
        ));
    }

    #[test]
    fn rejects_projected_crs_and_point_geometry() {
        let doc = json!({
            "type": "FeatureCollection",
            "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::3116" } },
            "features": []
        });
        assert!(matches!(
            RegionCollection::from_geojson_value(&doc),
            Err(RegionParseError::CrsMismatch { .. })
        ));

        let doc = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "region": "Caribe" },
                "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
            }]
        });
        assert!(matches!(
            RegionCollection::from_geojson_value(&doc),
            Err(RegionParseError::InvalidFeature { index: 0, .. })
        ));
    }

    #[test]
    fn read_regions_wraps_json_errors_with_path() {
        let err = read_regions("{ not json".as_bytes(), Path::new("regions.geojson")).unwrap_err();
        match err {
            LoadError::Regions { path, source } => {
                assert_eq!(path, Path::new("regions.geojson"));
                assert!(matches!(source, RegionParseError::Json(_)));
            }
            other => panic!("expected region error, got {other:?}"),
        }
    }

    #[test]
    fn outline_export_keeps_rings() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "region": "Andina" },
                "geometry": { "type": "Polygon", "coordinates": square(0.0, 0.0, 2.0, 2.0) }
            }]
        });
        let set = RegionCollection::from_geojson_value(&doc).expect("parse");
        let out = multi_polygon_to_geojson(&set.regions[0].geometry);
        assert_eq!(out["type"], "MultiPolygon");
        assert_eq!(out["coordinates"][0][0].as_array().map(|r| r.len()), Some(5));
    }
}
