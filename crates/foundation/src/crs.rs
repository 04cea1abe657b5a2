use serde::{Deserialize, Serialize};

/// Coordinate reference system tag.
///
/// Only geographic WGS84 is used for ingest; the tag travels with point
/// collections so a mismatched source can be rejected instead of silently
/// joined.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Crs {
    pub epsg: u32,
    pub name: &'static str,
}

impl Crs {
    pub const WGS84: Crs = Crs {
        epsg: 4326,
        name: "WGS 84",
    };

    /// Accepts the spellings GeoJSON producers emit for WGS84 lon/lat.
    pub fn from_identifier(raw: &str) -> Option<Crs> {
        let id = raw.trim().to_ascii_uppercase();
        let wgs84 = [
            "EPSG:4326",
            "URN:OGC:DEF:CRS:EPSG::4326",
            "URN:OGC:DEF:CRS:OGC:1.3:CRS84",
            "URN:OGC:DEF:CRS:OGC::CRS84",
            "OGC:CRS84",
            "CRS84",
        ];
        if wgs84.contains(&id.as_str()) {
            Some(Crs::WGS84)
        } else {
            None
        }
    }
}

impl Default for Crs {
    fn default() -> Self {
        Crs::WGS84
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{} ({})", self.epsg, self.name)
    }
}

/// A lon/lat position in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    /// Validated constructor for WGS84 decimal degrees.
    pub fn wgs84(lon_deg: f64, lat_deg: f64) -> Result<Self, String> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return Err(format!("non-finite coordinate ({lon_deg}, {lat_deg})"));
        }
        if !(-180.0..=180.0).contains(&lon_deg) {
            return Err(format!("longitude {lon_deg} outside [-180, 180]"));
        }
        if !(-90.0..=90.0).contains(&lat_deg) {
            return Err(format!("latitude {lat_deg} outside [-90, 90]"));
        }
        Ok(Self { lon_deg, lat_deg })
    }
}
