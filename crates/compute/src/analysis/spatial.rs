use formats::Region;
use foundation::GeoPoint;
use geo::{Contains, Point};

pub struct SpatialAnalysis;

impl SpatialAnalysis {
    /// First region, in source order, whose interior contains `p`.
    ///
    /// Points on a polygon boundary are not contained. Overlapping regions
    /// resolve to the earliest one.
    pub fn containing_region<'a>(regions: &'a [Region], p: GeoPoint) -> Option<&'a Region> {
        let point = Point::new(p.lon_deg, p.lat_deg);
        regions.iter().find(|region| {
            if let Some(bounds) = region.bounds {
                if !bounds.contains(&p) {
                    return false;
                }
            }
            region.geometry.contains(&point)
        })
    }
}
