use serde::{Deserialize, Serialize};

use crate::crs::GeoPoint;

/// Axis-aligned lon/lat bounding box in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a GeoPoint>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut out = Aabb2::new([first.lon_deg, first.lat_deg], [first.lon_deg, first.lat_deg]);
        for p in iter {
            out.expand(p);
        }
        Some(out)
    }

    pub fn expand(&mut self, p: &GeoPoint) {
        self.min[0] = self.min[0].min(p.lon_deg);
        self.min[1] = self.min[1].min(p.lat_deg);
        self.max[0] = self.max[0].max(p.lon_deg);
        self.max[1] = self.max[1].max(p.lat_deg);
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.lon_deg >= self.min[0]
            && p.lon_deg <= self.max[0]
            && p.lat_deg >= self.min[1]
            && p.lat_deg <= self.max[1]
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2;
    use crate::crs::GeoPoint;

    #[test]
    fn from_points_covers_all_points() {
        let pts = vec![
            GeoPoint::new(-75.0, 4.0),
            GeoPoint::new(-70.5, 1.0),
            GeoPoint::new(-73.0, 11.0),
        ];
        let b = Aabb2::from_points(&pts).unwrap();
        assert_eq!(b.min, [-75.0, 1.0]);
        assert_eq!(b.max, [-70.5, 11.0]);
        assert!(pts.iter().all(|p| b.contains(p)));
        assert!(!b.contains(&GeoPoint::new(-69.0, 4.0)));
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(Aabb2::from_points(&[]).is_none());
    }
}
