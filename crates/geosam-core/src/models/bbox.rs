//! Geographic bounding box in WGS-84 degrees.

use serde::{Deserialize, Serialize};

/// Rectangular geographic extent, west/south/east/north in degrees.
///
/// Ordering (`west < east`, `south < north`) is deliberately not enforced
/// before use; an inverted box surfaces as a downloader error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self { west, south, east, north }
    }

    /// Build from a `[west, south, east, north]` array (the wire format).
    pub fn from_array(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    /// Center point as (lon, lat).
    pub fn center(&self) -> (f64, f64) {
        ((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }

    /// True when the coordinate ordering is sane. Callers may surface this
    /// as a warning; the pipeline itself does not gate on it.
    pub fn is_ordered(&self) -> bool {
        self.west < self.east && self.south < self.north
    }
}

impl Default for BoundingBox {
    /// The default extent shown by the UI (a block in Berlin-Steglitz).
    fn default() -> Self {
        Self::new(13.38000, 52.46436, 13.38320, 52.46720)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_round_trip() {
        let bbox = BoundingBox::default();
        assert_eq!(BoundingBox::from_array(bbox.to_array()), bbox);
    }

    #[test]
    fn test_center() {
        let bbox = BoundingBox::new(10.0, 50.0, 12.0, 52.0);
        assert_eq!(bbox.center(), (11.0, 51.0));
    }

    #[test]
    fn test_ordering() {
        assert!(BoundingBox::default().is_ordered());
        assert!(!BoundingBox::new(12.0, 50.0, 10.0, 52.0).is_ordered());
        assert!(!BoundingBox::new(10.0, 52.0, 12.0, 50.0).is_ordered());
    }

    #[test]
    fn test_serde() {
        let bbox = BoundingBox::default();
        let json = serde_json::to_string(&bbox).unwrap();
        assert!(json.contains("west"));
        let parsed: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bbox);
    }
}
