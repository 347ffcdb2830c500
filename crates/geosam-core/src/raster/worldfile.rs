//! ESRI world-file georeferencing for the PNG artifacts.
//!
//! A world file carries six lines: pixel width, two rotation terms (always
//! zero here), pixel height (negative), and the coordinates of the *center*
//! of the top-left pixel. [`GeoTransform`] stores the top-left *corner*
//! instead, which is what the vectorizer needs for pixel-edge rings.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GeosamError, Result};

/// Affine pixel→lon/lat mapping (axis-aligned, no rotation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    /// Longitude of the top-left corner of the top-left pixel.
    pub origin_lon: f64,
    /// Latitude of the top-left corner of the top-left pixel.
    pub origin_lat: f64,
    /// Degrees of longitude per pixel (positive).
    pub px_width: f64,
    /// Degrees of latitude per pixel (negative, rows grow south).
    pub px_height: f64,
}

impl GeoTransform {
    /// Map pixel coordinates (corner-based, fractional allowed) to lon/lat.
    pub fn pixel_to_lonlat(&self, px: f64, py: f64) -> (f64, f64) {
        (self.origin_lon + px * self.px_width, self.origin_lat + py * self.px_height)
    }

    /// Geographic extent of a `width` x `height` raster under this
    /// transform, as (west, south, east, north).
    pub fn extent(&self, width: u32, height: u32) -> (f64, f64, f64, f64) {
        let (east, south) = self.pixel_to_lonlat(f64::from(width), f64::from(height));
        (self.origin_lon, south, east, self.origin_lat)
    }
}

/// World-file sidecar path for a raster (`.pgw` next to the `.png`).
pub fn world_file_path(raster: &Path) -> PathBuf {
    raster.with_extension("pgw")
}

/// Write the world file for a raster.
pub fn write_world_file(raster: &Path, transform: &GeoTransform) -> Result<()> {
    let path = world_file_path(raster);
    let content = format!(
        "{}\n0.0\n0.0\n{}\n{}\n{}\n",
        transform.px_width,
        transform.px_height,
        transform.origin_lon + transform.px_width / 2.0,
        transform.origin_lat + transform.px_height / 2.0,
    );
    fs::write(&path, content)?;
    Ok(())
}

/// Read a raster's world file back into a [`GeoTransform`].
pub fn read_world_file(raster: &Path) -> Result<GeoTransform> {
    let path = world_file_path(raster);
    let content = fs::read_to_string(&path).map_err(|_| GeosamError::WorldFile {
        path: path.clone(),
        reason: "missing world file".to_string(),
    })?;

    let values: Vec<f64> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| {
            l.parse::<f64>().map_err(|e| GeosamError::WorldFile {
                path: path.clone(),
                reason: format!("bad line '{}': {}", l, e),
            })
        })
        .collect::<Result<_>>()?;

    if values.len() != 6 {
        return Err(GeosamError::WorldFile {
            path,
            reason: format!("expected 6 lines, found {}", values.len()),
        });
    }

    let px_width = values[0];
    let px_height = values[3];
    Ok(GeoTransform {
        // World files reference the pixel center; shift back to the corner.
        origin_lon: values[4] - px_width / 2.0,
        origin_lat: values[5] - px_height / 2.0,
        px_width,
        px_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_transform() -> GeoTransform {
        GeoTransform {
            origin_lon: 13.38,
            origin_lat: 52.4672,
            px_width: 1e-5,
            px_height: -1e-5,
        }
    }

    #[test]
    fn test_pixel_mapping() {
        let t = sample_transform();
        let (lon, lat) = t.pixel_to_lonlat(0.0, 0.0);
        assert_eq!((lon, lat), (13.38, 52.4672));
        let (lon, lat) = t.pixel_to_lonlat(100.0, 200.0);
        assert!((lon - 13.381).abs() < 1e-12);
        assert!((lat - 52.4652).abs() < 1e-12);
    }

    #[test]
    fn test_extent_orientation() {
        let t = sample_transform();
        let (west, south, east, north) = t.extent(320, 284);
        assert!(west < east);
        assert!(south < north);
        assert_eq!(west, t.origin_lon);
        assert_eq!(north, t.origin_lat);
    }

    #[test]
    fn test_world_file_round_trip() {
        let dir = tempdir().unwrap();
        let raster = dir.path().join("satellite.png");
        let t = sample_transform();

        write_world_file(&raster, &t).unwrap();
        let back = read_world_file(&raster).unwrap();

        assert!((back.origin_lon - t.origin_lon).abs() < 1e-12);
        assert!((back.origin_lat - t.origin_lat).abs() < 1e-12);
        assert!((back.px_width - t.px_width).abs() < 1e-15);
        assert!((back.px_height - t.px_height).abs() < 1e-15);
    }

    #[test]
    fn test_missing_world_file() {
        let dir = tempdir().unwrap();
        let raster = dir.path().join("nothing.png");
        assert!(matches!(read_world_file(&raster), Err(GeosamError::WorldFile { .. })));
    }
}
