//! Slippy-map tile math and the tile mosaic downloader.
//!
//! Coordinates follow the usual XYZ scheme: at zoom `z` the world is a
//! square of `2^z * 2^z` tiles of 256 px, x growing east, y growing south.

pub mod download;
pub mod fetch;

pub use download::{download_tiles, MosaicArtifact};
pub use fetch::XyzTileFetcher;

use crate::error::{GeosamError, Result};
use crate::models::BoundingBox;

/// Edge length of one tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// One tile address in the XYZ scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }
}

/// Resolve a named basemap source to its XYZ URL template.
pub fn source_url(name: &str) -> Result<&'static str> {
    match name {
        "Satellite" => Ok("https://mt1.google.com/vt/lyrs=s&x={x}&y={y}&z={z}"),
        "OpenStreetMap" => Ok("https://tile.openstreetmap.org/{z}/{x}/{y}.png"),
        _ => Err(GeosamError::UnknownTileSource { name: name.to_string() }),
    }
}

/// Expand an XYZ URL template for one tile.
pub fn tile_url(template: &str, tile: TileCoord) -> String {
    template
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
        .replace("{z}", &tile.z.to_string())
}

/// Project lon/lat (degrees) to global pixel coordinates at the given zoom.
pub fn lonlat_to_global_px(lon: f64, lat: f64, zoom: u8) -> (f64, f64) {
    let world = (TILE_SIZE as f64) * f64::from(1u32 << zoom);
    let x = (lon + 180.0) / 360.0 * world;
    let lat_rad = lat.to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * world;
    (x, y)
}

/// Inverse of [`lonlat_to_global_px`].
pub fn global_px_to_lonlat(x: f64, y: f64, zoom: u8) -> (f64, f64) {
    let world = (TILE_SIZE as f64) * f64::from(1u32 << zoom);
    let lon = x / world * 360.0 - 180.0;
    let lat = (std::f64::consts::PI * (1.0 - 2.0 * y / world)).sinh().atan().to_degrees();
    (lon, lat)
}

/// Inclusive tile ranges covering a bounding box at the given zoom.
///
/// An inverted box yields an empty range; the downloader reports that as
/// [`GeosamError::EmptyTileRange`] rather than validating coordinates
/// up front.
pub fn tile_range(bbox: &BoundingBox, zoom: u8) -> (std::ops::RangeInclusive<u32>, std::ops::RangeInclusive<u32>) {
    let max_tile = (1u32 << zoom) - 1;
    let (west_px, north_px) = lonlat_to_global_px(bbox.west, bbox.north, zoom);
    let (east_px, south_px) = lonlat_to_global_px(bbox.east, bbox.south, zoom);

    let clamp = |px: f64| -> u32 {
        ((px / TILE_SIZE as f64).floor().max(0.0) as u32).min(max_tile)
    };

    (clamp(west_px)..=clamp(east_px), clamp(north_px)..=clamp(south_px))
}
