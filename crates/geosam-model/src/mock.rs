//! Deterministic in-process adapters for development and testing.
//!
//! These stand in for the remote inference server and the tile servers so
//! the whole pipeline runs offline with reproducible output.

use std::io::Cursor;

use async_trait::async_trait;
use image::{GenericImageView, GrayImage, Luma, Rgba, RgbaImage};

use geosam_core::error::{GeosamError, Result};
use geosam_core::models::AutomaticParams;
use geosam_core::ports::{AutomaticSegmenter, PromptSegmenter, TileFetcher};
use geosam_core::tiles::{TileCoord, TILE_SIZE};

/// Deterministic segmenter: fixed rectangular objects scaled to the image.
#[derive(Debug, Clone, Default)]
pub struct MockSegmenter;

impl MockSegmenter {
    pub fn new() -> Self {
        Self
    }

    fn decode_dimensions(image_png: &[u8]) -> Result<(u32, u32)> {
        let img = image::load_from_memory(image_png).map_err(|e| GeosamError::InvalidMask {
            reason: format!("input image is not decodable: {}", e),
        })?;
        Ok((img.width(), img.height()))
    }

    fn encode(mask: GrayImage) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageLuma8(mask)
            .write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| GeosamError::InvalidMask {
                reason: format!("mask encode failed: {}", e),
            })?;
        Ok(buf.into_inner())
    }

    fn fill_rect(mask: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
        for y in y0..y1.min(mask.height()) {
            for x in x0..x1.min(mask.width()) {
                mask.put_pixel(x, y, Luma([value]));
            }
        }
    }
}

#[async_trait]
impl AutomaticSegmenter for MockSegmenter {
    /// Three fixed objects in the upper-left, center, and lower-right
    /// quadrants, values 1..=3.
    async fn generate(&self, image_png: &[u8], _params: &AutomaticParams) -> Result<Vec<u8>> {
        let (w, h) = Self::decode_dimensions(image_png)?;
        let mut mask = GrayImage::new(w, h);

        Self::fill_rect(&mut mask, w / 8, h / 8, w / 4, h / 4, 1);
        Self::fill_rect(&mut mask, 3 * w / 8, 3 * h / 8, 5 * w / 8, 5 * h / 8, 2);
        Self::fill_rect(&mut mask, 3 * w / 4, 3 * h / 4, 7 * w / 8, 7 * h / 8, 3);

        Self::encode(mask)
    }
}

#[async_trait]
impl PromptSegmenter for MockSegmenter {
    /// One centered object; lower thresholds grow the matched region.
    async fn predict(
        &self,
        image_png: &[u8],
        _prompt: &str,
        box_threshold: f32,
        _text_threshold: f32,
    ) -> Result<Vec<u8>> {
        let (w, h) = Self::decode_dimensions(image_png)?;
        let mut mask = GrayImage::new(w, h);

        let shrink = (f64::from(box_threshold.clamp(0.0, 1.0)) * 0.5).min(0.45);
        let x0 = (f64::from(w) * (0.25 + shrink / 2.0)) as u32;
        let y0 = (f64::from(h) * (0.25 + shrink / 2.0)) as u32;
        let x1 = (f64::from(w) * (0.75 - shrink / 2.0)) as u32;
        let y1 = (f64::from(h) * (0.75 - shrink / 2.0)) as u32;
        Self::fill_rect(&mut mask, x0, y0, x1.max(x0 + 1), y1.max(y0 + 1), 255);

        Self::encode(mask)
    }
}

/// Tile fetcher that serves flat gray tiles without touching the network.
#[derive(Debug, Clone, Default)]
pub struct MockTileFetcher;

impl MockTileFetcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TileFetcher for MockTileFetcher {
    async fn fetch_tile(&self, _url_template: &str, tile: TileCoord) -> Result<Vec<u8>> {
        // Shade by tile coordinate so stitching seams are visible in tests.
        let shade = 80 + ((tile.x + tile.y) % 4) as u8 * 20;
        let img = RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, Rgba([shade, shade, shade, 255]));

        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| GeosamError::TileDownload {
                z: tile.z,
                x: tile.x,
                y: tile.y,
                reason: format!("mock tile encode failed: {}", e),
            })?;
        Ok(buf.into_inner())
    }
}
