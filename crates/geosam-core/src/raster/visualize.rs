//! Mask rendering: colorized overlays and the flat comparison image.

use std::collections::HashMap;
use std::path::Path;

use image::{GrayImage, Rgba, RgbaImage};

use crate::error::{GeosamError, Result};
use crate::raster::colormap::Colormap;

/// Color used for object bounding boxes in the visualization.
pub const BOX_COLOR: [u8; 3] = [255, 0, 0];

/// Blend factor for mask pixels over the source tile.
const BLEND: f64 = 0.5;

fn open_rgba(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)
        .map_err(|e| GeosamError::Raster { path: path.to_path_buf(), reason: e.to_string() })?
        .to_rgba8())
}

fn open_gray(path: &Path) -> Result<GrayImage> {
    Ok(image::open(path)
        .map_err(|e| GeosamError::Raster { path: path.to_path_buf(), reason: e.to_string() })?
        .to_luma8())
}

/// Colorize a mask: background (0) becomes transparent, object values map
/// through the palette scaled by the largest value present.
pub fn colorize_mask(mask: &GrayImage, cmap: Colormap) -> RgbaImage {
    let max_value = mask.pixels().map(|p| p.0[0]).max().unwrap_or(0).max(1);

    let mut out = RgbaImage::new(mask.width(), mask.height());
    for (x, y, px) in mask.enumerate_pixels() {
        let v = px.0[0];
        if v == 0 {
            out.put_pixel(x, y, Rgba([0, 0, 0, 0]));
        } else {
            let [r, g, b] = cmap.sample(f64::from(v) / f64::from(max_value));
            out.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }
    out
}

/// Colorize the mask at `mask_path` for the web map overlay (transparent
/// nodata, palette by mode) and return it as encoded PNG bytes.
pub fn colorized_mask_png(mask_path: &Path, cmap: Colormap) -> Result<Vec<u8>> {
    let mask = open_gray(mask_path)?;
    let colorized = colorize_mask(&mask, cmap);
    encode_png(&colorized, mask_path)
}

/// Render the flat comparison image: mask blended over the tile with the
/// palette, red bounding boxes around each detected object, written as PNG.
pub fn render_overlay(
    tile_path: &Path,
    mask_path: &Path,
    out_path: &Path,
    cmap: Colormap,
) -> Result<()> {
    let tile = open_rgba(tile_path)?;
    let mask = open_gray(mask_path)?;

    if tile.dimensions() != mask.dimensions() {
        return Err(GeosamError::InvalidMask {
            reason: format!(
                "mask is {}x{} but tile is {}x{}",
                mask.width(),
                mask.height(),
                tile.width(),
                tile.height()
            ),
        });
    }

    let colorized = colorize_mask(&mask, cmap);
    let mut canvas = tile;
    for (x, y, px) in colorized.enumerate_pixels() {
        if px.0[3] == 0 {
            continue;
        }
        let base = canvas.get_pixel(x, y).0;
        let blended = [
            blend_channel(base[0], px.0[0]),
            blend_channel(base[1], px.0[1]),
            blend_channel(base[2], px.0[2]),
            255,
        ];
        canvas.put_pixel(x, y, Rgba(blended));
    }

    for bounds in value_bounds(&mask).values() {
        draw_rect(&mut canvas, *bounds, BOX_COLOR);
    }

    canvas.save(out_path).map_err(|e| GeosamError::Raster {
        path: out_path.to_path_buf(),
        reason: format!("failed to write visualization: {}", e),
    })?;

    tracing::debug!(path = %out_path.display(), palette = cmap.name(), "Visualization written");
    Ok(())
}

fn blend_channel(base: u8, over: u8) -> u8 {
    (f64::from(base) * (1.0 - BLEND) + f64::from(over) * BLEND).round() as u8
}

/// Pixel bounding box (min_x, min_y, max_x, max_y) per nonzero mask value.
fn value_bounds(mask: &GrayImage) -> HashMap<u8, (u32, u32, u32, u32)> {
    let mut bounds: HashMap<u8, (u32, u32, u32, u32)> = HashMap::new();
    for (x, y, px) in mask.enumerate_pixels() {
        let v = px.0[0];
        if v == 0 {
            continue;
        }
        let entry = bounds.entry(v).or_insert((x, y, x, y));
        entry.0 = entry.0.min(x);
        entry.1 = entry.1.min(y);
        entry.2 = entry.2.max(x);
        entry.3 = entry.3.max(y);
    }
    bounds
}

fn draw_rect(canvas: &mut RgbaImage, (x0, y0, x1, y1): (u32, u32, u32, u32), color: [u8; 3]) {
    let px = Rgba([color[0], color[1], color[2], 255]);
    for x in x0..=x1.min(canvas.width() - 1) {
        canvas.put_pixel(x, y0, px);
        canvas.put_pixel(x, y1.min(canvas.height() - 1), px);
    }
    for y in y0..=y1.min(canvas.height() - 1) {
        canvas.put_pixel(x0, y, px);
        canvas.put_pixel(x1.min(canvas.width() - 1), y, px);
    }
}

fn encode_png(img: &RgbaImage, origin: &Path) -> Result<Vec<u8>> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| GeosamError::Raster {
            path: origin.to_path_buf(),
            reason: format!("PNG encode failed: {}", e),
        })?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_fixtures(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        let tile_path = dir.join("satellite.png");
        let mask_path = dir.join("masks.png");

        let tile = RgbaImage::from_pixel(32, 32, Rgba([100, 100, 100, 255]));
        tile.save(&tile_path).unwrap();

        let mut mask = GrayImage::new(32, 32);
        for y in 8..16 {
            for x in 8..16 {
                mask.put_pixel(x, y, image::Luma([1]));
            }
        }
        for y in 20..28 {
            for x in 20..28 {
                mask.put_pixel(x, y, image::Luma([2]));
            }
        }
        mask.save(&mask_path).unwrap();

        (tile_path, mask_path)
    }

    #[test]
    fn test_colorize_keeps_background_transparent() {
        let mut mask = GrayImage::new(4, 4);
        mask.put_pixel(1, 1, image::Luma([255]));
        let colorized = colorize_mask(&mask, Colormap::Greens);
        assert_eq!(colorized.get_pixel(0, 0).0[3], 0);
        assert_eq!(colorized.get_pixel(1, 1).0[3], 255);
    }

    #[test]
    fn test_render_overlay_writes_image() {
        let dir = tempdir().unwrap();
        let (tile_path, mask_path) = write_fixtures(dir.path());
        let out = dir.path().join("visualization.png");

        render_overlay(&tile_path, &mask_path, &out, Colormap::Greens).unwrap();

        let vis = image::open(&out).unwrap().to_rgba8();
        assert_eq!(vis.dimensions(), (32, 32));
        // A masked pixel must differ from the flat tile color.
        assert_ne!(vis.get_pixel(12, 12).0, [100, 100, 100, 255]);
        // The bounding box corner is drawn in red.
        assert_eq!(vis.get_pixel(8, 8).0, [255, 0, 0, 255]);
        // Unmasked, un-boxed pixels keep the tile color.
        assert_eq!(vis.get_pixel(2, 2).0, [100, 100, 100, 255]);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let dir = tempdir().unwrap();
        let (tile_path, _) = write_fixtures(dir.path());
        let small_mask = dir.path().join("small.png");
        GrayImage::new(8, 8).save(&small_mask).unwrap();

        let out = dir.path().join("visualization.png");
        let result = render_overlay(&tile_path, &small_mask, &out, Colormap::Viridis);
        assert!(matches!(result, Err(GeosamError::InvalidMask { .. })));
    }

    #[test]
    fn test_colorized_mask_png_round_trips() {
        let dir = tempdir().unwrap();
        let (_, mask_path) = write_fixtures(dir.path());

        let bytes = colorized_mask_png(&mask_path, Colormap::Viridis).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (32, 32));
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
    }
}
