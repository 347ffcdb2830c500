//! Download an XYZ tile mosaic for a bounding box and write it as a
//! georeferenced PNG (image plus world-file sidecar).

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{GeosamError, Result};
use crate::models::BoundingBox;
use crate::ports::TileFetcher;
use crate::raster::worldfile::{write_world_file, GeoTransform};
use crate::tiles::{
    global_px_to_lonlat, lonlat_to_global_px, source_url, tile_range, TileCoord, TILE_SIZE,
};

/// A downloaded, cropped, georeferenced tile mosaic on disk.
#[derive(Debug, Clone)]
pub struct MosaicArtifact {
    pub path: PathBuf,
    pub transform: GeoTransform,
    pub width: u32,
    pub height: u32,
}

/// Fetch all tiles covering `bbox` at `zoom` from the named source, stitch
/// them, crop to the box, and write `out` (overwriting any previous file)
/// together with its world file.
///
/// Tiles are fetched sequentially; one run blocks until its mosaic is
/// complete, and a failed tile aborts the whole download.
pub async fn download_tiles(
    fetcher: &dyn TileFetcher,
    source: &str,
    bbox: BoundingBox,
    zoom: u8,
    out: &Path,
) -> Result<MosaicArtifact> {
    let template = source_url(source)?;
    let (xs, ys) = tile_range(&bbox, zoom);
    if xs.is_empty() || ys.is_empty() {
        return Err(GeosamError::EmptyTileRange);
    }

    let cols = xs.end() - xs.start() + 1;
    let rows = ys.end() - ys.start() + 1;
    tracing::info!(
        source = source,
        zoom = zoom,
        tiles = cols * rows,
        west = bbox.west,
        south = bbox.south,
        east = bbox.east,
        north = bbox.north,
        "Downloading tile mosaic"
    );

    let mut mosaic = RgbaImage::new(cols * TILE_SIZE, rows * TILE_SIZE);
    for ty in ys.clone() {
        for tx in xs.clone() {
            let tile = TileCoord::new(tx, ty, zoom);
            let bytes = fetcher.fetch_tile(template, tile).await?;
            let tile_img = image::load_from_memory(&bytes)
                .map_err(|e| GeosamError::TileDownload {
                    z: zoom,
                    x: tx,
                    y: ty,
                    reason: format!("undecodable tile image: {}", e),
                })?
                .to_rgba8();

            let px = i64::from((tx - xs.start()) * TILE_SIZE);
            let py = i64::from((ty - ys.start()) * TILE_SIZE);
            image::imageops::overlay(&mut mosaic, &tile_img, px, py);
        }
    }

    // Crop the tile-aligned mosaic down to the requested box.
    let (west_px, north_px) = lonlat_to_global_px(bbox.west, bbox.north, zoom);
    let (east_px, south_px) = lonlat_to_global_px(bbox.east, bbox.south, zoom);
    let mosaic_origin_x = f64::from(*xs.start() * TILE_SIZE);
    let mosaic_origin_y = f64::from(*ys.start() * TILE_SIZE);

    let crop_x = ((west_px - mosaic_origin_x).floor().max(0.0)) as u32;
    let crop_y = ((north_px - mosaic_origin_y).floor().max(0.0)) as u32;
    let crop_w = (((east_px - west_px).round()) as u32)
        .max(1)
        .min(mosaic.width().saturating_sub(crop_x).max(1));
    let crop_h = (((south_px - north_px).round()) as u32)
        .max(1)
        .min(mosaic.height().saturating_sub(crop_y).max(1));

    let cropped = image::imageops::crop_imm(&mosaic, crop_x, crop_y, crop_w, crop_h).to_image();
    cropped.save(out).map_err(|e| GeosamError::Raster {
        path: out.to_path_buf(),
        reason: format!("failed to write mosaic: {}", e),
    })?;

    // Georeference from the actual crop window, not the requested box, so
    // the transform matches the pixels exactly.
    let gx0 = mosaic_origin_x + f64::from(crop_x);
    let gy0 = mosaic_origin_y + f64::from(crop_y);
    let (lon0, lat0) = global_px_to_lonlat(gx0, gy0, zoom);
    let (lon1, lat1) = global_px_to_lonlat(gx0 + f64::from(crop_w), gy0 + f64::from(crop_h), zoom);

    let transform = GeoTransform {
        origin_lon: lon0,
        origin_lat: lat0,
        px_width: (lon1 - lon0) / f64::from(crop_w),
        px_height: (lat1 - lat0) / f64::from(crop_h),
    };
    write_world_file(out, &transform)?;

    tracing::info!(
        path = %out.display(),
        width = crop_w,
        height = crop_h,
        "Tile mosaic written"
    );

    Ok(MosaicArtifact { path: out.to_path_buf(), transform, width: crop_w, height: crop_h })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    /// Fetcher that serves a flat gray tile for every coordinate.
    struct FlatFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TileFetcher for FlatFetcher {
        async fn fetch_tile(&self, _template: &str, _tile: TileCoord) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let img = RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, image::Rgba([90, 90, 90, 255]));
            let mut buf = Cursor::new(Vec::new());
            image::DynamicImage::ImageRgba8(img)
                .write_to(&mut buf, image::ImageFormat::Png)
                .unwrap();
            Ok(buf.into_inner())
        }
    }

    #[tokio::test]
    async fn test_download_writes_png_and_world_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("satellite.png");
        let fetcher = FlatFetcher { calls: AtomicUsize::new(0) };

        let artifact =
            download_tiles(&fetcher, "Satellite", BoundingBox::default(), 18, &out).await.unwrap();

        assert!(out.exists());
        assert!(crate::raster::world_file_path(&out).exists());
        assert!(fetcher.calls.load(Ordering::SeqCst) >= 1);
        assert!(artifact.width >= 1 && artifact.height >= 1);

        let img = image::open(&out).unwrap().to_rgba8();
        assert_eq!(img.width(), artifact.width);
        assert_eq!(img.height(), artifact.height);

        // Transform must cover (approximately) the requested box.
        let (west, south, east, north) = artifact.transform.extent(artifact.width, artifact.height);
        assert!(west <= 13.38000 + 1e-4 && east >= 13.38320 - 1e-4);
        assert!(south <= 52.46436 + 1e-4 && north >= 52.46720 - 1e-4);
    }

    #[tokio::test]
    async fn test_inverted_bbox_is_a_download_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("satellite.png");
        let fetcher = FlatFetcher { calls: AtomicUsize::new(0) };
        let inverted = BoundingBox::new(13.39, 52.46, 13.38, 52.47);

        let result = download_tiles(&fetcher, "Satellite", inverted, 18, &out).await;
        assert!(matches!(result, Err(GeosamError::EmptyTileRange)));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_second_download_overwrites() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("satellite.png");
        let fetcher = FlatFetcher { calls: AtomicUsize::new(0) };

        download_tiles(&fetcher, "Satellite", BoundingBox::default(), 18, &out).await.unwrap();
        let first_len = std::fs::metadata(&out).unwrap().len();
        download_tiles(&fetcher, "Satellite", BoundingBox::default(), 18, &out).await.unwrap();
        assert_eq!(std::fs::metadata(&out).unwrap().len(), first_len);
    }
}
