//! Vector side of the pipeline: mask vectorization and its outputs.

pub mod shp;
pub mod trace;

use std::path::Path;

use geo::{Coord, LineString, Polygon};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoJsonValue};
use image::GrayImage;

use crate::error::{GeosamError, Result};
use crate::raster::worldfile::GeoTransform;
use crate::vector::trace::trace_regions;

/// One vectorized mask region, georeferenced in WGS-84.
#[derive(Debug, Clone)]
pub struct MaskFeature {
    pub value: u8,
    pub polygon: Polygon<f64>,
}

/// Vectorize the mask raster at `mask_path` into polygon features and
/// write them as a shapefile at `out_shp`.
///
/// Both segmentation variants go through this single path; vectorization
/// only needs the mask pixels and the raster's geotransform.
pub fn vectorize_mask(
    mask_path: &Path,
    transform: &GeoTransform,
    out_shp: &Path,
) -> Result<Vec<MaskFeature>> {
    let features = load_mask_features(mask_path, transform)?;
    shp::write_shapefile(&features, out_shp)?;

    tracing::info!(
        path = %out_shp.display(),
        features = features.len(),
        "Mask vectorized"
    );
    Ok(features)
}

/// Read a mask raster from disk and vectorize it without writing output.
pub fn load_mask_features(mask_path: &Path, transform: &GeoTransform) -> Result<Vec<MaskFeature>> {
    let mask = image::open(mask_path)
        .map_err(|e| GeosamError::Raster { path: mask_path.to_path_buf(), reason: e.to_string() })?
        .to_luma8();
    Ok(mask_to_features(&mask, transform))
}

/// Trace the mask and map pixel-corner rings into lon/lat polygons.
pub fn mask_to_features(mask: &GrayImage, transform: &GeoTransform) -> Vec<MaskFeature> {
    trace_regions(mask)
        .into_iter()
        .map(|region| {
            let exterior = ring_to_lonlat(&region.exterior, transform);
            let interiors =
                region.interiors.iter().map(|ring| ring_to_lonlat(ring, transform)).collect();
            MaskFeature { value: region.value, polygon: Polygon::new(exterior, interiors) }
        })
        .collect()
}

fn ring_to_lonlat(ring: &[(f64, f64)], transform: &GeoTransform) -> LineString<f64> {
    LineString::from(
        ring.iter()
            .map(|&(px, py)| {
                let (lon, lat) = transform.pixel_to_lonlat(px, py);
                Coord { x: lon, y: lat }
            })
            .collect::<Vec<_>>(),
    )
}

/// GeoJSON FeatureCollection for the browser map, one feature per region
/// with its mask value as the `value` property.
pub fn to_feature_collection(features: &[MaskFeature]) -> FeatureCollection {
    let features = features
        .iter()
        .map(|f| {
            let mut rings: Vec<Vec<Vec<f64>>> = Vec::with_capacity(1 + f.polygon.interiors().len());
            rings.push(ring_positions(f.polygon.exterior()));
            for hole in f.polygon.interiors() {
                rings.push(ring_positions(hole));
            }

            let mut properties = JsonObject::new();
            properties.insert("value".to_string(), serde_json::json!(f.value));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(GeoJsonValue::Polygon(rings))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection { bbox: None, features, foreign_members: None }
}

fn ring_positions(ring: &LineString<f64>) -> Vec<Vec<f64>> {
    ring.coords().map(|c| vec![c.x, c.y]).collect()
}
