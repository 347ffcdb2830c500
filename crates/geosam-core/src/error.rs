//! Error types for GeoSAM

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeosamError {
    // Tile download errors
    #[error("Unknown tile source: {name}")]
    UnknownTileSource { name: String },

    #[error("Tile download failed for z{z}/x{x}/y{y}: {reason}")]
    TileDownload { z: u8, x: u32, y: u32, reason: String },

    #[error("Bounding box produced an empty tile range")]
    EmptyTileRange,

    // Segmentation errors
    #[error("Segmentation backend unavailable: {reason}. Try: {remediation}")]
    SegmenterUnavailable { reason: String, remediation: String },

    #[error("Segmentation produced an unusable mask: {reason}")]
    InvalidMask { reason: String },

    // Raster errors
    #[error("Raster error at {}: {reason}", path.display())]
    Raster { path: PathBuf, reason: String },

    #[error("Malformed world file at {}: {reason}", path.display())]
    WorldFile { path: PathBuf, reason: String },

    // Vector errors
    #[error("Shapefile write failed at {}: {reason}", path.display())]
    ShapefileWrite { path: PathBuf, reason: String },

    // Export errors
    #[error("Artifact not found at {}", path.display())]
    ArtifactMissing { path: PathBuf },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, GeosamError>;
