//! GeoSAM Core - Domain models, ports, and the geospatial pipeline stages
//!
//! This crate contains the bounding-box/session domain types, the port
//! definitions that segmentation and tile adapters implement, and the
//! raster/vector stages: tile mosaic download, mask visualization,
//! mask vectorization, and shapefile archive packaging.

pub mod error;
pub mod export;
pub mod models;
pub mod ports;
pub mod raster;
pub mod tiles;
pub mod vector;

pub use error::{GeosamError, Result};
