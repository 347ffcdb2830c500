//! GeoSAM Model - Segmentation engine adapters
//!
//! Implementations of the segmentation ports defined in `geosam-core`:
//! an HTTP adapter against a remote inference server, and deterministic
//! in-process mocks for development and testing.

pub mod http;
pub mod mock;

pub use http::HttpSegmenter;
pub use mock::{MockSegmenter, MockTileFetcher};
