//! The embedded single-page UI.
//!
//! The page drives the whole workflow through the JSON API: pick a
//! bounding box and mode, run, then inspect the results on a Leaflet map
//! with the mask and vector overlays, or in the flat comparison view.

pub const INDEX_HTML: &str = include_str!("ui/index.html");
