//! HTTP tile fetcher against XYZ basemap servers.

use async_trait::async_trait;

use crate::error::{GeosamError, Result};
use crate::ports::TileFetcher;
use crate::tiles::{tile_url, TileCoord};

/// Fetches tiles from an XYZ tile server over HTTPS.
pub struct XyzTileFetcher {
    client: reqwest::Client,
}

impl XyzTileFetcher {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl Default for XyzTileFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TileFetcher for XyzTileFetcher {
    async fn fetch_tile(&self, url_template: &str, tile: TileCoord) -> Result<Vec<u8>> {
        let url = tile_url(url_template, tile);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, "geosam/0.1")
            .send()
            .await
            .map_err(|e| GeosamError::TileDownload {
                z: tile.z,
                x: tile.x,
                y: tile.y,
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(GeosamError::TileDownload {
                z: tile.z,
                x: tile.x,
                y: tile.y,
                reason: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| GeosamError::TileDownload {
            z: tile.z,
            x: tile.x,
            y: tile.y,
            reason: e.to_string(),
        })?;

        Ok(bytes.to_vec())
    }
}
