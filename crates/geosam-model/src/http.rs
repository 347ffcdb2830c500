//! HTTP adapter for a remote segmentation inference server.
//!
//! Images and masks cross the wire as base64-encoded PNG inside JSON
//! bodies. Connection and protocol failures carry a remediation hint so
//! the UI error display tells the operator what to check.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use geosam_core::error::{GeosamError, Result};
use geosam_core::models::AutomaticParams;
use geosam_core::ports::{AutomaticSegmenter, PromptSegmenter};

/// Segmentation client against a remote inference server.
pub struct HttpSegmenter {
    /// Base URL of the inference server (e.g. "http://localhost:8500").
    base_url: String,
    client: reqwest::Client,
}

impl HttpSegmenter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), client: reqwest::Client::new() }
    }

    /// Create with the default localhost URL.
    pub fn localhost() -> Self {
        Self::new("http://localhost:8500")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_segment<B: Serialize>(&self, route: &str, body: &B) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, route);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            GeosamError::SegmenterUnavailable {
                reason: format!("Failed to connect to inference server: {}", e),
                remediation: format!(
                    "Ensure the inference server is running at {} and reachable",
                    self.base_url
                ),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeosamError::SegmenterUnavailable {
                reason: format!("Inference server error ({}): {}", status, error_text),
                remediation: "Check the server logs and that the model weights are loaded"
                    .to_string(),
            });
        }

        let segment_response: SegmentResponse =
            response.json().await.map_err(|e| GeosamError::SegmenterUnavailable {
                reason: format!("Failed to parse inference response: {}", e),
                remediation: "Check inference server API compatibility".to_string(),
            })?;

        BASE64.decode(&segment_response.mask).map_err(|e| GeosamError::InvalidMask {
            reason: format!("mask is not valid base64: {}", e),
        })
    }
}

#[async_trait]
impl AutomaticSegmenter for HttpSegmenter {
    async fn generate(&self, image_png: &[u8], params: &AutomaticParams) -> Result<Vec<u8>> {
        let request = AutomaticRequest {
            image: BASE64.encode(image_png),
            model_id: params.model_id.clone(),
            points_per_side: params.points_per_side,
            pred_iou_thresh: params.pred_iou_thresh,
            stability_score_thresh: params.stability_score_thresh,
            foreground: params.foreground,
        };
        self.post_segment("/v1/segment/automatic", &request).await
    }
}

#[async_trait]
impl PromptSegmenter for HttpSegmenter {
    async fn predict(
        &self,
        image_png: &[u8],
        prompt: &str,
        box_threshold: f32,
        text_threshold: f32,
    ) -> Result<Vec<u8>> {
        let request = PromptRequest {
            image: BASE64.encode(image_png),
            prompt: prompt.to_string(),
            box_threshold,
            text_threshold,
        };
        self.post_segment("/v1/segment/prompt", &request).await
    }
}

/// Request body for the automatic variant.
#[derive(Debug, Serialize)]
struct AutomaticRequest {
    image: String,
    model_id: String,
    points_per_side: u32,
    pred_iou_thresh: f32,
    stability_score_thresh: f32,
    foreground: bool,
}

/// Request body for the text-prompt variant.
#[derive(Debug, Serialize)]
struct PromptRequest {
    image: String,
    prompt: String,
    box_threshold: f32,
    text_threshold: f32,
}

/// Response from either segmentation route.
#[derive(Debug, Deserialize)]
struct SegmentResponse {
    /// Base64-encoded grayscale PNG mask.
    mask: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segmenter_creation() {
        let segmenter = HttpSegmenter::localhost();
        assert_eq!(segmenter.base_url(), "http://localhost:8500");

        let custom = HttpSegmenter::new("http://gpu-box:9000");
        assert_eq!(custom.base_url(), "http://gpu-box:9000");
    }

    #[test]
    fn test_automatic_request_serializes_params() {
        let request = AutomaticRequest {
            image: "aGk=".to_string(),
            model_id: "vit_h".to_string(),
            points_per_side: 32,
            pred_iou_thresh: 0.86,
            stability_score_thresh: 0.92,
            foreground: true,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model_id\":\"vit_h\""));
        assert!(json.contains("\"points_per_side\":32"));
    }

    #[test]
    fn test_response_mask_decodes() {
        let response: SegmentResponse =
            serde_json::from_str(r#"{"mask":"bWFzaw=="}"#).unwrap();
        assert_eq!(BASE64.decode(&response.mask).unwrap(), b"mask");
    }
}
