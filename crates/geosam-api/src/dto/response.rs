use serde::Serialize;

use geosam_core::models::RunRecord;

/// Session snapshot: either the input screen or a finished run.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub results: Option<RunRecord>,
    pub map_visible: bool,
}

/// Reset confirmation.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

impl ResetResponse {
    pub fn done() -> Self {
        Self { success: true, message: "Session reset to the input screen".to_string() }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "geosam-api" }
    }
}
