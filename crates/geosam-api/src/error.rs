use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into(), details: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into(), details: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.message, details: self.details };
        (self.status, Json(body)).into_response()
    }
}

impl From<geosam_core::GeosamError> for ApiError {
    fn from(err: geosam_core::GeosamError) -> Self {
        use geosam_core::GeosamError;
        match &err {
            GeosamError::ArtifactMissing { .. } => {
                Self::not_found("Artifact not found").with_details(err.to_string())
            }
            GeosamError::UnknownTileSource { .. } | GeosamError::EmptyTileRange => {
                Self::bad_request("Tile download rejected").with_details(err.to_string())
            }
            GeosamError::SegmenterUnavailable { .. } => {
                Self::internal("Segmentation backend failed").with_details(err.to_string())
            }
            GeosamError::TileDownload { .. } => {
                Self::internal("Tile download failed").with_details(err.to_string())
            }
            _ => Self::internal("Internal error").with_details(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geosam_core::GeosamError;

    #[test]
    fn test_missing_artifact_maps_to_404() {
        let err: ApiError =
            GeosamError::ArtifactMissing { path: "masks.png".into() }.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_empty_tile_range_maps_to_400() {
        let err: ApiError = GeosamError::EmptyTileRange.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
