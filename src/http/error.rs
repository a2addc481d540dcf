//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AstroError;

/// Error response body. The `detail` shape is the wire contract the
/// frontend already speaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description
    pub detail: String,
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Computation-layer failure (geocoding, parsing, root finding)
    Computation(AstroError),
    /// Anything else: task join failures, serialization surprises
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = match self {
            AppError::Computation(e) => e.to_string(),
            AppError::Internal(msg) => msg,
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { detail }),
        )
            .into_response()
    }
}

impl From<AstroError> for AppError {
    fn from(err: AstroError) -> Self {
        AppError::Computation(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            detail: "could not resolve location for Atlantis".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["detail"].as_str().unwrap().contains("Atlantis"));
    }

    #[test]
    fn test_astro_error_converts() {
        let err: AppError = AstroError::NoRootInSearchWindow("window".to_string()).into();
        assert!(matches!(err, AppError::Computation(_)));
    }
}
