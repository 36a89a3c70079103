//! HTTP mapping for `AmpRelayError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use amprelay_core::error::AmpRelayError;

/// Handler error; wraps the core error so it can become a response.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub AmpRelayError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            // AMP runtimes only look at the status; keep the body plain.
            AmpRelayError::InvalidOrigin => {
                return (StatusCode::BAD_REQUEST, "Invalid Origin").into_response();
            }
            AmpRelayError::BadRequest(_) | AmpRelayError::UnsupportedVersion => StatusCode::BAD_REQUEST,
            AmpRelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
