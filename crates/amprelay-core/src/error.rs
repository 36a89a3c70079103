//! Shared error type across amprelay crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Request is not an authorized AMP context.
    InvalidOrigin,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidOrigin => "INVALID_ORIGIN",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AmpRelayError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum AmpRelayError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("Invalid Origin")]
    InvalidOrigin,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl AmpRelayError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            AmpRelayError::BadRequest(_) => ClientCode::BadRequest,
            AmpRelayError::InvalidOrigin => ClientCode::InvalidOrigin,
            AmpRelayError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            AmpRelayError::Internal(_) => ClientCode::Internal,
        }
    }
}
