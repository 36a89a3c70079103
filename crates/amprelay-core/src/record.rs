//! Per-request analytics record.

use crate::identity::IdentityToken;

/// Values substituted into the config document. Built per request, consumed
/// once by rendering, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsRecord {
    pub identity: IdentityToken,
    /// Request URL as received (path and query).
    pub requested_url: String,
    pub origin: String,
}

impl AnalyticsRecord {
    pub fn new(identity: IdentityToken, requested_url: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            identity,
            requested_url: requested_url.into(),
            origin: origin.into(),
        }
    }
}
