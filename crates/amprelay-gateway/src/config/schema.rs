use std::net::SocketAddr;

use serde::Deserialize;
use amprelay_core::error::{AmpRelayError, Result};
use amprelay_core::origin::{DEFAULT_AMP_CACHE_DOMAIN, DEFAULT_PUBLISHER_DOMAIN};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub publisher: PublisherSection,

    #[serde(default)]
    pub amp_cache: AmpCacheSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AmpRelayError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        validate_domain("publisher.domain", &self.publisher.domain)?;
        validate_domain("amp_cache.domain", &self.amp_cache.domain)?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            AmpRelayError::BadRequest(format!(
                "gateway.listen must be a valid socket address, got {:?}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// The site whose AMP pages embed the analytics config.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublisherSection {
    #[serde(default = "default_publisher_domain")]
    pub domain: String,
}

impl Default for PublisherSection {
    fn default() -> Self {
        Self { domain: default_publisher_domain() }
    }
}

fn default_publisher_domain() -> String {
    DEFAULT_PUBLISHER_DOMAIN.into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmpCacheSection {
    #[serde(default = "default_amp_cache_domain")]
    pub domain: String,
}

impl Default for AmpCacheSection {
    fn default() -> Self {
        Self { domain: default_amp_cache_domain() }
    }
}

fn default_amp_cache_domain() -> String {
    DEFAULT_AMP_CACHE_DOMAIN.into()
}

/// Bare host (optionally with port): origins are derived by prefixing a scheme.
fn validate_domain(field: &str, domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(AmpRelayError::BadRequest(format!("{field} must not be empty")));
    }
    if domain.contains("://") {
        return Err(AmpRelayError::BadRequest(format!(
            "{field} must be a bare domain without scheme: {domain}"
        )));
    }
    let bad = |c: char| matches!(c, '/' | '?' | '#' | '@') || !c.is_ascii_graphic();
    if domain.chars().any(bad) {
        return Err(AmpRelayError::BadRequest(format!(
            "{field} contains invalid characters: {domain:?}"
        )));
    }
    Ok(())
}
