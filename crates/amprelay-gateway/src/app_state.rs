//! Shared application state for the relay gateway.
//!
//! Everything here is built once at startup and read-only afterwards; the
//! only mutation on the request path is metric counters.

use std::sync::Arc;

use amprelay_core::document::ConfigTemplate;
use amprelay_core::error::Result;
use amprelay_core::identity::{RandomTokenGenerator, TokenGenerator};
use amprelay_core::origin::OriginPolicy;

use crate::config::GatewayConfig;
use crate::obs::RelayMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<RelayMetrics>,
}

struct AppStateInner {
    origins: OriginPolicy,
    template: ConfigTemplate,
    tokens: Arc<dyn TokenGenerator>,
}

impl AppState {
    /// Build application state with the default PRNG token generator.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        Self::with_token_generator(cfg, Arc::new(RandomTokenGenerator))
    }

    pub fn with_token_generator(cfg: GatewayConfig, tokens: Arc<dyn TokenGenerator>) -> Result<Self> {
        cfg.validate()?;

        let origins = OriginPolicy::new(&cfg.publisher.domain, &cfg.amp_cache.domain);
        let template = ConfigTemplate::new(origins.publisher_origin());

        tracing::info!(
            publisher = %origins.publisher_origin(),
            amp_cache = %origins.amp_cache_origin(),
            "origin policy compiled"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { origins, template, tokens }),
            metrics: Arc::new(RelayMetrics::default()),
        })
    }

    pub fn origins(&self) -> &OriginPolicy {
        &self.inner.origins
    }

    pub fn template(&self) -> &ConfigTemplate {
        &self.inner.template
    }

    pub fn tokens(&self) -> &dyn TokenGenerator {
        self.inner.tokens.as_ref()
    }

    pub fn metrics(&self) -> Arc<RelayMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }
}
