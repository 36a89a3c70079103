//! Relay config loader (strict parsing).

pub mod schema;

use std::fs;

use amprelay_core::error::{AmpRelayError, Result};

pub use schema::{AmpCacheSection, GatewayConfig, GatewaySection, PublisherSection};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "AMPRELAY_CONFIG";
/// Config file used when `AMPRELAY_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "amprelay.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| AmpRelayError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| AmpRelayError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config path from the environment.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
