mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the process configuration once at startup.
///
/// `CONFIG_PATH` must point at an existing YAML file when set. Without it,
/// `config.yaml` in the working directory is used if present, otherwise the
/// built-in defaults. Environment variables are applied on top.
pub async fn load() -> Result<Config> {
    let config = match env::var("CONFIG_PATH") {
        Ok(path) => from_file(&path).await?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => from_file(DEFAULT_CONFIG_PATH).await?,
        Err(_) => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(config, |key| env::var(key).ok())
}

pub async fn from_file(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path).await?;
    from_yaml(&config_str)
}

pub fn from_yaml(yaml: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to a struct with defaults.
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

/// Overlays environment variables onto `config`. `lookup` is `std::env::var`
/// in production and a map in tests.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("GEMINI_API_KEY") {
        config.gemini.api_key = Some(key);
    }
    if let Some(base_url) = lookup("GEMINI_BASE_URL") {
        config.gemini.base_url = base_url;
    }
    if let Some(model) = lookup("GEMINI_MODEL") {
        config.gemini.model = model;
    }
    if let Some(timeout) = lookup("GEMINI_TIMEOUT_MS") {
        config.gemini.timeout_ms = timeout
            .parse()
            .map_err(|_| Error::config(format!("Invalid GEMINI_TIMEOUT_MS: '{}'", timeout)))?;
    }
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT: '{}'", port)))?;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.server.logs.level = level;
    }

    // Blank keys are treated as missing so the request path reports them.
    if !config.gemini.has_api_key() {
        config.gemini.api_key = None;
    }

    if config.gemini.timeout_ms == 0 {
        return Err(Error::config("gemini.timeout_ms must be greater than zero"));
    }

    Ok(config)
}
