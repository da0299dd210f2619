use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};
use vision_proxy::{config, server};

/// Builds the log filter. A parseable `RUST_LOG` wins; otherwise the
/// configured `server.logs.level` applies and must name a plain level.
fn log_filter(rust_log: Option<&str>, configured_level: &str) -> Result<EnvFilter> {
    if let Some(filter) = rust_log.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return Ok(filter);
    }

    let level: LevelFilter = configured_level.parse().with_context(|| {
        format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            configured_level
        )
    })?;

    Ok(EnvFilter::new(level.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()
        .await
        .context("Failed to load configuration")?;

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(rust_log.as_deref(), &config.server.logs.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    info!(
        model = %config.gemini.model,
        timeout_ms = config.gemini.timeout_ms,
        "Starting vision proxy"
    );

    server::run(config).await?;

    Ok(())
}
