pub mod config;
pub mod error;

pub use config::{CitiesConfig, Config, ValidationResult, WeatherConfig};
pub use error::ConfigError;

use anyhow::Result;

/// Initialize logging. Output goes to stderr so stdout stays free for the forecast table.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("hourcast core initialized");
    Ok(())
}
