//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use treasury_rates::DEFAULT_BASE_URL;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TREASURY_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Base URL of the Fiscal Data API, without the dataset path
    pub treasury_api_url: String,
    pub treasury_timeout: Duration,
    /// OTLP collector; span export is off when unset
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number: {}", e))?,
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let treasury_api_url =
            lookup("TREASURY_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("TREASURY_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("TREASURY_TIMEOUT_SECS must be whole seconds: {}", e))?,
            None => DEFAULT_TREASURY_TIMEOUT_SECS,
        };

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty());

        Ok(Self {
            port,
            database_url,
            treasury_api_url,
            treasury_timeout: Duration::from_secs(timeout_secs),
            otlp_endpoint,
        })
    }
}
