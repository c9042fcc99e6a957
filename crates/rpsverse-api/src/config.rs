//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CLASSIFIER_TIMEOUT_MS: u64 = 10_000;

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// `PostgreSQL` URL. Snapshots are kept in memory when unset.
    pub database_url: Option<String>,
    /// Classifier prediction endpoint. Detection is disabled when unset.
    pub classifier_url: Option<String>,
    /// Per-call classifier deadline.
    pub classifier_timeout: Duration,
    /// Seed for reproducible opponent draws.
    pub rng_seed: Option<u64>,
    /// OTLP collector endpoint for trace export.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let timeout_ms = match var("CLASSIFIER_TIMEOUT_MS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("CLASSIFIER_TIMEOUT_MS must be a whole number: {e}"))
            })?,
            None => DEFAULT_CLASSIFIER_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            return Err(AppError::Config(
                "CLASSIFIER_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }
        let rng_seed = var("RNG_SEED")
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .map_err(|e| AppError::Config(format!("RNG_SEED must be a u64: {e}")))?;

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            database_url: var("DATABASE_URL"),
            classifier_url: var("CLASSIFIER_URL"),
            classifier_timeout: Duration::from_millis(timeout_ms),
            rng_seed,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn listen_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
