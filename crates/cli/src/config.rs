//! Configuration loading and validation for the `pod-crypto` CLI.
//!
//! Values come from `POD_*` environment variables; command-line flags
//! override them.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated CLI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Network name (`testnet`, `mainnet`) or encryption service base URL.
    #[serde(default = "default_network")]
    pub network: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whole-request timeout for the encryption service. Unset means the
    /// transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Values given on the command line; `None` defers to the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub network: Option<String>,
    pub log_level: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

fn default_network() -> String {
    "testnet".into()
}
fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load configuration from the environment, apply `overrides`, and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed or fails validation.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("POD").try_parsing(true))
            .set_override_option("network", overrides.network.clone())
            .context("invalid --network override")?
            .set_override_option("log_level", overrides.log_level.clone())
            .context("invalid --log-level override")?
            .set_override_option("request_timeout_secs", overrides.request_timeout_secs)
            .context("invalid --timeout override")?
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.network.trim().is_empty() {
            anyhow::bail!("POD_NETWORK is required and must not be empty");
        }
        if self.request_timeout_secs == Some(0) {
            anyhow::bail!("POD_REQUEST_TIMEOUT_SECS must be > 0");
        }
        Ok(())
    }
}
