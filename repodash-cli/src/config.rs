//! Configuration module
//!
//! Resolves the API base URL once at startup. The resulting [`Config`] is
//! immutable and passed down to whatever needs it.

use anyhow::{Result, anyhow};
use clap::ValueEnum;
use std::time::Duration;

/// API base used during local development
pub const DEV_API_BASE: &str = "http://localhost:8080/api";

/// API path appended to the serving origin in production
pub const PRODUCTION_API_PATH: &str = "/api";

/// Default quiet period in milliseconds before a typed search fires
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Deployment mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Talk to a backend on the local development port
    #[default]
    Development,
    /// Talk to the backend behind the serving origin
    Production,
}

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL including the `/api` segment
    pub api_base: String,

    /// Deployment mode the base was resolved for
    pub mode: Mode,

    /// Quiet period for debounced search
    pub debounce: Duration,
}

impl Config {
    /// Resolves and validates a configuration
    ///
    /// # Arguments
    /// * `api_url` - Explicit backend URL; `/api` is appended
    /// * `mode` - Deployment mode used when no explicit URL is given
    /// * `origin` - Serving origin, required in production without `api_url`
    /// * `debounce` - Quiet period for debounced search
    pub fn resolve(
        api_url: Option<&str>,
        mode: Mode,
        origin: Option<&str>,
        debounce: Duration,
    ) -> Result<Self> {
        let config = Self {
            api_base: resolve_api_base(api_url, mode, origin)?,
            mode,
            debounce,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            anyhow::bail!("API base URL must start with http:// or https://");
        }

        if self.debounce.is_zero() {
            anyhow::bail!("debounce must be greater than 0");
        }

        Ok(())
    }
}

/// Picks the API base: explicit override, then production origin, then the dev default
fn resolve_api_base(api_url: Option<&str>, mode: Mode, origin: Option<&str>) -> Result<String> {
    if let Some(url) = non_blank(api_url) {
        return Ok(format!("{}/api", url.trim_end_matches('/')));
    }

    match mode {
        Mode::Production => {
            let origin = non_blank(origin).ok_or_else(|| {
                anyhow!("REPODASH_ORIGIN must be set in production when REPODASH_API_URL is not")
            })?;
            Ok(format!(
                "{}{}",
                origin.trim_end_matches('/'),
                PRODUCTION_API_PATH
            ))
        }
        Mode::Development => Ok(DEV_API_BASE.to_string()),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
