// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored, so the API username
//! and refresh token can live next to the generated charts.

use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Default statistics service endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://www.ebimt.pro/covidApiAustria/";

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    /// Account name used for login and refresh
    pub api_username: String,
    /// Stored refresh token; `None` triggers the interactive login
    pub api_refresh_token: Option<String>,
    /// Base URL of the statistics service
    pub api_base_url: String,
    /// Subsampling stride for chart markers
    pub cut_factor: NonZeroUsize,
    /// Directory the SVG files are written to
    pub output_dir: PathBuf,
    /// Optional chart template overriding the built-in one
    pub chart_template: Option<PathBuf>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_username", &self.api_username)
            .field(
                "api_refresh_token",
                &self.api_refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("cut_factor", &self.cut_factor)
            .field("output_dir", &self.output_dir)
            .field("chart_template", &self.chart_template)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_username = lookup("API_USERNAME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("API_USERNAME"))?;

        let api_refresh_token = lookup("API_REFRESH_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let api_base_url =
            lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let cut_factor = match lookup("CUT_FACTOR") {
            Some(raw) => raw
                .trim()
                .parse::<NonZeroUsize>()
                .map_err(|e| ConfigError::Invalid {
                    name: "CUT_FACTOR",
                    reason: format!("'{}' is not a positive integer ({})", raw, e),
                })?,
            None => NonZeroUsize::MIN,
        };

        Ok(Self {
            api_username,
            api_refresh_token,
            api_base_url,
            cut_factor,
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            chart_template: lookup("CHART_TEMPLATE").map(PathBuf::from),
        })
    }

    /// Config for testing only.
    pub fn test_default() -> Self {
        Self {
            api_username: "tester@example.com".to_string(),
            api_refresh_token: None,
            api_base_url: "http://127.0.0.1:9/".to_string(),
            cut_factor: NonZeroUsize::MIN,
            output_dir: PathBuf::from("."),
            chart_template: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Invalid chart template: {0}")]
    Template(String),
}
