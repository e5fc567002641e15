// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Every variant is terminal for a run: nothing is retried, and `main`
//! reports the error and exits non-zero.

use crate::config::ConfigError;
use crate::services::render::RenderError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Statistics API error: {0}")]
    Api(String),

    #[error("Bezirk with name '{0}' can't be found")]
    NotFound(String),

    #[error("Chart rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl AppError {
    /// Short machine-friendly name of the error kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Auth(_) => "auth",
            AppError::Api(_) => "api",
            AppError::NotFound(_) => "not_found",
            AppError::Render(_) => "render",
        }
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
