// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod credentials;
pub mod region;
pub mod render;
pub mod series;
pub mod stats_api;

pub use credentials::{CredentialManager, PasswordPrompt, StdinPrompt};
pub use region::RegionResolver;
pub use render::{GraphRenderer, RenderError};
pub use series::SeriesTransformer;
pub use stats_api::StatisticsApiClient;
