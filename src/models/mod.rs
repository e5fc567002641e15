// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod chart;
pub mod record;
pub mod region;
pub mod series;
pub mod tokens;

pub use chart::ChartSpec;
pub use record::StatisticRecord;
pub use region::Region;
pub use series::{DerivedSeries, SeriesKind, SeriesPoint, SeriesSet};
pub use tokens::{AcquiredTokens, TokenOrigin, TokenPair};
