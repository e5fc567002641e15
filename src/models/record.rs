// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Daily statistic record for one region.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One day of statistics for one region, as returned by the history endpoint.
///
/// Records are kept in the order the service returns them. That order is
/// assumed to be chronological and is never verified or re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticRecord {
    #[serde(deserialize_with = "crate::time_utils::deserialize_date")]
    pub date: DateTime<Utc>,
    /// Cumulated confirmed cases
    pub cases_total: f64,
    /// Newly confirmed cases on this day
    pub cases_today: f64,
    /// Cumulated deaths
    pub deaths_total: f64,
    /// Cumulated recoveries
    pub recovered_total: f64,
    #[serde(rename = "SevenDayIncidence", alias = "sevenDayIncidence")]
    pub seven_day_incidence: f64,
}

impl StatisticRecord {
    /// Cases neither recovered nor deceased.
    ///
    /// Not clamped: inconsistent upstream data yields negative values.
    pub fn active_cases(&self) -> f64 {
        self.cases_total - self.recovered_total - self.deaths_total
    }
}
