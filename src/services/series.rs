// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derivation of chart series from raw statistic records.

use crate::models::{DerivedSeries, SeriesKind, SeriesPoint, SeriesSet, StatisticRecord};

/// Turns a record history into the six chart series.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeriesTransformer;

impl SeriesTransformer {
    /// Derive all series.
    ///
    /// Every series has one point per record, in record order. No sorting,
    /// filtering or deduplication happens here.
    pub fn derive(&self, records: &[StatisticRecord]) -> SeriesSet {
        SeriesSet {
            total_cases: project(records, SeriesKind::TotalCases),
            active_cases: project(records, SeriesKind::ActiveCases),
            new_cases: project(records, SeriesKind::NewCases),
            total_deaths: project(records, SeriesKind::TotalDeaths),
            recovered_total: project(records, SeriesKind::RecoveredTotal),
            seven_day_incidence: project(records, SeriesKind::SevenDayIncidence),
        }
    }
}

/// Value of one record for one series.
fn value_of(record: &StatisticRecord, kind: SeriesKind) -> f64 {
    match kind {
        SeriesKind::TotalCases => record.cases_total,
        SeriesKind::ActiveCases => record.active_cases(),
        SeriesKind::NewCases => record.cases_today,
        SeriesKind::TotalDeaths => record.deaths_total,
        SeriesKind::RecoveredTotal => record.recovered_total,
        SeriesKind::SevenDayIncidence => record.seven_day_incidence,
    }
}

fn project(records: &[StatisticRecord], kind: SeriesKind) -> DerivedSeries {
    DerivedSeries {
        kind,
        points: records
            .iter()
            .map(|record| SeriesPoint {
                date: record.date,
                value: value_of(record, kind),
            })
            .collect(),
    }
}
