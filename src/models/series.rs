// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Derived point series and their chart metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point of a derived series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// The six series produced per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    TotalCases,
    ActiveCases,
    NewCases,
    TotalDeaths,
    RecoveredTotal,
    SevenDayIncidence,
}

impl SeriesKind {
    /// Render order of a run.
    pub const ALL: [SeriesKind; 6] = [
        SeriesKind::TotalCases,
        SeriesKind::ActiveCases,
        SeriesKind::TotalDeaths,
        SeriesKind::SevenDayIncidence,
        SeriesKind::NewCases,
        SeriesKind::RecoveredTotal,
    ];

    /// Chart title for a region.
    pub fn title(self, region_name: &str) -> String {
        match self {
            SeriesKind::TotalCases => {
                format!("Total COVID-19 cases in 'Bezirk {}' (absolute)", region_name)
            }
            SeriesKind::ActiveCases => {
                format!("Active COVID-19 cases in 'Bezirk {}' (absolute)", region_name)
            }
            SeriesKind::NewCases => {
                format!("Daily new COVID-19 cases in 'Bezirk {}' (absolute)", region_name)
            }
            SeriesKind::TotalDeaths => {
                format!("Total COVID-19 deaths in 'Bezirk {}' (absolute)", region_name)
            }
            SeriesKind::RecoveredTotal => format!(
                "Recovered COVID-19 patients in 'Bezirk {}' (absolute)",
                region_name
            ),
            SeriesKind::SevenDayIncidence => {
                format!("COVID-19 7-day-incidence in 'Bezirk {}' (absolute)", region_name)
            }
        }
    }

    /// Title of the value axis.
    pub fn axis_title(self) -> &'static str {
        match self {
            SeriesKind::TotalCases => "COVID-19 cases (absolute)",
            SeriesKind::ActiveCases => "Active COVID-19 cases (absolute)",
            SeriesKind::NewCases => "Daily new cases (absolute)",
            SeriesKind::TotalDeaths => "COVID-19 deaths (absolute)",
            SeriesKind::RecoveredTotal => "COVID-19 recovered count (absolute)",
            SeriesKind::SevenDayIncidence => "7-day-incidence",
        }
    }

    /// Suffix appended to the region name to form the output file name.
    pub fn file_suffix(self) -> &'static str {
        match self {
            SeriesKind::TotalCases => "_cumulated_cases.svg",
            SeriesKind::ActiveCases => "_active_cases.svg",
            SeriesKind::NewCases => "_daily_new_cases.svg",
            SeriesKind::TotalDeaths => "_total_deaths.svg",
            SeriesKind::RecoveredTotal => "_recovered.svg",
            SeriesKind::SevenDayIncidence => "_7_day_incidence.svg",
        }
    }

    /// Output file name for a region.
    pub fn file_name(self, region_name: &str) -> String {
        format!("{}{}", region_name, self.file_suffix())
    }

    /// Short label used in log output.
    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::TotalCases => "total",
            SeriesKind::ActiveCases => "active",
            SeriesKind::NewCases => "daily new cases",
            SeriesKind::TotalDeaths => "deaths",
            SeriesKind::RecoveredTotal => "recovered",
            SeriesKind::SevenDayIncidence => "7d incidence",
        }
    }
}

/// A named, index-aligned sequence of points.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    pub kind: SeriesKind,
    pub points: Vec<SeriesPoint>,
}

impl DerivedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// All six series derived from one record history.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSet {
    pub total_cases: DerivedSeries,
    pub active_cases: DerivedSeries,
    pub new_cases: DerivedSeries,
    pub total_deaths: DerivedSeries,
    pub recovered_total: DerivedSeries,
    pub seven_day_incidence: DerivedSeries,
}

impl SeriesSet {
    pub fn get(&self, kind: SeriesKind) -> &DerivedSeries {
        match kind {
            SeriesKind::TotalCases => &self.total_cases,
            SeriesKind::ActiveCases => &self.active_cases,
            SeriesKind::NewCases => &self.new_cases,
            SeriesKind::TotalDeaths => &self.total_deaths,
            SeriesKind::RecoveredTotal => &self.recovered_total,
            SeriesKind::SevenDayIncidence => &self.seven_day_incidence,
        }
    }

    /// Series in render order.
    pub fn iter(&self) -> impl Iterator<Item = &DerivedSeries> + '_ {
        SeriesKind::ALL.into_iter().map(move |kind| self.get(kind))
    }
}
