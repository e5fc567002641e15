// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Chart configuration template.
//!
//! The template is a JSON document. Rendering only ever touches the title
//! text, the value axis title and the two data bindings, on a fresh clone.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::ConfigError;
use crate::models::SeriesPoint;

/// Built-in template used when no `CHART_TEMPLATE` is configured.
const DEFAULT_TEMPLATE: &str = include_str!("../../assets/chart_definition.json");

/// Index of the binding holding the full series (drawn as a line).
pub const FULL_SERIES_BINDING: usize = 0;
/// Index of the binding holding the subsampled series (drawn as markers).
pub const MARKER_BINDING: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_margin")]
    pub margin: u32,
    #[serde(default = "default_background")]
    pub background: String,
    pub title: ChartTitle,
    /// `axes[0]` is the value (y) axis.
    pub axes: Vec<ChartAxis>,
    /// `data[0]` is the full series, `data[1]` the marker subset.
    pub data: Vec<ChartData>,
    pub line: LineStyle,
    pub points: PointStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTitle {
    pub text: String,
    #[serde(default = "default_title_size")]
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAxis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub name: String,
    #[serde(default)]
    pub values: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub color: String,
    pub radius: u32,
}

fn default_margin() -> u32 {
    20
}

fn default_background() -> String {
    "#ffffff".to_string()
}

fn default_title_size() -> u32 {
    18
}

impl ChartSpec {
    /// The template shipped with the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_TEMPLATE)
    }

    /// Load a template from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::Template(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Template(e.to_string()))
    }

    /// Points bound to the full-series data binding.
    pub fn full_series(&self) -> &[SeriesPoint] {
        self.data
            .get(FULL_SERIES_BINDING)
            .map(|d| d.values.as_slice())
            .unwrap_or_default()
    }

    /// Points bound to the marker data binding.
    pub fn markers(&self) -> &[SeriesPoint] {
        self.data
            .get(MARKER_BINDING)
            .map(|d| d.values.as_slice())
            .unwrap_or_default()
    }
}
