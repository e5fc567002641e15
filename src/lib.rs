// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Bezirk-Charts: COVID-19 statistics charts for Austrian districts
//!
//! This crate fetches the statistic history of one Bezirk from the
//! statistics API and renders the derived case, death, recovery and
//! incidence series as SVG charts.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod time_utils;

pub use pipeline::{Artifact, Pipeline, RunReport};
