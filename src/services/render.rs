// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SVG chart rendering.
//!
//! Each render binds a series into a fresh copy of the chart template,
//! draws it with the plotters SVG backend and writes the document out.
//! The full series is drawn as a line; markers are drawn only at the
//! subsampled points.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::models::chart::{FULL_SERIES_BINDING, MARKER_BINDING};
use crate::models::{ChartSpec, DerivedSeries, SeriesPoint};
use crate::time_utils::{format_axis_label, to_axis_value};

/// Headroom added above and below the plotted values.
const VALUE_PADDING: f64 = 0.05;

/// Renders derived series into SVG files.
#[derive(Debug, Clone)]
pub struct GraphRenderer {
    template: ChartSpec,
}

impl GraphRenderer {
    pub fn new(template: ChartSpec) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &ChartSpec {
        &self.template
    }

    /// Bind a series into a fresh copy of the template.
    pub fn bind(
        &self,
        title: &str,
        axis_title: &str,
        series: &DerivedSeries,
        cut_factor: NonZeroUsize,
    ) -> Result<ChartSpec, RenderError> {
        let mut spec = self.template.clone();

        if spec.data.len() <= MARKER_BINDING {
            return Err(RenderError::Template(format!(
                "expected at least {} data bindings, found {}",
                MARKER_BINDING + 1,
                spec.data.len()
            )));
        }

        let value_axis = spec
            .axes
            .first_mut()
            .ok_or_else(|| RenderError::Template("template defines no axes".to_string()))?;
        value_axis.title = axis_title.to_string();

        spec.title.text = title.to_string();
        spec.data[FULL_SERIES_BINDING].values = series.points.clone();
        spec.data[MARKER_BINDING].values = subsample(&series.points, cut_factor);

        Ok(spec)
    }

    /// Bind, synthesize and write one chart to `destination`.
    ///
    /// Returns the bound configuration that was drawn.
    pub async fn render(
        &self,
        title: &str,
        axis_title: &str,
        series: &DerivedSeries,
        cut_factor: NonZeroUsize,
        destination: &Path,
    ) -> Result<ChartSpec, RenderError> {
        let spec = self.bind(title, axis_title, series, cut_factor)?;
        let svg = synthesize(&spec)?;

        tokio::fs::write(destination, svg)
            .await
            .map_err(|e| RenderError::Write {
                path: destination.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            path = %destination.display(),
            points = spec.full_series().len(),
            markers = spec.markers().len(),
            "Chart written"
        );
        Ok(spec)
    }
}

/// Every `cut_factor`-th point, starting with the first.
///
/// A factor of 1 keeps the series unchanged; 5 points with a factor of 2
/// keep indices 0, 2 and 4.
pub fn subsample(points: &[SeriesPoint], cut_factor: NonZeroUsize) -> Vec<SeriesPoint> {
    points.iter().step_by(cut_factor.get()).copied().collect()
}

/// Draw a bound chart configuration as an SVG document.
pub fn synthesize(spec: &ChartSpec) -> Result<String, RenderError> {
    let background = parse_hex_color(&spec.background)?;
    let line_color = parse_hex_color(&spec.line.color)?;
    let point_color = parse_hex_color(&spec.points.color)?;

    let value_axis = spec.axes.first().map(|a| a.title.as_str()).unwrap_or_default();
    let date_axis = spec.axes.get(1).map(|a| a.title.as_str()).unwrap_or_default();

    let full = spec.full_series();
    let markers = spec.markers();
    let (x_range, y_range) = axis_ranges(full.iter().chain(markers));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (spec.width, spec.height)).into_drawing_area();
        root.fill(&background).map_err(synthesis_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title.text, ("sans-serif", spec.title.font_size))
            .margin(spec.margin)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(synthesis_error)?;

        chart
            .configure_mesh()
            .x_desc(date_axis)
            .y_desc(value_axis)
            .x_labels(6)
            .x_label_formatter(&|x| format_axis_label(*x))
            .draw()
            .map_err(synthesis_error)?;

        chart
            .draw_series(LineSeries::new(
                full.iter().map(to_xy),
                line_color.stroke_width(spec.line.width),
            ))
            .map_err(synthesis_error)?;

        let marker_style = point_color.filled();
        chart
            .draw_series(
                markers
                    .iter()
                    .map(|p| Circle::new(to_xy(p), spec.points.radius, marker_style)),
            )
            .map_err(synthesis_error)?;

        root.present().map_err(synthesis_error)?;
    }

    Ok(svg)
}

fn to_xy(point: &SeriesPoint) -> (f64, f64) {
    (to_axis_value(point.date), point.value)
}

/// Plot ranges covering all points; never empty or zero-width.
fn axis_ranges<'p>(points: impl Iterator<Item = &'p SeriesPoint>) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    // The value axis always includes zero.
    let mut y_min: f64 = 0.0;
    let mut y_max: f64 = 0.0;

    for (x, y) in points.map(to_xy) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !x_min.is_finite() {
        x_min = 0.0;
        x_max = 1.0;
    } else if x_max <= x_min {
        x_min -= 1.0;
        x_max += 1.0;
    }

    if y_max <= y_min {
        y_max = y_min + 1.0;
    }
    let pad = (y_max - y_min) * VALUE_PADDING;
    let y_min = if y_min < 0.0 { y_min - pad } else { y_min };

    (x_min..x_max, y_min..y_max + pad)
}

/// Parse `#rrggbb`.
fn parse_hex_color(raw: &str) -> Result<RGBColor, RenderError> {
    let invalid = || RenderError::Template(format!("invalid color '{}', expected #rrggbb", raw));

    let hex = raw.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn synthesis_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Synthesis(err.to_string())
}

/// Errors from chart rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Chart template is not usable: {0}")]
    Template(String),

    #[error("SVG synthesis failed: {0}")]
    Synthesis(String),

    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },
}
