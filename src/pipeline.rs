// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One run: authenticate, resolve the Bezirk, fetch its history and write
//! the six charts.
//!
//! Stages run strictly in sequence and the first failure ends the run.
//! Charts written before a failing render stay on disk.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::models::{AcquiredTokens, ChartSpec, Region, SeriesKind};
use crate::services::{
    CredentialManager, GraphRenderer, PasswordPrompt, RegionResolver, SeriesTransformer,
    StatisticsApiClient,
};

/// A chart written by a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: SeriesKind,
    pub path: PathBuf,
    /// Points in the full series
    pub points: usize,
    /// Points drawn with a marker
    pub markers: usize,
    /// Configuration the chart was drawn from
    pub spec: ChartSpec,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub region: Region,
    pub tokens: AcquiredTokens,
    pub records: usize,
    pub artifacts: Vec<Artifact>,
}

/// Wires the client, renderer and configuration together for a run.
pub struct Pipeline {
    config: Config,
    client: StatisticsApiClient,
    renderer: GraphRenderer,
}

impl Pipeline {
    /// Build a pipeline, loading the chart template from the configuration.
    pub fn new(config: Config) -> Result<Self> {
        let template = match &config.chart_template {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading chart template");
                ChartSpec::load_from_file(path)?
            }
            None => ChartSpec::builtin()?,
        };

        Ok(Self::with_template(config, template))
    }

    pub fn with_template(config: Config, template: ChartSpec) -> Self {
        Self {
            client: StatisticsApiClient::new(config.api_base_url.clone()),
            renderer: GraphRenderer::new(template),
            config,
        }
    }

    /// Override the marker stride for this pipeline.
    pub fn set_cut_factor(&mut self, cut_factor: NonZeroUsize) {
        self.config.cut_factor = cut_factor;
    }

    /// Override the output directory for this pipeline.
    pub fn set_output_dir(&mut self, output_dir: PathBuf) {
        self.config.output_dir = output_dir;
    }

    /// Execute one run for the named region.
    pub async fn run<P: PasswordPrompt>(
        &self,
        region_name: &str,
        prompt: P,
    ) -> Result<RunReport> {
        let tokens = self.authenticate(prompt).await?;
        self.generate(region_name, tokens).await
    }

    /// Check connectivity and obtain a token pair.
    ///
    /// Logs in interactively when no refresh token is configured.
    pub async fn authenticate<P: PasswordPrompt>(
        &self,
        prompt: P,
    ) -> Result<AcquiredTokens> {
        let info = self.client.info().await?;
        tracing::debug!(base_url = %self.client.base_url(), info = %info, "Statistics API reachable");
        tracing::info!(username = %self.config.api_username, "API username");

        let mut credentials =
            CredentialManager::new(&self.client, self.config.api_username.clone(), prompt);
        credentials
            .acquire_tokens(self.config.api_refresh_token.as_deref())
            .await
    }

    /// Resolve the region, fetch its history and write all charts.
    pub async fn generate(
        &self,
        region_name: &str,
        tokens: AcquiredTokens,
    ) -> Result<RunReport> {
        let access_token = tokens.pair.access_token.as_str();

        let regions = self.client.list_regions(access_token).await?;
        tracing::debug!(count = regions.len(), "Bezirke fetched");

        let region = RegionResolver.resolve(&regions, region_name)?.clone();
        tracing::info!(gkz = %region.identifier, name = %region.name, "Bezirk resolved");

        let records = self
            .client
            .fetch_history(access_token, &region.identifier)
            .await?;
        tracing::info!(count = records.len(), "Statistic entries fetched");

        let series = SeriesTransformer.derive(&records);

        let mut artifacts: Vec<Artifact> = Vec::with_capacity(SeriesKind::ALL.len());
        for derived in series.iter() {
            let kind = derived.kind;
            let path = self.config.output_dir.join(kind.file_name(&region.name));

            let rendered = self
                .renderer
                .render(
                    &kind.title(&region.name),
                    kind.axis_title(),
                    derived,
                    self.config.cut_factor,
                    &path,
                )
                .await;

            match rendered {
                Ok(spec) => {
                    tracing::info!(path = %path.display(), "{} graph written", kind.label());
                    artifacts.push(Artifact {
                        kind,
                        path,
                        points: spec.full_series().len(),
                        markers: spec.markers().len(),
                        spec,
                    });
                }
                Err(e) => {
                    let written: Vec<String> = artifacts
                        .iter()
                        .map(|a| a.path.display().to_string())
                        .collect();
                    tracing::error!(
                        error = %e,
                        failed = %path.display(),
                        written = ?written,
                        "Error while writing SVG graph, aborting"
                    );
                    return Err(e.into());
                }
            }
        }

        Ok(RunReport {
            region,
            tokens,
            records: records.len(),
            artifacts,
        })
    }
}
