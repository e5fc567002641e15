// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bezirk-Charts command line tool
//!
//! Generates SVG charts with the COVID-19 statistics of one Bezirk.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use bezirk_charts::{config::Config, error::AppError, services::StdinPrompt, Pipeline};
use clap::{error::ErrorKind, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Render COVID-19 statistics charts for an Austrian Bezirk.
#[derive(Debug, Parser)]
#[command(name = "bezirk-charts", version)]
struct Cli {
    /// Name of the Bezirk (county) for graph generation
    region: String,

    /// Directory for the generated SVG files [env: OUTPUT_DIR]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Only every n-th data point is drawn with a marker [env: CUT_FACTOR]
    #[arg(long)]
    cut_factor: Option<NonZeroUsize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(1);
        }
    };

    init_logging();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Run failed");
            eprintln!("!! {}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env()?;
    tracing::debug!(config = ?config, "Configuration loaded");

    let mut pipeline = Pipeline::new(config)?;
    if let Some(output_dir) = cli.output_dir {
        pipeline.set_output_dir(output_dir);
    }
    if let Some(cut_factor) = cli.cut_factor {
        pipeline.set_cut_factor(cut_factor);
    }

    let tokens = pipeline.authenticate(StdinPrompt).await?;
    if tokens.refresh_token_issued() {
        // Emitted right away so a later failure does not lose it.
        println!("API_REFRESH_TOKEN={}", tokens.pair.refresh_token);
    }

    let report = pipeline.generate(&cli.region, tokens).await?;
    tracing::info!(
        bezirk = %report.region.name,
        records = report.records,
        charts = report.artifacts.len(),
        "All graphs written"
    );
    Ok(())
}

/// Initialize logging on stderr; `LOG_FORMAT=json` selects structured JSON.
fn init_logging() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bezirk_charts=info,warn")),
        )
        .with(json_layer)
        .with(text_layer)
        .init();
}
