mod fetch;
mod output;
mod settings;

use crate::fetch::{FetchPlan, Fetcher};
use crate::settings::Settings;
use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{LevelFilter, info, warn};
use nhl_api::client::NhlApi;
use nhl_api::{Batch, enrich};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nhlpbp", version)]
#[command(about = "Fetch and enrich NHL play-by-play", long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace). Overrides NHLPBP_LOG.
    #[arg(long, global = true, value_parser = parse_level)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download teams, rosters, schedules, play-by-play and shifts into a snapshot
    Fetch {
        /// First season start year (2023 = 2023-24)
        #[arg(long)]
        from: u16,

        /// Last season start year, inclusive
        #[arg(long)]
        to: u16,

        /// Restrict to these team abbreviations (repeatable); default is every team
        #[arg(long = "team")]
        teams: Vec<String>,

        /// Snapshot file to write
        #[arg(long)]
        out: PathBuf,

        /// Also enrich the snapshot and write NDJSON here
        #[arg(long)]
        enrich: Option<PathBuf>,

        /// Keep preseason games
        #[arg(long, default_value = "false")]
        include_preseason: bool,

        /// Concurrent requests. Overrides NHLPBP_CONCURRENCY.
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Enrich a snapshot and write one JSON event per line
    Enrich {
        /// Snapshot written by `fetch`
        snapshot: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write exclusions and data warnings as JSON here
        #[arg(long)]
        diagnostics: Option<PathBuf>,
    },
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse().map_err(|_| format!("unknown log level {raw:?}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    better_panic::install();

    let cli = Cli::parse();
    let concurrency = match &cli.command {
        Commands::Fetch { concurrency, .. } => *concurrency,
        Commands::Enrich { .. } => None,
    };
    let settings = Settings::load()
        .with_log_level(cli.log_level)
        .with_concurrency(concurrency);

    env_logger::Builder::new()
        .filter_level(settings.log_level)
        .format_timestamp_secs()
        .init();

    match cli.command {
        Commands::Fetch {
            from,
            to,
            teams,
            out,
            enrich: enriched_out,
            include_preseason,
            ..
        } => {
            let plan = FetchPlan {
                from,
                to,
                teams,
                include_preseason,
            };
            let batch = run_fetch(&settings, &plan).await?;
            output::write_json(&out, &batch)?;
            info!("snapshot written to {}", out.display());
            if let Some(path) = enriched_out {
                run_enrich(&batch, Some(&path), None)?;
            }
        }
        Commands::Enrich {
            snapshot,
            out,
            diagnostics,
        } => {
            let batch = output::read_snapshot(&snapshot)?;
            run_enrich(&batch, out.as_deref(), diagnostics.as_deref())?;
        }
    }
    Ok(())
}

async fn run_fetch(settings: &Settings, plan: &FetchPlan) -> anyhow::Result<Batch> {
    anyhow::ensure!(
        plan.from <= plan.to,
        "--from {} is after --to {}",
        plan.from,
        plan.to
    );
    let client = NhlApi::with_base_urls(&settings.api_web, &settings.api_stats);
    let fetcher = Fetcher::new(client, settings.fetch_concurrency);
    fetcher.run(plan).await.context("fetching from the NHL API")
}

fn run_enrich(batch: &Batch, out: Option<&Path>, diagnostics: Option<&Path>) -> anyhow::Result<()> {
    let result = enrich(batch);
    let written = output::write_ndjson(&result.events, output::open_output(out)?)?;

    let d = &result.diagnostics;
    if d.is_clean() {
        info!("{written} events written");
    } else {
        warn!(
            "{written} events written; {} records excluded, {} data warnings",
            d.exclusions.len(),
            d.warnings.len()
        );
    }
    if let Some(path) = diagnostics {
        output::write_json(path, d)?;
    }
    Ok(())
}
