/*
 * Boid Flocking Simulation
 *
 * Command line entry point. `run` advances a flock headlessly and logs
 * summaries; `view` (feature `gui`) opens the interactive window.
 */

use anyhow::{Context, Result};
use boids::{make_rng, Flock, NeighborScan, SimulationParams};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML parameter file; defaults are used for missing keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Number of boids, overriding the config
    #[arg(long)]
    boids: Option<usize>,

    /// Neighbor scan policy: prefix, full or grid
    #[arg(long)]
    neighbor_scan: Option<NeighborScan>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Advance the flock without a window
    Run {
        /// Number of ticks to run
        #[arg(long, default_value_t = 500)]
        ticks: u64,

        /// Log a flock summary every this many ticks
        #[arg(long, default_value_t = 100)]
        report_every: u64,
    },

    /// Open the interactive viewer (requires the `gui` feature)
    View,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::debug!("{args:#?}");

    let params = load_params(&args).context("failed to load parameters")?;

    match args.command {
        Command::Run { ticks, report_every } => run_headless(&params, ticks, report_every),
        Command::View => run_viewer(params),
    }
}

#[cfg(feature = "gui")]
fn run_viewer(params: SimulationParams) -> Result<()> {
    boids::app::run(params)
}

#[cfg(not(feature = "gui"))]
fn run_viewer(_params: SimulationParams) -> Result<()> {
    anyhow::bail!("the viewer is not available, rebuild with `--features gui`")
}

fn load_params(args: &Cli) -> Result<SimulationParams> {
    let mut params = match &args.config {
        Some(file) => SimulationParams::from_file(file)?,
        None => SimulationParams::default(),
    };

    if let Some(seed) = args.seed {
        params.seed = Some(seed);
    }
    if let Some(boids) = args.boids {
        params.num_boids = boids;
    }
    if let Some(scan) = args.neighbor_scan {
        params.neighbor_scan = scan;
    }

    params.validate().context("invalid command line overrides")?;
    Ok(params)
}

fn run_headless(params: &SimulationParams, ticks: u64, report_every: u64) -> Result<()> {
    let mut flock = Flock::from_params(params, make_rng(params.seed));
    log::info!(
        "running {} boids for {ticks} ticks with {} scan",
        flock.len(),
        flock.neighbor_scan()
    );

    let report_every = report_every.max(1);
    for tick in 1..=ticks {
        flock.tick();

        if tick % report_every == 0 || tick == ticks {
            let summary = flock.summary();
            log::info!(
                "tick {:>6}: polarization {:.3}, mean neighbors {:.2}, centroid ({:.1}, {:.1})",
                tick,
                summary.polarization,
                summary.mean_neighbors,
                summary.centroid.x,
                summary.centroid.y
            );
        }
    }

    Ok(())
}
