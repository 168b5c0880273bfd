//! Strategic deconfliction check for planned UAV missions.
//!
//! Usage:
//!   deconflict check --fleet fleet.json --safety-distance 10
//!   deconflict scenario crossing --dimensions 2
//!   deconflict interactive

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deconflict_cli::{
    log_filter, render_json, render_text, Config, Dimensions, FleetFile, OutputFormat, Prompter,
    ScenarioKind,
};
use deconflict_core::{ConflictDetector, DetectionSettings, Fleet, Point, Point2, Point3};
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Check planned UAV trajectories for loss of separation
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Minimum separation in meters
    #[arg(long, global = true)]
    safety_distance: Option<f64>,

    /// Nominal sampling step in seconds
    #[arg(long, global = true)]
    time_step: Option<f64>,

    /// Waypoint dimensionality: 2 for (x, y, t), 3 for (x, y, z, t)
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(2..=3))]
    dimensions: Option<u8>,

    /// Check aircraft pairs on all cores
    #[arg(long, global = true)]
    parallel: bool,

    /// Also sample the end of each overlap window
    #[arg(long, global = true)]
    sample_end: bool,

    /// Report format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a fleet file
    Check {
        /// JSON fleet file
        #[arg(long)]
        fleet: PathBuf,
    },
    /// Enter drones and waypoints at the prompt
    Interactive,
    /// Run a built-in scenario
    Scenario {
        #[arg(value_enum)]
        name: ScenarioKind,

        /// Number of drones for the random scenario
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Seed for the random scenario
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

impl Args {
    /// Settings given on the command line; unset flags stay `None`.
    fn flag_config(&self) -> Config {
        Config {
            safety_distance_m: self.safety_distance,
            time_step_s: self.time_step,
            dimensions: self.dimensions.and_then(|n| Dimensions::try_from(n).ok()),
            parallel: self.parallel.then_some(true),
            sample_end_boundary: self.sample_end.then_some(true),
        }
    }
}

fn init_tracing(json: bool) {
    let filter = log_filter(env::var("RUST_LOG").ok().as_deref());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let config = args.flag_config().or(Config::from_env());
    match config.dimensions() {
        Dimensions::Planar => run::<Point2>(&args, config),
        Dimensions::Spatial => run::<Point3>(&args, config),
    }
}

fn run<P: Point + Serialize>(args: &Args, config: Config) -> Result<()> {
    let (fleet, config): (Fleet<P>, Config) = match &args.command {
        Command::Check { fleet } => {
            let fleet = FleetFile::load(fleet)
                .and_then(FleetFile::into_fleet::<P>)
                .with_context(|| format!("loading fleet from {}", fleet.display()))?;
            (fleet, config)
        }
        Command::Interactive => {
            let stdin = io::stdin();
            let prompts: Box<dyn Write> = if args.format.prompts_on_stderr() {
                Box::new(io::stderr())
            } else {
                Box::new(io::stdout())
            };
            let session = Prompter::new(stdin.lock(), prompts)
                .run::<P>()
                .context("reading interactive input")?;
            let answered = Config {
                safety_distance_m: Some(session.safety_distance_m),
                time_step_s: Some(session.time_step_s),
                ..Config::default()
            };
            (session.fleet, answered.or(config))
        }
        Command::Scenario { name, count, seed } => {
            let scenario = name.build(*count, *seed);
            tracing::info!("Running scenario '{}'", scenario.name);
            let suggested = Config {
                safety_distance_m: scenario.safety_distance_m,
                time_step_s: scenario.time_step_s,
                ..Config::default()
            };
            (scenario.fleet(), config.or(suggested))
        }
    };

    let settings: DetectionSettings = config
        .detection_settings()
        .context("invalid detection settings")?;
    tracing::info!(
        "Checking {} aircraft in {}D: safety {}m, step {}s",
        fleet.len(),
        P::DIMENSIONS,
        settings.safety_distance_m,
        settings.time_step_s
    );

    let detector = ConflictDetector::new(settings);
    let report = detector.detect(&fleet);

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!(
            "{}",
            render_json(&report, detector.settings(), fleet.len())
                .context("serializing report")?
        ),
    }

    Ok(())
}
