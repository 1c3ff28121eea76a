#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Trophy Chase headlessly from a map file.

mod config;
mod script;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use trophy_chase_system_bootstrap::Bootstrap;
use trophy_chase_system_session::{Outcome, Session};

use config::GameConfig;
use script::InputScript;

/// Command-line arguments of the headless runner.
#[derive(Debug, Parser)]
#[command(author, version, about = "Headless Trophy Chase runner", long_about = None)]
struct Args {
    /// Map file, one text row per line.
    map: PathBuf,

    /// Optional TOML file with level and session tunables.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated time per frame, in milliseconds.
    #[arg(long, default_value_t = 250)]
    frame_ms: u64,

    /// Number of frames to simulate; defaults to the script length.
    #[arg(long)]
    frames: Option<usize>,

    /// Keys held per frame: R, L, U, D, or `.` for none.
    #[arg(short, long, default_value = "")]
    input: String,

    /// Log filter directives; overrides `RUST_LOG`.
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_filter.as_deref())?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let layout = fs::read_to_string(&args.map)
        .with_context(|| format!("failed to read map file {}", args.map.display()))?;
    let script = InputScript::parse(&args.input).context("invalid input script")?;
    let frames = args.frames.unwrap_or_else(|| script.len());
    let dt = Duration::from_millis(args.frame_ms);

    let mut session = Session::new(&layout, config.level_settings(), config.session_rules());
    let bootstrap = Bootstrap;
    println!("{}", bootstrap.welcome_banner(session.world()));
    let summary = bootstrap.level_summary(session.world());
    info!(
        columns = summary.columns,
        rows = summary.rows,
        bonuses = summary.bonuses,
        pursuers = summary.pursuers,
        "level ready"
    );

    for frame in 0..frames {
        let report = session.advance(dt, script.keys(frame));
        for event in &report.events {
            debug!(frame, ?event);
        }
        if report.player_just_hit {
            info!(frame, lives = session.lives(), "ouch");
        }
        if report.bonus_just_collected {
            info!(frame, score = session.score(), "trophy");
        }
        if session.outcome() != Outcome::Playing {
            break;
        }
    }

    println!(
        "outcome: {:?}, score: {}, lives: {}",
        session.outcome(),
        session.score(),
        session.lives()
    );
    Ok(())
}

fn init_tracing(directives: Option<&str>) -> Result<()> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter {directives:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!(error))
}
