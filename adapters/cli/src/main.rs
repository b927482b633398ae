#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays headless Lane Rush sessions.

mod autoplay;
mod report;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use lane_rush_core::GameState;
use lane_rush_headless::{Config, GameLoop, DEFAULT_SEED, DEFAULT_STEP};
use log::{debug, info, warn, LevelFilter};

use self::{autoplay::Autoplay, report::RunSummary};

/// Ten minutes of play at the default step.
const DEFAULT_MAX_TICKS: u64 = 36_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Runs a headless Lane Rush session driven by an autoplay bot.
#[derive(Debug, Parser)]
#[command(name = "lane-rush", version)]
struct Args {
    /// Difficulty preset: easy, hard, or crazy.
    #[arg(long, default_value = "easy")]
    mode: String,

    /// Seed for lane selection and the bot's decisions.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Upper bound on simulated ticks before the run is reported unfinished.
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,

    /// Probability that the bot strikes a note, between 0 and 1.
    #[arg(long, default_value_t = 0.95, value_parser = parse_accuracy)]
    accuracy: f64,

    /// Output format of the final summary.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Raises log verbosity; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_accuracy(value: &str) -> Result<f64, String> {
    let accuracy: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=1.0).contains(&accuracy) {
        Ok(accuracy)
    } else {
        Err(format!("accuracy must lie between 0 and 1, got {accuracy}"))
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Entry point for the Lane Rush command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut game = GameLoop::new(Config::new(DEFAULT_STEP, args.seed));
    game.start(&args.mode)
        .with_context(|| format!("cannot start a session in mode `{}`", args.mode))?;

    let mut bot = Autoplay::new(args.seed.rotate_left(17), args.accuracy);
    while game.state() == GameState::Running && game.ticks() < args.max_ticks {
        game.tick();
        bot.play(&mut game);
        for event in game.drain_events() {
            if let Some(line) = report::describe(&event) {
                debug!("tick {}: {line}", game.ticks());
            }
        }
    }
    if game.state().is_terminal() {
        info!("run finished after {} ticks", game.ticks());
    } else {
        warn!("run stopped unfinished at the {} tick limit", args.max_ticks);
    }

    let summary = RunSummary::capture(&game, args.seed);
    match args.format {
        Format::Text => print!("{}", summary.render_text()),
        Format::Json => {
            let json =
                serde_json::to_string_pretty(&summary).context("failed to encode run summary")?;
            println!("{json}");
        }
    }
    Ok(())
}
