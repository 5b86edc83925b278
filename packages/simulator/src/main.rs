//! Werewolf simulator CLI - plays batches of all-computer games in memory.
//!
//! Prints one JSON line per finished game on stdout; diagnostics go through
//! tracing on stderr.

mod output;
mod simulator;

use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use output::OutputWriter;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use werewolf::domain::roles::Team;

#[derive(Parser)]
#[command(name = "werewolf-simulator")]
#[command(about = "Plays all-computer Werewolf games headless and reports the outcomes")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; game N uses seed + N - 1
    #[arg(long)]
    seed: Option<u64>,

    /// Decision maker for every computer seat
    #[arg(long, default_value = "random")]
    ai: AiType,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show the summary after the run
    #[arg(long)]
    show_output: bool,

    /// Emit diagnostics as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AiType {
    Random,
    Silent,
}

impl AiType {
    fn name(self) -> &'static str {
        match self {
            AiType::Random => werewolf::ai::RandomDecider::NAME,
            AiType::Silent => werewolf::ai::SilentDecider::NAME,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    werewolf::telemetry::init_tracing(filter, args.json_logs);

    info!(games = args.games, ai = args.ai.name(), "Starting simulator");

    let simulator = Simulator::new(args.ai.name());
    let mut output = OutputWriter::stdout();

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game in 1..=args.games {
        let seed = match args.seed {
            Some(base) => base.wrapping_add(u64::from(game - 1)),
            None => rand::random(),
        };

        match simulator.simulate_game(game, seed).await {
            Ok(result) => {
                if let Err(e) = output.write_game(&result) {
                    warn!(game, error = %e, "Failed to write result");
                }
                if args.verbose {
                    info!(
                        game,
                        seed,
                        winner = ?result.winner,
                        days = result.days,
                        ms = result.duration_ms,
                        "Game completed"
                    );
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(game, seed, error = %e, "Game failed");
            }
        }
    }

    output.finish()?;

    if args.show_output {
        log_summary(&results, errors, start.elapsed(), args.games);
    }

    Ok(())
}

fn log_summary(results: &[GameResult], errors: u32, elapsed: Duration, total: u32) {
    let good = results
        .iter()
        .filter(|r| r.winner == Some(Team::Good))
        .count();
    let bad = results
        .iter()
        .filter(|r| r.winner == Some(Team::Bad))
        .count();
    let avg_days = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| f64::from(r.days)).sum::<f64>() / results.len() as f64
    };
    let fallbacks: usize = results.iter().map(|r| r.fallbacks).sum();

    info!(
        completed = results.len(),
        total,
        errors,
        elapsed_ms = elapsed.as_millis() as u64,
        "Simulation finished"
    );
    info!(good_wins = good, bad_wins = bad, avg_days, fallbacks, "Results by team");
}
