//! Strictly Boards - Unified CLI
//!
//! Snapshot inspection and live turn countdowns.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use std::sync::Arc;
use strictly_boards::{
    Backgammon, BoardGame, BoardsConfig, Checkers, Chess, Countdown, GameBoard, Snapshot,
    TimerGate, TimerSignal,
};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BoardsConfig::from_file(path)?,
        None => BoardsConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging().filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Inspect { snapshot, side } => run_inspect(&snapshot, &side),
        Command::Countdown => run_countdown(&config).await,
    }
}

/// Print every origin with its legal destinations.
#[instrument(fields(path = %path.display()))]
fn run_inspect(path: &Path, side: &str) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_json(&json)?;
    info!(version = snapshot.version, game = %snapshot.board.kind(), "Inspecting snapshot");

    match snapshot.board {
        GameBoard::Chess(board) => {
            report::<Chess>(&board, side)?;
            for color in [strictly_chess::Color::White, strictly_chess::Color::Black] {
                println!(
                    "{} in check: {}",
                    color,
                    strictly_chess::is_in_check(&board, color)
                );
            }
            Ok(())
        }
        GameBoard::Checkers(board) => report::<Checkers>(&board, side),
        GameBoard::Backgammon(position) => {
            match &position.dice {
                Some(dice) => println!("dice: {:?} remaining {:?}", dice.dice(), dice.available_moves()),
                None => println!("dice: not rolled"),
            }
            report::<Backgammon>(&position, side)
        }
    }
}

fn report<G: BoardGame>(board: &G::Board, side_name: &str) -> Result<()> {
    let side = G::parse_side(side_name)
        .ok_or_else(|| anyhow!("Unknown {} side: {}", G::KIND, side_name))?;
    println!("{} moves for {}:", G::KIND, side);

    let mut total = 0;
    for origin in G::origins(board, side) {
        let destinations = G::destinations(board, origin, side);
        if destinations.is_empty() {
            continue;
        }
        total += destinations.len();
        let list: Vec<String> = destinations.iter().map(ToString::to_string).collect();
        println!("  {} -> {}", origin, list.join(", "));
    }
    println!("{} moves", total);
    Ok(())
}

/// Run one turn countdown to expiry.
#[instrument(skip(config))]
async fn run_countdown(config: &BoardsConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<TimerSignal>();
    let mut countdown = Countdown::new(config.timer(), Arc::new(tx));
    countdown.set_gate(TimerGate::new(true, false, true));
    countdown.reset();
    info!(total_time = *config.timer().total_time(), "Countdown started");

    let mut display = tokio::time::interval(config.timer().tick_period());
    loop {
        tokio::select! {
            _ = display.tick() => {
                let state = countdown.state();
                println!("{:>3}s {:>5.1}%", state.time_left, state.progress_percent);
            }
            signal = rx.recv() => match signal {
                Some(TimerSignal::Warning { time_left }) => {
                    warn!(time_left, "Low time");
                }
                Some(TimerSignal::Timeout) | None => break,
            },
        }
    }

    info!("Countdown finished");
    Ok(())
}
