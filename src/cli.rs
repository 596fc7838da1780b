//! Command-line interface for strictly_boards.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Boards - board-game rules and turn timer tools
#[derive(Parser, Debug)]
#[command(name = "strictly_boards")]
#[command(about = "Inspect game snapshots and run turn timers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every legal move in a snapshot for one side
    Inspect {
        /// Path to a snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Side to move (white/black for chess and backgammon, 0/1 for checkers)
        #[arg(long)]
        side: String,
    },

    /// Run one live turn countdown
    Countdown,
}
