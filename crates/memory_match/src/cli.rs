//! Command-line interface for memory_match.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use memory_match_engine::BoardSize;

use crate::players::PlayerKind;

/// Memory Match - pair-matching card game with a persistent leaderboard
#[derive(Parser, Debug)]
#[command(name = "memory_match")]
#[command(about = "Pair-matching memory game with ranked results", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to memory_match.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Let a bot play one game and record the result
    Play {
        /// Owner the result is recorded for
        #[arg(long)]
        owner: String,

        /// Board layout (4x4 or 6x6)
        #[arg(long, default_value_t = BoardSize::FourByFour)]
        board_size: BoardSize,

        /// Player strategy
        #[arg(long, value_enum, default_value_t = PlayerKind::Memory)]
        player: PlayerKind,

        /// Print every session event
        #[arg(long)]
        verbose: bool,
    },

    /// Show the best results for a board size
    Leaderboard {
        /// Board layout (4x4 or 6x6)
        #[arg(long, default_value_t = BoardSize::FourByFour)]
        board_size: BoardSize,

        /// Number of rows (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show an owner's results and per-size summaries
    History {
        /// Owner to look up
        #[arg(long)]
        owner: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show an owner's best result for a board size
    Best {
        /// Owner to look up
        #[arg(long)]
        owner: String,

        /// Board layout (4x4 or 6x6)
        #[arg(long, default_value_t = BoardSize::FourByFour)]
        board_size: BoardSize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
