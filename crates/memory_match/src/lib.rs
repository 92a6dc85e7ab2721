//! Memory Match application - players, game loop and persisted scores.
//!
//! The game rules live in [`memory_match_engine`]; this crate wires them to
//! a clock, to bot players and to a SQLite store of completed results.
//!
//! # Architecture
//!
//! - **Runner**: drives a session with a player and a one-second clock
//! - **Players**: bots that choose cards from what they have observed
//! - **Persistence**: diesel repository plus a ranking service on top
//! - **Config**: TOML settings with a `DATABASE_URL` override
//!
//! # Example
//!
//! ```no_run
//! use memory_match::{AppConfig, GameRepository, GameRunner, MemoryBot, ScoreService, play_and_record};
//! use memory_match_engine::{BoardSize, OwnerRef};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load(None)?;
//! let repository = GameRepository::new(config.db_path().clone())?;
//! repository.run_migrations()?;
//! let service = ScoreService::new(repository);
//!
//! let mut runner = GameRunner::from_config(&config)?;
//! let mut bot = MemoryBot::new("memory bot");
//! let report = play_and_record(
//!     &mut runner,
//!     &mut bot,
//!     &service,
//!     &OwnerRef::from("ann"),
//!     BoardSize::FourByFour,
//! )
//! .await?;
//! println!("{} moves", report.game().moves_made());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod db;
pub mod players;
pub mod report;
mod runner;
mod score_service;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DATABASE_URL_VAR, DEFAULT_CONFIG_FILE};

// Crate-level exports - Persistence
pub use db::{GameRepository, NewResultRow, PersistenceError, ResultRow};
pub use score_service::{PlayerProfile, ScoreService};

// Crate-level exports - Gameplay
pub use players::{MemoryBot, Player, PlayerKind, RandomBot};
pub use runner::{GameRunner, PlayReport, play_and_record};
