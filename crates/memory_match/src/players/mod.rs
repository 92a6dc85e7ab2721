//! Player trait and implementations.

mod memory_bot;
mod random_bot;

pub use memory_bot::MemoryBot;
pub use random_bot::RandomBot;

use anyhow::Result;
use memory_match_engine::{CardId, SelectOutcome, Session};
use serde::{Deserialize, Serialize};

/// Trait for players that can pick cards.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Picks the next card to flip.
    ///
    /// Called only while the session is in progress.
    async fn choose_card(&mut self, session: &Session) -> Result<CardId>;

    /// Sees the outcome of a selection, including its revealed symbols.
    fn observe(&mut self, _outcome: &SelectOutcome) {}

    /// Returns the player's display name.
    fn name(&self) -> &str;
}

/// Built-in player strategies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayerKind {
    /// Remembers every symbol it has seen.
    #[default]
    Memory,
    /// Picks uniformly at random.
    Random,
}

impl PlayerKind {
    /// Creates a boxed player of this kind.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Player> {
        match self {
            Self::Memory => Box::new(MemoryBot::new("memory bot")),
            Self::Random => Box::new(RandomBot::new("random bot", seed)),
        }
    }
}
