//! Completed game records.

use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::BoardSize;

/// Identifier assigned to a result by the store.
pub type ResultId = i32;

/// Opaque reference to the player who owns a result.
///
/// Issued by whatever verifies credentials; the engine never interprets it.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct OwnerRef(String);

impl OwnerRef {
    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OwnerRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// What a session emits when the last pair is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct CompletedGame {
    moves_made: u32,
    elapsed_time: u32,
    board_size: BoardSize,
}

impl CompletedGame {
    /// Turns taken to finish.
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Seconds elapsed when the game finished.
    pub fn elapsed_time(&self) -> u32 {
        self.elapsed_time
    }

    /// Board the game was played on.
    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }
}

/// A stored, immutable result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct CompletedResult {
    id: ResultId,
    owner_ref: OwnerRef,
    moves_made: u32,
    elapsed_time: u32,
    board_size: BoardSize,
    completed_at: DateTime<Utc>,
}

impl CompletedResult {
    /// Store-assigned id.
    pub fn id(&self) -> ResultId {
        self.id
    }

    /// Owner of the result.
    pub fn owner_ref(&self) -> &OwnerRef {
        &self.owner_ref
    }

    /// Turns taken to finish.
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Seconds elapsed when the game finished.
    pub fn elapsed_time(&self) -> u32 {
        self.elapsed_time
    }

    /// Board the game was played on.
    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    /// When the store recorded the result.
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// The gameplay part of the record.
    pub fn game(&self) -> CompletedGame {
        CompletedGame::new(self.moves_made, self.elapsed_time, self.board_size)
    }
}
