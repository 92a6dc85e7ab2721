//! Score recording and ranking business logic layer.

use chrono::Utc;
use derive_getters::Getters;
use memory_match_engine::{
    BoardSize, CompletedGame, CompletedResult, Leaderboard, OwnerRef, ResultSummary, rank,
    summarize,
};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::{GameRepository, NewResultRow, PersistenceError};

/// Everything known about one owner: their history and a summary per board size.
#[derive(Debug, Clone, Serialize, Getters)]
pub struct PlayerProfile {
    owner_ref: OwnerRef,
    history: Vec<CompletedResult>,
    summaries: Vec<ResultSummary<CompletedResult>>,
}

/// Service layer for completed results.
///
/// Wraps [`GameRepository`] with ranking so callers never sort rows themselves.
#[derive(Debug, Clone)]
pub struct ScoreService {
    repository: GameRepository,
}

impl ScoreService {
    /// Creates a new score service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!("Creating ScoreService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Stores a finished game for `owner_ref`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the game is not storable or the write fails.
    #[instrument(skip(self), fields(owner = %owner_ref))]
    pub fn record_result(
        &self,
        owner_ref: &OwnerRef,
        game: &CompletedGame,
    ) -> Result<CompletedResult, PersistenceError> {
        debug!(
            moves_made = game.moves_made(),
            elapsed_time = game.elapsed_time(),
            board_size = %game.board_size(),
            "Recording game result"
        );
        let row = NewResultRow::from_game(owner_ref, game, Utc::now().naive_utc())?;
        let stored = self.repository.insert_result(row)?;
        info!(result_id = stored.id(), "Game result recorded");
        Ok(stored)
    }

    /// Top `limit` results for `board_size`, numbered from 1.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the rows cannot be loaded.
    #[instrument(skip(self))]
    pub fn leaderboard(
        &self,
        board_size: BoardSize,
        limit: usize,
    ) -> Result<Leaderboard<CompletedResult>, PersistenceError> {
        let fetch_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = self.repository.fetch_by_board_size(board_size, fetch_limit)?;
        let leaderboard = Leaderboard::build(&rows, board_size, limit);
        debug!(entries = leaderboard.len(), "Leaderboard built");
        Ok(leaderboard)
    }

    /// All results of `owner_ref`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the rows cannot be loaded.
    #[instrument(skip(self), fields(owner = %owner_ref))]
    pub fn history(&self, owner_ref: &OwnerRef) -> Result<Vec<CompletedResult>, PersistenceError> {
        self.repository.fetch_by_owner(owner_ref)
    }

    /// The owner's best result on `board_size`, if they have played it.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the rows cannot be loaded.
    #[instrument(skip(self), fields(owner = %owner_ref))]
    pub fn best_for(
        &self,
        owner_ref: &OwnerRef,
        board_size: BoardSize,
    ) -> Result<Option<CompletedResult>, PersistenceError> {
        let rows = self
            .repository
            .fetch_by_owner_and_size(owner_ref, board_size)?;
        Ok(rank(&rows, board_size, Some(1)).into_iter().next())
    }

    /// History plus a summary for every board size.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the rows cannot be loaded.
    #[instrument(skip(self), fields(owner = %owner_ref))]
    pub fn profile(&self, owner_ref: &OwnerRef) -> Result<PlayerProfile, PersistenceError> {
        let history = self.repository.fetch_by_owner(owner_ref)?;
        let summaries = BoardSize::iter()
            .map(|size| summarize(&history, size))
            .collect();
        info!(games = history.len(), "Profile assembled");
        Ok(PlayerProfile {
            owner_ref: owner_ref.clone(),
            history,
            summaries,
        })
    }
}
