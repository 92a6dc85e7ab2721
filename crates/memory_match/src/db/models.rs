//! Database models and their conversion to domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use diesel::prelude::*;
use memory_match_engine::{BoardSize, CompletedGame, CompletedResult, OwnerRef};
use tracing::instrument;

use crate::db::{PersistenceError, schema};

/// Completed result as stored in the database.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::completed_results)]
pub struct ResultRow {
    id: i32,
    owner_ref: String,
    moves_made: i32,
    elapsed_time: i32,
    board_size: String,
    completed_at: NaiveDateTime,
}

impl ResultRow {
    /// Parses the row into a domain result.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if a stored value is out of range.
    #[instrument(skip(self), fields(id = self.id))]
    pub fn into_result(self) -> Result<CompletedResult, PersistenceError> {
        let board_size: BoardSize = self.board_size.parse().map_err(|e| {
            PersistenceError::new(format!("Row {} has invalid board size: {}", self.id, e))
        })?;
        let moves_made = u32::try_from(self.moves_made).map_err(|_| {
            PersistenceError::new(format!("Row {} has negative moves: {}", self.id, self.moves_made))
        })?;
        let elapsed_time = u32::try_from(self.elapsed_time).map_err(|_| {
            PersistenceError::new(format!(
                "Row {} has negative elapsed time: {}",
                self.id, self.elapsed_time
            ))
        })?;

        Ok(CompletedResult::new(
            self.id,
            OwnerRef::from(self.owner_ref),
            moves_made,
            elapsed_time,
            board_size,
            self.completed_at.and_utc(),
        ))
    }
}

/// Insertable result row.
#[derive(Debug, Clone, Insertable, Getters)]
#[diesel(table_name = schema::completed_results)]
pub struct NewResultRow {
    owner_ref: String,
    moves_made: i32,
    elapsed_time: i32,
    board_size: String,
    completed_at: NaiveDateTime,
}

impl NewResultRow {
    /// Builds the row for a finished game, stamped with `completed_at`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the game has no moves or a counter
    /// does not fit the column.
    #[instrument(skip(owner_ref, game), fields(owner = %owner_ref))]
    pub fn from_game(
        owner_ref: &OwnerRef,
        game: &CompletedGame,
        completed_at: NaiveDateTime,
    ) -> Result<Self, PersistenceError> {
        if game.moves_made() == 0 {
            return Err(PersistenceError::new(
                "A completed game must have at least one move",
            ));
        }
        let moves_made = i32::try_from(game.moves_made())
            .map_err(|_| PersistenceError::new("Move count too large to store"))?;
        let elapsed_time = i32::try_from(game.elapsed_time())
            .map_err(|_| PersistenceError::new("Elapsed time too large to store"))?;

        Ok(Self {
            owner_ref: owner_ref.as_str().to_string(),
            moves_made,
            elapsed_time,
            board_size: game.board_size().label().to_string(),
            completed_at,
        })
    }
}
