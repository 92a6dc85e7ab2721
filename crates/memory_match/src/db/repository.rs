//! Database repository for completed game results.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use memory_match_engine::{BoardSize, CompletedResult, OwnerRef};
use tracing::{debug, info, instrument};

use crate::db::{NewResultRow, PersistenceError, ResultRow, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for result operations.
///
/// Holds only the database path; every call opens its own connection.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// The file is created on first connection if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, PersistenceError> {
        if db_path.trim().is_empty() {
            return Err(PersistenceError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Path of the underlying database.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, PersistenceError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            PersistenceError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })
    }

    /// Applies any migrations the database has not seen yet.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), PersistenceError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| PersistenceError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Stores a completed result and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the insert fails or the stored row is invalid.
    #[instrument(skip(self, row), fields(owner = %row.owner_ref(), board_size = %row.board_size()))]
    pub fn insert_result(&self, row: NewResultRow) -> Result<CompletedResult, PersistenceError> {
        debug!("Recording result");
        let mut conn = self.connection()?;

        let stored = diesel::insert_into(schema::completed_results::table)
            .values(&row)
            .returning(ResultRow::as_returning())
            .get_result(&mut conn)?;

        info!(
            id = stored.id(),
            moves_made = stored.moves_made(),
            elapsed_time = stored.elapsed_time(),
            "Result recorded"
        );
        stored.into_result()
    }

    /// Loads the best results for a board size, fewest moves then fastest
    /// time, at most `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn fetch_by_board_size(
        &self,
        board_size: BoardSize,
        limit: i64,
    ) -> Result<Vec<CompletedResult>, PersistenceError> {
        use schema::completed_results::dsl;

        debug!("Loading leaderboard rows");
        let mut conn = self.connection()?;

        let rows = dsl::completed_results
            .filter(dsl::board_size.eq(board_size.label()))
            .order((dsl::moves_made.asc(), dsl::elapsed_time.asc()))
            .limit(limit)
            .select(ResultRow::as_select())
            .load(&mut conn)?;

        info!(count = rows.len(), "Leaderboard rows loaded");
        rows.into_iter().map(ResultRow::into_result).collect()
    }

    /// Loads every result of an owner, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if a database error occurs.
    #[instrument(skip(self), fields(owner = %owner_ref))]
    pub fn fetch_by_owner(
        &self,
        owner_ref: &OwnerRef,
    ) -> Result<Vec<CompletedResult>, PersistenceError> {
        use schema::completed_results::dsl;

        debug!("Loading owner history");
        let mut conn = self.connection()?;

        let rows = dsl::completed_results
            .filter(dsl::owner_ref.eq(owner_ref.as_str()))
            .order((dsl::completed_at.desc(), dsl::id.desc()))
            .select(ResultRow::as_select())
            .load(&mut conn)?;

        info!(count = rows.len(), "Owner history loaded");
        rows.into_iter().map(ResultRow::into_result).collect()
    }

    /// Loads an owner's results for one board size, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if a database error occurs.
    #[instrument(skip(self), fields(owner = %owner_ref))]
    pub fn fetch_by_owner_and_size(
        &self,
        owner_ref: &OwnerRef,
        board_size: BoardSize,
    ) -> Result<Vec<CompletedResult>, PersistenceError> {
        use schema::completed_results::dsl;

        debug!("Loading owner results for board size");
        let mut conn = self.connection()?;

        let rows = dsl::completed_results
            .filter(dsl::owner_ref.eq(owner_ref.as_str()))
            .filter(dsl::board_size.eq(board_size.label()))
            .order((dsl::completed_at.desc(), dsl::id.desc()))
            .select(ResultRow::as_select())
            .load(&mut conn)?;

        info!(count = rows.len(), "Owner results loaded");
        rows.into_iter().map(ResultRow::into_result).collect()
    }
}
