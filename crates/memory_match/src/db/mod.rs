//! Persistence layer for completed game results.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::PersistenceError;
pub use models::{NewResultRow, ResultRow};
pub use repository::GameRepository;
