//! Application configuration.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use memory_match_engine::{BoardError, BoardGenerator, SymbolPool};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Default config file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "memory_match.toml";

/// Environment variable that overrides `db_path`.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Settings for the game runner and the score store.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Rows shown by the leaderboard when no limit is given.
    #[serde(default = "default_leaderboard_limit")]
    leaderboard_limit: usize,

    /// Milliseconds between clock ticks.
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: u64,

    /// Milliseconds a bot waits before each selection.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Custom symbol pool, in draw order.
    #[serde(default)]
    symbols: Option<Vec<String>>,

    /// Seed for reproducible boards.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_db_path() -> String {
    "memory_match.db".to_string()
}

fn default_leaderboard_limit() -> usize {
    10
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_think_delay_ms() -> u64 {
    250
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            leaderboard_limit: default_leaderboard_limit(),
            tick_interval_ms: default_tick_interval_ms(),
            think_delay_ms: default_think_delay_ms(),
            symbols: None,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the effective configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read when present and defaults are used otherwise. `DATABASE_URL`
    /// overrides `db_path` in both cases.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file cannot be read or parsed.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => {
                debug!("No config file, using defaults");
                Self::default()
            }
        };
        Ok(config.with_database_url(std::env::var(DATABASE_URL_VAR).ok()))
    }

    /// Replaces `db_path` with `url` when it is set and non-empty.
    pub fn with_database_url(self, url: Option<String>) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => {
                debug!(db_path = %url, "Database path overridden from environment");
                self.with_db_path(url)
            }
            _ => self,
        }
    }

    /// Interval between clock ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Delay before each bot selection.
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// The configured symbol pool, or the default one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateSymbol`] if the configured pool repeats a symbol.
    pub fn symbol_pool(&self) -> Result<SymbolPool, BoardError> {
        match &self.symbols {
            Some(symbols) => SymbolPool::new(symbols.iter().map(String::as_str)),
            None => Ok(SymbolPool::default()),
        }
    }

    /// Board generator over the configured pool, seeded if a seed is set.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the symbol pool is invalid.
    #[instrument(skip(self), fields(seed = ?self.seed))]
    pub fn board_generator(&self) -> Result<BoardGenerator, BoardError> {
        let pool = self.symbol_pool()?;
        if pool.len() < memory_match_engine::BoardSize::SixBySix.pair_count() {
            warn!(symbols = pool.len(), "Symbol pool too small for 6x6 boards");
        }
        Ok(match self.seed {
            Some(seed) => BoardGenerator::seeded(pool, seed),
            None => BoardGenerator::new(pool),
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_match_engine::BoardSize;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write config");
        file
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let file = write_config("leaderboard_limit = 5\n");
        let config = AppConfig::from_file(file.path()).expect("Valid config");
        assert_eq!(*config.leaderboard_limit(), 5);
        assert_eq!(config.db_path(), "memory_match.db");
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.think_delay(), Duration::from_millis(250));
        assert!(config.seed().is_none());
    }

    #[test]
    fn test_full_config_parses() {
        let file = write_config(
            r#"
db_path = "scores.db"
tick_interval_ms = 10
think_delay_ms = 1
seed = 42
symbols = ["A", "B", "C", "D", "E", "F", "G", "H"]
"#,
        );
        let config = AppConfig::from_file(file.path()).expect("Valid config");
        assert_eq!(config.db_path(), "scores.db");
        assert_eq!(*config.seed(), Some(42));
        assert_eq!(config.symbol_pool().expect("Valid pool").len(), 8);
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let file = write_config("leaderboard_limit = \"many\"\n");
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_database_url_overrides_path() {
        let config = AppConfig::default().with_database_url(Some("other.db".to_string()));
        assert_eq!(config.db_path(), "other.db");

        let unchanged = AppConfig::default().with_database_url(Some("  ".to_string()));
        assert_eq!(unchanged.db_path(), "memory_match.db");
    }

    #[test]
    fn test_duplicate_symbols_rejected() {
        let config = AppConfig::default().with_symbols(Some(vec!["A".into(), "A".into()]));
        assert!(config.board_generator().is_err());
    }

    #[test]
    fn test_seeded_generators_agree() {
        let config = AppConfig::default().with_seed(Some(9));
        let mut a = config.board_generator().expect("Valid generator");
        let mut b = config.board_generator().expect("Valid generator");
        assert_eq!(
            a.generate(BoardSize::FourByFour).expect("Board"),
            b.generate(BoardSize::FourByFour).expect("Board")
        );
    }
}
