//! Database connection and schema management

use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::consts::{APP_DIR, MAX_SCORE};
use crate::error::AppError;

use super::GameStore;

impl GameStore {
    /// Open (creating if needed) the database at `path` and ensure tables exist
    pub(crate) fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        log::debug!("Opening game database at {}", path.display());
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, AppError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, AppError> {
        let store = GameStore { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Default location: `<data dir>/pingstats/games.db`
    pub(crate) fn default_path() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("games.db")
    }

    fn initialize_schema(&self) -> Result<(), AppError> {
        self.conn.execute_batch(&format!(
            "
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS players (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT    NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS games (
                id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                player1_id         INTEGER NOT NULL REFERENCES players(id),
                player2_id         INTEGER NOT NULL REFERENCES players(id),
                player1_score      INTEGER NOT NULL CHECK(player1_score BETWEEN 0 AND {MAX_SCORE}),
                player2_score      INTEGER NOT NULL CHECK(player2_score BETWEEN 0 AND {MAX_SCORE}),
                starting_player_id INTEGER NOT NULL,
                played_at          TEXT    NOT NULL,  -- RFC 3339 UTC, second precision
                is_deleted         INTEGER NOT NULL DEFAULT 0,
                CHECK(player1_id <> player2_id),
                CHECK(starting_player_id IN (player1_id, player2_id))
            );

            CREATE INDEX IF NOT EXISTS idx_games_player1 ON games(player1_id, played_at);
            CREATE INDEX IF NOT EXISTS idx_games_player2 ON games(player2_id, played_at);
            "
        ))?;
        Ok(())
    }
}
