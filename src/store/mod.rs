//! SQLite storage for players and games
//!
//! - `schema`: connection setup and table creation
//! - `queries`: player and game reads/writes, soft delete
//! - `seed`: demo data

mod queries;
mod schema;
mod seed;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::core::PlayerId;

/// Connection wrapper; every query goes through here
pub(crate) struct GameStore {
    conn: Connection,
}

/// Fields of a game to be written, in stored (player1/player2) roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewGame {
    pub(crate) player1_id: PlayerId,
    pub(crate) player2_id: PlayerId,
    pub(crate) player1_score: i64,
    pub(crate) player2_score: i64,
    pub(crate) starting_player_id: PlayerId,
    pub(crate) played_at: DateTime<Utc>,
}
