//! Player and game queries

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::core::{GameId, Player, PlayerId, RawGame};
use crate::error::AppError;

use super::{GameStore, NewGame};

const GAME_COLUMNS: &str = "SELECT g.id, g.player1_id, g.player2_id, g.player1_score, g.player2_score,
            g.starting_player_id, g.played_at, g.is_deleted, p1.username, p2.username
     FROM games g
     JOIN players p1 ON p1.id = g.player1_id
     JOIN players p2 ON p2.id = g.player2_id";

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn row_to_game(row: &Row<'_>) -> rusqlite::Result<RawGame> {
    let player1_id: PlayerId = row.get(1)?;
    let player2_id: PlayerId = row.get(2)?;
    let played_at: String = row.get(6)?;
    let played_at = DateTime::parse_from_rfc3339(&played_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(RawGame {
        id: row.get(0)?,
        player1_id,
        player2_id,
        player1_score: row.get(3)?,
        player2_score: row.get(4)?,
        starting_player_id: row.get(5)?,
        played_at,
        is_deleted: row.get(7)?,
        player1: Player {
            id: player1_id,
            username: row.get(8)?,
        },
        player2: Player {
            id: player2_id,
            username: row.get(9)?,
        },
    })
}

/// Insert on any connection (plain or inside a transaction)
pub(super) fn insert_game_row(conn: &Connection, game: &NewGame) -> rusqlite::Result<GameId> {
    conn.execute(
        "INSERT INTO games
         (player1_id, player2_id, player1_score, player2_score, starting_player_id, played_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            game.player1_id,
            game.player2_id,
            game.player1_score,
            game.player2_score,
            game.starting_player_id,
            format_timestamp(game.played_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_player(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        username: row.get(1)?,
    })
}

pub(super) fn find_player_row(conn: &Connection, username: &str) -> rusqlite::Result<Option<Player>> {
    conn.query_row(
        "SELECT id, username FROM players WHERE username = ?",
        params![username.trim()],
        row_to_player,
    )
    .optional()
}

pub(super) fn insert_player_row(conn: &Connection, username: &str) -> rusqlite::Result<Player> {
    conn.execute("INSERT INTO players (username) VALUES (?)", params![username])?;
    Ok(Player {
        id: conn.last_insert_rowid(),
        username: username.to_string(),
    })
}

impl GameStore {
    /// Register a new player; usernames are unique and non-blank
    pub(crate) fn add_player(&self, username: &str) -> Result<Player, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Required { field: "username" });
        }
        if self.find_player(username)?.is_some() {
            return Err(AppError::DuplicatePlayer {
                username: username.to_string(),
            });
        }
        let player = insert_player_row(&self.conn, username)?;
        log::info!("Added player {} ({})", player.username, player.id);
        Ok(player)
    }

    pub(crate) fn find_player(&self, username: &str) -> Result<Option<Player>, AppError> {
        Ok(find_player_row(&self.conn, username)?)
    }

    /// Like `find_player`, but a missing player is an error
    pub(crate) fn require_player(&self, username: &str) -> Result<Player, AppError> {
        self.find_player(username)?
            .ok_or_else(|| AppError::UnknownPlayer {
                username: username.trim().to_string(),
            })
    }

    /// Every player, by username
    pub(crate) fn players(&self) -> Result<Vec<Player>, AppError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username FROM players ORDER BY username COLLATE NOCASE, id")?;
        let rows = stmt.query_map([], row_to_player)?;
        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    pub(crate) fn insert_game(&self, game: &NewGame) -> Result<GameId, AppError> {
        let id = insert_game_row(&self.conn, game)?;
        log::info!("Recorded game {id}");
        Ok(id)
    }

    /// Overwrite a game's players, scores, server and time; `is_deleted` is untouched
    pub(crate) fn update_game(&self, id: GameId, game: &NewGame) -> Result<(), AppError> {
        let changed = self.conn.execute(
            "UPDATE games
             SET player1_id = ?, player2_id = ?, player1_score = ?, player2_score = ?,
                 starting_player_id = ?, played_at = ?
             WHERE id = ?",
            params![
                game.player1_id,
                game.player2_id,
                game.player1_score,
                game.player2_score,
                game.starting_player_id,
                format_timestamp(game.played_at),
                id,
            ],
        )?;
        if changed == 0 {
            return Err(AppError::GameNotFound { id });
        }
        log::info!("Updated game {id}");
        Ok(())
    }

    pub(crate) fn game(&self, id: GameId) -> Result<Option<RawGame>, AppError> {
        let sql = format!("{GAME_COLUMNS} WHERE g.id = ?");
        let game = self
            .conn
            .query_row(&sql, params![id], row_to_game)
            .optional()?;
        Ok(game)
    }

    /// All games `player` took part in (deleted ones included), newest first
    pub(crate) fn games_for_player(&self, player: PlayerId) -> Result<Vec<RawGame>, AppError> {
        let sql = format!(
            "{GAME_COLUMNS}
             WHERE g.player1_id = ?1 OR g.player2_id = ?1
             ORDER BY g.played_at DESC, g.id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![player], row_to_game)?;
        let mut games = Vec::new();
        for row in rows {
            games.push(row?);
        }
        log::debug!("Loaded {} games for player {player}", games.len());
        Ok(games)
    }

    /// Everyone `player` has a recorded game against, by username
    pub(crate) fn opponents_of(&self, player: PlayerId) -> Result<Vec<Player>, AppError> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.username FROM players p
             WHERE p.id <> ?1 AND p.id IN (
                 SELECT player1_id FROM games WHERE player2_id = ?1
                 UNION
                 SELECT player2_id FROM games WHERE player1_id = ?1
             )
             ORDER BY p.username COLLATE NOCASE, p.id",
        )?;
        let rows = stmt.query_map(params![player], row_to_player)?;
        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Soft delete (or restore) a game on behalf of one of its players
    pub(crate) fn set_deleted(
        &self,
        id: GameId,
        viewer: PlayerId,
        deleted: bool,
    ) -> Result<(), AppError> {
        let game = self.game(id)?.ok_or(AppError::GameNotFound { id })?;
        if !game.involves(viewer) {
            return Err(AppError::NotYourGame {
                game: id,
                player: viewer,
            });
        }
        self.conn.execute(
            "UPDATE games SET is_deleted = ? WHERE id = ?",
            params![deleted, id],
        )?;
        log::info!(
            "{} game {id}",
            if deleted { "Deleted" } else { "Restored" }
        );
        Ok(())
    }
}
