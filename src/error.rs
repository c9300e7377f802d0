use thiserror::Error;

use crate::core::{GameId, PlayerId};
use crate::validate::FieldErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("No player named \"{username}\"")]
    UnknownPlayer { username: String },

    #[error("A player named \"{username}\" already exists")]
    DuplicatePlayer { username: String },

    #[error("Game {id} does not exist")]
    GameNotFound { id: GameId },

    #[error("Game {game} was not played by player {player}")]
    NotYourGame { game: GameId, player: PlayerId },

    #[error("No player selected. Pass --player <NAME> or set `player` in the config file.")]
    NoViewer,

    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Can't filter games against yourself (\"{username}\")")]
    OwnOpponent { username: String },

    #[error("Game not saved:\n{0}")]
    Invalid(FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid state file: {0}")]
    State(#[from] serde_json::Error),
}
