//! Validation of submitted game fields
//!
//! Raw strings from the command line are checked once here and turned into a
//! typed `GameCommand`, or into `FieldErrors` listing every field that failed.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::consts::MAX_SCORE;
use crate::core::{Player, PlayerId, StartingServer};
use crate::store::NewGame;
use crate::utils::{Timezone, parse_played_at};

/// Field-level validation messages, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub(crate) fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {field}: {message}")?;
        }
        Ok(())
    }
}

/// Game fields exactly as submitted
#[derive(Debug, Clone, Default)]
pub(crate) struct GameForm {
    pub(crate) opponent: Option<String>,
    pub(crate) player_score: Option<String>,
    pub(crate) opponent_score: Option<String>,
    pub(crate) served: Option<String>,
    pub(crate) played_at: Option<String>,
}

/// A validated game, from the submitting player's side
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GameCommand {
    pub(crate) opponent: Player,
    pub(crate) player_score: i64,
    pub(crate) opponent_score: i64,
    pub(crate) served: StartingServer,
    pub(crate) played_at: DateTime<Utc>,
}

pub(crate) fn validate_score(score: &str) -> Result<i64, String> {
    let n: i64 = score
        .trim()
        .parse()
        .map_err(|_| "Score must be a number".to_string())?;
    if n < 0 {
        return Err("Score must be a positive number".to_string());
    }
    if n > MAX_SCORE {
        return Err(format!("Score must be at most {MAX_SCORE}"));
    }
    Ok(n)
}

fn parse_served(served: &str) -> Option<StartingServer> {
    match served.trim().to_ascii_lowercase().as_str() {
        "player" | "me" | "you" => Some(StartingServer::Player),
        "opponent" | "them" => Some(StartingServer::Opponent),
        _ => None,
    }
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.push(field, format!("{field} is required"));
            None
        }
    }
}

impl GameForm {
    /// Overlay the fields that were supplied on top of `self`
    pub(crate) fn merged_with(mut self, changes: GameForm) -> GameForm {
        if changes.opponent.is_some() {
            self.opponent = changes.opponent;
        }
        if changes.player_score.is_some() {
            self.player_score = changes.player_score;
        }
        if changes.opponent_score.is_some() {
            self.opponent_score = changes.opponent_score;
        }
        if changes.served.is_some() {
            self.served = changes.served;
        }
        if changes.played_at.is_some() {
            self.played_at = changes.played_at;
        }
        self
    }

    /// Check every field against `viewer` and the known players.
    /// A missing `played_at` means `now`.
    pub(crate) fn validate(
        &self,
        viewer: &Player,
        roster: &[Player],
        timezone: Timezone,
        now: DateTime<Utc>,
    ) -> Result<GameCommand, FieldErrors> {
        let mut errors = FieldErrors::default();

        let opponent = required(&self.opponent, "opponent", &mut errors).and_then(|name| {
            match roster.iter().find(|p| p.username == name) {
                None => {
                    errors.push("opponent", format!("No player named \"{name}\""));
                    None
                }
                Some(p) if p.id == viewer.id => {
                    errors.push("opponent", "Opponent must be someone other than you");
                    None
                }
                Some(p) => Some(p.clone()),
            }
        });

        let mut score = |value: &Option<String>, field: &'static str| {
            required(value, field, &mut errors).and_then(|raw| match validate_score(raw) {
                Ok(n) => Some(n),
                Err(message) => {
                    errors.push(field, message);
                    None
                }
            })
        };
        let player_score = score(&self.player_score, "score");
        let opponent_score = score(&self.opponent_score, "opponent_score");

        let served = required(&self.served, "served", &mut errors).and_then(|raw| {
            let parsed = parse_served(raw);
            if parsed.is_none() {
                errors.push("served", "Served must be \"player\" or \"opponent\"");
            }
            parsed
        });

        let played_at = match self.played_at.as_deref().map(str::trim) {
            None | Some("") => Some(now),
            Some(raw) => match parse_played_at(raw, timezone) {
                Ok(dt) => Some(dt),
                Err(e) => {
                    errors.push("played_at", e.to_string());
                    None
                }
            },
        };

        match (opponent, player_score, opponent_score, served, played_at) {
            (Some(opponent), Some(player_score), Some(opponent_score), Some(served), Some(played_at))
                if errors.is_empty() =>
            {
                Ok(GameCommand {
                    opponent,
                    player_score,
                    opponent_score,
                    served,
                    played_at,
                })
            }
            _ => Err(errors),
        }
    }
}

impl GameCommand {
    /// Map the viewer-relative fields onto stored roles
    pub(crate) fn to_new_game(&self, viewer: PlayerId, viewer_is_player1: bool) -> NewGame {
        let starting_player_id = match self.served {
            StartingServer::Player => viewer,
            StartingServer::Opponent => self.opponent.id,
        };
        let (player1_id, player2_id, player1_score, player2_score) = if viewer_is_player1 {
            (viewer, self.opponent.id, self.player_score, self.opponent_score)
        } else {
            (self.opponent.id, viewer, self.opponent_score, self.player_score)
        };
        NewGame {
            player1_id,
            player2_id,
            player1_score,
            player2_score,
            starting_player_id,
            played_at: self.played_at,
        }
    }
}
