//! Core data types for games and their aggregated views
//!
//! `RawGame` is the stored shape (absolute `player1`/`player2` roles); everything
//! else is derived per viewer on every read.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub(crate) type PlayerId = i64;
pub(crate) type GameId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub(crate) struct Player {
    pub(crate) id: PlayerId,
    pub(crate) username: String,
}

/// A persisted game result with both players resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawGame {
    pub(crate) id: GameId,
    pub(crate) player1_id: PlayerId,
    pub(crate) player2_id: PlayerId,
    pub(crate) player1_score: i64,
    pub(crate) player2_score: i64,
    /// Always one of `player1_id` / `player2_id`
    pub(crate) starting_player_id: PlayerId,
    pub(crate) played_at: DateTime<Utc>,
    pub(crate) player1: Player,
    pub(crate) player2: Player,
    pub(crate) is_deleted: bool,
}

impl RawGame {
    pub(crate) fn involves(&self, player_id: PlayerId) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }
}

/// Who served first, relative to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum StartingServer {
    Player,
    Opponent,
}

/// A game re-expressed from one viewer's point of view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct NormalizedGame {
    pub(crate) id: GameId,
    pub(crate) player: Player,
    pub(crate) opponent: Player,
    pub(crate) player_score: i64,
    pub(crate) opponent_score: i64,
    pub(crate) starting_server: StartingServer,
    /// Day-granularity date string (dd/mm/yyyy), used as the grouping key
    pub(crate) played_at: String,
}

impl NormalizedGame {
    pub(crate) fn is_win(&self) -> bool {
        self.player_score > self.opponent_score
    }

    /// Detail location for this game
    pub(crate) fn path(&self) -> String {
        format!("/games/{}", self.id)
    }
}

/// Grand totals over every game in scope
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct Totals {
    pub(crate) total_points_for: i64,
    pub(crate) total_points_against: i64,
    pub(crate) total_wins: i64,
    /// Games not won, so a tie counts here
    pub(crate) total_losses: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct OpponentGroup {
    pub(crate) opponent: Player,
    pub(crate) games: Vec<NormalizedGame>,
    pub(crate) points_for: i64,
    pub(crate) points_against: i64,
}

impl OpponentGroup {
    pub(crate) fn new(opponent: Player) -> Self {
        OpponentGroup {
            opponent,
            games: Vec::new(),
            points_for: 0,
            points_against: 0,
        }
    }

    pub(crate) fn add_game(&mut self, game: &NormalizedGame) {
        self.points_for = self.points_for.saturating_add(game.player_score);
        self.points_against = self.points_against.saturating_add(game.opponent_score);
        self.games.push(game.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DateGroup {
    pub(crate) date: String,
    pub(crate) opponents: Vec<OpponentGroup>,
}

impl DateGroup {
    pub(crate) fn game_count(&self) -> usize {
        self.opponents.iter().map(|o| o.games.len()).sum()
    }
}

/// Totals plus the date -> opponent -> games nesting, both in first-seen order
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct GamesOverview {
    pub(crate) totals: Totals,
    pub(crate) dates: Vec<DateGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn player(id: PlayerId, name: &str) -> Player {
        Player {
            id,
            username: name.to_string(),
        }
    }

    fn raw_game() -> RawGame {
        RawGame {
            id: 7,
            player1_id: 1,
            player2_id: 2,
            player1_score: 11,
            player2_score: 9,
            starting_player_id: 2,
            played_at: Utc.with_ymd_and_hms(2024, 3, 9, 18, 0, 0).unwrap(),
            player1: player(1, "Simon"),
            player2: player(2, "Quinn"),
            is_deleted: false,
        }
    }

    #[test]
    fn raw_game_involves_both_players_only() {
        let g = raw_game();
        assert!(g.involves(1));
        assert!(g.involves(2));
        assert!(!g.involves(3));
    }

    #[test]
    fn opponent_group_accumulates_subtotals() {
        let game = NormalizedGame {
            id: 1,
            player: player(1, "Simon"),
            opponent: player(2, "Quinn"),
            player_score: 11,
            opponent_score: 4,
            starting_server: StartingServer::Player,
            played_at: "09/03/2024".to_string(),
        };
        let mut group = OpponentGroup::new(player(2, "Quinn"));
        group.add_game(&game);
        group.add_game(&game);
        assert_eq!(group.games.len(), 2);
        assert_eq!(group.points_for, 22);
        assert_eq!(group.points_against, 8);
    }

    #[test]
    fn normalized_game_path_and_win() {
        let game = NormalizedGame {
            id: 42,
            player: player(1, "Simon"),
            opponent: player(2, "Quinn"),
            player_score: 10,
            opponent_score: 10,
            starting_server: StartingServer::Opponent,
            played_at: "09/03/2024".to_string(),
        };
        assert_eq!(game.path(), "/games/42");
        assert!(!game.is_win());
    }

    #[test]
    fn starting_server_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&StartingServer::Opponent).unwrap(),
            r#""opponent""#
        );
    }
}
