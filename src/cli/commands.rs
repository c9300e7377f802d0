//! CLI subcommand definitions

use clap::{Args, Subcommand};

use crate::core::GameId;
use crate::validate::GameForm;

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List games with totals, grouped by date and opponent (default)
    Games(ListArgs),
    /// Show one game
    Show {
        /// Game id, as shown in the games list
        id: GameId,
    },
    /// Record a new game
    Add(GameFields),
    /// Change a recorded game (only the given fields)
    Edit {
        id: GameId,
        #[command(flatten)]
        fields: GameFields,
    },
    /// Delete a game (it can be restored with `undelete`)
    Delete { id: GameId },
    /// Restore a deleted game
    Undelete { id: GameId },
    /// List players, or add one
    Players {
        #[command(subcommand)]
        command: Option<PlayerCommands>,
    },
    /// Show, set or clear the remembered opponent filter
    Filter {
        /// Opponent username to remember
        opponent: Option<String>,
        /// Forget the remembered opponent
        #[arg(long, conflicts_with = "opponent")]
        clear: bool,
    },
    /// Add demo players and games
    Seed,
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct ListArgs {
    /// Only games against this opponent (overrides the remembered filter)
    #[arg(long, value_name = "NAME")]
    pub(crate) opponent: Option<String>,

    /// Ignore the remembered filter for this run
    #[arg(long, conflicts_with = "opponent")]
    pub(crate) all: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct GameFields {
    /// Opponent username
    #[arg(long, value_name = "NAME")]
    pub(crate) opponent: Option<String>,

    /// Your score
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub(crate) score: Option<String>,

    /// Opponent's score
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub(crate) opponent_score: Option<String>,

    /// Who served first: "player" (you) or "opponent"
    #[arg(long, value_name = "WHO")]
    pub(crate) served: Option<String>,

    /// When the game was played (YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339; default now)
    #[arg(long, value_name = "WHEN")]
    pub(crate) played_at: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum PlayerCommands {
    /// List players (default)
    List,
    /// Register a player
    Add { username: String },
}

impl From<GameFields> for GameForm {
    fn from(fields: GameFields) -> Self {
        GameForm {
            opponent: fields.opponent,
            player_score: fields.score,
            opponent_score: fields.opponent_score,
            served: fields.served,
            played_at: fields.played_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn add_accepts_negative_score_for_validation() {
        let cli = Cli::parse_from([
            "pingstats", "add", "--opponent", "Quinn", "--score", "-1", "--opponent-score", "11",
            "--served", "player",
        ]);
        let Some(Commands::Add(fields)) = cli.command else {
            panic!("expected add");
        };
        let form = GameForm::from(fields);
        assert_eq!(form.player_score.as_deref(), Some("-1"));
        assert_eq!(form.opponent_score.as_deref(), Some("11"));
        assert_eq!(form.opponent.as_deref(), Some("Quinn"));
    }

    #[test]
    fn edit_takes_id_and_partial_fields() {
        let cli = Cli::parse_from(["pingstats", "edit", "7", "--served", "opponent"]);
        let Some(Commands::Edit { id, fields }) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, 7);
        assert_eq!(fields.served.as_deref(), Some("opponent"));
        assert!(fields.score.is_none());
    }

    #[test]
    fn games_opponent_conflicts_with_all() {
        assert!(Cli::try_parse_from(["pingstats", "games", "--opponent", "Quinn", "--all"]).is_err());
    }

    #[test]
    fn filter_clear_conflicts_with_name() {
        assert!(Cli::try_parse_from(["pingstats", "filter", "Quinn", "--clear"]).is_err());
        assert!(Cli::try_parse_from(["pingstats", "filter", "--clear"]).is_ok());
    }
}
