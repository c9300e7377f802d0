//! Re-express stored games from one player's point of view

use crate::core::types::{NormalizedGame, PlayerId, RawGame, StartingServer};
use crate::utils::Timezone;

/// Normalize a game for `viewer`.
///
/// `viewer` must be one of the two players; the store only hands out games
/// the viewer took part in.
pub(crate) fn normalize_game(game: &RawGame, viewer: PlayerId, timezone: Timezone) -> NormalizedGame {
    debug_assert!(
        game.involves(viewer),
        "player {viewer} did not play game {}",
        game.id
    );

    let viewer_is_player1 = game.player1_id == viewer;
    let (player, opponent, player_score, opponent_score) = if viewer_is_player1 {
        (&game.player1, &game.player2, game.player1_score, game.player2_score)
    } else {
        (&game.player2, &game.player1, game.player2_score, game.player1_score)
    };

    let starting_server = if game.starting_player_id == viewer {
        StartingServer::Player
    } else {
        StartingServer::Opponent
    };

    NormalizedGame {
        id: game.id,
        player: player.clone(),
        opponent: opponent.clone(),
        player_score,
        opponent_score,
        starting_server,
        played_at: timezone.day_key(game.played_at),
    }
}

/// Normalize a whole list, keeping its order
pub(crate) fn normalize_games(
    games: &[RawGame],
    viewer: PlayerId,
    timezone: Timezone,
) -> Vec<NormalizedGame> {
    games
        .iter()
        .map(|game| normalize_game(game, viewer, timezone))
        .collect()
}

/// Keep only the games played against `opponent`
pub(crate) fn filter_by_opponent(games: &[RawGame], opponent: PlayerId) -> Vec<RawGame> {
    games
        .iter()
        .filter(|game| game.involves(opponent))
        .cloned()
        .collect()
}
