//! Core module - game normalization and aggregation

mod aggregator;
mod normalizer;
mod types;

pub(crate) use aggregator::aggregate;
pub(crate) use normalizer::{filter_by_opponent, normalize_game, normalize_games};
pub(crate) use types::{
    GameId, GamesOverview, NormalizedGame, OpponentGroup, Player, PlayerId, RawGame,
    StartingServer, Totals,
};
