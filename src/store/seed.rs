//! Demo data for a fresh database

use chrono::{DateTime, Utc};

use crate::error::AppError;

use super::queries::{find_player_row, insert_game_row, insert_player_row};
use super::{GameStore, NewGame};

const DEMO_PLAYERS: [&str; 3] = ["Simon", "Quinn", "Shelly"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SeedSummary {
    pub(crate) players_added: usize,
    pub(crate) games_added: usize,
}

impl GameStore {
    /// Add the demo players (reusing any that already exist) and three games
    /// between them, all played at `now`. Nothing is kept if any insert fails.
    pub(crate) fn seed(&self, now: DateTime<Utc>) -> Result<SeedSummary, AppError> {
        let tx = self.conn.unchecked_transaction()?;

        let mut players = Vec::with_capacity(DEMO_PLAYERS.len());
        let mut players_added = 0;
        for name in DEMO_PLAYERS {
            let player = match find_player_row(&tx, name)? {
                Some(existing) => existing,
                None => {
                    players_added += 1;
                    insert_player_row(&tx, name)?
                }
            };
            players.push(player);
        }
        let (simon, quinn, shelly) = (players[0].id, players[1].id, players[2].id);

        let games = [
            (simon, quinn, 11, 8, simon),
            (quinn, simon, 12, 14, quinn),
            (simon, shelly, 12, 14, shelly),
        ];

        for (player1_id, player2_id, player1_score, player2_score, starting_player_id) in games {
            let game = NewGame {
                player1_id,
                player2_id,
                player1_score,
                player2_score,
                starting_player_id,
                played_at: now,
            };
            insert_game_row(&tx, &game)?;
        }
        tx.commit()?;

        log::info!("Seeded {players_added} players and {} games", games.len());
        Ok(SeedSummary {
            players_added,
            games_added: games.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{aggregate, normalize_games};
    use crate::utils::Timezone;

    #[test]
    fn seed_populates_demo_data() {
        let store = GameStore::open_in_memory().unwrap();
        let now: DateTime<Utc> = "2024-03-09T18:30:00Z".parse().unwrap();
        let summary = store.seed(now).unwrap();
        assert_eq!(summary, SeedSummary { players_added: 3, games_added: 3 });

        let simon = store.require_player("Simon").unwrap();
        let games = store.games_for_player(simon.id).unwrap();
        assert_eq!(games.len(), 3);

        let overview = aggregate(&normalize_games(&games, simon.id, Timezone::default()));
        assert_eq!(overview.totals.total_points_for, 11 + 14 + 12);
        assert_eq!(overview.totals.total_points_against, 8 + 12 + 14);
        assert_eq!(overview.totals.total_wins, 2);
        assert_eq!(overview.totals.total_losses, 1);
        assert_eq!(overview.dates.len(), 1);
        assert_eq!(overview.dates[0].opponents.len(), 2);
    }

    #[test]
    fn seeding_twice_reuses_players() {
        let store = GameStore::open_in_memory().unwrap();
        let now: DateTime<Utc> = "2024-03-09T18:30:00Z".parse().unwrap();
        store.seed(now).unwrap();
        let again = store.seed(now).unwrap();
        assert_eq!(again.players_added, 0);
        assert_eq!(store.players().unwrap().len(), 3);
    }

    #[test]
    fn failed_seed_leaves_no_players_behind() {
        let store = GameStore::open_in_memory().unwrap();
        store.conn.execute_batch("DROP TABLE games").unwrap();
        let now: DateTime<Utc> = "2024-03-09T18:30:00Z".parse().unwrap();
        assert!(store.seed(now).is_err());
        assert!(store.players().unwrap().is_empty());
    }
}
