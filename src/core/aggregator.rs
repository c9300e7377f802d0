//! Aggregation of normalized games into totals and date/opponent groups
//!
//! Groups keep the order in which their keys first appear in the input, so a
//! most-recent-first list yields most-recent-first dates.

use std::collections::HashMap;

use crate::core::types::{DateGroup, GamesOverview, NormalizedGame, OpponentGroup, PlayerId, Totals};

/// Grand totals over every game, independent of grouping
pub(crate) fn compute_totals(games: &[NormalizedGame]) -> Totals {
    let mut totals = Totals::default();
    for game in games {
        totals.total_points_for = totals.total_points_for.saturating_add(game.player_score);
        totals.total_points_against = totals.total_points_against.saturating_add(game.opponent_score);
        if game.is_win() {
            totals.total_wins += 1;
        }
    }
    totals.total_losses = games.len() as i64 - totals.total_wins;
    totals
}

/// Date group under construction, with an index over its opponents
#[derive(Debug)]
struct DateAccumulator {
    date: String,
    opponents: Vec<OpponentGroup>,
    opponent_index: HashMap<PlayerId, usize>,
}

impl DateAccumulator {
    fn new(date: String) -> Self {
        DateAccumulator {
            date,
            opponents: Vec::new(),
            opponent_index: HashMap::new(),
        }
    }

    fn add_game(&mut self, game: &NormalizedGame) {
        let idx = match self.opponent_index.get(&game.opponent.id) {
            Some(&idx) => idx,
            None => {
                self.opponents.push(OpponentGroup::new(game.opponent.clone()));
                let idx = self.opponents.len() - 1;
                self.opponent_index.insert(game.opponent.id, idx);
                idx
            }
        };
        self.opponents[idx].add_game(game);
    }

    fn into_date_group(self) -> DateGroup {
        DateGroup {
            date: self.date,
            opponents: self.opponents,
        }
    }
}

/// Group games by played date, then by opponent within each date
pub(crate) fn group_by_date(games: &[NormalizedGame]) -> Vec<DateGroup> {
    let mut dates: Vec<DateAccumulator> = Vec::new();
    let mut date_index: HashMap<&str, usize> = HashMap::new();

    for game in games {
        let idx = *date_index.entry(game.played_at.as_str()).or_insert_with(|| {
            dates.push(DateAccumulator::new(game.played_at.clone()));
            dates.len() - 1
        });
        dates[idx].add_game(game);
    }

    dates
        .into_iter()
        .map(DateAccumulator::into_date_group)
        .collect()
}

/// Totals plus nested groups for one viewer's (already filtered) games
pub(crate) fn aggregate(games: &[NormalizedGame]) -> GamesOverview {
    GamesOverview {
        totals: compute_totals(games),
        dates: group_by_date(games),
    }
}
