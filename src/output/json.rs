use serde_json::{Value, json};

use crate::core::{NormalizedGame, RawGame};
use crate::output::table::GamesReport;
use crate::utils::Timezone;

fn game_json(game: &NormalizedGame) -> Value {
    json!({
        "id": game.id,
        "path": game.path(),
        "player": game.player,
        "opponent": game.opponent,
        "player_score": game.player_score,
        "opponent_score": game.opponent_score,
        "starting_server": game.starting_server,
        "played_at": game.played_at,
    })
}

pub(crate) fn output_games_json(report: &GamesReport<'_>) -> String {
    let dates: Vec<Value> = report
        .overview
        .dates
        .iter()
        .map(|day| {
            let opponents: Vec<Value> = day
                .opponents
                .iter()
                .map(|group| {
                    json!({
                        "opponent": group.opponent,
                        "games": group.games.iter().map(game_json).collect::<Vec<_>>(),
                        "points_for": group.points_for,
                        "points_against": group.points_against,
                    })
                })
                .collect();
            json!({ "date": day.date, "opponents": opponents })
        })
        .collect();

    let output = json!({
        "player": report.player,
        "filter": report.filter,
        "timezone": report.timezone.label(),
        "totals": report.overview.totals,
        "dates": dates,
        "deleted": report.deleted.iter().map(game_json).collect::<Vec<_>>(),
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

pub(crate) fn output_game_json(game: &RawGame, timezone: Timezone) -> String {
    let output = json!({
        "id": game.id,
        "player1": game.player1,
        "player2": game.player2,
        "player1_score": game.player1_score,
        "player2_score": game.player2_score,
        "starting_player_id": game.starting_player_id,
        "played_at": game.played_at.to_rfc3339(),
        "played_on": timezone.day_key(game.played_at),
        "is_deleted": game.is_deleted,
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Player, aggregate, normalize_games};

    fn player(id: i64, name: &str) -> Player {
        Player {
            id,
            username: name.to_string(),
        }
    }

    fn raw(id: i64, p1: &Player, p2: &Player, scores: (i64, i64), starter: i64) -> RawGame {
        RawGame {
            id,
            player1_id: p1.id,
            player2_id: p2.id,
            player1_score: scores.0,
            player2_score: scores.1,
            starting_player_id: starter,
            played_at: "2024-03-09T18:30:00Z".parse().unwrap(),
            player1: p1.clone(),
            player2: p2.clone(),
            is_deleted: false,
        }
    }

    #[test]
    fn games_json_shape() {
        let simon = player(1, "Simon");
        let quinn = player(2, "Quinn");
        let games = vec![raw(2, &simon, &quinn, (11, 8), 1), raw(1, &quinn, &simon, (11, 9), 2)];
        let normalized = normalize_games(&games, simon.id, Timezone::default());
        let overview = aggregate(&normalized);
        let report = GamesReport {
            player: &simon,
            filter: Some(&quinn),
            overview: &overview,
            deleted: &[],
            timezone: Timezone::default(),
        };

        let v: Value = serde_json::from_str(&output_games_json(&report)).unwrap();
        assert_eq!(v["player"]["username"], "Simon");
        assert_eq!(v["filter"]["id"], 2);
        assert_eq!(v["timezone"], "UTC");
        assert_eq!(v["totals"]["total_points_for"], 20);
        assert_eq!(v["totals"]["total_points_against"], 19);
        assert_eq!(v["totals"]["total_wins"], 1);
        assert_eq!(v["totals"]["total_losses"], 1);

        let group = &v["dates"][0]["opponents"][0];
        assert_eq!(v["dates"][0]["date"], "09/03/2024");
        assert_eq!(group["opponent"]["username"], "Quinn");
        assert_eq!(group["points_for"], 20);
        assert_eq!(group["games"][0]["path"], "/games/2");
        assert_eq!(group["games"][0]["starting_server"], "player");
        assert_eq!(group["games"][1]["starting_server"], "opponent");
        assert_eq!(v["deleted"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn game_json_keeps_stored_roles() {
        let simon = player(1, "Simon");
        let quinn = player(2, "Quinn");
        let v: Value =
            serde_json::from_str(&output_game_json(&raw(5, &quinn, &simon, (12, 14), 2), Timezone::default()))
                .unwrap();
        assert_eq!(v["player1"]["username"], "Quinn");
        assert_eq!(v["player2_score"], 14);
        assert_eq!(v["played_on"], "09/03/2024");
        assert_eq!(v["played_at"], "2024-03-09T18:30:00+00:00");
        assert_eq!(v["is_deleted"], false);
    }
}
