use comfy_table::{Cell, Color, Table};
use std::fmt::Write;

use crate::core::{
    GamesOverview, NormalizedGame, OpponentGroup, Player, RawGame, StartingServer, Totals,
};
use crate::output::format::{create_styled_table, format_score, header_cell, right_cell, styled_cell};
use crate::utils::Timezone;

/// Everything the games list shows for one viewer
#[derive(Debug, Clone, Copy)]
pub(crate) struct GamesReport<'a> {
    pub(crate) player: &'a Player,
    /// Opponent the list is restricted to, if any
    pub(crate) filter: Option<&'a Player>,
    pub(crate) overview: &'a GamesOverview,
    pub(crate) deleted: &'a [NormalizedGame],
    pub(crate) timezone: Timezone,
}

fn build_totals_table(totals: &Totals, use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Points For", use_color),
        header_cell("Points Against", use_color),
        header_cell("Wins", use_color),
        header_cell("Losses", use_color),
    ]);
    let cyan = if use_color { Some(Color::Cyan) } else { None };
    table.add_row(vec![
        right_cell(&totals.total_points_for.to_string(), cyan, true),
        right_cell(&totals.total_points_against.to_string(), cyan, true),
        right_cell(&totals.total_wins.to_string(), cyan, true),
        right_cell(&totals.total_losses.to_string(), cyan, true),
    ]);
    table
}

fn build_opponent_table(group: &OpponentGroup, use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Game", use_color),
        header_cell("You", use_color),
        header_cell(&group.opponent.username, use_color),
    ]);

    let green = if use_color { Some(Color::Green) } else { None };
    for game in &group.games {
        let won = game.player_score > game.opponent_score;
        let lost = game.opponent_score > game.player_score;
        table.add_row(vec![
            Cell::new(game.id),
            right_cell(
                &format_score(game.player_score, game.starting_server == StartingServer::Player),
                if won { green } else { None },
                won,
            ),
            right_cell(
                &format_score(game.opponent_score, game.starting_server == StartingServer::Opponent),
                None,
                lost,
            ),
        ]);
    }

    let cyan = if use_color { Some(Color::Cyan) } else { None };
    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        right_cell(&group.points_for.to_string(), cyan, true),
        right_cell(&group.points_against.to_string(), cyan, true),
    ]);
    table
}

fn build_deleted_table(games: &[NormalizedGame], use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Game", use_color),
        header_cell("Date", use_color),
        header_cell("Opponent", use_color),
        header_cell("Your Score", use_color),
        header_cell("Their Score", use_color),
    ]);
    for game in games {
        table.add_row(vec![
            Cell::new(game.id),
            Cell::new(&game.played_at),
            Cell::new(&game.opponent.username),
            right_cell(&game.player_score.to_string(), None, false),
            right_cell(&game.opponent_score.to_string(), None, false),
        ]);
    }
    table
}

/// Render the whole games list: totals, one section per date, deleted games
pub(crate) fn render_games_report(report: &GamesReport<'_>, use_color: bool) -> String {
    let mut out = String::new();

    let title = match report.filter {
        Some(opponent) => format!("Games: {} vs {}", report.player.username, opponent.username),
        None => format!("Games: {}", report.player.username),
    };
    let _ = writeln!(out, "\n  {title} (dates in {})\n", report.timezone.label());

    if report.overview.dates.is_empty() {
        out.push_str("  No games found.\n");
    } else {
        let _ = writeln!(out, "{}", build_totals_table(&report.overview.totals, use_color));
        for day in &report.overview.dates {
            let count = day.game_count();
            let plural = if count == 1 { "game" } else { "games" };
            let _ = writeln!(out, "\n  {} ({count} {plural})\n", day.date);
            for group in &day.opponents {
                let _ = writeln!(out, "{}", build_opponent_table(group, use_color));
            }
        }
        out.push_str("\n  * served first\n");
    }

    if !report.deleted.is_empty() {
        out.push_str("\n  Deleted Games\n\n");
        let _ = writeln!(out, "{}", build_deleted_table(report.deleted, use_color));
    }

    out
}

pub(crate) fn print_games_report(report: &GamesReport<'_>, use_color: bool) {
    print!("{}", render_games_report(report, use_color));
}

/// Render a single game in stored roles
pub(crate) fn render_game_detail(game: &RawGame, timezone: Timezone, use_color: bool) -> String {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell(&game.player1.username, use_color),
        header_cell(&game.player2.username, use_color),
    ]);
    let p1_won = game.player1_score > game.player2_score;
    let p2_won = game.player2_score > game.player1_score;
    table.add_row(vec![
        right_cell(
            &format_score(game.player1_score, game.starting_player_id == game.player1_id),
            None,
            p1_won,
        ),
        right_cell(
            &format_score(game.player2_score, game.starting_player_id == game.player2_id),
            None,
            p2_won,
        ),
    ]);

    let mut out = format!(
        "\n  Game {} (played {} {})\n\n{table}\n\n  * served first\n",
        game.id,
        timezone.format_datetime(game.played_at),
        timezone.label()
    );
    if game.is_deleted {
        let status = if use_color {
            "\n  \x1b[33mDeleted\x1b[0m (restore with `pingstats undelete`)\n"
        } else {
            "\n  Deleted (restore with `pingstats undelete`)\n"
        };
        out.push_str(status);
    }
    out
}

pub(crate) fn print_game_detail(game: &RawGame, timezone: Timezone, use_color: bool) {
    print!("{}", render_game_detail(game, timezone, use_color));
}
