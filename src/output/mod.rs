mod format;
mod json;
mod table;

pub(crate) use json::{output_game_json, output_games_json};
pub(crate) use table::{GamesReport, print_game_detail, print_games_report};
