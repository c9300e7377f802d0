/// Day-granularity grouping key, day/month/year: "09/03/2024"
pub(crate) const DAY_KEY_FORMAT: &str = "%d/%m/%Y";

/// Date and time shown on the game detail view: "09/03/2024 18:30"
pub(crate) const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Highest score a game can record
pub(crate) const MAX_SCORE: i64 = 999;

/// Marker appended to the score of whoever served first
pub(crate) const SERVE_MARKER: &str = "*";

/// Application directory name under the platform config/data dirs
pub(crate) const APP_DIR: &str = "pingstats";
