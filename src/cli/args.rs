//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};
use crate::state::FilterState;
use crate::store::GameStore;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "pingstats")]
#[command(about = "Table tennis scores, wins and losses by date and opponent", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Player whose games to show and record (username)
    #[arg(short, long, global = true, value_name = "NAME")]
    pub(crate) player: Option<String>,

    /// Database file (default: <data dir>/pingstats/games.db)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) db: Option<PathBuf>,

    /// Remembered filter file (default: <data dir>/pingstats/state.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) state: Option<PathBuf>,

    /// Timezone for game dates (e.g., "Europe/London", "UTC", "local"; default UTC)
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.json && config.json {
            self.json = true;
        }

        if let Some(color) = config.color
            && matches!(self.color, ColorMode::Auto)
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // String options: only apply if CLI didn't set them
        if self.player.is_none() {
            self.player = config.player.clone();
        }
        if self.db.is_none() {
            self.db = config.db.clone();
        }
        if self.state.is_none() {
            self.state = config.state.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(GameStore::default_path)
    }

    pub(crate) fn state_path(&self) -> PathBuf {
        self.state.clone().unwrap_or_else(FilterState::default_path)
    }
}
