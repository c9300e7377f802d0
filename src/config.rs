use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::consts::APP_DIR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Username to view games as
    #[serde(default)]
    pub(crate) player: Option<String>,
    #[serde(default)]
    pub(crate) db: Option<PathBuf>,
    #[serde(default)]
    pub(crate) state: Option<PathBuf>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) json: bool,
}

impl Config {
    pub(crate) fn load() -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        log::debug!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        log::warn!("Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/pingstats/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join(APP_DIR).join("config.toml"));
        }

        // 2. Platform config dir (macOS: ~/Library/Application Support/pingstats/config.toml)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join(APP_DIR).join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.pingstats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".pingstats.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("pingstats")));
    }

    #[test]
    fn parses_all_keys() {
        let config: Config = toml::from_str(
            r#"
            player = "Simon"
            db = "/tmp/games.db"
            state = "/tmp/state.json"
            timezone = "Europe/London"
            color = "never"
            no_color = true
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(config.player.as_deref(), Some("Simon"));
        assert_eq!(config.db, Some(PathBuf::from("/tmp/games.db")));
        assert_eq!(config.state, Some(PathBuf::from("/tmp/state.json")));
        assert_eq!(config.timezone.as_deref(), Some("Europe/London"));
        assert_eq!(config.color, Some(ConfigColorMode::Never));
        assert!(config.no_color);
        assert!(config.json);
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.player.is_none());
        assert!(config.color.is_none());
        assert!(!config.json);
    }

    #[test]
    fn rejects_unknown_color() {
        assert!(toml::from_str::<Config>(r#"color = "sometimes""#).is_err());
    }
}
