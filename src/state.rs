//! Remembered UI state between runs
//!
//! Currently just the opponent filter for the games list. Loaded once when a
//! command starts and written back only when the filter changes.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::consts::APP_DIR;
use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FilterState {
    /// Username of the opponent to restrict the games list to
    #[serde(default)]
    pub(crate) opponent: Option<String>,
}

impl FilterState {
    pub(crate) fn default_path() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("state.json")
    }

    /// Missing file means no filter; a corrupt one is an error
    pub(crate) fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let file = File::open(path)?;
        let state = serde_json::from_reader(file)?;
        log::debug!("Loaded filter state from {}", path.display());
        Ok(state)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        log::debug!("Saved filter state to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty_filter() {
        let dir = tempfile::tempdir().unwrap();
        let state = FilterState::load(&dir.path().join("state.json")).unwrap();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let state = FilterState {
            opponent: Some("Quinn".to_string()),
        };
        state.save(&path).unwrap();
        assert_eq!(FilterState::load(&path).unwrap(), state);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(FilterState::load(&path), Err(AppError::State(_))));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"opponent":"Shelly","theme":"dark"}"#).unwrap();
        assert_eq!(
            FilterState::load(&path).unwrap().opponent.as_deref(),
            Some("Shelly")
        );
    }
}
