use crate::helpers::write_json_atomic;
use crate::model::{Difficulty, StoreError, DEFAULT_PLAYER_NAMES};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "numguess";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const DATA_DIR_ENV: &str = "NUMGUESS_DATA_DIR";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub multiplayer: bool,

    #[serde(default = "default_player_names")]
    pub player_names: [String; 2],
}

// Helper functions for default values
fn default_version() -> u32 {
    2
}
fn default_player_names() -> [String; 2] {
    DEFAULT_PLAYER_NAMES.map(String::from)
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            difficulty: Difficulty::default(),
            multiplayer: false,
            player_names: default_player_names(),
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = Self::settings_path(data_dir);
        if let Ok(contents) = fs::read_to_string(&path) {
            match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    return settings;
                }
                Err(err) => {
                    warn!(target: "settings", "Ignoring malformed settings in {:?}: {}", path, err)
                }
            }
        }
        debug!(target: "settings", "Using default settings");
        Settings::default()
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), StoreError> {
        write_json_atomic(&Self::settings_path(data_dir), self)
    }

    fn settings_path(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE_NAME)
    }

    fn migrate(&mut self) {
        match self.version {
            // version 1 stored no player names; serde filled defaults
            0 | 1 => {
                self.version = 2;
            }
            _ => (),
        }
    }

    /// `$NUMGUESS_DATA_DIR`, then the XDG data home, then `./.numguess`.
    pub fn data_dir() -> PathBuf {
        if let Some(dir) = non_empty_env(DATA_DIR_ENV) {
            return PathBuf::from(dir);
        }
        if let Some(dir) = non_empty_env("XDG_DATA_HOME") {
            return PathBuf::from(dir).join(APP_DIR_NAME);
        }
        if let Some(home) = non_empty_env("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join(APP_DIR_NAME);
        }
        PathBuf::from(format!(".{}", APP_DIR_NAME))
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    /// A malformed `SEED` is ignored.
    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.trim().parse::<u64>().ok())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
