//! Configuration for a game session.

use std::path::PathBuf;

/// Default save file location.
pub const DEFAULT_SAVE_PATH: &str = "savegame.json";

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Where Save writes and Load reads.
    pub save_path: PathBuf,
    /// Name given to a new player.
    pub player_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            player_name: "Wanderer".to_string(),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the save file path.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Set the player's name. Blank names keep the default.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.player_name = name.trim().to_string();
        }
        self
    }
}
