use serde::{Deserialize, Serialize};

use crate::board::INITIAL_ROWS;
use crate::error::ConfigError;
use crate::piece::Color;

/// Game setup knobs. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rows of pieces each side starts with (1..=3).
    pub initial_rows: usize,
    pub first_player: Color,
    /// When true, an accepted move locks the engine until the presentation
    /// layer calls `complete_transition`. Headless callers turn this off.
    pub await_transitions: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        GameConfig {
            initial_rows: INITIAL_ROWS,
            first_player: Color::White,
            await_transitions: true,
        }
    }

    /// Config for callers with nothing to animate.
    pub fn headless() -> Self {
        GameConfig {
            await_transitions: false,
            ..Self::new()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=INITIAL_ROWS).contains(&self.initial_rows) {
            return Err(ConfigError::InvalidInitialRows(self.initial_rows));
        }
        Ok(())
    }
}
