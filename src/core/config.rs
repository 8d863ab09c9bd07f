use serde::{Deserialize, Serialize};

use crate::core::definitions::Color;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side played by the scripted opponent, `None` leaves both sides to
    /// the caller.
    pub opponent: Option<Color>,
    /// Seed of the opponent's jitter, entropy when absent.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            opponent: Some(Color::Black),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn seeded(seed: u64) -> Self {
        EngineConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn two_players() -> Self {
        EngineConfig {
            opponent: None,
            ..Default::default()
        }
    }
}
