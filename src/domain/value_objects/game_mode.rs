//! Game mode of a scenario card

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Style of play the scenario is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Casual,
    Narrative,
    Matched,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Casual, GameMode::Narrative, GameMode::Matched];
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Casual => write!(f, "casual"),
            GameMode::Narrative => write!(f, "narrative"),
            GameMode::Matched => write!(f, "matched"),
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "casual" => Ok(GameMode::Casual),
            "narrative" => Ok(GameMode::Narrative),
            "matched" => Ok(GameMode::Matched),
            other => Err(DomainError::validation(format!(
                "invalid game mode '{}', must be one of: casual, matched, narrative",
                other
            ))),
        }
    }
}
