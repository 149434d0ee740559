use crate::errors::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattleKind {
    /// Against a wild combatant; the player may flee.
    #[default]
    Wild,
    /// Against another trainer; fleeing is not allowed.
    Trainer,
}

/// How to order two actions that tie on tier, move priority and Speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedTiePolicy {
    /// A coin flip from the battle RNG; reproducible for a fixed seed.
    #[default]
    CoinFlip,
    /// The player's action goes first.
    PlayerFirst,
}

/// Per-battle settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub kind: BattleKind,
    pub seed: Option<u64>,
    pub speed_tie: SpeedTiePolicy,
    pub damage_variance: bool,
    pub award_experience: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            kind: BattleKind::Wild,
            seed: None,
            speed_tie: SpeedTiePolicy::CoinFlip,
            damage_variance: true,
            award_experience: true,
        }
    }
}

impl BattleConfig {
    pub fn wild() -> Self {
        Self::default()
    }

    pub fn trainer() -> Self {
        Self {
            kind: BattleKind::Trainer,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_ron_str(source: &str) -> CatalogResult<Self> {
        ron::from_str(source).map_err(|source| CatalogError::Malformed {
            path: "<inline config>".to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| CatalogError::Malformed {
            path: path.display().to_string(),
            source,
        })
    }
}
