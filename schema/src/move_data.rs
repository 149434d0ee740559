use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog key for a move, e.g. `"tackle"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(pub String);

impl MoveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: MoveId,
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: Option<u8>,
    /// Hit chance in percent. `None` never misses.
    pub accuracy: Option<u8>,
    pub max_pp: u8,
    #[serde(default)]
    pub priority: i8,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status && self.power.unwrap_or(0) > 0
    }
}
