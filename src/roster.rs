//! Persistent party members, the save-data side of a battle.

use crate::catalog::{read_ron, Catalog};
use crate::errors::{CatalogError, CatalogResult};
use crate::progression::MAX_LEVEL;
use schema::{MoveId, SpeciesId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const MAX_PARTY_SIZE: usize = 6;
pub const MAX_MOVES: usize = 4;
pub const MAX_IV: u8 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Genderless,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Gender::Male => "♂",
            Gender::Female => "♀",
            Gender::Genderless => "",
        };
        f.write_str(symbol)
    }
}

/// A known move and how many uses it has left. `pp: None` means full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownMove {
    pub id: MoveId,
    #[serde(default)]
    pub pp: Option<u8>,
}

impl KnownMove {
    pub fn fresh(id: MoveId) -> Self {
        Self { id, pp: None }
    }
}

/// A party member as it is stored between battles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterMember {
    pub species: SpeciesId,
    #[serde(default)]
    pub nickname: Option<String>,
    pub level: u8,
    pub gender: Gender,
    #[serde(default)]
    pub experience: u32,
    pub ivs: [u8; 6],
    #[serde(default)]
    pub evs: [u8; 6],
    /// `None` means full health.
    #[serde(default)]
    pub current_hp: Option<u16>,
    pub moves: Vec<KnownMove>,
}

impl RosterMember {
    /// Check the entry against the catalog and the stat limits.
    pub fn validate(&self, catalog: &Catalog) -> CatalogResult<()> {
        let species = catalog.species(&self.species)?;
        let invalid = |reason: String| CatalogError::InvalidRosterEntry {
            name: self
                .nickname
                .clone()
                .unwrap_or_else(|| species.name.clone()),
            reason,
        };

        if self.level == 0 || self.level > MAX_LEVEL {
            return Err(invalid(format!("level {} is outside 1-100", self.level)));
        }
        if let Some(iv) = self.ivs.iter().find(|&&iv| iv > MAX_IV) {
            return Err(invalid(format!("IV {} exceeds {}", iv, MAX_IV)));
        }
        if self.moves.is_empty() || self.moves.len() > MAX_MOVES {
            return Err(invalid(format!(
                "knows {} moves, expected 1-{}",
                self.moves.len(),
                MAX_MOVES
            )));
        }
        for known in &self.moves {
            catalog.move_data(&known.id)?;
        }
        Ok(())
    }
}

/// Load a saved party (a RON list of members).
pub fn load_party(path: &Path) -> CatalogResult<Vec<RosterMember>> {
    read_ron(path)
}
