use crate::{MoveId, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Catalog key for a species, e.g. `"pidgey"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesId(pub String);

impl SpeciesId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    /// Base stats in HP, ATK, DEF, SP.ATK, SP.DEF, SPD order.
    pub fn to_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }

    pub fn total(&self) -> u16 {
        self.to_array().iter().map(|&stat| stat as u16).sum()
    }
}

/// Experience curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum GrowthRate {
    Erratic,
    Fast,
    MediumFast,
    MediumSlow,
    Slow,
    Fluctuating,
}

/// Share of males among wild members of a species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GenderRatio {
    Genderless,
    /// Fraction of males in `0.0..=1.0`; the remainder are female.
    MaleFraction(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: SpeciesId,
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub growth_rate: GrowthRate,
    pub gender_ratio: GenderRatio,
    pub base_exp: u16,
    /// (level, move) pairs, in the order they are learned.
    #[serde(default)]
    pub learnset: Vec<(u8, MoveId)>,
}

impl SpeciesData {
    /// The four most recently learned level-up moves at or below `level`.
    pub fn moves_known_at(&self, level: u8) -> Vec<MoveId> {
        let learned: Vec<&MoveId> = self
            .learnset
            .iter()
            .filter(|(learn_level, _)| *learn_level <= level)
            .map(|(_, move_id)| move_id)
            .collect();

        let skip = learned.len().saturating_sub(4);
        learned.into_iter().skip(skip).cloned().collect()
    }
}
