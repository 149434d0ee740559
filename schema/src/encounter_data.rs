use crate::SpeciesId;
use serde::{Deserialize, Serialize};

/// One species that can appear at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub species: SpeciesId,
    /// Share of encounters at this location, in `0.0..=1.0`.
    pub rate: f64,
    pub min_level: u8,
    pub max_level: u8,
}

/// Wild encounter table for a single location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    pub location: String,
    pub entries: Vec<SpawnEntry>,
}
