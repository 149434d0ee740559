//! Read-only species and move lookup tables, loaded once from RON files.

use crate::errors::{CatalogError, CatalogResult};
use crate::weighted::validate_weights;
use schema::{GenderRatio, MoveData, MoveId, SpeciesData, SpeciesId};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const SPECIES_FILE: &str = "species.ron";
pub const MOVES_FILE: &str = "moves.ron";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    species: HashMap<SpeciesId, SpeciesData>,
    moves: HashMap<MoveId, MoveData>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and learnsets that name unknown moves.
    pub fn from_parts(species: Vec<SpeciesData>, moves: Vec<MoveData>) -> CatalogResult<Self> {
        let mut move_map = HashMap::with_capacity(moves.len());
        for move_data in moves {
            let id = move_data.id.clone();
            if move_map.insert(id.clone(), move_data).is_some() {
                return Err(CatalogError::DuplicateEntry(format!("move {}", id)));
            }
        }

        let mut species_map = HashMap::with_capacity(species.len());
        for species_data in species {
            validate_species(&species_data)?;
            if let Some((_, missing)) = species_data
                .learnset
                .iter()
                .find(|(_, move_id)| !move_map.contains_key(move_id))
            {
                return Err(CatalogError::UnknownMove(missing.clone()));
            }
            let id = species_data.id.clone();
            if species_map.insert(id.clone(), species_data).is_some() {
                return Err(CatalogError::DuplicateEntry(format!("species {}", id)));
            }
        }

        Ok(Self {
            species: species_map,
            moves: move_map,
        })
    }

    pub fn from_ron_strs(species_source: &str, moves_source: &str) -> CatalogResult<Self> {
        let species = parse_ron(species_source, SPECIES_FILE)?;
        let moves = parse_ron(moves_source, MOVES_FILE)?;
        Self::from_parts(species, moves)
    }

    /// Load `species.ron` and `moves.ron` from a data directory.
    pub fn load(data_path: &Path) -> CatalogResult<Self> {
        let species = read_ron(&data_path.join(SPECIES_FILE))?;
        let moves = read_ron(&data_path.join(MOVES_FILE))?;
        let catalog = Self::from_parts(species, moves)?;
        tracing::info!(
            species = catalog.species.len(),
            moves = catalog.moves.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn species(&self, id: &SpeciesId) -> CatalogResult<&SpeciesData> {
        self.species
            .get(id)
            .ok_or_else(|| CatalogError::UnknownSpecies(id.clone()))
    }

    pub fn move_data(&self, id: &MoveId) -> CatalogResult<&MoveData> {
        self.moves
            .get(id)
            .ok_or_else(|| CatalogError::UnknownMove(id.clone()))
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// A species needs one or two types and a gender ratio that forms a distribution.
fn validate_species(species: &SpeciesData) -> CatalogResult<()> {
    let type_count = species.types.len();
    if !(1..=2).contains(&type_count) {
        return Err(CatalogError::InvalidSpecies {
            species: species.id.clone(),
            reason: format!("has {} types, expected 1 or 2", type_count),
        });
    }

    if let GenderRatio::MaleFraction(male) = species.gender_ratio {
        validate_weights([male, 1.0 - male]).map_err(|source| {
            CatalogError::InvalidGenderRatio {
                species: species.id.clone(),
                source,
            }
        })?;
    }
    Ok(())
}

pub(crate) fn parse_ron<T: DeserializeOwned>(source: &str, origin: &str) -> CatalogResult<T> {
    ron::from_str(source).map_err(|source| CatalogError::Malformed {
        path: origin.to_string(),
        source,
    })
}

pub(crate) fn read_ron<T: DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_ron(&content, &path.display().to_string())
}
