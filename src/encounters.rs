//! Wild encounter generation from per-location spawn tables.

use crate::battle::combatant::Combatant;
use crate::catalog::{read_ron, Catalog};
use crate::errors::{BattleResult, CatalogError, CatalogResult, DistributionError};
use crate::progression::MAX_LEVEL;
use crate::rng::TurnRng;
use crate::roster::{Gender, MAX_IV};
use crate::weighted::{validate_weights, WeightedChoice};
use schema::{GenderRatio, SpawnTable, SpeciesData};
use std::path::Path;
use tracing::debug;

pub const ENCOUNTERS_FILE: &str = "encounters.ron";

/// Check that a table's rates form a distribution and its level ranges fall
/// within 1-100.
pub fn validate_spawn_table(table: &SpawnTable) -> BattleResult<()> {
    validate_weights(table.entries.iter().map(|entry| entry.rate)).map_err(|source| {
        DistributionError::SpawnTable {
            location: table.location.clone(),
            source: Box::new(source),
        }
    })?;

    for entry in &table.entries {
        if entry.min_level == 0
            || entry.min_level > entry.max_level
            || entry.max_level > MAX_LEVEL
        {
            return Err(CatalogError::InvalidLevelRange {
                location: table.location.clone(),
                min: entry.min_level,
                max: entry.max_level,
            }
            .into());
        }
    }
    Ok(())
}

/// Load every spawn table from `encounters.ron` in a data directory, checking
/// each one against the catalog before returning.
///
/// Every species must know at least one move at the lowest level it spawns at.
pub fn load_spawn_tables(data_path: &Path, catalog: &Catalog) -> BattleResult<Vec<SpawnTable>> {
    let tables: Vec<SpawnTable> = read_ron(&data_path.join(ENCOUNTERS_FILE))?;
    for table in &tables {
        check_spawn_table(table, catalog)?;
    }
    debug!(tables = tables.len(), "spawn tables loaded");
    Ok(tables)
}

/// Full load-time check of one table against the catalog.
pub fn check_spawn_table(table: &SpawnTable, catalog: &Catalog) -> BattleResult<()> {
    validate_spawn_table(table)?;
    for entry in &table.entries {
        let species = catalog.species(&entry.species)?;
        if species.moves_known_at(entry.min_level).is_empty() {
            return Err(CatalogError::NoMovesAtLevel {
                species: species.id.clone(),
                level: entry.min_level,
            }
            .into());
        }
    }
    Ok(())
}

/// Draw a gender from the species' ratio. Genderless species skip the draw.
pub fn assign_gender(ratio: GenderRatio, rng: &mut TurnRng) -> Result<Gender, DistributionError> {
    match ratio {
        GenderRatio::Genderless => Ok(Gender::Genderless),
        GenderRatio::MaleFraction(male) => WeightedChoice::choose_from(
            &[(male, Gender::Male), (1.0 - male, Gender::Female)],
            rng,
        ),
    }
}

pub fn random_ivs(rng: &mut TurnRng) -> [u8; 6] {
    let mut ivs = [0u8; 6];
    for iv in ivs.iter_mut() {
        *iv = rng.next_below(MAX_IV as u32 + 1, "individual value") as u8;
    }
    ivs
}

/// Build a combatant for `species` at `level` with random IVs and gender,
/// zero EVs and the moves its learnset gives it at that level.
pub fn wild_combatant(
    species: &SpeciesData,
    level: u8,
    catalog: &Catalog,
    rng: &mut TurnRng,
) -> BattleResult<Combatant> {
    let moves = species
        .moves_known_at(level)
        .iter()
        .map(|id| catalog.move_data(id).cloned())
        .collect::<CatalogResult<Vec<_>>>()?;
    if moves.is_empty() {
        return Err(CatalogError::NoMovesAtLevel {
            species: species.id.clone(),
            level,
        }
        .into());
    }
    let ivs = random_ivs(rng);
    let gender = assign_gender(species.gender_ratio, rng)?;

    Ok(Combatant::new(species, level, ivs, [0; 6], gender, moves))
}

/// Generate a wild opponent from a location's spawn table.
pub fn generate_wild(
    table: &SpawnTable,
    catalog: &Catalog,
    rng: &mut TurnRng,
) -> BattleResult<Combatant> {
    validate_spawn_table(table)?;
    let choice = WeightedChoice::new(
        table
            .entries
            .iter()
            .map(|entry| (entry.rate, entry))
            .collect(),
    )?;
    let entry = *choice.choose(rng);

    let span = (entry.max_level - entry.min_level) as u32 + 1;
    let level = entry.min_level + rng.next_below(span, "wild level") as u8;
    let species = catalog.species(&entry.species)?;

    let combatant = wild_combatant(species, level, catalog, rng)?;
    debug!(
        location = %table.location,
        species = %species.id,
        level,
        "wild encounter generated"
    );
    Ok(combatant)
}
