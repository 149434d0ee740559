// Pokemon Battle Engine Schema - Shared type definitions
// This crate contains the data-catalog types that the battle engine reads
// but never mutates: elemental types, species, moves and spawn tables.

pub use encounter_data::*;
pub use move_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod encounter_data;
pub mod move_data;
pub mod pokemon_types;
pub mod species_data;
