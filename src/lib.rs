// In: src/lib.rs

//! Pokemon Battle Engine
//!
//! Turn-based battle resolution for a Pokemon-style RPG: action ordering,
//! derived stats, damage with type effectiveness, flee odds, experience
//! curves and wild encounter generation. The engine is advanced one step at a
//! time by an external driver and never performs I/O during a battle.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod catalog;
pub mod config;
pub mod encounters;
pub mod errors;
pub mod pool;
pub mod progression;
pub mod rng;
pub mod roster;
pub mod type_chart;
pub mod weighted;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, GenderRatio, GrowthRate, MoveCategory, MoveData, MoveId, PokemonType, SpawnEntry,
    SpawnTable, SpeciesData, SpeciesId,
};

// --- From this crate's modules (`src/`) ---

// Battle state, turn protocol and decision policies.
pub use battle::action::{Action, Side};
pub use battle::ai::{Behavior, ScoringAI};
pub use battle::combatant::{Combatant, MoveSlot};
pub use battle::events::BattleEvent;
pub use battle::state::{
    BattleFlags, BattleOutcome, BattlePhase, BattleState, ExecutionOutcome, FaintedEvent,
};
pub use battle::stats::{derived_stat, Stat, Stats};

// Data access and setup.
pub use catalog::Catalog;
pub use config::{BattleConfig, BattleKind, SpeedTiePolicy};
pub use encounters::{check_spawn_table, generate_wild, load_spawn_tables, validate_spawn_table};
pub use roster::{load_party, Gender, KnownMove, RosterMember};

// Leaf utilities.
pub use pool::BoundedPool;
pub use progression::{experience_yield, level_for_experience, xp_for_next_level, xp_to_reach_level};
pub use rng::TurnRng;
pub use weighted::WeightedChoice;

// Crate-specific error and result types.
pub use errors::{
    BattleEngineError, BattleResult, CatalogError, CatalogResult, DistributionError,
    PreconditionError, PreconditionResult,
};
