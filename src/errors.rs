use crate::battle::action::Side;
use schema::{MoveId, SpeciesId};
use thiserror::Error;

/// Main error type for the battle engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    #[error("precondition violated: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("distribution error: {0}")]
    Distribution(#[from] DistributionError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Illegal calls into the battle engine. The presentation layer is expected to
/// prevent all of these, so receiving one points at a UI/engine contract bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("{0:?} already has an action pending")]
    AlreadySubmitted(Side),

    #[error("action for {actor:?} submitted on behalf of {side:?}")]
    ActorMismatch { side: Side, actor: Side },

    #[error("{0:?} has not submitted an action")]
    MissingAction(Side),

    #[error("no move in slot {0}")]
    InvalidMoveIndex(usize),

    #[error("move {0} has no uses remaining")]
    MoveExhausted(MoveId),

    #[error("no roster member at index {0}")]
    InvalidRosterIndex(usize),

    #[error("roster member {0} has fainted")]
    SwitchTargetFainted(usize),

    #[error("roster member {0} is already active")]
    SwitchTargetActive(usize),

    #[error("the active combatant of {0:?} has fainted")]
    ActorFainted(Side),

    #[error("{actor:?} cannot target {target:?}")]
    InvalidTarget { actor: Side, target: Side },

    #[error("only the player can flee")]
    FleeNotPlayer,

    #[error("cannot flee from a trainer battle")]
    FleeFromTrainer,

    #[error("waiting for {0:?} to send in a replacement")]
    AwaitingSwitch(Side),

    #[error("only a switch is accepted from {0:?} right now")]
    SwitchRequired(Side),

    #[error("actions are not accepted while the round is executing")]
    RoundInProgress,

    #[error("no ordered action left to execute")]
    NothingToExecute,

    #[error("the battle is over")]
    BattleFinished,

    #[error("a roster must hold between 1 and 6 combatants, got {0}")]
    InvalidRosterSize(usize),

    #[error("every combatant on {0:?}'s roster has fainted")]
    NoUsableCombatant(Side),
}

/// Malformed weight sets handed to a weighted choice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("cannot choose from an empty distribution")]
    Empty,

    #[error("weight {weight} at position {index} is negative or not a number")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("weights sum to {total}, expected 1.0")]
    BadTotal { total: f64 },

    #[error("spawn table '{location}': {source}")]
    SpawnTable {
        location: String,
        #[source]
        source: Box<DistributionError>,
    },
}

/// Errors related to catalog lookups and roster data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("species not found: {0}")]
    UnknownSpecies(SpeciesId),

    #[error("move not found: {0}")]
    UnknownMove(MoveId),

    #[error("duplicate catalog entry: {0}")]
    DuplicateEntry(String),

    #[error("invalid roster entry '{name}': {reason}")]
    InvalidRosterEntry { name: String, reason: String },

    #[error("spawn table '{location}' has an invalid level range {min}..={max}")]
    InvalidLevelRange { location: String, min: u8, max: u8 },

    #[error("invalid species '{species}': {reason}")]
    InvalidSpecies { species: SpeciesId, reason: String },

    #[error("species '{species}' has a malformed gender ratio: {source}")]
    InvalidGenderRatio {
        species: SpeciesId,
        #[source]
        source: DistributionError,
    },

    #[error("species '{species}' knows no moves at level {level}")]
    NoMovesAtLevel { species: SpeciesId, level: u8 },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data in {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using PreconditionError
pub type PreconditionResult<T> = Result<T, PreconditionError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
