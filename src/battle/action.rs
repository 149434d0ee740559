use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Player, Side::Opponent];

    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// One combatant's intended turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Use the move in slot `move_index` of the actor's active combatant.
    UseMove {
        actor: Side,
        target: Side,
        move_index: usize,
    },
    /// Swap the actor's active combatant for the roster member at `incoming_index`.
    SwitchOut { actor: Side, incoming_index: usize },
    /// Try to run from a wild battle.
    AttemptFlee { actor: Side, target: Side },
}

impl Action {
    pub fn use_move(actor: Side, move_index: usize) -> Self {
        Action::UseMove {
            actor,
            target: actor.opponent(),
            move_index,
        }
    }

    pub fn switch(actor: Side, incoming_index: usize) -> Self {
        Action::SwitchOut {
            actor,
            incoming_index,
        }
    }

    pub fn flee(actor: Side) -> Self {
        Action::AttemptFlee {
            actor,
            target: actor.opponent(),
        }
    }

    pub fn actor(&self) -> Side {
        match self {
            Action::UseMove { actor, .. }
            | Action::SwitchOut { actor, .. }
            | Action::AttemptFlee { actor, .. } => *actor,
        }
    }

    /// Ordering tier: fleeing beats switching, switching beats using a move.
    pub fn tier(&self) -> u8 {
        match self {
            Action::AttemptFlee { .. } => 2,
            Action::SwitchOut { .. } => 1,
            Action::UseMove { .. } => 0,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::UseMove {
                actor, move_index, ..
            } => write!(f, "{:?} uses move {}", actor, move_index),
            Action::SwitchOut {
                actor,
                incoming_index,
            } => write!(f, "{:?} switches to {}", actor, incoming_index),
            Action::AttemptFlee { actor, .. } => write!(f, "{:?} tries to flee", actor),
        }
    }
}
