use crate::battle::action::Side;
use crate::battle::state::BattleOutcome;
use serde::{Deserialize, Serialize};

/// Something that happened while executing an action.
///
/// Events carry display names rather than references into the battle, so a
/// presentation layer can keep them after the state has moved on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    MoveUsed {
        side: Side,
        user: String,
        move_name: String,
    },
    MoveMissed {
        side: Side,
        user: String,
    },
    /// A move with no damage effect resolved.
    NothingHappened,
    DamageDealt {
        side: Side,
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    Effectiveness {
        multiplier: f64,
    },
    NoEffect {
        target: String,
    },
    CombatantFainted {
        side: Side,
        roster_index: usize,
        name: String,
    },
    Switched {
        side: Side,
        from: String,
        to: String,
    },
    EscapeFailed {
        name: String,
    },
    Escaped {
        name: String,
    },
    ExperienceGained {
        name: String,
        amount: u32,
    },
    LevelUp {
        name: String,
        level: u8,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// The narration line for this event, or None for silent events.
    pub fn narration(&self) -> Option<String> {
        match self {
            BattleEvent::MoveUsed {
                user, move_name, ..
            } => Some(format!("{} used {}!", user, move_name)),
            BattleEvent::MoveMissed { user, .. } => Some(format!("{}'s attack missed!", user)),
            BattleEvent::NothingHappened => Some("But nothing happened!".to_string()),
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::Effectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 && m > 0.0 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::NoEffect { target } => Some(format!("It doesn't affect {}...", target)),
            BattleEvent::CombatantFainted { name, .. } => Some(format!("{} fainted!", name)),
            BattleEvent::Switched { side, from, to } => match side {
                Side::Player => Some(format!("Come back, {}! Go, {}!", from, to)),
                Side::Opponent => Some(format!("{} was withdrawn. {} was sent out!", from, to)),
            },
            BattleEvent::EscapeFailed { .. } => Some("Can't escape!".to_string()),
            BattleEvent::Escaped { .. } => Some("Got away safely!".to_string()),
            BattleEvent::ExperienceGained { name, amount } => {
                Some(format!("{} gained {} Exp. Points!", name, amount))
            }
            BattleEvent::LevelUp { name, level } => {
                Some(format!("{} grew to level {}!", name, level))
            }
            BattleEvent::BattleEnded { outcome } => match outcome {
                BattleOutcome::Winner(Side::Player) => Some("You won the battle!".to_string()),
                BattleOutcome::Winner(Side::Opponent) => {
                    Some("You are out of usable Pokémon! You blacked out!".to_string())
                }
                // The escape line already covers it.
                BattleOutcome::Fled(_) => None,
            },
        }
    }
}

/// Collects the events of a single executed action in order.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Narration lines of all non-silent events.
    pub fn narration(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::narration).collect()
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }
}
