//! Decision policies for sides the engine does not get input for.

use crate::battle::action::{Action, Side};
use crate::battle::state::{BattlePhase, BattleState};
use crate::type_chart::multiplier_against;
use ordered_float::OrderedFloat;
use schema::MoveCategory;

/// Anything that can pick an action for a side.
///
/// The engine never calls this itself; the driver asks a behavior for an
/// action and submits it like any other.
pub trait Behavior {
    /// Returns None when the side has nothing to submit in the current phase.
    fn decide_action(&self, side: Side, battle_state: &BattleState) -> Option<Action>;
}

/// Greedy policy: the highest-scoring usable move, or the healthiest
/// replacement when a switch is required.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringAI;

impl ScoringAI {
    pub fn new() -> Self {
        Self
    }

    /// Expected value of a move against the current defender. Immune targets
    /// score below zero; moves with no power score zero.
    fn score_move(&self, side: Side, move_index: usize, state: &BattleState) -> f64 {
        let attacker = state.active_combatant(side);
        let defender = state.active_combatant(side.opponent());
        let Some(slot) = attacker.move_slot(move_index) else {
            return f64::MIN;
        };
        let data = &slot.data;

        if data.category == MoveCategory::Status {
            return 0.0;
        }
        let effectiveness = multiplier_against(data.move_type, defender.types());
        if effectiveness == 0.0 {
            return -1.0;
        }
        let same_type = if attacker.has_type(data.move_type) {
            1.5
        } else {
            1.0
        };
        // Sure-hit moves get a slight edge.
        let accuracy = data.accuracy.map(|a| a as f64).unwrap_or(101.0) / 100.0;

        data.power.unwrap_or(0) as f64 * effectiveness * same_type * accuracy
    }

    fn healthiest_switch(&self, side: Side, state: &BattleState) -> Option<Action> {
        let roster = state.roster(side);
        state
            .valid_switches(side)
            .into_iter()
            .max_by_key(|&index| OrderedFloat(roster[index].health().fraction()))
            .map(|index| Action::switch(side, index))
    }
}

impl Behavior for ScoringAI {
    fn decide_action(&self, side: Side, battle_state: &BattleState) -> Option<Action> {
        match battle_state.phase() {
            BattlePhase::AwaitingSwitch(waiting) if waiting == side => {
                return self.healthiest_switch(side, battle_state);
            }
            BattlePhase::AwaitingActions if battle_state.pending(side).is_none() => {}
            _ => return None,
        }

        let best_move = battle_state
            .valid_actions(side)
            .into_iter()
            .filter_map(|action| match action {
                Action::UseMove { move_index, .. } => {
                    Some((action, self.score_move(side, move_index, battle_state)))
                }
                _ => None,
            })
            .max_by_key(|(_, score)| OrderedFloat(*score));

        match best_move {
            Some((action, score)) if score >= 0.0 => Some(action),
            Some((action, _)) => self.healthiest_switch(side, battle_state).or(Some(action)),
            None => self.healthiest_switch(side, battle_state),
        }
    }
}
