use std::collections::VecDeque;

use crate::battle::action::Action;
use crate::config::SpeedTiePolicy;
use crate::rng::TurnRng;

/// Sort key for one pending action, compared field by field, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ActionPriority {
    pub action_priority: u8, // Flee: 2, Switch: 1, Move: 0
    pub move_priority: i8,   // From move data, e.g. Quick Attack
    pub speed: u16,          // Actor's Speed
}

/// The ordered actions of a round, consumed from the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionQueue {
    actions: VecDeque<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            actions: VecDeque::new(),
        }
    }

    /// Order prioritized actions: tier, then move priority, then Speed, all
    /// descending. Exact ties are settled by `tie_policy`.
    ///
    /// Input order is the submission order (player first), which `PlayerFirst` keeps.
    pub fn from_prioritized(
        mut prioritized: Vec<(Action, ActionPriority)>,
        tie_policy: SpeedTiePolicy,
        rng: &mut TurnRng,
    ) -> Self {
        prioritized.sort_by(|a, b| b.1.cmp(&a.1));

        if tie_policy == SpeedTiePolicy::CoinFlip {
            let mut start = 0;
            while start < prioritized.len() {
                let mut end = start + 1;
                while end < prioritized.len() && prioritized[end].1 == prioritized[start].1 {
                    end += 1;
                }
                shuffle(&mut prioritized[start..end], rng);
                start = end;
            }
        }

        Self {
            actions: prioritized.into_iter().map(|(action, _)| action).collect(),
        }
    }

    pub fn push_back(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    /// Put an action at the head of the queue, to be executed next.
    pub fn push_front(&mut self, action: Action) {
        self.actions.push_front(action);
    }

    pub fn pop_front(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn front(&self) -> Option<&Action> {
        self.actions.front()
    }

    /// Drop every queued action matching `predicate`.
    pub fn remove_where(&mut self, predicate: impl Fn(&Action) -> bool) {
        self.actions.retain(|action| !predicate(action));
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn to_vec(&self) -> Vec<Action> {
        self.actions.iter().copied().collect()
    }
}

/// Fisher-Yates over a run of tied actions.
fn shuffle(run: &mut [(Action, ActionPriority)], rng: &mut TurnRng) {
    for i in (1..run.len()).rev() {
        let j = rng.next_below(i as u32 + 1, "speed tie") as usize;
        run.swap(i, j);
    }
}
