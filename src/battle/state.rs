use crate::battle::action::{Action, Side};
use crate::battle::action_queue::ActionQueue;
use crate::battle::combatant::Combatant;
use crate::battle::events::BattleEvent;
use crate::catalog::Catalog;
use crate::config::{BattleConfig, BattleKind};
use crate::errors::{BattleResult, CatalogResult, PreconditionError, PreconditionResult};
use crate::roster::{RosterMember, MAX_PARTY_SIZE};
use crate::rng::TurnRng;
use serde::{Deserialize, Serialize};

/// How a finished battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The other side ran out of combatants.
    Winner(Side),
    /// This side escaped.
    Fled(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Collecting one action per side for the next round.
    AwaitingActions,
    /// The round is ordered and being executed one action at a time.
    Executing,
    /// The side's active combatant fainted; only a replacement switch is accepted.
    AwaitingSwitch(Side),
    Finished(BattleOutcome),
}

/// Status flags the presentation layer polls between steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleFlags {
    /// The player must pick a replacement. Cleared when a player switch executes.
    pub open_switch_menu: bool,
    /// Narration is buffered and ready for display.
    pub log_ready: bool,
    pub battle_finished: bool,
}

/// A combatant that fainted during one executed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaintedEvent {
    pub side: Side,
    pub roster_index: usize,
}

/// Everything one `execute_next` call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    pub action: Action,
    pub events: Vec<BattleEvent>,
    pub narration: Vec<String>,
    pub fainted: Vec<FaintedEvent>,
    pub flags: BattleFlags,
    pub flags_changed: bool,
}

/// The whole state of one battle between the player's roster and an opponent's.
///
/// Owned by a single driver and advanced strictly in sequence:
/// `submit_action` for each side, `order_actions`, then `execute_next` until
/// the phase leaves `Executing`.
#[derive(Debug, Clone)]
pub struct BattleState {
    pub(crate) config: BattleConfig,
    pub(crate) rosters: [Vec<Combatant>; 2],
    pub(crate) active: [usize; 2],
    pub(crate) pending: [Option<Action>; 2],
    pub(crate) forced_switch: Option<Action>,
    pub(crate) queue: ActionQueue,
    pub(crate) phase: BattlePhase,
    pub(crate) flags: BattleFlags,
    pub(crate) narration: Vec<String>,
    pub(crate) round: u32,
    pub(crate) rng: TurnRng,
}

impl BattleState {
    /// Start a battle, seeding the RNG from the config.
    pub fn new(
        player: Vec<Combatant>,
        opponent: Vec<Combatant>,
        config: BattleConfig,
    ) -> PreconditionResult<Self> {
        let rng = TurnRng::from_optional_seed(config.seed);
        Self::with_rng(player, opponent, config, rng)
    }

    /// Start a battle with an explicit randomness source.
    pub fn with_rng(
        player: Vec<Combatant>,
        opponent: Vec<Combatant>,
        config: BattleConfig,
        rng: TurnRng,
    ) -> PreconditionResult<Self> {
        let player_active = first_usable(&player, Side::Player)?;
        let opponent_active = first_usable(&opponent, Side::Opponent)?;

        Ok(Self {
            config,
            rosters: [player, opponent],
            active: [player_active, opponent_active],
            pending: [None, None],
            forced_switch: None,
            queue: ActionQueue::new(),
            phase: BattlePhase::AwaitingActions,
            flags: BattleFlags::default(),
            narration: Vec::new(),
            round: 0,
            rng,
        })
    }

    /// Build the player's side from saved party members.
    pub fn from_party(
        party: &[RosterMember],
        opponent: Vec<Combatant>,
        catalog: &Catalog,
        config: BattleConfig,
    ) -> BattleResult<Self> {
        let player = party
            .iter()
            .map(|member| Combatant::from_roster(member, catalog))
            .collect::<CatalogResult<Vec<_>>>()?;
        Ok(Self::new(player, opponent, config)?)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, BattlePhase::Finished(_))
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The side that must send in a replacement, if any.
    pub fn awaiting_switch(&self) -> Option<Side> {
        match self.phase {
            BattlePhase::AwaitingSwitch(side) => Some(side),
            _ => None,
        }
    }

    pub fn active_index(&self, side: Side) -> usize {
        self.active[side.index()]
    }

    pub fn active_combatant(&self, side: Side) -> &Combatant {
        &self.rosters[side.index()][self.active[side.index()]]
    }

    pub(crate) fn active_combatant_mut(&mut self, side: Side) -> &mut Combatant {
        let index = self.active[side.index()];
        &mut self.rosters[side.index()][index]
    }

    pub fn roster(&self, side: Side) -> &[Combatant] {
        &self.rosters[side.index()]
    }

    pub fn pending(&self, side: Side) -> Option<&Action> {
        self.pending[side.index()].as_ref()
    }

    /// The ordered actions not yet executed this round.
    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    pub fn peek_flags(&self) -> BattleFlags {
        self.flags
    }

    /// Narration buffered since the last call. Clears the log flag.
    pub fn take_narration(&mut self) -> Vec<String> {
        self.flags.log_ready = false;
        std::mem::take(&mut self.narration)
    }

    /// Returns whether the battle-finished flag was set, clearing it.
    pub fn consume_battle_finished(&mut self) -> bool {
        std::mem::take(&mut self.flags.battle_finished)
    }

    pub fn has_non_fainted(&self, side: Side) -> bool {
        self.rosters[side.index()]
            .iter()
            .any(|combatant| !combatant.is_fainted())
    }

    /// Roster indices `side` could switch to right now.
    pub fn valid_switches(&self, side: Side) -> Vec<usize> {
        let active = self.active[side.index()];
        self.rosters[side.index()]
            .iter()
            .enumerate()
            .filter(|(index, combatant)| *index != active && !combatant.is_fainted())
            .map(|(index, _)| index)
            .collect()
    }

    /// Every action `side` may submit in the current phase.
    pub fn valid_actions(&self, side: Side) -> Vec<Action> {
        let switches = self
            .valid_switches(side)
            .into_iter()
            .map(|index| Action::switch(side, index));

        match self.phase {
            BattlePhase::AwaitingSwitch(waiting) if waiting == side => {
                if self.forced_switch.is_some() {
                    return Vec::new();
                }
                switches.collect()
            }
            BattlePhase::AwaitingActions if self.pending[side.index()].is_none() => {
                let active = self.active_combatant(side);
                if active.is_fainted() {
                    return Vec::new();
                }
                let mut actions: Vec<Action> = active
                    .moves()
                    .iter()
                    .enumerate()
                    .filter(|(_, slot)| !slot.is_exhausted())
                    .map(|(index, _)| Action::use_move(side, index))
                    .collect();
                actions.extend(switches);
                if side == Side::Player && self.config.kind == BattleKind::Wild {
                    actions.push(Action::flee(side));
                }
                actions
            }
            _ => Vec::new(),
        }
    }

    /// Name used in narration: wild and trainer opponents get a prefix.
    pub fn display_name(&self, side: Side, roster_index: usize) -> String {
        let name = self.rosters[side.index()]
            .get(roster_index)
            .map(|combatant| combatant.name())
            .unwrap_or("???");
        match (side, self.config.kind) {
            (Side::Player, _) => name.to_string(),
            (Side::Opponent, BattleKind::Wild) => format!("Wild {}", name),
            (Side::Opponent, BattleKind::Trainer) => format!("Foe {}", name),
        }
    }

    /// Copy the player's health, move uses, level and experience back into
    /// the saved party. Members are matched by position.
    pub fn write_back(&self, party: &mut [RosterMember]) {
        for (combatant, member) in self.rosters[Side::Player.index()].iter().zip(party.iter_mut()) {
            combatant.write_back(member);
        }
    }
}

fn first_usable(roster: &[Combatant], side: Side) -> PreconditionResult<usize> {
    if roster.is_empty() || roster.len() > MAX_PARTY_SIZE {
        return Err(PreconditionError::InvalidRosterSize(roster.len()));
    }
    roster
        .iter()
        .position(|combatant| !combatant.is_fainted())
        .ok_or(PreconditionError::NoUsableCombatant(side))
}
