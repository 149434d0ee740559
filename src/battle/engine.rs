//! The turn protocol: submitting, ordering and executing actions.

use crate::battle::action::{Action, Side};
use crate::battle::action_queue::{ActionPriority, ActionQueue};
use crate::battle::calculators::{calculate_damage, escape_succeeds, move_hits};
use crate::battle::events::{BattleEvent, EventBus};
use crate::battle::state::{
    BattleOutcome, BattlePhase, BattleState, ExecutionOutcome, FaintedEvent,
};
use crate::config::BattleKind;
use crate::errors::{PreconditionError, PreconditionResult};
use crate::progression::{experience_yield, MAX_LEVEL};
use schema::MoveCategory;
use tracing::{debug, info, warn};

impl BattleState {
    /// Submit `side`'s action for the current round, or its replacement while
    /// the battle waits on a forced switch.
    ///
    /// A rejected submission leaves the state untouched.
    pub fn submit_action(&mut self, side: Side, action: Action) -> PreconditionResult<()> {
        let result = self.check_submission(side, &action);
        if let Err(err) = &result {
            warn!(?side, %action, %err, "rejected action");
            return result;
        }

        match self.phase {
            BattlePhase::AwaitingSwitch(_) => self.forced_switch = Some(action),
            _ => self.pending[side.index()] = Some(action),
        }
        debug!(?side, %action, round = self.round + 1, "action submitted");
        Ok(())
    }

    /// Swap a side's pending action for another one before the round is ordered.
    pub fn replace_action(&mut self, side: Side, action: Action) -> PreconditionResult<()> {
        match self.phase {
            BattlePhase::AwaitingActions => {}
            BattlePhase::Finished(_) => return Err(PreconditionError::BattleFinished),
            BattlePhase::AwaitingSwitch(waiting) => {
                return Err(PreconditionError::AwaitingSwitch(waiting))
            }
            BattlePhase::Executing => return Err(PreconditionError::RoundInProgress),
        }
        if self.pending[side.index()].is_none() {
            return Err(PreconditionError::MissingAction(side));
        }
        if action.actor() != side {
            return Err(PreconditionError::ActorMismatch {
                side,
                actor: action.actor(),
            });
        }
        self.validate_action(side, &action)?;

        debug!(?side, %action, "action replaced");
        self.pending[side.index()] = Some(action);
        Ok(())
    }

    fn check_submission(&self, side: Side, action: &Action) -> PreconditionResult<()> {
        if action.actor() != side {
            return Err(PreconditionError::ActorMismatch {
                side,
                actor: action.actor(),
            });
        }

        match self.phase {
            BattlePhase::Finished(_) => Err(PreconditionError::BattleFinished),
            BattlePhase::Executing => Err(PreconditionError::RoundInProgress),
            BattlePhase::AwaitingSwitch(waiting) => {
                if side != waiting {
                    return Err(PreconditionError::AwaitingSwitch(waiting));
                }
                if !matches!(action, Action::SwitchOut { .. }) {
                    return Err(PreconditionError::SwitchRequired(side));
                }
                if self.forced_switch.is_some() {
                    return Err(PreconditionError::AlreadySubmitted(side));
                }
                self.validate_action(side, action)
            }
            BattlePhase::AwaitingActions => {
                if self.pending[side.index()].is_some() {
                    return Err(PreconditionError::AlreadySubmitted(side));
                }
                self.validate_action(side, action)
            }
        }
    }

    /// Legality of an action against the current rosters.
    fn validate_action(&self, side: Side, action: &Action) -> PreconditionResult<()> {
        let active = self.active_combatant(side);

        match *action {
            Action::UseMove {
                target, move_index, ..
            } => {
                if active.is_fainted() {
                    return Err(PreconditionError::ActorFainted(side));
                }
                if target != side.opponent() {
                    return Err(PreconditionError::InvalidTarget {
                        actor: side,
                        target,
                    });
                }
                let slot = active
                    .move_slot(move_index)
                    .ok_or(PreconditionError::InvalidMoveIndex(move_index))?;
                if slot.is_exhausted() {
                    return Err(PreconditionError::MoveExhausted(slot.data.id.clone()));
                }
                Ok(())
            }
            Action::SwitchOut { incoming_index, .. } => {
                let incoming = self
                    .roster(side)
                    .get(incoming_index)
                    .ok_or(PreconditionError::InvalidRosterIndex(incoming_index))?;
                if incoming.is_fainted() {
                    return Err(PreconditionError::SwitchTargetFainted(incoming_index));
                }
                if incoming_index == self.active_index(side) {
                    return Err(PreconditionError::SwitchTargetActive(incoming_index));
                }
                Ok(())
            }
            Action::AttemptFlee { target, .. } => {
                if side != Side::Player {
                    return Err(PreconditionError::FleeNotPlayer);
                }
                if self.config.kind == BattleKind::Trainer {
                    return Err(PreconditionError::FleeFromTrainer);
                }
                if target != side.opponent() {
                    return Err(PreconditionError::InvalidTarget {
                        actor: side,
                        target,
                    });
                }
                if active.is_fainted() {
                    return Err(PreconditionError::ActorFainted(side));
                }
                Ok(())
            }
        }
    }

    fn priority_of(&self, action: &Action) -> ActionPriority {
        let actor = self.active_combatant(action.actor());
        let move_priority = match action {
            Action::UseMove { move_index, .. } => actor
                .move_slot(*move_index)
                .map(|slot| slot.data.priority)
                .unwrap_or(0),
            _ => 0,
        };

        ActionPriority {
            action_priority: action.tier(),
            move_priority,
            speed: actor.speed(),
        }
    }

    /// Order the submitted actions into this round's execution queue.
    ///
    /// Needs an action from both sides, or the replacement switch while a
    /// forced switch is outstanding. The replacement goes ahead of anything
    /// still queued from the interrupted round.
    pub fn order_actions(&mut self) -> PreconditionResult<&ActionQueue> {
        match self.phase {
            BattlePhase::Finished(_) => return Err(PreconditionError::BattleFinished),
            BattlePhase::Executing => return Err(PreconditionError::RoundInProgress),
            BattlePhase::AwaitingSwitch(side) => {
                let switch = self
                    .forced_switch
                    .take()
                    .ok_or(PreconditionError::MissingAction(side))?;
                self.queue.push_front(switch);
                self.phase = BattlePhase::Executing;
                debug!(?side, %switch, "replacement queued");
                return Ok(&self.queue);
            }
            BattlePhase::AwaitingActions => {}
        }

        for side in Side::ALL {
            if self.pending[side.index()].is_none() {
                return Err(PreconditionError::MissingAction(side));
            }
        }

        let prioritized: Vec<(Action, ActionPriority)> = self
            .pending
            .iter()
            .flatten()
            .map(|action| (*action, self.priority_of(action)))
            .collect();
        self.pending = [None, None];

        self.queue =
            ActionQueue::from_prioritized(prioritized, self.config.speed_tie, &mut self.rng);
        self.round += 1;
        self.phase = BattlePhase::Executing;

        debug!(round = self.round, order = ?self.queue.to_vec(), "actions ordered");
        Ok(&self.queue)
    }

    /// Execute the action at the head of the queue.
    pub fn execute_next(&mut self) -> PreconditionResult<ExecutionOutcome> {
        match self.phase {
            BattlePhase::Finished(_) => return Err(PreconditionError::BattleFinished),
            BattlePhase::AwaitingSwitch(side) => {
                return Err(PreconditionError::AwaitingSwitch(side))
            }
            BattlePhase::AwaitingActions => return Err(PreconditionError::NothingToExecute),
            BattlePhase::Executing => {}
        }
        let action = self
            .queue
            .pop_front()
            .ok_or(PreconditionError::NothingToExecute)?;

        let flags_before = self.flags;
        let mut bus = EventBus::new();
        let mut fainted = Vec::new();

        debug!(round = self.round, %action, "executing");
        match action {
            Action::UseMove {
                actor,
                target,
                move_index,
            } => self.execute_move(actor, target, move_index, &mut bus, &mut fainted),
            Action::SwitchOut {
                actor,
                incoming_index,
            } => self.execute_switch(actor, incoming_index, &mut bus),
            Action::AttemptFlee { actor, target } => self.execute_flee(actor, target, &mut bus),
        }

        for event in &fainted {
            self.handle_faint(*event, &mut bus);
        }
        self.advance_phase();

        let narration = bus.narration();
        if !narration.is_empty() {
            self.narration.extend(narration.iter().cloned());
            self.flags.log_ready = true;
        }

        Ok(ExecutionOutcome {
            action,
            events: bus.into_events(),
            narration,
            fainted,
            flags: self.flags,
            flags_changed: self.flags != flags_before,
        })
    }

    fn execute_move(
        &mut self,
        actor: Side,
        target: Side,
        move_index: usize,
        bus: &mut EventBus,
        fainted: &mut Vec<FaintedEvent>,
    ) {
        if self.active_combatant(actor).is_fainted() {
            return;
        }
        let user = self.display_name(actor, self.active_index(actor));
        let Some(move_data) = self.active_combatant_mut(actor).spend_pp(move_index) else {
            return;
        };
        bus.push(BattleEvent::MoveUsed {
            side: actor,
            user: user.clone(),
            move_name: move_data.name.clone(),
        });

        if !move_hits(&move_data, &mut self.rng) {
            bus.push(BattleEvent::MoveMissed { side: actor, user });
            return;
        }
        if move_data.category == MoveCategory::Status || !move_data.is_damaging() {
            bus.push(BattleEvent::NothingHappened);
            return;
        }

        let attacker = &self.rosters[actor.index()][self.active[actor.index()]];
        let defender_index = self.active[target.index()];
        let defender = &self.rosters[target.index()][defender_index];
        let result = calculate_damage(
            attacker,
            defender,
            &move_data,
            self.config.damage_variance,
            &mut self.rng,
        );

        let target_name = self.display_name(target, defender_index);
        if result.multiplier == 0.0 {
            bus.push(BattleEvent::NoEffect {
                target: target_name,
            });
            return;
        }

        let defender = &mut self.rosters[target.index()][defender_index];
        let knocked_out = defender.take_damage(result.damage);
        bus.push(BattleEvent::DamageDealt {
            side: target,
            target: target_name.clone(),
            damage: result.damage,
            remaining_hp: defender.current_hp(),
        });
        if result.multiplier != 1.0 {
            bus.push(BattleEvent::Effectiveness {
                multiplier: result.multiplier,
            });
        }

        if knocked_out {
            bus.push(BattleEvent::CombatantFainted {
                side: target,
                roster_index: defender_index,
                name: target_name,
            });
            fainted.push(FaintedEvent {
                side: target,
                roster_index: defender_index,
            });
        }
    }

    fn execute_switch(&mut self, actor: Side, incoming_index: usize, bus: &mut EventBus) {
        let usable = self
            .roster(actor)
            .get(incoming_index)
            .is_some_and(|combatant| !combatant.is_fainted());
        if !usable || incoming_index == self.active_index(actor) {
            return;
        }

        let from = self.display_name(actor, self.active_index(actor));
        self.active[actor.index()] = incoming_index;
        let to = self.display_name(actor, incoming_index);
        bus.push(BattleEvent::Switched {
            side: actor,
            from,
            to,
        });

        if actor == Side::Player {
            self.flags.open_switch_menu = false;
        }
    }

    fn execute_flee(&mut self, actor: Side, target: Side, bus: &mut EventBus) {
        let own = self.active_combatant(actor);
        let name = self.display_name(actor, self.active_index(actor));
        let own_speed = own.speed();
        let attempts = own.run_attempts();
        let opposing_speed = self.active_combatant(target).speed();

        if escape_succeeds(own_speed, opposing_speed, attempts, &mut self.rng) {
            bus.push(BattleEvent::Escaped { name });
            self.finish(BattleOutcome::Fled(actor), bus);
        } else {
            self.active_combatant_mut(actor).record_failed_escape();
            bus.push(BattleEvent::EscapeFailed { name });
        }
    }

    /// Cancel the fainted side's queued actions, award experience and decide
    /// whether the battle is over.
    fn handle_faint(&mut self, event: FaintedEvent, bus: &mut EventBus) {
        let side = event.side;
        self.queue.remove_where(|action| action.actor() == side);

        if side == Side::Opponent && self.config.award_experience {
            self.award_experience(event.roster_index, bus);
        }

        if !self.has_non_fainted(side) {
            self.finish(BattleOutcome::Winner(side.opponent()), bus);
        } else if side == Side::Player {
            self.flags.open_switch_menu = true;
        }
    }

    fn award_experience(&mut self, defeated_index: usize, bus: &mut EventBus) {
        let defeated = &self.rosters[Side::Opponent.index()][defeated_index];
        let amount = experience_yield(defeated.base_exp(), defeated.level(), self.config.kind);

        let name = self.display_name(Side::Player, self.active_index(Side::Player));
        let winner = self.active_combatant_mut(Side::Player);
        if winner.is_fainted() || winner.level() >= MAX_LEVEL {
            return;
        }

        let levels = winner.gain_experience(amount);
        bus.push(BattleEvent::ExperienceGained {
            name: name.clone(),
            amount,
        });
        for level in levels {
            info!(combatant = %name, level, "level up");
            bus.push(BattleEvent::LevelUp {
                name: name.clone(),
                level,
            });
        }
    }

    fn finish(&mut self, outcome: BattleOutcome, bus: &mut EventBus) {
        self.phase = BattlePhase::Finished(outcome);
        self.flags.battle_finished = true;
        self.flags.open_switch_menu = false;
        self.queue.clear();
        self.pending = [None, None];
        self.forced_switch = None;
        bus.push(BattleEvent::BattleEnded { outcome });
        info!(?outcome, round = self.round, "battle finished");
    }

    fn advance_phase(&mut self) {
        if self.is_finished() {
            return;
        }
        let needs_switch = Side::ALL
            .into_iter()
            .find(|side| self.active_combatant(*side).is_fainted());

        self.phase = match needs_switch {
            Some(side) => BattlePhase::AwaitingSwitch(side),
            None if !self.queue.is_empty() => BattlePhase::Executing,
            None => BattlePhase::AwaitingActions,
        };
    }
}
