use crate::battle::action::{Action, Side};
use crate::battle::events::BattleEvent;
use crate::battle::state::{BattleOutcome, BattlePhase};
use crate::battle::tests::common::{
    assert_ok, create_battle_with_config, create_test_battle, start_round, test_config,
    TestCombatantBuilder,
};
use crate::config::{BattleConfig, BattleKind};
use crate::errors::PreconditionError;
use pretty_assertions::assert_eq;

#[test]
fn test_faster_combatant_always_escapes() {
    let player = TestCombatantBuilder::new("player", 50).with_speed(100).build();
    let opponent = TestCombatantBuilder::new("opponent", 50).with_speed(50).build();
    // No outcomes scripted: a draw here would panic.
    let mut battle = create_test_battle(vec![player], vec![opponent], vec![]);

    start_round(
        &mut battle,
        Action::flee(Side::Player),
        Action::use_move(Side::Opponent, 0),
    );
    let outcome = assert_ok(battle.execute_next());

    assert_eq!(
        outcome.events,
        vec![
            BattleEvent::Escaped {
                name: "player".to_string()
            },
            BattleEvent::BattleEnded {
                outcome: BattleOutcome::Fled(Side::Player)
            },
        ]
    );
    assert_eq!(outcome.narration, vec!["Got away safely!".to_string()]);
    assert!(outcome.flags.battle_finished);
    assert_eq!(
        battle.phase(),
        BattlePhase::Finished(BattleOutcome::Fled(Side::Player))
    );
    assert!(battle.queue().is_empty());
    assert_eq!(battle.execute_next(), Err(PreconditionError::BattleFinished));
}

#[test]
fn test_failed_attempts_raise_escape_odds() {
    let player = TestCombatantBuilder::new("player", 50).with_speed(50).build();
    let opponent = TestCombatantBuilder::new("opponent", 50)
        .with_moves(vec!["growl"])
        .with_speed(100)
        .build();
    // Round 1: flee roll 90 fails (threshold 25), growl accuracy 50.
    // Round 2: flee roll 30 succeeds (threshold 36 after one failure).
    let mut battle = create_test_battle(vec![player], vec![opponent], vec![90, 50, 30]);

    start_round(
        &mut battle,
        Action::flee(Side::Player),
        Action::use_move(Side::Opponent, 0),
    );
    let outcome = assert_ok(battle.execute_next());
    assert_eq!(
        outcome.events,
        vec![BattleEvent::EscapeFailed {
            name: "player".to_string()
        }]
    );
    assert_eq!(battle.active_combatant(Side::Player).run_attempts(), 1);
    assert_eq!(battle.phase(), BattlePhase::Executing);
    assert_ok(battle.execute_next());
    assert_eq!(battle.phase(), BattlePhase::AwaitingActions);

    start_round(
        &mut battle,
        Action::flee(Side::Player),
        Action::use_move(Side::Opponent, 0),
    );
    assert_ok(battle.execute_next());
    assert_eq!(
        battle.outcome(),
        Some(BattleOutcome::Fled(Side::Player))
    );
}

#[test]
fn test_cannot_flee_from_trainer() {
    let config = BattleConfig {
        kind: BattleKind::Trainer,
        ..test_config()
    };
    let player = TestCombatantBuilder::new("player", 50).build();
    let opponent = TestCombatantBuilder::new("opponent", 50).build();
    let mut battle = create_battle_with_config(vec![player], vec![opponent], config, vec![]);

    assert_eq!(
        battle.submit_action(Side::Player, Action::flee(Side::Player)),
        Err(PreconditionError::FleeFromTrainer)
    );
    assert!(!battle
        .valid_actions(Side::Player)
        .contains(&Action::flee(Side::Player)));
}

#[test]
fn test_only_the_player_can_flee() {
    let player = TestCombatantBuilder::new("player", 50).build();
    let opponent = TestCombatantBuilder::new("opponent", 50).build();
    let mut battle = create_test_battle(vec![player], vec![opponent], vec![]);

    assert_eq!(
        battle.submit_action(Side::Opponent, Action::flee(Side::Opponent)),
        Err(PreconditionError::FleeNotPlayer)
    );
}
