use crate::battle::action::{Action, Side};
use crate::battle::state::BattleState;
use crate::battle::tests::common::{
    assert_ok, create_test_battle, start_round, test_config, TestCombatantBuilder,
};
use crate::errors::PreconditionError;
use crate::rng::TurnRng;
use pretty_assertions::assert_eq;
use schema::MoveId;

#[test]
fn test_duplicate_submission_is_rejected() {
    let player = TestCombatantBuilder::new("player", 50)
        .with_moves(vec!["tackle", "growl"])
        .build();
    let opponent = TestCombatantBuilder::new("opponent", 50).build();
    let mut battle = create_test_battle(vec![player], vec![opponent], vec![]);

    assert_ok(battle.submit_action(Side::Player, Action::use_move(Side::Player, 0)));
    assert_eq!(
        battle.submit_action(Side::Player, Action::use_move(Side::Player, 1)),
        Err(PreconditionError::AlreadySubmitted(Side::Player))
    );
    assert_eq!(
        battle.pending(Side::Player),
        Some(&Action::use_move(Side::Player, 0))
    );
}

#[test]
fn test_replace_action_only_before_ordering() {
    let player = TestCombatantBuilder::new("player", 50)
        .with_moves(vec!["tackle", "growl"])
        .build();
    let opponent = TestCombatantBuilder::new("opponent", 50).build();
    let mut battle = create_test_battle(vec![player], vec![opponent], vec![]);

    assert_eq!(
        battle.replace_action(Side::Player, Action::use_move(Side::Player, 1)),
        Err(PreconditionError::MissingAction(Side::Player))
    );

    assert_ok(battle.submit_action(Side::Player, Action::use_move(Side::Player, 0)));
    assert_ok(battle.replace_action(Side::Player, Action::use_move(Side::Player, 1)));
    assert_eq!(
        battle.pending(Side::Player),
        Some(&Action::use_move(Side::Player, 1))
    );

    assert_ok(battle.submit_action(Side::Opponent, Action::use_move(Side::Opponent, 0)));
    assert_ok(battle.order_actions().map(|_| ()));
    assert_eq!(
        battle.replace_action(Side::Player, Action::use_move(Side::Player, 0)),
        Err(PreconditionError::RoundInProgress)
    );
}

#[test]
fn test_exhausted_move_is_rejected() {
    let mut player = TestCombatantBuilder::new("player", 50)
        .with_moves(vec!["tackle", "growl"])
        .build();
    player.set_pp(0, 0);
    let opponent = TestCombatantBuilder::new("opponent", 50).build();
    let mut battle = create_test_battle(vec![player], vec![opponent], vec![]);

    assert_eq!(
        battle.submit_action(Side::Player, Action::use_move(Side::Player, 0)),
        Err(PreconditionError::MoveExhausted(MoveId::new("tackle")))
    );
    assert!(!battle
        .valid_actions(Side::Player)
        .contains(&Action::use_move(Side::Player, 0)));
    assert_ok(battle.submit_action(Side::Player, Action::use_move(Side::Player, 1)));
}

#[test]
fn test_malformed_actions_are_rejected() {
    let player = TestCombatantBuilder::new("player", 50).build();
    let opponent = TestCombatantBuilder::new("opponent", 50).build();
    let mut battle = create_test_battle(vec![player], vec![opponent], vec![]);

    assert_eq!(
        battle.submit_action(Side::Player, Action::use_move(Side::Player, 3)),
        Err(PreconditionError::InvalidMoveIndex(3))
    );
    assert_eq!(
        battle.submit_action(Side::Player, Action::use_move(Side::Opponent, 0)),
        Err(PreconditionError::ActorMismatch {
            side: Side::Player,
            actor: Side::Opponent
        })
    );
    assert_eq!(
        battle.submit_action(
            Side::Player,
            Action::UseMove {
                actor: Side::Player,
                target: Side::Player,
                move_index: 0
            }
        ),
        Err(PreconditionError::InvalidTarget {
            actor: Side::Player,
            target: Side::Player
        })
    );
    assert_eq!(battle.pending(Side::Player), None);
}

#[test]
fn test_round_needs_both_actions() {
    let player = TestCombatantBuilder::new("player", 50).build();
    let opponent = TestCombatantBuilder::new("opponent", 50).build();
    let mut battle = create_test_battle(vec![player], vec![opponent], vec![]);

    assert_eq!(battle.execute_next(), Err(PreconditionError::NothingToExecute));
    assert_ok(battle.submit_action(Side::Player, Action::use_move(Side::Player, 0)));
    assert_eq!(
        battle.order_actions().map(|_| ()),
        Err(PreconditionError::MissingAction(Side::Opponent))
    );
}

#[test]
fn test_no_submissions_while_executing() {
    let player = TestCombatantBuilder::new("player", 50).build();
    let opponent = TestCombatantBuilder::new("opponent", 50).build();
    let mut battle = create_test_battle(vec![player], vec![opponent], vec![50, 50]);

    start_round(
        &mut battle,
        Action::use_move(Side::Player, 0),
        Action::use_move(Side::Opponent, 0),
    );
    assert_eq!(
        battle.submit_action(Side::Player, Action::use_move(Side::Player, 0)),
        Err(PreconditionError::RoundInProgress)
    );
    assert_eq!(
        battle.order_actions().map(|_| ()),
        Err(PreconditionError::RoundInProgress)
    );

    assert_ok(battle.execute_next());
    assert_ok(battle.execute_next());
    assert_ok(battle.submit_action(Side::Player, Action::use_move(Side::Player, 0)));
}

#[test]
fn test_roster_size_is_checked() {
    let make = |count: usize| {
        (0..count)
            .map(|i| TestCombatantBuilder::new(&format!("member{}", i), 10).build())
            .collect::<Vec<_>>()
    };

    let start = |player, opponent| {
        BattleState::with_rng(player, opponent, test_config(), TurnRng::new_for_test(vec![]))
    };

    let result = start(make(0), make(1));
    assert_eq!(result.err(), Some(PreconditionError::InvalidRosterSize(0)));

    let result = start(make(1), make(7));
    assert_eq!(result.err(), Some(PreconditionError::InvalidRosterSize(7)));

    let fainted = vec![TestCombatantBuilder::new("fainted", 10).with_hp(0).build()];
    let result = start(make(1), fainted);
    assert_eq!(
        result.err(),
        Some(PreconditionError::NoUsableCombatant(Side::Opponent))
    );
}

#[test]
fn test_lead_skips_fainted_members() {
    let fainted = TestCombatantBuilder::new("fainted", 10).with_hp(0).build();
    let healthy = TestCombatantBuilder::new("healthy", 10).build();
    let opponent = TestCombatantBuilder::new("opponent", 10).build();
    let battle = create_test_battle(vec![fainted, healthy], vec![opponent], vec![]);

    assert_eq!(battle.active_index(Side::Player), 1);
    assert_eq!(battle.active_combatant(Side::Player).name(), "healthy");
}
