use holdem_engine::errors::GameError;
use holdem_engine::player::{Player, PlayerAction as A};
use holdem_engine::rules::{legal_actions, validate_action, BetContext, LegalAction, ValidatedAction};

fn ctx(current_bet: u32, last_raise_size: u32) -> BetContext {
    BetContext {
        current_bet,
        last_raise_size,
        big_blind: 20,
    }
}

fn seat(chips: u32, street_bet: u32) -> Player {
    let mut p = Player::new(0, "p0", chips + street_bet);
    p.bet(street_bet);
    p
}

#[test]
fn free_to_check_offers_no_fold() {
    let actions = legal_actions(&ctx(0, 0), &seat(1_000, 0));
    assert_eq!(
        actions,
        vec![
            LegalAction::Check,
            LegalAction::RaiseTo { target: 20, reopens: true },
            LegalAction::RaiseTo { target: 1_000, reopens: true },
        ]
    );
}

#[test]
fn facing_bet_offers_call_and_fold() {
    let actions = legal_actions(&ctx(60, 40), &seat(500, 20));
    assert_eq!(actions[0], LegalAction::Call(40));
    assert_eq!(actions[1], LegalAction::Fold);
    assert_eq!(actions[2], LegalAction::RaiseTo { target: 100, reopens: true });
    assert_eq!(actions[3], LegalAction::RaiseTo { target: 520, reopens: true });
}

#[test]
fn short_stack_call_is_capped_and_raise_is_absent() {
    let actions = legal_actions(&ctx(100, 100), &seat(60, 0));
    assert_eq!(actions, vec![LegalAction::Call(60), LegalAction::Fold]);
}

#[test]
fn short_all_in_raise_does_not_reopen() {
    let actions = legal_actions(&ctx(100, 100), &seat(130, 0));
    assert!(actions.contains(&LegalAction::RaiseTo {
        target: 130,
        reopens: false
    }));
    assert_eq!(
        validate_action(&ctx(100, 100), 0, &seat(130, 0), A::RaiseTo(130)).unwrap(),
        ValidatedAction::RaiseTo(130)
    );
}

#[test]
fn all_in_exactly_at_minimum_reopens_once() {
    let actions = legal_actions(&ctx(100, 100), &seat(200, 0));
    assert_eq!(
        actions[2..],
        [LegalAction::RaiseTo { target: 200, reopens: true }]
    );
}

#[test]
fn folded_or_empty_seat_has_no_actions() {
    let mut folded = seat(500, 0);
    folded.fold();
    assert!(legal_actions(&ctx(20, 20), &folded).is_empty());
    let all_in = seat(0, 40);
    assert!(legal_actions(&ctx(20, 20), &all_in).is_empty());
    assert!(matches!(
        validate_action(&ctx(20, 20), 0, &all_in, A::Check),
        Err(GameError::IllegalAction { seat: 0, .. })
    ));
}

#[test]
fn check_facing_bet_is_illegal() {
    let err = validate_action(&ctx(20, 20), 4, &seat(500, 0), A::Check).unwrap_err();
    assert_eq!(
        err,
        GameError::IllegalAction {
            seat: 4,
            action: A::Check
        }
    );
}

#[test]
fn call_moves_capped_amount() {
    let va = validate_action(&ctx(100, 100), 0, &seat(60, 0), A::Call).unwrap();
    assert_eq!(va, ValidatedAction::Call(60));
}

#[test]
fn raise_below_minimum_is_illegal() {
    let err = validate_action(&ctx(20, 20), 0, &seat(500, 0), A::RaiseTo(30)).unwrap_err();
    assert!(matches!(err, GameError::IllegalAction { .. }));
}

#[test]
fn raise_target_outside_stack_is_invalid() {
    let err = validate_action(&ctx(20, 20), 2, &seat(100, 20), A::RaiseTo(500)).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidRaiseTarget {
            seat: 2,
            target: 500,
            current: 20,
            max: 120
        }
    );
    let err = validate_action(&ctx(20, 20), 2, &seat(100, 20), A::RaiseTo(20)).unwrap_err();
    assert!(matches!(err, GameError::InvalidRaiseTarget { target: 20, .. }));
}

#[test]
fn raise_when_cannot_exceed_bet_is_illegal() {
    let err = validate_action(&ctx(100, 100), 0, &seat(60, 0), A::RaiseTo(60)).unwrap_err();
    assert!(matches!(err, GameError::IllegalAction { .. }));
}
