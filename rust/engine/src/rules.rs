use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Player, PlayerAction as A};

/// Table-level betting numbers a legal-action decision depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetContext {
    /// Street contribution every live seat must match
    pub current_bet: u32,
    /// Increment of the last full raise on this street (0 before any)
    pub last_raise_size: u32,
    pub big_blind: u32,
}

impl BetContext {
    pub fn to_call(&self, player: &Player) -> u32 {
        self.current_bet.saturating_sub(player.current_bet())
    }

    /// Smallest raise-to level that counts as a full raise.
    pub fn min_raise_target(&self) -> u32 {
        if self.current_bet == 0 {
            self.big_blind
        } else {
            self.current_bet + self.last_raise_size.max(self.big_blind)
        }
    }
}

/// One entry of a seat's legal-action set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegalAction {
    Check,
    /// Chips the call actually moves (capped by the stack)
    Call(u32),
    Fold,
    /// Raise the street contribution to `target`; `reopens` is false for a
    /// short all-in that cannot reach the minimum raise.
    RaiseTo { target: u32, reopens: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    RaiseTo(u32),
}

/// Lists what `player` may do facing `ctx`.
///
/// A folded or chipless seat gets an empty list. Folding is only offered
/// when there is something to call. Raise options are the two ends of the
/// legal range: the minimum full raise and the all-in ceiling.
///
/// # Examples
///
/// ```
/// use holdem_engine::player::Player;
/// use holdem_engine::rules::{legal_actions, BetContext, LegalAction};
///
/// let ctx = BetContext { current_bet: 20, last_raise_size: 20, big_blind: 20 };
/// let p = Player::new(0, "utg", 1_000);
/// let actions = legal_actions(&ctx, &p);
/// assert_eq!(actions[0], LegalAction::Call(20));
/// assert_eq!(actions[1], LegalAction::Fold);
/// assert_eq!(actions[2], LegalAction::RaiseTo { target: 40, reopens: true });
/// assert_eq!(actions[3], LegalAction::RaiseTo { target: 1_000, reopens: true });
/// ```
pub fn legal_actions(ctx: &BetContext, player: &Player) -> Vec<LegalAction> {
    if !player.can_act() {
        return Vec::new();
    }
    let mut actions = Vec::with_capacity(4);
    let to_call = ctx.to_call(player);
    if to_call == 0 {
        actions.push(LegalAction::Check);
    } else {
        actions.push(LegalAction::Call(to_call.min(player.chips())));
        actions.push(LegalAction::Fold);
    }

    let max_to = player.current_bet() + player.chips();
    let min_target = ctx.min_raise_target();
    if max_to > ctx.current_bet {
        if max_to < min_target {
            actions.push(LegalAction::RaiseTo {
                target: max_to,
                reopens: false,
            });
        } else {
            actions.push(LegalAction::RaiseTo {
                target: min_target,
                reopens: true,
            });
            if max_to > min_target {
                actions.push(LegalAction::RaiseTo {
                    target: max_to,
                    reopens: true,
                });
            }
        }
    }
    actions
}

/// Checks `action` against the legal-action set of the seat.
///
/// Raise targets between the minimum full raise and the all-in ceiling are
/// accepted. Nothing is mutated; the caller applies the validated action.
///
/// # Errors
///
/// - [`GameError::IllegalAction`] - the action is not in the seat's set
///   (checking while facing a bet, raising below the minimum, acting while
///   folded or all-in)
/// - [`GameError::InvalidRaiseTarget`] - raise target at or below the seat's own
///   bet, or above its all-in ceiling
///
/// ```
/// use holdem_engine::errors::GameError;
/// use holdem_engine::player::{Player, PlayerAction};
/// use holdem_engine::rules::{validate_action, BetContext};
///
/// let ctx = BetContext { current_bet: 20, last_raise_size: 20, big_blind: 20 };
/// let p = Player::new(3, "utg", 1_000);
/// let result = validate_action(&ctx, 3, &p, PlayerAction::Check);
/// assert!(matches!(result, Err(GameError::IllegalAction { seat: 3, .. })));
/// ```
pub fn validate_action(
    ctx: &BetContext,
    seat: usize,
    player: &Player,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let illegal = || GameError::IllegalAction { seat, action };
    let legal = legal_actions(ctx, player);
    if legal.is_empty() {
        return Err(illegal());
    }
    match action {
        A::Fold if legal.contains(&LegalAction::Fold) => Ok(ValidatedAction::Fold),
        A::Check if legal.contains(&LegalAction::Check) => Ok(ValidatedAction::Check),
        A::Call => legal
            .iter()
            .find_map(|a| match a {
                LegalAction::Call(amount) => Some(ValidatedAction::Call(*amount)),
                _ => None,
            })
            .ok_or_else(illegal),
        A::RaiseTo(target) => {
            let max_to = player.current_bet() + player.chips();
            if target <= player.current_bet() || target > max_to {
                return Err(GameError::InvalidRaiseTarget {
                    seat,
                    target,
                    current: player.current_bet(),
                    max: max_to,
                });
            }
            let has_raise = legal
                .iter()
                .any(|a| matches!(a, LegalAction::RaiseTo { .. }));
            if !has_raise || (target < ctx.min_raise_target() && target != max_to) {
                return Err(illegal());
            }
            Ok(ValidatedAction::RaiseTo(target))
        }
        _ => Err(illegal()),
    }
}
