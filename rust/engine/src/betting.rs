use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::GameError;
use crate::game::Street;
use crate::logger::ActionRecord;
use crate::player::{Player, PlayerAction};
use crate::rules::{legal_actions, validate_action, BetContext, LegalAction, ValidatedAction};

/// Where a betting round stands after the last applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Waiting on the given seat
    AwaitingAction(usize),
    /// Betting on this street is closed; collect bets and move on
    StreetComplete,
    /// At most one seat still holds cards
    HandComplete,
}

/// Observable outcome of one transition, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Acted(ActionRecord),
    /// A full raise that forces every other live seat to act again
    Reopened { seat: usize, target: u32 },
}

/// Result of applying one action: the successor round and seat snapshot.
#[derive(Debug, Clone)]
pub struct Transition {
    pub round: BettingRound,
    pub seats: Vec<Player>,
    pub effects: Vec<Effect>,
}

/// Betting state of one street.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingRound {
    street: Street,
    ctx: BetContext,
    /// Seats that acted since the last reopening raise
    acted_since_raise: BTreeSet<usize>,
    state: RoundState,
}

impl BettingRound {
    /// Opens betting on `street`, with action starting at or after `first`.
    ///
    /// The round opens already complete when nobody is left to bet against:
    /// one seat holding cards ends the hand, and fewer than two seats able to
    /// act with nothing owed closes the street.
    pub fn open(street: Street, ctx: BetContext, first: Option<usize>, seats: &[Player]) -> Self {
        let mut round = Self {
            street,
            ctx,
            acted_since_raise: BTreeSet::new(),
            state: RoundState::StreetComplete,
        };
        let in_hand = seats.iter().filter(|p| !p.is_folded()).count();
        let can_act: Vec<&Player> = seats.iter().filter(|p| p.can_act()).collect();
        round.state = if in_hand <= 1 {
            RoundState::HandComplete
        } else if can_act.len() < 2 && can_act.iter().all(|p| ctx.to_call(p) == 0) {
            RoundState::StreetComplete
        } else {
            first
                .and_then(|start| round.seat_needing_action(seats, start))
                .map_or(RoundState::StreetComplete, RoundState::AwaitingAction)
        };
        round
    }

    pub fn street(&self) -> Street {
        self.street
    }
    pub fn state(&self) -> RoundState {
        self.state
    }
    pub fn context(&self) -> BetContext {
        self.ctx
    }
    pub fn current_bet(&self) -> u32 {
        self.ctx.current_bet
    }
    pub fn last_raise_size(&self) -> u32 {
        self.ctx.last_raise_size
    }
    pub fn acted_since_raise(&self) -> &BTreeSet<usize> {
        &self.acted_since_raise
    }

    pub fn current_actor(&self) -> Option<usize> {
        match self.state {
            RoundState::AwaitingAction(seat) => Some(seat),
            _ => None,
        }
    }

    /// Legal actions of the seat on the clock, empty when nobody is.
    pub fn legal_actions(&self, seats: &[Player]) -> Vec<LegalAction> {
        self.current_actor()
            .and_then(|seat| seats.get(seat))
            .map(|p| legal_actions(&self.ctx, p))
            .unwrap_or_default()
    }

    /// Lifts the bet level to `target` and returns whether the raise reopens
    /// the action. Only a raise at least as large as the last full raise (or
    /// the first raise of the street) reopens and becomes the new increment.
    pub fn record_raise(&mut self, target: u32) -> bool {
        let delta = target.saturating_sub(self.ctx.current_bet);
        if target > self.ctx.current_bet {
            self.ctx.current_bet = target;
        }
        let reopens = delta > 0 && (self.ctx.last_raise_size == 0 || delta >= self.ctx.last_raise_size);
        if reopens {
            self.ctx.last_raise_size = delta;
        }
        reopens
    }

    /// True once every seat able to act has matched the bet and acted since
    /// the last reopening raise, or when one seat alone holds cards.
    pub fn should_end(&self, seats: &[Player]) -> bool {
        let in_hand = seats.iter().filter(|p| !p.is_folded()).count();
        if in_hand <= 1 {
            return true;
        }
        seats.iter().enumerate().filter(|(_, p)| p.can_act()).all(|(seat, p)| {
            self.ctx.to_call(p) == 0 && self.acted_since_raise.contains(&seat)
        })
    }

    fn needs_action(&self, seat: usize, p: &Player) -> bool {
        p.can_act() && (!self.acted_since_raise.contains(&seat) || self.ctx.to_call(p) > 0)
    }

    fn seat_needing_action(&self, seats: &[Player], start: usize) -> Option<usize> {
        let n = seats.len();
        (0..n)
            .map(|i| (start + i) % n)
            .find(|&s| self.needs_action(s, &seats[s]))
    }

    /// State after `actor` acted; termination is decided on the mutated seats.
    fn next_state(&self, seats: &[Player], actor: usize) -> RoundState {
        if seats.iter().filter(|p| !p.is_folded()).count() <= 1 {
            return RoundState::HandComplete;
        }
        if self.should_end(seats) {
            return RoundState::StreetComplete;
        }
        self.seat_needing_action(seats, actor + 1)
            .map_or(RoundState::StreetComplete, RoundState::AwaitingAction)
    }
}

/// Applies `action` by the seat on the clock and returns the successor state.
///
/// Inputs are never mutated; on error the caller still holds the untouched
/// round and seats.
///
/// # Errors
///
/// - [`GameError::NoHandInProgress`] when the round is not awaiting anyone
/// - [`GameError::IllegalAction`] / [`GameError::InvalidRaiseTarget`] from validation
pub fn transition(
    round: &BettingRound,
    seats: &[Player],
    action: PlayerAction,
) -> Result<Transition, GameError> {
    let seat = round.current_actor().ok_or(GameError::NoHandInProgress)?;
    let player = seats.get(seat).ok_or(GameError::NoHandInProgress)?;
    let validated = validate_action(&round.ctx, seat, player, action)?;

    let mut next = round.clone();
    let mut seats = seats.to_vec();
    let mut effects = Vec::with_capacity(2);
    let p = &mut seats[seat];
    let amount = match validated {
        ValidatedAction::Fold => {
            p.fold();
            0
        }
        ValidatedAction::Check => {
            p.check();
            0
        }
        ValidatedAction::Call(_) => p.call(next.ctx.current_bet),
        ValidatedAction::RaiseTo(target) => {
            let moved = p.raise_to(target);
            if next.record_raise(target) {
                next.acted_since_raise.clear();
                effects.push(Effect::Reopened { seat, target });
            }
            moved
        }
    };
    let chips_after = p.chips();
    next.acted_since_raise.insert(seat);
    effects.insert(
        0,
        Effect::Acted(ActionRecord {
            seat,
            street: round.street,
            action,
            amount,
            chips_after,
        }),
    );
    next.state = next.next_state(&seats, seat);
    debug!(seat, ?action, amount, state = ?next.state, "action applied");
    Ok(Transition {
        round: next,
        seats,
        effects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(stacks: &[u32]) -> Vec<Player> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &c)| Player::new(i, format!("p{i}"), c))
            .collect()
    }

    fn ctx(current_bet: u32, last_raise_size: u32) -> BetContext {
        BetContext {
            current_bet,
            last_raise_size,
            big_blind: 20,
        }
    }

    fn step(round: &BettingRound, s: &[Player], a: PlayerAction) -> (BettingRound, Vec<Player>) {
        let t = transition(round, s, a).unwrap();
        (t.round, t.seats)
    }

    #[test]
    fn first_raise_of_street_reopens() {
        let mut r = BettingRound::open(Street::Flop, ctx(0, 0), Some(0), &seats(&[100, 100]));
        assert!(r.record_raise(20));
        assert_eq!(r.last_raise_size(), 20);
    }

    #[test]
    fn short_all_in_does_not_reopen() {
        let mut s = seats(&[1000, 50, 1000]);
        for p in &mut s {
            p.bet(20);
        }
        let r = BettingRound::open(Street::Preflop, ctx(20, 20), Some(0), &s);
        assert_eq!(r.state(), RoundState::AwaitingAction(0));

        // seat 0 min-raises to 40: reopens
        let t = transition(&r, &s, PlayerAction::RaiseTo(40)).unwrap();
        assert!(t
            .effects
            .contains(&Effect::Reopened { seat: 0, target: 40 }));
        assert_eq!(t.round.acted_since_raise(), &BTreeSet::from([0]));
        assert_eq!(t.round.state(), RoundState::AwaitingAction(1));

        // seat 1 shoves to 50 (delta 10 < 20): acted set is kept
        let t = transition(&t.round, &t.seats, PlayerAction::RaiseTo(50)).unwrap();
        assert!(!t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Reopened { .. })));
        assert_eq!(t.round.current_bet(), 50);
        assert_eq!(t.round.last_raise_size(), 20);
        assert_eq!(t.round.acted_since_raise(), &BTreeSet::from([0, 1]));
        assert_eq!(t.round.state(), RoundState::AwaitingAction(2));

        // seat 2 calls; seat 0 still owes 10 and gets to act on it
        let (r, s) = step(&t.round, &t.seats, PlayerAction::Call);
        assert_eq!(r.state(), RoundState::AwaitingAction(0));
        let (r, s) = step(&r, &s, PlayerAction::Call);
        assert_eq!(r.state(), RoundState::StreetComplete);
        assert!(s.iter().all(|p| p.current_bet() == 50));
    }

    #[test]
    fn checks_around_close_the_street() {
        let s = seats(&[100, 100, 100]);
        let r = BettingRound::open(Street::Turn, ctx(0, 0), Some(1), &s);
        let (r, s) = step(&r, &s, PlayerAction::Check);
        let (r, s) = step(&r, &s, PlayerAction::Check);
        assert_eq!(r.state(), RoundState::AwaitingAction(0));
        let (r, _) = step(&r, &s, PlayerAction::Check);
        assert_eq!(r.state(), RoundState::StreetComplete);
    }

    #[test]
    fn last_fold_completes_the_hand() {
        let mut s = seats(&[100, 100]);
        s[1].bet(20);
        let r = BettingRound::open(Street::Flop, ctx(20, 20), Some(0), &s);
        let (r, s) = step(&r, &s, PlayerAction::Fold);
        assert_eq!(r.state(), RoundState::HandComplete);
        assert!(s[0].is_folded());
    }

    #[test]
    fn rejected_action_leaves_inputs_untouched() {
        let s = seats(&[100, 100]);
        let r = BettingRound::open(Street::Flop, ctx(0, 0), Some(0), &s);
        let before = (r.clone(), s.clone());
        assert!(matches!(
            transition(&r, &s, PlayerAction::Call),
            Err(GameError::IllegalAction { seat: 0, .. })
        ));
        assert_eq!((r, s), before);
    }

    #[test]
    fn all_in_runout_opens_complete() {
        // all-in seat and one caller after bets were collected
        let mut s = seats(&[100, 200]);
        s[0].bet(100);
        s[1].bet(100);
        for p in &mut s {
            p.take_bet(100);
        }
        let r = BettingRound::open(Street::River, ctx(0, 0), Some(0), &s);
        assert_eq!(r.state(), RoundState::StreetComplete);

        // a lone seat still owing chips must be asked
        let mut s = seats(&[100, 100]);
        s[0].bet(100);
        let r = BettingRound::open(Street::Preflop, ctx(100, 80), Some(0), &s);
        assert_eq!(r.state(), RoundState::AwaitingAction(1));
    }
}
