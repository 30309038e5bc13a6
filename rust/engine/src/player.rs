use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandRank;

/// Represents a player action submitted during a betting round.
/// Raises name the total street contribution they bring the player to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Pass when nothing is owed
    Check,
    /// Match the table's current bet (or go all-in trying)
    Call,
    /// Raise the street contribution to the given level
    RaiseTo(u32),
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// One seat at the table: chip balance, this street's contribution and
/// hand status. Chip movements clamp to what the player holds and never fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: usize,
    name: String,
    chips: u32,
    /// Contribution on the current street, reset when bets are collected
    current_bet: u32,
    /// Contribution over the whole hand
    contributed: u32,
    folded: bool,
    hole: Vec<Card>,
    best_hand: Option<HandRank>,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>, chips: u32) -> Self {
        Self {
            id,
            name: name.into(),
            chips,
            current_bet: 0,
            contributed: 0,
            folded: false,
            hole: Vec::with_capacity(2),
            best_hand: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn contributed(&self) -> u32 {
        self.contributed
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }
    pub fn best_hand(&self) -> Option<&HandRank> {
        self.best_hand.as_ref()
    }

    /// Still holding cards and chips, so the betting loop may ask for an action.
    pub fn can_act(&self) -> bool {
        !self.folded && self.chips > 0
    }

    pub fn is_all_in(&self) -> bool {
        !self.folded && self.chips == 0 && self.contributed > 0
    }

    pub fn receive_cards(&mut self, cards: &[Card]) {
        self.hole.extend_from_slice(cards);
    }

    pub fn set_best_hand(&mut self, rank: HandRank) {
        self.best_hand = Some(rank);
    }

    /// Moves up to `amount` chips into this street's contribution.
    pub fn bet(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.chips);
        self.chips -= moved;
        self.current_bet += moved;
        self.contributed += moved;
        moved
    }

    /// Tops the street contribution up to `target`, all-in if short.
    pub fn call(&mut self, target: u32) -> u32 {
        self.bet(target.saturating_sub(self.current_bet))
    }

    pub fn raise_to(&mut self, target: u32) -> u32 {
        self.call(target)
    }

    pub fn check(&self) {}

    pub fn fold(&mut self) {
        self.folded = true;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Hands the street contribution over to the pot accountant.
    pub(crate) fn take_bet(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.current_bet);
        self.current_bet -= taken;
        taken
    }

    /// Returns every chip put in this hand to the stack.
    pub(crate) fn refund(&mut self) {
        self.chips += self.contributed;
        self.contributed = 0;
        self.current_bet = 0;
    }

    /// Clears hand state; a seat without chips sits the hand out folded.
    pub fn reset_for_hand(&mut self) {
        self.hole.clear();
        self.current_bet = 0;
        self.contributed = 0;
        self.best_hand = None;
        self.folded = self.chips == 0;
    }
}
