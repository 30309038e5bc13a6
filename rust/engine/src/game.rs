use serde::{Deserialize, Serialize};

use crate::betting::BettingRound;
use crate::cards::Card;
use crate::errors::GameError;
use crate::player::Player;
use crate::pot::PotManager;

/// Most seats one table holds; 10 hands of hole cards plus a full board
/// and burns fit in a 52-card deck.
pub const MAX_SEATS: usize = 10;

/// Betting phase of a hand, ending in the showdown.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
    /// Hands revealed and pots paid
    Showdown,
}

impl Street {
    /// The street that follows, `None` after the showdown.
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => Some(Street::Showdown),
            Street::Showdown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stakes {
    pub small_blind: u32,
    pub big_blind: u32,
}

impl Default for Stakes {
    fn default() -> Self {
        Self {
            small_blind: 10,
            big_blind: 20,
        }
    }
}

/// Seats, button and blind positions, board and pots of one table.
/// The blind seats are unset until blinds are posted for a hand.
#[derive(Debug, Clone)]
pub struct Table {
    players: Vec<Player>,
    stakes: Stakes,
    dealer: usize,
    small_blind_seat: Option<usize>,
    big_blind_seat: Option<usize>,
    /// Number of seats dealt into the current hand
    dealt_in: usize,
    street: Street,
    board: Vec<Card>,
    pots: PotManager,
}

impl Table {
    pub fn new(players: Vec<Player>, stakes: Stakes) -> Result<Self, GameError> {
        if players.len() < 2 {
            return Err(GameError::NotEnoughPlayers(players.len()));
        }
        if players.len() > MAX_SEATS {
            return Err(GameError::TooManyPlayers(players.len()));
        }
        Ok(Self {
            players,
            stakes,
            dealer: 0,
            small_blind_seat: None,
            big_blind_seat: None,
            dealt_in: 0,
            street: Street::Preflop,
            board: Vec::with_capacity(5),
            pots: PotManager::new(),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn stakes(&self) -> Stakes {
        self.stakes
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn small_blind_seat(&self) -> Option<usize> {
        self.small_blind_seat
    }
    pub fn big_blind_seat(&self) -> Option<usize> {
        self.big_blind_seat
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn pots(&self) -> &PotManager {
        &self.pots
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }
    pub(crate) fn replace_players(&mut self, players: Vec<Player>) {
        self.players = players;
    }
    pub(crate) fn set_street(&mut self, street: Street) {
        self.street = street;
    }
    pub(crate) fn extend_board(&mut self, cards: &[Card]) {
        self.board.extend_from_slice(cards);
    }
    pub(crate) fn pots_mut(&mut self) -> &mut PotManager {
        &mut self.pots
    }

    /// First seat at or after `start` (wrapping) that satisfies `pred`.
    pub fn seat_from(&self, start: usize, pred: impl Fn(&Player) -> bool) -> Option<usize> {
        let n = self.players.len();
        (0..n)
            .map(|i| (start + i) % n)
            .find(|&s| pred(&self.players[s]))
    }

    pub fn funded_seats(&self) -> usize {
        self.players.iter().filter(|p| p.chips() > 0).count()
    }

    pub fn players_in_hand(&self) -> Vec<usize> {
        (0..self.players.len())
            .filter(|&s| !self.players[s].is_folded())
            .collect()
    }

    pub fn players_who_can_act(&self) -> Vec<usize> {
        (0..self.players.len())
            .filter(|&s| self.players[s].can_act())
            .collect()
    }

    pub fn is_heads_up(&self) -> bool {
        self.dealt_in == 2
    }

    /// Chips committed this hand: collected pots plus bets still in front of seats.
    pub fn live_pot(&self) -> u32 {
        self.pots.total() + self.players.iter().map(Player::current_bet).sum::<u32>()
    }

    /// Every chip on the table, in stacks, bets and pots.
    pub fn total_chips(&self) -> u64 {
        let stacks: u64 = self.players.iter().map(|p| u64::from(p.chips())).sum();
        stacks + u64::from(self.live_pot())
    }

    /// Clears hand state and moves the button onto a funded seat.
    pub(crate) fn reset_for_hand(&mut self) {
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.board.clear();
        self.pots.clear();
        self.street = Street::Preflop;
        self.small_blind_seat = None;
        self.big_blind_seat = None;
        self.dealt_in = self.players_in_hand().len();
        if let Some(d) = self.seat_from(self.dealer, |p| !p.is_folded()) {
            self.dealer = d;
        }
    }

    /// Posts both blinds and returns `(seat, amount)` for each.
    /// Heads-up the button posts the small blind.
    pub(crate) fn post_blinds(&mut self) -> Result<[(usize, u32); 2], GameError> {
        let live = |p: &Player| !p.is_folded();
        let sb = if self.is_heads_up() {
            self.dealer
        } else {
            self.seat_from(self.dealer + 1, live)
                .ok_or(GameError::NotEnoughPlayers(self.dealt_in))?
        };
        let bb = self
            .seat_from(sb + 1, live)
            .filter(|&s| s != sb)
            .ok_or(GameError::NotEnoughPlayers(self.dealt_in))?;
        let Stakes {
            small_blind,
            big_blind,
        } = self.stakes;
        let sb_posted = self.players[sb].bet(small_blind);
        let bb_posted = self.players[bb].bet(big_blind);
        self.small_blind_seat = Some(sb);
        self.big_blind_seat = Some(bb);
        Ok([(sb, sb_posted), (bb, bb_posted)])
    }

    /// Seat after the big blind, or the small blind itself heads-up.
    pub fn first_to_act_preflop(&self) -> Option<usize> {
        let start = if self.is_heads_up() {
            self.small_blind_seat?
        } else {
            self.big_blind_seat? + 1
        };
        self.seat_from(start, Player::can_act)
    }

    /// Postflop action starts left of the button.
    pub fn first_to_act_postflop(&self) -> Option<usize> {
        self.seat_from(self.dealer + 1, Player::can_act)
    }

    /// True when the unraised big blind is back on the clock preflop and may
    /// check its option.
    pub fn bb_can_check_now(&self, seat: usize, round: &BettingRound) -> bool {
        if round.street() != Street::Preflop || self.big_blind_seat != Some(seat) {
            return false;
        }
        let Some(player) = self.players.get(seat) else {
            return false;
        };
        round.context().to_call(player) == 0 && round.current_bet() == self.stakes.big_blind
    }

    /// Slices street bets into pots. Returns the number of pots created.
    pub fn collect_bets(&mut self) -> usize {
        self.pots.collect(&mut self.players)
    }

    /// Moves the button to the next seat that still has chips.
    pub fn rotate_button(&mut self) {
        if let Some(d) = self.seat_from(self.dealer + 1, |p| p.chips() > 0) {
            self.dealer = d;
        }
    }

    /// Abandons the hand: every seat gets back what it put in.
    pub(crate) fn refund_hand(&mut self) {
        for p in &mut self.players {
            p.refund();
        }
        self.pots.clear();
        self.board.clear();
        self.street = Street::Preflop;
    }
}
