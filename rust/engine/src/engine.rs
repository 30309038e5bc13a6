use tracing::{debug, info, warn};

use crate::betting::{transition, BettingRound, Effect, RoundState};
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{Stakes, Street, Table};
use crate::hand::evaluate_hand;
use crate::logger::{BlindPost, HandLogger, HandRecord, ShowdownInfo, ShownHand};
use crate::player::{Player, PlayerAction};
use crate::rules::{BetContext, LegalAction};
use crate::showdown::{award_uncontested, pay, settle_pots, PotSettlement};

const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// How many times a policy is asked again after an illegal answer before
/// the hand is abandoned.
pub const MAX_DECISION_ATTEMPTS: usize = 3;

/// Everything a policy sees when it is asked to act.
#[derive(Debug, Clone)]
pub struct Decision<'a> {
    pub seat: usize,
    pub street: Street,
    pub player: &'a Player,
    pub legal: Vec<LegalAction>,
    pub to_call: u32,
    /// Pots plus every bet still in front of a seat
    pub pot: u32,
    pub board: &'a [Card],
}

/// Source of actions for [`Engine::play_hand`].
pub trait Policy {
    fn decide(&mut self, decision: &Decision<'_>) -> PlayerAction;
    fn name(&self) -> &str;
}

/// Hand orchestrator for one table: posts blinds, deals, runs each betting
/// round, collects pots and pays the showdown.
///
/// Actions are fed one at a time through [`Engine::act`], or pulled from a
/// [`Policy`] by [`Engine::play_hand`].
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::Engine;
/// use holdem_engine::game::Stakes;
/// use holdem_engine::player::{Player, PlayerAction};
///
/// let players = (0..3).map(|i| Player::new(i, format!("p{i}"), 1_000)).collect();
/// let mut engine = Engine::new(players, Stakes::default(), Some(42)).unwrap();
/// engine.start_round().unwrap();
///
/// // button is seat 0, so seat 0 acts first after the blinds
/// assert_eq!(engine.current_actor(), Some(0));
/// engine.act(PlayerAction::Fold).unwrap();
/// assert_eq!(engine.live_pot(), 30);
/// assert_eq!(engine.total_chips(), 3_000);
/// ```
#[derive(Debug)]
pub struct Engine {
    table: Table,
    deck: Deck,
    seed: Option<u64>,
    round: Option<BettingRound>,
    record: Option<HandRecord>,
    ids: HandLogger,
    hands_played: u64,
}

impl Engine {
    pub fn new(players: Vec<Player>, stakes: Stakes, seed: Option<u64>) -> Result<Self, GameError> {
        let table = Table::new(players, stakes)?;
        Ok(Self {
            table,
            deck: Deck::new_with_seed(seed.unwrap_or(DEFAULT_SEED)),
            seed,
            round: None,
            record: None,
            ids: HandLogger::detached(),
            hands_played: 0,
        })
    }

    /// Uses `ids` to number hands instead of today's date.
    pub fn with_hand_ids(mut self, ids: HandLogger) -> Self {
        self.ids = ids;
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn players(&self) -> &[Player] {
        self.table.players()
    }
    pub fn round(&self) -> Option<&BettingRound> {
        self.round.as_ref()
    }
    /// Record of the hand in progress.
    pub fn hand_record(&self) -> Option<&HandRecord> {
        self.record.as_ref()
    }
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
    pub fn live_pot(&self) -> u32 {
        self.table.live_pot()
    }
    pub fn total_chips(&self) -> u64 {
        self.table.total_chips()
    }

    pub fn current_actor(&self) -> Option<usize> {
        self.round.as_ref().and_then(BettingRound::current_actor)
    }

    pub fn legal_actions(&self) -> Vec<LegalAction> {
        self.round
            .as_ref()
            .map(|r| r.legal_actions(self.table.players()))
            .unwrap_or_default()
    }

    /// What the seat on the clock is facing, `None` between hands.
    pub fn decision(&self) -> Option<Decision<'_>> {
        let round = self.round.as_ref()?;
        let seat = round.current_actor()?;
        let player = self.table.players().get(seat)?;
        Some(Decision {
            seat,
            street: round.street(),
            player,
            legal: round.legal_actions(self.table.players()),
            to_call: round.context().to_call(player),
            pot: self.table.live_pot(),
            board: self.table.board(),
        })
    }

    /// Shuffles a fresh deck and starts the next hand.
    ///
    /// Returns the finished record when the hand needs no decisions at all
    /// (every seat all-in from the blinds).
    ///
    /// # Errors
    ///
    /// - [`GameError::HandInProgress`] if the previous hand is still running
    /// - [`GameError::NotEnoughPlayers`] with fewer than two funded seats
    /// - [`GameError::InsufficientCards`] if dealing fails; the hand is aborted
    pub fn start_round(&mut self) -> Result<Option<HandRecord>, GameError> {
        self.ensure_idle()?;
        self.deck.shuffle();
        self.begin_hand()
    }

    /// Starts the next hand dealing from `deck` as-is, without shuffling.
    ///
    /// Hole cards go two at a time to each seat starting left of the button,
    /// then one card is burned before the flop, turn and river.
    pub fn start_round_with_deck(&mut self, deck: Deck) -> Result<Option<HandRecord>, GameError> {
        self.ensure_idle()?;
        self.deck = deck;
        self.begin_hand()
    }

    fn ensure_idle(&self) -> Result<(), GameError> {
        if self.round.is_some() {
            return Err(GameError::HandInProgress);
        }
        Ok(())
    }

    fn begin_hand(&mut self) -> Result<Option<HandRecord>, GameError> {
        self.table.reset_for_hand();
        let seated = self.table.players_in_hand();
        if seated.len() < 2 {
            return Err(GameError::NotEnoughPlayers(seated.len()));
        }
        let mut record = HandRecord::new(self.ids.next_id(), self.seed, self.table.dealer());
        let blinds = self.table.post_blinds()?;
        record.blinds = blinds
            .iter()
            .map(|&(seat, amount)| BlindPost { seat, amount })
            .collect();
        info!(hand_id = %record.hand_id, dealer = self.table.dealer(), seats = seated.len(), "hand started");
        self.record = Some(record);

        if let Err(e) = self.deal_hole_cards() {
            self.abort_hand();
            return Err(e);
        }

        let big_blind = self.table.stakes().big_blind;
        let ctx = BetContext {
            current_bet: big_blind,
            last_raise_size: big_blind,
            big_blind,
        };
        let first = self.table.first_to_act_preflop();
        self.round = Some(BettingRound::open(
            Street::Preflop,
            ctx,
            first,
            self.table.players(),
        ));
        self.advance()
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        let n = self.table.players().len();
        let dealer = self.table.dealer();
        let order: Vec<usize> = (1..=n)
            .map(|i| (dealer + i) % n)
            .filter(|&s| !self.table.players()[s].is_folded())
            .collect();
        for seat in order {
            let hole = self.deck.deal(2)?;
            self.table.players_mut()[seat].receive_cards(&hole);
        }
        Ok(())
    }

    /// Applies `action` for the seat on the clock.
    ///
    /// Returns the finished record when this action ends the hand.
    ///
    /// # Errors
    ///
    /// - [`GameError::NoHandInProgress`] between hands
    /// - [`GameError::IllegalAction`] / [`GameError::InvalidRaiseTarget`]; nothing changes
    /// - [`GameError::InsufficientCards`] while dealing the next street; the hand is aborted
    pub fn act(&mut self, action: PlayerAction) -> Result<Option<HandRecord>, GameError> {
        let round = self.round.as_ref().ok_or(GameError::NoHandInProgress)?;
        let t = transition(round, self.table.players(), action)?;
        self.table.replace_players(t.seats);
        self.round = Some(t.round);
        for effect in t.effects {
            match effect {
                Effect::Acted(rec) => {
                    info!(seat = rec.seat, street = ?rec.street, action = ?rec.action, amount = rec.amount, pot = self.table.live_pot(), "action");
                    if let Some(record) = self.record.as_mut() {
                        record.actions.push(rec);
                    }
                }
                Effect::Reopened { seat, target } => {
                    debug!(seat, target, "betting reopened");
                }
            }
        }
        self.advance()
    }

    /// Runs the hand forward until a seat must act or the hand is over.
    fn advance(&mut self) -> Result<Option<HandRecord>, GameError> {
        loop {
            let Some(round) = self.round.as_ref() else {
                return Err(GameError::NoHandInProgress);
            };
            match round.state() {
                RoundState::AwaitingAction(_) => return Ok(None),
                RoundState::HandComplete => return self.finish_uncontested().map(Some),
                RoundState::StreetComplete => {
                    let street = round.street();
                    let pots = self.table.collect_bets();
                    debug!(?street, pots, pot = self.table.live_pot(), "street complete");
                    match street.next() {
                        Some(Street::Showdown) | None => return self.showdown().map(Some),
                        Some(next) => {
                            if let Err(e) = self.deal_street(next) {
                                self.abort_hand();
                                return Err(e);
                            }
                            let ctx = BetContext {
                                current_bet: 0,
                                last_raise_size: 0,
                                big_blind: self.table.stakes().big_blind,
                            };
                            let first = self.table.first_to_act_postflop();
                            self.round =
                                Some(BettingRound::open(next, ctx, first, self.table.players()));
                        }
                    }
                }
            }
        }
    }

    fn deal_street(&mut self, street: Street) -> Result<(), GameError> {
        let n = if street == Street::Flop { 3 } else { 1 };
        self.deck.burn()?;
        let cards = self.deck.deal(n)?;
        self.table.extend_board(&cards);
        self.table.set_street(street);
        debug!(?street, board = ?self.table.board(), "board dealt");
        Ok(())
    }

    fn finish_uncontested(&mut self) -> Result<HandRecord, GameError> {
        self.table.collect_bets();
        let in_hand = self.table.players_in_hand();
        let [winner] = in_hand[..] else {
            return Err(GameError::NoEligibleWinner { pot: 0 });
        };
        let settlements = award_uncontested(self.table.pots().pots(), winner);
        pay(self.table.players_mut(), &settlements);
        let won: u32 = settlements.iter().map(|s| s.amount).sum();
        info!(seat = winner, amount = won, "hand won uncontested");
        let result = format!("{} wins {} uncontested", self.table.players()[winner].name(), won);
        self.finish(settlements, result, None)
    }

    fn showdown(&mut self) -> Result<HandRecord, GameError> {
        self.table.set_street(Street::Showdown);
        let board = self.table.board().to_vec();
        let mut shown = Vec::new();
        for seat in self.table.players_in_hand() {
            let p = &mut self.table.players_mut()[seat];
            let mut cards = p.hole_cards().to_vec();
            cards.extend_from_slice(&board);
            let rank = evaluate_hand(&cards);
            shown.push(ShownHand {
                seat,
                hole_cards: p.hole_cards().to_vec(),
                category: rank.category,
                tiebreakers: rank.tiebreakers.clone(),
                best_five: rank.best_five.clone(),
                description: rank.describe(),
            });
            p.set_best_hand(rank);
        }
        let settlements = match settle_pots(
            self.table.pots().pots(),
            self.table.players(),
            self.table.dealer(),
        ) {
            Ok(s) => s,
            Err(e) => {
                self.abort_hand();
                return Err(e);
            }
        };
        pay(self.table.players_mut(), &settlements);

        let mut winners: Vec<usize> = settlements
            .iter()
            .flat_map(|s| s.winners.iter().copied())
            .collect();
        winners.sort_unstable();
        winners.dedup();
        let split = settlements.iter().any(|s| s.winners.len() > 1);
        let result = settlements
            .iter()
            .map(|s| {
                let names: Vec<&str> = s
                    .winners
                    .iter()
                    .map(|&w| self.table.players()[w].name())
                    .collect();
                format!("pot {} ({}) to {}", s.pot, s.amount, names.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");
        info!(winners = ?winners, result = %result, "showdown");
        let info = ShowdownInfo {
            winners,
            hands: shown,
            notes: split.then(|| "split pot".to_string()),
        };
        self.finish(settlements, result, Some(info))
    }

    fn finish(
        &mut self,
        settlements: Vec<PotSettlement>,
        result: String,
        showdown: Option<ShowdownInfo>,
    ) -> Result<HandRecord, GameError> {
        let mut record = self.record.take().ok_or(GameError::NoHandInProgress)?;
        record.board = self.table.board().to_vec();
        record.settlements = settlements;
        record.result = Some(result);
        record.showdown = showdown;
        record.ts = Some(chrono::Utc::now().to_rfc3339());
        self.table.pots_mut().clear();
        self.table.rotate_button();
        self.round = None;
        self.hands_played += 1;
        Ok(record)
    }

    /// Abandons the hand in progress and gives every seat back what it put in.
    /// The button stays where it was.
    pub fn abort_hand(&mut self) {
        if self.record.is_some() || self.round.is_some() {
            warn!(hand_id = ?self.record.as_ref().map(|r| r.hand_id.as_str()), "hand aborted");
        }
        self.table.refund_hand();
        self.round = None;
        self.record = None;
    }

    /// Plays one full hand, asking `policy` for every decision.
    ///
    /// # Errors
    ///
    /// Any error of [`Engine::start_round`]. A policy that answers illegally
    /// [`MAX_DECISION_ATTEMPTS`] times in a row gets the hand aborted and the
    /// last rejection returned.
    pub fn play_hand(&mut self, policy: &mut dyn Policy) -> Result<HandRecord, GameError> {
        let done = self.start_round()?;
        self.drive(done, policy)
    }

    /// [`Engine::play_hand`] dealing from `deck` unshuffled.
    pub fn play_hand_with_deck(
        &mut self,
        deck: Deck,
        policy: &mut dyn Policy,
    ) -> Result<HandRecord, GameError> {
        let done = self.start_round_with_deck(deck)?;
        self.drive(done, policy)
    }

    fn drive(
        &mut self,
        mut done: Option<HandRecord>,
        policy: &mut dyn Policy,
    ) -> Result<HandRecord, GameError> {
        loop {
            if let Some(record) = done {
                return Ok(record);
            }
            let mut attempts = 0;
            done = loop {
                let action = {
                    let decision = self.decision().ok_or(GameError::NoHandInProgress)?;
                    policy.decide(&decision)
                };
                match self.act(action) {
                    Ok(r) => break r,
                    Err(
                        e @ (GameError::IllegalAction { .. } | GameError::InvalidRaiseTarget { .. }),
                    ) => {
                        attempts += 1;
                        warn!(policy = policy.name(), error = %e, attempts, "policy answer rejected");
                        if attempts >= MAX_DECISION_ATTEMPTS {
                            self.abort_hand();
                            return Err(e);
                        }
                    }
                    Err(e) => return Err(e),
                }
            };
        }
    }
}
