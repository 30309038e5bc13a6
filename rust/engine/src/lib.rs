//! # holdem-engine: Texas Hold'em Simulation Core
//!
//! A deterministic multi-seat No-Limit Hold'em engine: seven-card hand
//! evaluation, a betting state machine with min-raise and reopening rules,
//! side-pot accounting and showdown payout with odd-chip distribution.
//! Shuffles are reproducible from a seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded draw-without-replacement deck (ChaCha20 RNG)
//! - [`hand`] - Seven-card hand evaluation and comparison
//! - [`player`] - Seat bookkeeping and clamping chip mutators
//! - [`rules`] - Legal-action generation and action validation
//! - [`betting`] - Per-street betting state machine
//! - [`pot`] - Side-pot layering of street bets
//! - [`showdown`] - Pot settlement and odd-chip distribution
//! - [`game`] - Table state: seats, button, blinds, board
//! - [`engine`] - Hand orchestration across streets
//! - [`logger`] - Hand records and JSONL hand history
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate_hand, Category};
//!
//! let cards = parse_cards("As 2h 3d 4c 5s 9d Kc").unwrap();
//! let rank = evaluate_hand(&cards);
//! assert_eq!(rank.category, Category::Straight);
//! assert_eq!(rank.tiebreakers, vec![5]);
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use holdem_engine::engine::Engine;
//! use holdem_engine::game::Stakes;
//! use holdem_engine::player::{Player, PlayerAction};
//!
//! let players = vec![Player::new(0, "alice", 500), Player::new(1, "bob", 500)];
//! let mut engine = Engine::new(players, Stakes::default(), Some(42)).unwrap();
//! engine.start_round().unwrap();
//!
//! // heads-up the button posts the small blind and acts first
//! let record = engine.act(PlayerAction::Fold).unwrap().unwrap();
//! assert_eq!(record.winnings(), vec![(1, 30)]);
//! assert_eq!(engine.total_chips(), 1_000);
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod showdown;
