use thiserror::Error;

use crate::player::PlayerAction;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Insufficient cards: requested {requested}, remaining {remaining}")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("Illegal action {action:?} for seat {seat}")]
    IllegalAction { seat: usize, action: PlayerAction },
    #[error("Invalid raise target {target} for seat {seat} (current bet {current}, max {max})")]
    InvalidRaiseTarget {
        seat: usize,
        target: u32,
        current: u32,
        max: u32,
    },
    #[error("Pot {pot} has no eligible winner")]
    NoEligibleWinner { pot: usize },
    #[error("Not enough players with chips to start a hand (have {0})")]
    NotEnoughPlayers(usize),
    #[error("Too many players for one table: {0}")]
    TooManyPlayers(usize),
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already in progress")]
    HandInProgress,
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
}
