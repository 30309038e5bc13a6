use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Draw-without-replacement card container with a reproducible shuffle.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// Deck that deals exactly `cards` in order. Used to script hands.
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self {
            cards,
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(0),
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    /// Removes and returns the top `n` cards. Nothing is removed on failure.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::InsufficientCards {
                requested: n,
                remaining,
            });
        }
        let dealt = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(dealt)
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        let mut one = self.deal(1)?;
        one.pop().ok_or(GameError::InsufficientCards {
            requested: 1,
            remaining: 0,
        })
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.deal(1).map(|_| ())
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
