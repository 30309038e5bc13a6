use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::player::Player;

/// Chips won together by the best hand among `eligible` seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible: BTreeSet<usize>,
}

/// Ordered pots of one hand, smallest contribution level first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves every seat's street bet into pots, one layer per distinct bet level.
    ///
    /// Each pass takes the smallest positive bet from every seat still holding
    /// a bet; the layer is winnable by the non-folded seats that paid into it.
    /// A layer paid only by folded seats joins the latest pot that still has
    /// eligible seats, so every pot can be won.
    /// Returns how many pots were created (0 when no bets are out).
    pub fn collect(&mut self, players: &mut [Player]) -> usize {
        let mut created = 0;
        while let Some(level) = players
            .iter()
            .map(Player::current_bet)
            .filter(|&b| b > 0)
            .min()
        {
            let mut pot = Pot {
                amount: 0,
                eligible: BTreeSet::new(),
            };
            for (seat, p) in players.iter_mut().enumerate() {
                if p.current_bet() == 0 {
                    continue;
                }
                pot.amount += p.take_bet(level);
                if !p.is_folded() {
                    pot.eligible.insert(seat);
                }
            }
            if pot.eligible.is_empty() {
                if let Some(live) = self.pots.iter_mut().rev().find(|p| !p.eligible.is_empty()) {
                    debug!(amount = pot.amount, "dead layer merged into earlier pot");
                    live.amount += pot.amount;
                    continue;
                }
            }
            debug!(amount = pot.amount, eligible = ?pot.eligible, "pot layer collected");
            self.pots.push(pot);
            created += 1;
        }
        created
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    pub fn clear(&mut self) {
        self.pots.clear();
    }
}
