use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::Player;
use crate::pot::Pot;

/// How one pot was paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotSettlement {
    /// Index of the pot in creation order
    pub pot: usize,
    pub amount: u32,
    /// Winning seats in odd-chip order
    pub winners: Vec<usize>,
    pub share: u32,
    pub remainder: u32,
    /// `(seat, chips)` actually paid, odd chips included
    pub payouts: Vec<(usize, u32)>,
}

/// Seats ordered for odd-chip priority: left of the button first, wrapping.
fn odd_chip_order(mut seats: Vec<usize>, dealer: usize, table_size: usize) -> Vec<usize> {
    seats.sort_by_key(|&s| (s + table_size - (dealer + 1) % table_size) % table_size);
    seats
}

fn split(pot: usize, amount: u32, winners: Vec<usize>) -> PotSettlement {
    let count = winners.len() as u32;
    let share = amount / count;
    let remainder = amount % count;
    let payouts = winners
        .iter()
        .enumerate()
        .map(|(i, &seat)| (seat, share + u32::from((i as u32) < remainder)))
        .collect();
    PotSettlement {
        pot,
        amount,
        winners,
        share,
        remainder,
        payouts,
    }
}

/// Decides every pot at showdown from the seats' `best_hand`.
///
/// A pot is contested by its eligible seats that are still holding cards
/// and have a ranked hand. Ties split evenly and leftover chips go one at a
/// time to winners nearest the button's left. Empty pots are skipped.
///
/// # Errors
///
/// [`GameError::NoEligibleWinner`] when a non-empty pot has nobody left to
/// win it, which means the pots were built wrong.
pub fn settle_pots(
    pots: &[Pot],
    players: &[Player],
    dealer: usize,
) -> Result<Vec<PotSettlement>, GameError> {
    let mut settlements = Vec::with_capacity(pots.len());
    for (index, pot) in pots.iter().enumerate() {
        if pot.amount == 0 {
            continue;
        }
        let contenders: Vec<(usize, &Player)> = pot
            .eligible
            .iter()
            .filter_map(|&s| players.get(s).map(|p| (s, p)))
            .filter(|(_, p)| !p.is_folded() && p.best_hand().is_some())
            .collect();
        let best = contenders
            .iter()
            .filter_map(|(_, p)| p.best_hand())
            .max()
            .ok_or(GameError::NoEligibleWinner { pot: index })?;
        let winners: Vec<usize> = contenders
            .iter()
            .filter(|(_, p)| p.best_hand() == Some(best))
            .map(|(s, _)| *s)
            .collect();
        let winners = odd_chip_order(winners, dealer, players.len());
        settlements.push(split(index, pot.amount, winners));
    }
    Ok(settlements)
}

/// Every pot goes to the one seat left holding cards.
pub fn award_uncontested(pots: &[Pot], seat: usize) -> Vec<PotSettlement> {
    pots.iter()
        .enumerate()
        .filter(|(_, pot)| pot.amount > 0)
        .map(|(index, pot)| split(index, pot.amount, vec![seat]))
        .collect()
}

pub fn pay(players: &mut [Player], settlements: &[PotSettlement]) {
    for (seat, amount) in settlements.iter().flat_map(|s| s.payouts.iter()) {
        if let Some(p) = players.get_mut(*seat) {
            p.add_chips(*amount);
        }
    }
}
