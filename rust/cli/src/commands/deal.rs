//! Deal command handler for single hand dealing and display.
//!
//! Deals hole cards to every seat and a full board from a seeded deck, then
//! shows each seat's best five-card hand and who would win the showdown.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_board, format_cards, seat_name};
use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;
use holdem_engine::hand::{evaluate_hand, HandRank};
use std::io::Write;

/// Handle the deal command.
///
/// The seed is printed first so any deal can be repeated.
///
/// # Errors
///
/// `CliError::Config` for a seat count outside `2..=10`, `CliError::Io` on
/// write failures.
pub fn handle_deal_command(
    players: usize,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    config::validate_players(players)?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();

    let mut holes: Vec<Vec<Card>> = Vec::with_capacity(players);
    for _ in 0..players {
        holes.push(deck.deal(2)?);
    }
    let mut board = Vec::with_capacity(5);
    for n in [3, 1, 1] {
        deck.burn()?;
        board.extend(deck.deal(n)?);
    }

    let ranks: Vec<HandRank> = holes
        .iter()
        .map(|hole| {
            let mut seven = hole.clone();
            seven.extend_from_slice(&board);
            evaluate_hand(&seven)
        })
        .collect();

    writeln!(out, "Seed: {}", seed)?;
    for (seat, hole) in holes.iter().enumerate() {
        writeln!(out, "Hole {}: {}", seat_name(seat), format_cards(hole))?;
    }
    writeln!(out, "Board: {}", format_board(&board))?;
    for (seat, rank) in ranks.iter().enumerate() {
        writeln!(out, "{}: {}", seat_name(seat), rank.describe())?;
    }

    let Some(best) = ranks.iter().max() else {
        return Ok(());
    };
    let winners: Vec<String> = ranks
        .iter()
        .enumerate()
        .filter(|(_, r)| *r == best)
        .map(|(seat, _)| seat_name(seat))
        .collect();
    if winners.len() == 1 {
        writeln!(out, "Winner: {}", winners[0])?;
    } else {
        writeln!(out, "Split: {}", winners.join(", "))?;
    }
    Ok(())
}
