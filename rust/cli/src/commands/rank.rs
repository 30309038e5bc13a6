//! Rank command handler: evaluates five to seven cards.

use crate::error::CliError;
use crate::formatters::format_cards;
use holdem_engine::cards::parse_cards;
use holdem_engine::hand::evaluate_hand;
use std::collections::HashSet;
use std::io::Write;

/// Handle the rank command.
///
/// Each argument may hold one or several cards (`As`, `"Ks Qs"`, `Jh,10h`).
///
/// # Errors
///
/// `CliError::InvalidInput` for unparsable cards, duplicates, or a card
/// count outside `5..=7`.
pub fn handle_rank_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let parsed = parse_cards(&cards.join(" ")).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    if !(5..=7).contains(&parsed.len()) {
        return Err(CliError::InvalidInput(format!(
            "expected 5 to 7 cards, got {}",
            parsed.len()
        )));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = parsed.iter().find(|c| !seen.insert(**c)) {
        return Err(CliError::InvalidInput(format!("duplicate card {}", dup)));
    }

    let rank = evaluate_hand(&parsed);
    writeln!(out, "Cards: {}", format_cards(&parsed))?;
    writeln!(out, "Category: {}", rank.category.name())?;
    writeln!(
        out,
        "Tiebreakers: {}",
        rank.tiebreakers
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    )?;
    writeln!(out, "Best five: {}", format_cards(&rank.best_five))?;
    writeln!(out, "{}", rank.describe())?;
    Ok(())
}
