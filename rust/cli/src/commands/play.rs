//! Play command handler: runs hands with a placeholder policy in every seat.
//!
//! Prints each hand's blinds, actions, board, shown hands and per-pot
//! payouts, optionally appends the hand records as JSONL, and checks after
//! every hand that no chips were created or lost.

use crate::config;
use crate::error::CliError;
use crate::formatters::{
    format_action, format_blind, format_board, format_cards, format_settlement, seat_name,
};
use crate::ui;
use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::game::Stakes;
use holdem_engine::logger::{HandLogger, HandRecord};
use holdem_engine::player::Player;
use std::io::Write;
use std::path::PathBuf;

/// Resolved settings for one `play` session.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub hands: u32,
    pub players: usize,
    pub starting_stack: u32,
    pub stakes: Stakes,
    pub seed: Option<u64>,
    pub policy: String,
    pub output: Option<PathBuf>,
}

/// Handle the play command.
///
/// Stops early, with a warning, once fewer than two seats have chips.
///
/// # Errors
///
/// - `CliError::InvalidInput` for zero hands or an unknown policy
/// - `CliError::Config` for a seat count outside `2..=10`
/// - `CliError::Engine` when a hand fails or the chip total changes
/// - `CliError::Io` when the output file cannot be written
pub fn handle_play_command(
    opts: &PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if opts.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".into()));
    }
    config::validate_players(opts.players)?;
    let seed = opts.seed.unwrap_or_else(rand::random);
    let mut policy = holdem_ai::create_policy(&opts.policy, Some(seed)).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "unknown policy '{}' (expected one of: {})",
            opts.policy,
            holdem_ai::POLICY_NAMES.join(", ")
        ))
    })?;

    let players = (0..opts.players)
        .map(|i| Player::new(i, seat_name(i), opts.starting_stack))
        .collect();
    let mut engine = Engine::new(players, opts.stakes, Some(seed))?;
    let mut logger = opts.output.as_ref().map(HandLogger::create).transpose()?;
    let expected = engine.total_chips();

    writeln!(
        out,
        "Seed: {} | policy: {} | players: {} | blinds: {}/{}",
        seed,
        policy.name(),
        opts.players,
        opts.stakes.small_blind,
        opts.stakes.big_blind
    )?;

    for _ in 0..opts.hands {
        let record = match engine.play_hand(policy.as_mut()) {
            Ok(record) => record,
            Err(GameError::NotEnoughPlayers(n)) => {
                ui::display_warning(
                    err,
                    &format!(
                        "table closed after {} hands: {} player(s) with chips",
                        engine.hands_played(),
                        n
                    ),
                )?;
                break;
            }
            Err(e) => return Err(e.into()),
        };
        print_hand(&record, out)?;
        if let Some(logger) = logger.as_mut() {
            logger.write(&record)?;
        }
        let total = engine.total_chips();
        if total != expected {
            return Err(CliError::Engine(format!(
                "chip total changed in hand {}: expected {}, found {}",
                record.hand_id, expected, total
            )));
        }
    }

    writeln!(out, "Hands played: {}", engine.hands_played())?;
    writeln!(out, "Final stacks:")?;
    for p in engine.players() {
        writeln!(out, "  {}: {}", p.name(), p.chips())?;
    }
    writeln!(out, "Total chips: {} (conserved)", engine.total_chips())?;
    tracing::info!(
        hands = engine.hands_played(),
        seed,
        policy = policy.name(),
        "play session finished"
    );
    Ok(())
}

fn print_hand(record: &HandRecord, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(
        out,
        "Hand {} (button {})",
        record.hand_id,
        seat_name(record.dealer)
    )?;
    for post in &record.blinds {
        writeln!(out, "  {}", format_blind(post))?;
    }
    for action in &record.actions {
        writeln!(out, "  {}", format_action(action))?;
    }
    if !record.board.is_empty() {
        writeln!(out, "  Board: {}", format_board(&record.board))?;
    }
    if let Some(showdown) = &record.showdown {
        for shown in &showdown.hands {
            writeln!(
                out,
                "  {} shows {}: {}",
                seat_name(shown.seat),
                format_cards(&shown.hole_cards),
                shown.description
            )?;
        }
    }
    for settlement in &record.settlements {
        writeln!(out, "  {}", format_settlement(settlement))?;
    }
    Ok(())
}
