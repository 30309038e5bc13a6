//! # holdem CLI Library
//!
//! Command-line front end for the Texas Hold'em engine: deal and inspect a
//! hand, rank cards, play seeded sessions with placeholder policies, and
//! show the resolved configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```
//! let mut out: Vec<u8> = Vec::new();
//! let mut err: Vec<u8> = Vec::new();
//! let code = holdem_cli::run(["holdem", "rank", "As", "Ks", "Qs", "Js", "Ts"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Royal Flush"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal a single hand for inspection
//! - `rank`: Evaluate five to seven cards
//! - `play`: Play hands with a placeholder policy and optionally record JSONL
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_rank_command, PlayOptions,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "rank", "play", "cfg"];

/// Installs the stderr `tracing` subscriber. Filter comes from `RUST_LOG`,
/// `warn` when unset. A second call is a no-op.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// let mut out: Vec<u8> = Vec::new();
/// let code = holdem_cli::run(["holdem", "deal", "--seed", "42"], &mut out, &mut Vec::<u8>::new());
/// assert_eq!(code, 0);
/// ```
///
/// # Available Commands
///
/// - `deal [--players N] [--seed S]`: Deal one hand with a full board
/// - `rank <CARD>...`: Rank five to seven cards
/// - `play [--hands N] [--players N] [--seed S] [--policy NAME] [--output FILE]`
/// - `cfg`: Display configuration settings
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = HoldemCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = print_usage(&e, err);
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => match cli.cmd {
            Commands::Cfg => report(handle_cfg_command(out), err),
            Commands::Rank { cards } => report(handle_rank_command(&cards, out), err),
            Commands::Deal { players, seed } => {
                let cfg = match load_config(err) {
                    Ok(cfg) => cfg,
                    Err(code) => return code,
                };
                report(
                    handle_deal_command(players.unwrap_or(cfg.players), seed.or(cfg.seed), out),
                    err,
                )
            }
            Commands::Play {
                hands,
                players,
                seed,
                policy,
                output,
            } => {
                let cfg = match load_config(err) {
                    Ok(cfg) => cfg,
                    Err(code) => return code,
                };
                let opts = PlayOptions {
                    hands,
                    players: players.unwrap_or(cfg.players),
                    starting_stack: cfg.starting_stack,
                    stakes: cfg.stakes(),
                    seed: seed.or(cfg.seed),
                    policy: policy.unwrap_or_else(|| cfg.policy.clone()),
                    output,
                };
                report(handle_play_command(&opts, out, err), err)
            }
        },
    }
}

fn print_usage(e: &clap::Error, err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "holdem Poker CLI")?;
    writeln!(err, "Usage: holdem <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: holdem --help")
}

fn load_config(err: &mut dyn Write) -> Result<config::Config, i32> {
    match config::load_with_sources() {
        Ok(resolved) => Ok(resolved.config),
        Err(e) => {
            let _ = ui::write_error(err, &CliError::from(e).to_string());
            Err(exit_code::ERROR)
        }
    }
}

fn report(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
