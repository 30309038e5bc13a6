//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the resolved
//! configuration with the source of every value (default, file or env).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "players": {
//!     "value": 6,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    writeln!(out, "{}", render(&resolved)?)?;
    Ok(())
}

fn render(resolved: &config::ConfigResolved) -> Result<String, CliError> {
    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "policy": {
            "value": config.policy,
            "source": sources.policy,
        }
    });
    Ok(serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?)
}
