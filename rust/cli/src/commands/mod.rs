//! Command handler modules for the holdem CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers for that command
//! - Output streams (`&mut dyn Write`) passed in as parameters
//! - Errors propagated via the `CliError` enum

mod cfg;
mod deal;
mod play;
mod rank;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::{handle_play_command, PlayOptions};
pub use rank::handle_rank_command;
