//! Command handler modules for the `setgame` CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Output streams (`&mut dyn Write`) passed as parameters
//! - Errors propagated via the `CliError` enum and printed once by `run`

pub mod cfg;
pub mod deal;
pub mod hint;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use hint::handle_hint_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use crate::error::CliError;
use setgame_ai::baseline::RandomAI;
use setgame_ai::{AI_NAMES, AIOpponent, create_ai};

/// Strategy by name. `random` is seeded from `seed` so runs replay exactly.
pub(crate) fn build_ai(name: &str, seed: u64) -> Result<Box<dyn AIOpponent>, CliError> {
    match name {
        "random" => Ok(Box::new(RandomAI::new(seed))),
        other => create_ai(other).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "unknown ai '{}' (expected one of: {})",
                other,
                AI_NAMES.join(", ")
            ))
        }),
    }
}
