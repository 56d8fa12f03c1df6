//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value
//! (default, environment, or configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "initial_deal_size": {
//!     "value": 12,
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
/// Returns `CliError::Config` if the configuration file cannot be read or
/// parsed, or a value fails validation.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "initial_deal_size": {
            "value": config.initial_deal_size,
            "source": sources.initial_deal_size,
        },
        "play_area_max": {
            "value": config.play_area_max,
            "source": sources.play_area_max,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "ai": {
            "value": config.ai,
            "source": sources.ai,
        },
        "computer_interval_secs": {
            "value": config.computer_interval_secs,
            "source": sources.computer_interval_secs,
        },
        "computer_think_secs": {
            "value": config.computer_think_secs,
            "source": sources.computer_think_secs,
        },
        "computer_reveal_secs": {
            "value": config.computer_reveal_secs,
            "source": sources.computer_reveal_secs,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
