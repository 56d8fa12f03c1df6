//! Deal command handler: shows the opening play area for a seed.
//!
//! The same seed always yields the same layout, so the output can be used to
//! check a `play` session or to reproduce a bug report.

use crate::config;
use crate::error::CliError;
use crate::formatters::format_play_area;
use setgame_engine::game::GameSession;
use setgame_engine::player::Player;
use setgame_engine::rules::find_sets;
use std::io::Write;

/// Handle the deal command.
///
/// Prints the initial play area and how many sets it holds, or with `json`
/// the seed, the set count and the full session snapshot as one JSON object.
pub fn handle_deal_command(
    seed: Option<u64>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let session = GameSession::new(cfg.session_config(Some(seed)), vec![Player::human("you")])?;
    let sets = find_sets(session.cards_in_play()).len();

    if json {
        let display = serde_json::json!({
            "seed": seed,
            "sets": sets,
            "session": session.snapshot(),
        });
        let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
        writeln!(out, "{}", json_str)?;
        return Ok(());
    }

    writeln!(out, "deal: seed={}", seed)?;
    for line in format_play_area(session.cards_in_play(), &[]) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "Sets: {}", sets)?;
    Ok(())
}
