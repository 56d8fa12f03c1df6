//! Hint command handler: points out one set in the opening play area.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_card, format_positions};
use setgame_engine::game::GameSession;
use setgame_engine::player::Player;
use std::io::Write;

/// Handle the hint command.
///
/// Prints the 1-based slots of the set a hint would show during play, or
/// `no set` when the opening layout has none.
pub fn handle_hint_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let session = GameSession::new(cfg.session_config(Some(seed)), vec![Player::human("you")])?;

    writeln!(out, "hint: seed={}", seed)?;
    match session.hint() {
        Some(set) => {
            writeln!(
                out,
                "Set at slots {}",
                format_positions(&set, session.cards_in_play())
            )?;
            for card in &set {
                writeln!(out, "  [{}] {}", card, format_card(card))?;
            }
        }
        None => writeln!(out, "no set")?,
    }
    Ok(())
}
