//! Simulation command handler: whole solo games played by a computer strategy.
//!
//! Games run synchronously without the move timer. Every action (collecting
//! a set or dealing) counts as one round of the configured computer
//! interval, and scores are computed on that simulated clock so the output
//! is reproducible for a given seed.
//!
//! # Examples
//!
//! ```no_run
//! use setgame_cli::commands::sim::handle_sim_command;
//! use std::io;
//!
//! handle_sim_command(10, Some(42), None, &mut io::stdout()).unwrap();
//! ```

use super::build_ai;
use crate::config;
use crate::error::CliError;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use setgame_ai::AIOpponent;
use setgame_engine::game::{GameSession, SessionConfig};
use setgame_engine::player::Player;
use std::io::Write;
use std::time::Duration;

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GameReport {
    seed: u64,
    rounds: u32,
    matches: u32,
    mis_matches: u32,
    wasted_deals: u32,
    cards_left: usize,
    score: i64,
}

/// Handle the sim command.
///
/// Game seeds are drawn from a ChaCha8 stream seeded with `seed`, so each
/// game differs while the whole run stays reproducible.
pub fn handle_sim_command(
    games: u32,
    seed: Option<u64>,
    ai: Option<String>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }

    let cfg = config::load()?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let ai_name = ai.unwrap_or_else(|| cfg.ai.clone());
    let strategy = build_ai(&ai_name, base_seed)?;
    let round = cfg.computer_timing().interval;

    writeln!(
        out,
        "sim: games={} seed={} ai={}",
        games,
        base_seed,
        strategy.name()
    )?;

    let mut seeds = ChaCha8Rng::seed_from_u64(base_seed);
    let mut total_matches = 0u64;
    let mut total_score = 0i64;
    for i in 1..=games {
        let game_seed = seeds.next_u64();
        let report = play_solo_game(
            strategy.as_ref(),
            cfg.session_config(Some(game_seed)),
            round,
        )?;
        writeln!(
            out,
            "Game {}: seed={} rounds={} matches={} mismatches={} wasted_deals={} cards_left={} score={}",
            i,
            report.seed,
            report.rounds,
            report.matches,
            report.mis_matches,
            report.wasted_deals,
            report.cards_left,
            report.score
        )?;
        total_matches += u64::from(report.matches);
        total_score += report.score;
    }

    writeln!(
        out,
        "Average: matches={:.2} score={:.2}",
        total_matches as f64 / f64::from(games),
        total_score as f64 / f64::from(games)
    )?;
    Ok(())
}

// Collect a set whenever the strategy finds one, otherwise deal. Ends when
// neither is possible.
fn play_solo_game(
    strategy: &dyn AIOpponent,
    config: SessionConfig,
    round: Duration,
) -> Result<GameReport, CliError> {
    let mut session = GameSession::new(config, vec![Player::computer(strategy.name())])?;
    let player = session.player_ids()[0];
    let mut rounds = 0u32;

    loop {
        if let Some(set) = strategy.choose_set(session.cards_in_play()) {
            session.clear_selection();
            for card in set {
                if let Some(index) = session.position_in_play(&card) {
                    session.select_card(index, player);
                }
            }
            // collects the match even when the deck is empty
            session.deal_three_cards(player);
        } else if session.can_deal() {
            session.deal_three_cards(player);
        } else {
            break;
        }
        rounds += 1;
    }

    let p = session.player(player);
    tracing::debug!(
        seed = ?config.seed,
        rounds,
        matches = p.matches(),
        "simulated game finished"
    );
    Ok(GameReport {
        seed: config.seed.unwrap_or_default(),
        rounds,
        matches: p.matches(),
        mis_matches: p.mis_matches(),
        wasted_deals: p.deals_when_set_possible(),
        cards_left: session.cards_in_play().len() + session.deck_len(),
        score: p.score_after(round * rounds),
    })
}
