//! # Play Command
//!
//! Interactive Set game in the terminal, alone or against a computer player.
//!
//! The human types slot numbers to tap cards, `d` to deal, `h` for a hint,
//! `n` for a new game, `s` to redraw the table and `q` to quit.
//!
//! Against the computer, a multi-threaded tokio runtime drives the
//! computer player's schedule while this thread blocks on input. Its move
//! notifications are queued on a channel and printed before each prompt;
//! input that arrives while it holds the table is refused.

use super::build_ai;
use crate::cli::Vs;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_event, format_positions, format_snapshot};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{PLAY_HELP, PlayInput, parse_play_input};
use setgame_ai::{ChannelArbiter, ComputerPlayer, MoveEvent, MoveOutcome, Table};
use setgame_engine::game::GameSession;
use setgame_engine::player::{Player, PlayerId, PlayerKind};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::Receiver;

// Keeps the computer's runtime alive for the whole session.
struct Opponent {
    _runtime: Runtime,
    events: Receiver<MoveEvent>,
}

/// Handle the play command: interactive game until `q` or end of input.
///
/// # Arguments
///
/// * `vs` - Play against the computer or alone
/// * `seed` - Shuffle seed (config or random when absent)
/// * `ai` - Computer strategy name (config value when absent)
/// * `out` - Output stream for the table and messages
/// * `err` - Error stream for rejected input
/// * `stdin` - Input stream for player commands
pub fn handle_play_command(
    vs: Vs,
    seed: Option<u64>,
    ai: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let strategy = match vs {
        Vs::Computer => Some(build_ai(&ai.unwrap_or_else(|| cfg.ai.clone()), seed)?),
        Vs::Solo => {
            if let Some(name) = ai {
                ui::display_warning(err, &format!("--ai {} has no effect with --vs solo", name))?;
            }
            None
        }
    };
    let mut players = vec![Player::human("You")];
    if let Some(strategy) = &strategy {
        players.push(Player::computer(strategy.name()));
    }
    let session = GameSession::new(cfg.session_config(Some(seed)), players)?;
    let human = session.player_ids()[0];
    let computer_id = session.first_player_of_kind(PlayerKind::Computer);
    let table = Table::new(session);

    match &strategy {
        Some(strategy) => writeln!(
            out,
            "play: vs={} seed={} ai={}",
            vs.as_str(),
            seed,
            strategy.name()
        )?,
        None => writeln!(out, "play: vs={} seed={}", vs.as_str(), seed)?,
    }
    writeln!(out, "{}", PLAY_HELP)?;

    let mut opponent = None;
    if let (Some(strategy), Some(cpu)) = (strategy, computer_id) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("setgame-computer")
            .enable_time()
            .build()?;
        let (arbiter, events) = ChannelArbiter::channel();
        let computer = ComputerPlayer::new(
            cpu,
            Arc::from(strategy),
            cfg.computer_timing(),
            Arc::new(arbiter),
        );
        {
            let _guard = runtime.enter();
            table.start_computer(computer);
        }
        opponent = Some(Opponent {
            _runtime: runtime,
            events,
        });
    }

    let result = play_loop(&table, human, opponent.as_mut(), out, err, stdin);
    table.stop_computer();
    result?;

    writeln!(out, "Final scores:")?;
    for line in table.with_session(score_lines) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn play_loop(
    table: &Table,
    human: PlayerId,
    mut opponent: Option<&mut Opponent>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    show_table(table, out)?;
    loop {
        if let Some(opponent) = opponent.as_deref_mut() {
            drain_events(table, &mut opponent.events, out)?;
        }
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            return Ok(());
        };

        let slots = table.with_session(|s| s.cards_in_play().len());
        match parse_play_input(&line, slots) {
            PlayInput::Select(indexes) => {
                // taps after a refused one are dropped
                let blocked = indexes
                    .into_iter()
                    .any(|index| table.select_card(human, index) == MoveOutcome::Blocked);
                if blocked {
                    ui::display_blocked(out)?;
                }
                show_table(table, out)?;
            }
            PlayInput::Deal => {
                if table.deal_three_cards(human) == MoveOutcome::Blocked {
                    ui::display_blocked(out)?;
                }
                show_table(table, out)?;
            }
            PlayInput::Hint => {
                let hint = table.with_session(|s| {
                    s.hint()
                        .map(|set| format_positions(&set, s.cards_in_play()))
                });
                match hint {
                    Some(slots) => writeln!(out, "Hint: slots {}", slots)?,
                    None => writeln!(out, "No set on the table.")?,
                }
            }
            PlayInput::NewGame => {
                table.new_game();
                writeln!(out, "New game.")?;
                show_table(table, out)?;
            }
            PlayInput::Show => show_table(table, out)?,
            PlayInput::Quit => return Ok(()),
            PlayInput::Invalid(msg) => ui::write_error(err, &msg)?,
        }

        if table.with_session(is_game_over) {
            writeln!(out, "Game over. Type n for a new game or q to quit.")?;
        }
    }
}

fn drain_events(
    table: &Table,
    events: &mut Receiver<MoveEvent>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut redraw = false;
    while let Ok(event) = events.try_recv() {
        writeln!(out, "{}", format_event(event))?;
        redraw |= event == MoveEvent::MoveEnd;
    }
    if redraw {
        show_table(table, out)?;
    }
    Ok(())
}

fn show_table(table: &Table, out: &mut dyn Write) -> Result<(), CliError> {
    let snapshot = table.snapshot();
    for line in format_snapshot(&snapshot.session) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn is_game_over(session: &GameSession) -> bool {
    !session.in_matched_state() && !session.can_deal() && session.hint().is_none()
}

fn score_lines(session: &GameSession) -> Vec<String> {
    session
        .players()
        .iter()
        .map(|p| format!("{}: {}", p.name(), p.score()))
        .collect()
}
