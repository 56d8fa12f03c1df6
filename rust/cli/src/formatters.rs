//! Card and table formatters for terminal display.
//!
//! Attribute states are abstract in the engine; here they get the familiar
//! names (count, colour, fill, shape). Shapes use Unicode glyphs with an
//! ASCII fallback for terminals that cannot render them.
//!
//! ```rust
//! use setgame_engine::cards::{Card, CardState};
//! use setgame_cli::formatters::format_card;
//!
//! let card = Card::new(CardState::Beta, CardState::Alpha, CardState::Gamma, CardState::Alpha);
//! let text = format_card(&card);
//! assert!(text.starts_with("red open"));
//! ```

use setgame_ai::MoveEvent;
use setgame_engine::cards::{Card, CardState};
use setgame_engine::game::SessionSnapshot;

/// Check if the terminal supports Unicode shape glyphs.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). On Unix-like systems,
/// assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

fn color_name(state: CardState) -> &'static str {
    match state {
        CardState::Alpha => "red",
        CardState::Beta => "green",
        CardState::Gamma => "purple",
    }
}

fn shading_name(state: CardState) -> &'static str {
    match state {
        CardState::Alpha => "solid",
        CardState::Beta => "striped",
        CardState::Gamma => "open",
    }
}

fn symbol_glyph(state: CardState, unicode: bool) -> &'static str {
    match (state, unicode) {
        (CardState::Alpha, true) => "◆",
        (CardState::Beta, true) => "~",
        (CardState::Gamma, true) => "●",
        (CardState::Alpha, false) => "D",
        (CardState::Beta, false) => "S",
        (CardState::Gamma, false) => "O",
    }
}

/// `red striped ◆◆`: colour, fill, then the shape repeated `number` times.
pub fn format_card(card: &Card) -> String {
    format_card_with(card, supports_unicode())
}

fn format_card_with(card: &Card, unicode: bool) -> String {
    let glyph = symbol_glyph(card.symbol, unicode);
    format!(
        "{} {} {}",
        color_name(card.color),
        shading_name(card.shading),
        glyph.repeat(card.number.ordinal() as usize)
    )
}

/// One line per slot, numbered from 1, selected cards marked with `*`.
pub fn format_play_area(cards_in_play: &[Card], selected: &[Card]) -> Vec<String> {
    cards_in_play
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let mark = if selected.contains(card) { '*' } else { ' ' };
            format!("{:>2}{} [{}] {}", i + 1, mark, card, format_card(card))
        })
        .collect()
}

/// 1-based slot numbers of `set` within `cards_in_play`, e.g. `2, 5, 9`.
pub fn format_positions(set: &[Card; 3], cards_in_play: &[Card]) -> String {
    set.iter()
        .filter_map(|card| cards_in_play.iter().position(|c| c == card))
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Table header, play area, and the score line of every player.
pub fn format_snapshot(snapshot: &SessionSnapshot) -> Vec<String> {
    let mut lines = vec![format!(
        "Deck: {}  In play: {}  Matched: {}",
        snapshot.deck_remaining,
        snapshot.cards_in_play.len(),
        snapshot.matched_cards.len()
    )];
    lines.extend(format_play_area(
        &snapshot.cards_in_play,
        &snapshot.selected_cards,
    ));
    if snapshot.in_matched_state {
        lines.push("Set! Select a card or deal to collect it.".to_string());
    }
    for p in &snapshot.players {
        lines.push(format!(
            "{}: score={} matches={} mismatches={} moves={}",
            p.name, p.score, p.matches, p.mis_matches, p.moves
        ));
    }
    lines
}

/// What the player sees for each computer move callback.
pub fn format_event(event: MoveEvent) -> &'static str {
    match event {
        MoveEvent::BeforeMove => "Computer is looking for a set...",
        MoveEvent::MoveStart => "Computer found a set, hands off!",
        MoveEvent::MoveEnd => "Computer collected its set.",
        MoveEvent::AfterMove => "Your turn.",
    }
}
