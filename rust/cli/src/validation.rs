//! Input parsing for the interactive `play` command.
//!
//! Slots are numbered from 1 on screen and converted to 0-based indexes
//! here, so nothing past this module sees the display numbering.

/// Result of parsing one line typed at the `play` prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum PlayInput {
    /// Tap these slots in order (0-based)
    Select(Vec<usize>),
    Deal,
    Hint,
    NewGame,
    Show,
    Quit,
    /// Unusable input with a message for the player
    Invalid(String),
}

pub const PLAY_HELP: &str =
    "Commands: <slot> [<slot> ...] select, d deal, h hint, n new game, s show, q quit";

/// Parse a prompt line against a play area of `slots` cards.
///
/// ```rust
/// use setgame_cli::validation::{parse_play_input, PlayInput};
///
/// assert_eq!(parse_play_input("2 5 9", 12), PlayInput::Select(vec![1, 4, 8]));
/// assert_eq!(parse_play_input("D", 12), PlayInput::Deal);
/// assert!(matches!(parse_play_input("13", 12), PlayInput::Invalid(_)));
/// ```
pub fn parse_play_input(input: &str, slots: usize) -> PlayInput {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&first) = parts.first() else {
        return PlayInput::Invalid(format!("Empty input. {}", PLAY_HELP));
    };

    match first {
        "q" | "quit" => return PlayInput::Quit,
        "d" | "deal" => return PlayInput::Deal,
        "h" | "hint" => return PlayInput::Hint,
        "n" | "new" => return PlayInput::NewGame,
        "s" | "show" => return PlayInput::Show,
        _ => {}
    }

    let mut indexes = Vec::with_capacity(parts.len());
    for part in parts {
        match part.parse::<usize>() {
            Ok(n) if (1..=slots).contains(&n) => indexes.push(n - 1),
            Ok(n) => {
                return PlayInput::Invalid(format!("No card at slot {} (1-{})", n, slots));
            }
            Err(_) => {
                return PlayInput::Invalid(format!("Unrecognized input '{}'. {}", part, PLAY_HELP));
            }
        }
    }
    PlayInput::Select(indexes)
}
