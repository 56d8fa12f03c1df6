//! # setgame-ai: Computer Opponent for Set
//!
//! Strategies for finding sets, the timer-driven computer player, and the
//! table that serializes its moves with a human player's.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait for choosing a set among the cards in play
//! - [`baseline`] - First-found and random strategies
//! - [`arbiter`] - Move lifecycle callbacks for a presentation layer
//! - [`computer`] - Background task playing on a fixed schedule
//! - [`table`] - Shared session plus the "computer is moving" gate
//!
//! ## Quick Start
//!
//! ```rust
//! use setgame_ai::{create_ai, AIOpponent};
//! use setgame_engine::game::{GameSession, SessionConfig};
//! use setgame_engine::player::Player;
//!
//! let ai = create_ai("baseline").expect("known strategy");
//! let config = SessionConfig { seed: Some(42), ..SessionConfig::default() };
//! let session = GameSession::new(config, vec![Player::computer("cpu")]).unwrap();
//!
//! if let Some(set) = ai.choose_set(session.cards_in_play()) {
//!     println!("{} found {} {} {}", ai.name(), set[0], set[1], set[2]);
//! }
//! ```

use setgame_engine::cards::Card;

pub mod arbiter;
pub mod baseline;
pub mod computer;
pub mod table;

pub use arbiter::{ChannelArbiter, MoveArbiter, MoveEvent, NoopArbiter};
pub use computer::{ComputerHandle, ComputerPlayer, ComputerTiming, RoundOutcome};
pub use table::{MoveOutcome, Table, TableSnapshot};

/// Strategy a computer player uses to pick its move.
///
/// # Example Implementation
///
/// ```rust
/// use setgame_ai::AIOpponent;
/// use setgame_engine::cards::Card;
/// use setgame_engine::rules::find_sets;
///
/// struct LastFound;
///
/// impl AIOpponent for LastFound {
///     fn choose_set(&self, cards_in_play: &[Card]) -> Option<[Card; 3]> {
///         find_sets(cards_in_play).pop()
///     }
///
///     fn name(&self) -> &str {
///         "LastFound"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Three cards from `cards_in_play` forming a set, or `None` to pass.
    fn choose_set(&self, cards_in_play: &[Card]) -> Option<[Card; 3]>;

    fn name(&self) -> &str;
}

/// Builds a strategy by name: `"baseline"` (or empty) and `"random"`.
///
/// ```rust
/// use setgame_ai::create_ai;
///
/// assert_eq!(create_ai("baseline").unwrap().name(), "BaselineAI");
/// assert!(create_ai("oracle").is_none());
/// ```
pub fn create_ai(ai_type: &str) -> Option<Box<dyn AIOpponent>> {
    match ai_type {
        "baseline" | "" => Some(Box::new(baseline::BaselineAI::new())),
        "random" => Some(Box::new(baseline::RandomAI::new(rand::random()))),
        _ => None,
    }
}

/// Names accepted by [`create_ai`].
pub const AI_NAMES: &[&str] = &["baseline", "random"];
