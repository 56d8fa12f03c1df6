//! # setgame-engine: Set Card Game Core
//!
//! Rules and session state for the "Set" pattern-matching card game: an
//! 81-card deck of four three-state attributes, a set finder, a bounded play
//! area with selection and matching, and per-player scoring.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card attributes and the 81-card universe
//! - [`deck`] - Seedable ChaCha20 shuffles
//! - [`rules`] - Set validity and set search
//! - [`game`] - The session state machine (select, deal, reset)
//! - [`player`] - Per-player counters
//! - [`scoring`] - Score formula with its time bonus
//! - [`errors`] - Session construction errors
//!
//! ## Quick Start
//!
//! ```rust
//! use setgame_engine::game::{GameSession, SessionConfig};
//! use setgame_engine::player::Player;
//!
//! let config = SessionConfig { seed: Some(42), ..SessionConfig::default() };
//! let mut session = GameSession::new(config, vec![Player::human("you")]).unwrap();
//! let you = session.player_ids()[0];
//!
//! if let Some(set) = session.hint() {
//!     for card in set {
//!         let index = session.position_in_play(&card).unwrap();
//!         session.select_card(index, you);
//!     }
//!     assert!(session.in_matched_state());
//!     session.deal_three_cards(you);
//!     assert_eq!(session.player(you).matches(), 1);
//! }
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod player;
pub mod rules;
pub mod scoring;
