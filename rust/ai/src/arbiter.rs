//! Move lifecycle notifications from the computer player.
//!
//! A round brackets the whole turn with `before_move`/`after_move`, which a
//! presentation layer may use for a "thinking" indicator. `move_start` and
//! `move_end` bracket the window in which the computer mutates the session;
//! human input must be suspended in between.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Receives the four lifecycle signals. Called from the computer player's
/// task, never while the session lock is held.
pub trait MoveArbiter: Send + Sync {
    fn before_move(&self);
    fn move_start(&self);
    fn move_end(&self);
    fn after_move(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveEvent {
    BeforeMove,
    MoveStart,
    MoveEnd,
    AfterMove,
}

impl MoveEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveEvent::BeforeMove => "before_move",
            MoveEvent::MoveStart => "move_start",
            MoveEvent::MoveEnd => "move_end",
            MoveEvent::AfterMove => "after_move",
        }
    }
}

// Events beyond this are dropped if the consumer stops draining.
const EVENT_CHANNEL_BUFFER: usize = 64;

/// Forwards every signal as a [`MoveEvent`] over a bounded channel.
#[derive(Debug, Clone)]
pub struct ChannelArbiter {
    sender: mpsc::Sender<MoveEvent>,
}

impl ChannelArbiter {
    pub fn channel() -> (Self, mpsc::Receiver<MoveEvent>) {
        let (sender, receiver) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        (Self { sender }, receiver)
    }

    fn send(&self, event: MoveEvent) {
        // try_send so a slow consumer never stalls the computer player
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(event = event.as_str(), "event buffer full, dropped move event");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(event = event.as_str(), "no listener for move event");
            }
        }
    }
}

impl MoveArbiter for ChannelArbiter {
    fn before_move(&self) {
        self.send(MoveEvent::BeforeMove);
    }
    fn move_start(&self) {
        self.send(MoveEvent::MoveStart);
    }
    fn move_end(&self) {
        self.send(MoveEvent::MoveEnd);
    }
    fn after_move(&self) {
        self.send(MoveEvent::AfterMove);
    }
}

/// Ignores every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopArbiter;

impl MoveArbiter for NoopArbiter {
    fn before_move(&self) {}
    fn move_start(&self) {}
    fn move_end(&self) {}
    fn after_move(&self) {}
}
