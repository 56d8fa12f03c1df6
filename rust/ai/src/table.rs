//! A game session shared between a human player and a computer player.
//!
//! Human moves are rejected while the computer is between `move_start` and
//! `move_end`. Starting a new game cancels the computer task before the
//! session is rebuilt.

use crate::computer::{ComputerHandle, ComputerPlayer};
use serde::{Deserialize, Serialize};
use setgame_engine::cards::Card;
use setgame_engine::game::{GameSession, SessionSnapshot};
use setgame_engine::player::PlayerId;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied,
    /// The computer player is in the middle of a move
    Blocked,
}

#[derive(Debug)]
pub(crate) struct TableState {
    pub(crate) session: GameSession,
    pub(crate) computer_moving: bool,
}

struct RunningComputer {
    computer: ComputerPlayer,
    runtime: Handle,
    handle: ComputerHandle,
}

pub(crate) struct TableInner {
    state: Mutex<TableState>,
    computer: Mutex<Option<RunningComputer>>,
}

/// Cheaply clonable handle to a shared session.
#[derive(Clone)]
pub struct Table {
    inner: Arc<TableInner>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("Table")
            .field("generation", &state.session.generation())
            .field("computer_moving", &state.computer_moving)
            .finish()
    }
}

/// Session snapshot plus the state of the move gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    #[serde(flatten)]
    pub session: SessionSnapshot,
    pub computer_moving: bool,
}

impl Table {
    pub fn new(session: GameSession) -> Self {
        Self {
            inner: Arc::new(TableInner {
                state: Mutex::new(TableState {
                    session,
                    computer_moving: false,
                }),
                computer: Mutex::new(None),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<TableInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, TableState> {
        self.inner.state.lock().expect("table state lock poisoned")
    }

    fn lock_computer(&self) -> MutexGuard<'_, Option<RunningComputer>> {
        self.inner
            .computer
            .lock()
            .expect("computer slot lock poisoned")
    }

    pub fn select_card(&self, player: PlayerId, index: usize) -> MoveOutcome {
        let mut state = self.lock_state();
        if state.computer_moving {
            tracing::trace!(index, "human select blocked by computer move");
            return MoveOutcome::Blocked;
        }
        state.session.select_card(index, player);
        MoveOutcome::Applied
    }

    pub fn deal_three_cards(&self, player: PlayerId) -> MoveOutcome {
        let mut state = self.lock_state();
        if state.computer_moving {
            tracing::trace!("human deal blocked by computer move");
            return MoveOutcome::Blocked;
        }
        state.session.deal_three_cards(player);
        MoveOutcome::Applied
    }

    pub fn is_computer_moving(&self) -> bool {
        self.lock_state().computer_moving
    }

    pub fn hint(&self) -> Option<[Card; 3]> {
        self.lock_state().session.hint()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        let state = self.lock_state();
        TableSnapshot {
            session: state.session.snapshot(),
            computer_moving: state.computer_moving,
        }
    }

    /// Read access to the session under the table lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&GameSession) -> R) -> R {
        f(&self.lock_state().session)
    }

    /// Starts `computer` on the current tokio runtime, replacing any
    /// computer already running.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, or if the computer's
    /// interval is zero.
    pub fn start_computer(&self, computer: ComputerPlayer) {
        let runtime = Handle::current();
        let mut slot = self.lock_computer();
        if let Some(previous) = slot.take() {
            previous.handle.cancel();
        }
        let handle = computer.spawn(&runtime, Arc::downgrade(&self.inner));
        tracing::info!(player = computer.player().index(), "computer player started");
        *slot = Some(RunningComputer {
            computer,
            runtime,
            handle,
        });
    }

    /// Cancels the computer task; pending delays never fire.
    pub fn stop_computer(&self) -> Option<ComputerPlayer> {
        let running = self.lock_computer().take()?;
        running.handle.cancel();
        self.lock_state().computer_moving = false;
        tracing::info!("computer player stopped");
        Some(running.computer)
    }

    pub fn is_computer_running(&self) -> bool {
        self.lock_computer()
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// Cancels the computer task, rebuilds the session, then restarts the
    /// computer on a fresh schedule.
    pub fn new_game(&self) {
        let mut slot = self.lock_computer();
        let previous = slot.take();
        if let Some(running) = &previous {
            running.handle.cancel();
        }
        {
            let mut state = self.lock_state();
            state.session.reset();
            state.computer_moving = false;
            tracing::info!(generation = state.session.generation(), "new game");
        }
        if let Some(RunningComputer {
            computer, runtime, ..
        }) = previous
        {
            let handle = computer.spawn(&runtime, Arc::downgrade(&self.inner));
            *slot = Some(RunningComputer {
                computer,
                runtime,
                handle,
            });
        }
    }
}
