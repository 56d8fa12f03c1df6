//! The computer player: a background task that looks for a set on a fixed
//! schedule and plays it through the session's normal selection rules.

use crate::AIOpponent;
use crate::arbiter::MoveArbiter;
use crate::table::{Table, TableInner};
use setgame_engine::player::PlayerId;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Delays of one computer round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTiming {
    /// Time between round starts
    pub interval: Duration,
    /// Delay between `before_move` and searching for a set
    pub think: Duration,
    /// Delay between selecting the set and dealing replacements
    pub reveal: Duration,
}

impl Default for ComputerTiming {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
            think: Duration::from_secs(5),
            reveal: Duration::from_secs(2),
        }
    }
}

/// How a single round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// A set was selected and acknowledged
    Played,
    /// No set on the table, or a match was already pending
    Passed,
    /// A new game started while the round was in flight
    Superseded,
}

enum Pick {
    Stale,
    Nothing,
    Selected,
}

// Arbiter notifications of one round. Dropping it closes whatever is still
// open, so a round aborted mid-move still reports `move_end` and `after_move`.
struct MoveBracket<'a> {
    arbiter: &'a dyn MoveArbiter,
    moving: bool,
}

impl<'a> MoveBracket<'a> {
    fn open(arbiter: &'a dyn MoveArbiter) -> Self {
        arbiter.before_move();
        Self {
            arbiter,
            moving: false,
        }
    }

    fn start(&mut self) {
        self.arbiter.move_start();
        self.moving = true;
    }

    fn end(&mut self) {
        if std::mem::take(&mut self.moving) {
            self.arbiter.move_end();
        }
    }
}

impl Drop for MoveBracket<'_> {
    fn drop(&mut self) {
        self.end();
        self.arbiter.after_move();
    }
}

/// A computer-controlled seat: which player it moves for, how it picks sets,
/// its timing, and who is told about its moves.
#[derive(Clone)]
pub struct ComputerPlayer {
    player: PlayerId,
    ai: Arc<dyn AIOpponent>,
    timing: ComputerTiming,
    arbiter: Arc<dyn MoveArbiter>,
}

impl std::fmt::Debug for ComputerPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputerPlayer")
            .field("player", &self.player)
            .field("ai", &self.ai.name())
            .field("timing", &self.timing)
            .finish()
    }
}

impl ComputerPlayer {
    pub fn new(
        player: PlayerId,
        ai: Arc<dyn AIOpponent>,
        timing: ComputerTiming,
        arbiter: Arc<dyn MoveArbiter>,
    ) -> Self {
        Self {
            player,
            ai,
            timing,
            arbiter,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn timing(&self) -> ComputerTiming {
        self.timing
    }

    /// Plays one round against `table`: announce, think, select a set if one
    /// is visible, wait, deal, announce.
    ///
    /// Every step re-checks the session generation captured at the start, so
    /// nothing is applied to a game that was reset in the meantime. If the
    /// round is dropped part way (its task aborted), the arbiter still gets
    /// the closing `move_end` and `after_move`.
    pub async fn play_round(&self, table: &Table) -> RoundOutcome {
        let generation = table.lock_state().session.generation();
        tracing::debug!(generation, ai = self.ai.name(), "computer about to move");
        let mut bracket = MoveBracket::open(self.arbiter.as_ref());

        time::sleep(self.timing.think).await;

        let picked = {
            let mut state = table.lock_state();
            if state.session.generation() != generation {
                Pick::Stale
            } else if state.session.in_matched_state() {
                Pick::Nothing
            } else {
                match self.ai.choose_set(state.session.cards_in_play()) {
                    Some(set) => {
                        state.computer_moving = true;
                        let session = &mut state.session;
                        session.clear_selection();
                        for card in set {
                            if let Some(index) = session.position_in_play(&card) {
                                session.select_card(index, self.player);
                            }
                        }
                        Pick::Selected
                    }
                    None => Pick::Nothing,
                }
            }
        };

        let outcome = match picked {
            Pick::Stale => RoundOutcome::Superseded,
            Pick::Nothing => RoundOutcome::Passed,
            Pick::Selected => {
                bracket.start();
                time::sleep(self.timing.reveal).await;
                let finished = {
                    let mut state = table.lock_state();
                    if state.session.generation() == generation {
                        if state.session.can_deal() {
                            state.session.deal_three_cards(self.player);
                        }
                        state.computer_moving = false;
                        true
                    } else {
                        false
                    }
                };
                bracket.end();
                if finished {
                    RoundOutcome::Played
                } else {
                    RoundOutcome::Superseded
                }
            }
        };

        drop(bracket);
        tracing::debug!(generation, outcome = ?outcome, "computer round finished");
        outcome
    }

    // The task only holds a weak reference, so dropping every `Table` ends it.
    pub(crate) fn spawn(&self, runtime: &Handle, table: Weak<TableInner>) -> ComputerHandle {
        let computer = self.clone();
        let interval = computer.timing.interval;
        let task = runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(inner) = table.upgrade() else {
                    tracing::debug!("table dropped, computer player exiting");
                    break;
                };
                computer.play_round(&Table::from_inner(inner)).await;
            }
        });
        ComputerHandle { task }
    }
}

/// Running computer task. Cancelling (or dropping) aborts it at its next
/// suspension point; queued delays never fire afterwards.
#[derive(Debug)]
pub struct ComputerHandle {
    task: JoinHandle<()>,
}

impl ComputerHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ComputerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
