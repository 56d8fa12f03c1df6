use crate::scoring::{self, PlayerStats};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Who drives a player's moves.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Computer,
}

/// Handle to a player registered with a [`crate::game::GameSession`].
/// Only meaningful for the session that issued it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub(crate) usize);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-actor counters and the clock the time bonus is measured against.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    kind: PlayerKind,
    stats: PlayerStats,
    started_at: Instant,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            stats: PlayerStats::default(),
            started_at: Instant::now(),
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Human)
    }

    pub fn computer(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Computer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }
    pub fn stats(&self) -> PlayerStats {
        self.stats
    }
    pub fn moves(&self) -> u32 {
        self.stats.moves
    }
    pub fn matches(&self) -> u32 {
        self.stats.matches
    }
    pub fn mis_matches(&self) -> u32 {
        self.stats.mis_matches
    }
    pub fn deals_when_set_possible(&self) -> u32 {
        self.stats.deals_when_set_possible
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn score(&self) -> i64 {
        self.score_after(self.elapsed())
    }

    pub fn score_after(&self, elapsed: Duration) -> i64 {
        scoring::score(&self.stats, elapsed)
    }

    pub fn reset(&mut self) {
        self.stats = PlayerStats::default();
        self.started_at = Instant::now();
    }

    pub(crate) fn record_move(&mut self) {
        self.stats.moves += 1;
    }
    pub(crate) fn record_match(&mut self) {
        self.stats.matches += 1;
    }
    pub(crate) fn record_mismatch(&mut self) {
        self.stats.mis_matches += 1;
    }
    pub(crate) fn record_wasted_deal(&mut self) {
        self.stats.deals_when_set_possible += 1;
    }
}
