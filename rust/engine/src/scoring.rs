//! Score formula shared by every player.
//!
//! `score = matches*20 - mis_matches*2 - moves + time_bonus - deals_when_set_possible*5`
//!
//! The time bonus is a step function of the elapsed time scaled by the
//! number of matches. With zero matches every threshold is zero seconds, so
//! no bonus can ever apply.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MATCH_REWARD: i64 = 20;
pub const MISMATCH_PENALTY: i64 = 2;
pub const MOVE_COST: i64 = 1;
pub const WASTED_DEAL_PENALTY: i64 = 5;

/// (seconds per match, bonus per match), checked in order.
const TIME_BONUS_STEPS: [(u64, i64); 3] = [(5, 10), (10, 5), (20, 2)];

/// Counters a score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub moves: u32,
    pub matches: u32,
    pub mis_matches: u32,
    pub deals_when_set_possible: u32,
}

pub fn time_bonus(matches: u32, elapsed: Duration) -> i64 {
    let matches_i = i64::from(matches);
    for (secs_per_match, bonus_per_match) in TIME_BONUS_STEPS {
        let threshold = Duration::from_secs(secs_per_match * u64::from(matches));
        if elapsed < threshold {
            return bonus_per_match * matches_i;
        }
    }
    0
}

/// Score after `elapsed` time since the player's last reset. May be negative.
pub fn score(stats: &PlayerStats, elapsed: Duration) -> i64 {
    i64::from(stats.matches) * MATCH_REWARD
        - i64::from(stats.mis_matches) * MISMATCH_PENALTY
        - i64::from(stats.moves) * MOVE_COST
        + time_bonus(stats.matches, elapsed)
        - i64::from(stats.deals_when_set_possible) * WASTED_DEAL_PENALTY
}
