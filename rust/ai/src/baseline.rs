//! Set-finding strategies.

use crate::AIOpponent;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use setgame_engine::cards::Card;
use setgame_engine::rules::{find_sets, one_possible_set};
use std::sync::Mutex;

/// Plays the first set found in slot order, the same one a hint shows.
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }
}

impl AIOpponent for BaselineAI {
    fn choose_set(&self, cards_in_play: &[Card]) -> Option<[Card; 3]> {
        one_possible_set(cards_in_play)
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}

/// Picks uniformly among every available set. Seeded for reproducible runs.
#[derive(Debug)]
pub struct RandomAI {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl AIOpponent for RandomAI {
    fn choose_set(&self, cards_in_play: &[Card]) -> Option<[Card; 3]> {
        let sets = find_sets(cards_in_play);
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sets.choose(&mut *rng).copied()
    }

    fn name(&self) -> &str {
        "RandomAI"
    }
}
