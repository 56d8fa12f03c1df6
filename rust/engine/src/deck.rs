use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// Builds shuffled 81-card decks from a ChaCha20 stream.
///
/// A deck built from the same seed always yields the same sequence of
/// shuffles, which keeps replays and tests reproducible.
#[derive(Debug, Clone)]
pub struct Deck {
    seed: u64,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn new_random() -> Self {
        Self::new_with_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next uniformly permuted full deck. Head of the returned vector is dealt first.
    pub fn shuffled(&mut self) -> Vec<Card> {
        new_shuffled_deck(&mut self.rng)
    }
}

/// The 81-card universe in a uniformly random order (Fisher–Yates).
pub fn new_shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut cards = full_deck();
    cards.shuffle(rng);
    cards
}
