use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three values an attribute can take.
/// Only equality matters; the ordinal exists for display and ordering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum CardState {
    Alpha = 1,
    Beta = 2,
    Gamma = 3,
}

impl CardState {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The state that is neither `self` nor `other`. Returns `self` when both are equal.
    pub fn complement(self, other: CardState) -> CardState {
        if self == other {
            return self;
        }
        match (self, other) {
            (CardState::Alpha, CardState::Beta) | (CardState::Beta, CardState::Alpha) => {
                CardState::Gamma
            }
            (CardState::Alpha, CardState::Gamma) | (CardState::Gamma, CardState::Alpha) => {
                CardState::Beta
            }
            _ => CardState::Alpha,
        }
    }

    /// True when the three states are all equal or pairwise distinct.
    pub fn all_same_or_all_different(a: CardState, b: CardState, c: CardState) -> bool {
        let all_same = a == b && b == c;
        let all_different = a != b && b != c && a != c;
        all_same || all_different
    }
}

pub fn all_states() -> [CardState; 3] {
    [CardState::Alpha, CardState::Beta, CardState::Gamma]
}

/// A card of the 81-card deck: four attributes, each in one of three states.
/// Cards have no identity beyond their attribute values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// How many symbols are drawn
    pub number: CardState,
    /// Which symbol is drawn
    pub symbol: CardState,
    /// Fill of the symbol
    pub shading: CardState,
    /// Colour of the symbol
    pub color: CardState,
}

impl Card {
    pub fn new(number: CardState, symbol: CardState, shading: CardState, color: CardState) -> Self {
        Self {
            number,
            symbol,
            shading,
            color,
        }
    }

    pub fn attributes(&self) -> [CardState; 4] {
        [self.number, self.symbol, self.shading, self.color]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.number.ordinal(),
            self.symbol.ordinal(),
            self.shading.ordinal(),
            self.color.ordinal()
        )
    }
}

/// Number of distinct cards (3^4).
pub const DECK_SIZE: usize = 81;

/// The full 81-card universe in canonical order.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for &number in &all_states() {
        for &symbol in &all_states() {
            for &shading in &all_states() {
                for &color in &all_states() {
                    v.push(Card::new(number, symbol, shading, color));
                }
            }
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn full_deck_has_81_distinct_cards() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn complement_returns_missing_state() {
        assert_eq!(CardState::Alpha.complement(CardState::Beta), CardState::Gamma);
        assert_eq!(CardState::Gamma.complement(CardState::Beta), CardState::Alpha);
        assert_eq!(CardState::Beta.complement(CardState::Beta), CardState::Beta);
    }

    #[test]
    fn display_uses_ordinals() {
        let c = Card::new(
            CardState::Alpha,
            CardState::Beta,
            CardState::Gamma,
            CardState::Alpha,
        );
        assert_eq!(c.to_string(), "1231");
    }
}
