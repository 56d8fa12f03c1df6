use thiserror::Error;

/// Rejected session construction parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Play area size {max} must be a positive multiple of 3")]
    PlayAreaNotMultipleOfThree { max: usize },
    #[error("Play area size {max} must be larger than the initial deal of {initial}")]
    PlayAreaNotLargerThanInitialDeal { initial: usize, max: usize },
    #[error("Initial deal of {initial} exceeds the {deck}-card deck")]
    InitialDealExceedsDeck { initial: usize, deck: usize },
    #[error("A session needs at least one player")]
    NoPlayers,
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),
}
