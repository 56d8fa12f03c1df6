#![allow(dead_code)]

use setgame_engine::cards::{full_deck, Card};
use setgame_engine::game::{GameSession, SessionConfig};
use setgame_engine::player::{Player, PlayerId};

/// Solo session dealt from the canonical (unshuffled) deck order.
/// Slots 0, 1 and 2 then hold `1111`, `1112`, `1113`, which form a set.
pub fn canonical_session(initial_deal_size: usize, play_area_max: usize) -> (GameSession, PlayerId) {
    let config = SessionConfig {
        initial_deal_size,
        play_area_max,
        seed: Some(1),
    };
    let session = GameSession::from_deck(config, vec![Player::human("tester")], full_deck())
        .expect("canonical fixture is valid");
    let id = session.player_ids()[0];
    (session, id)
}

/// Deck, play area and matched pile together are exactly the 81-card universe.
pub fn assert_partition(session: &GameSession) {
    let mut all: Vec<Card> = session.remaining_deck();
    all.extend_from_slice(session.cards_in_play());
    all.extend_from_slice(session.matched_cards());
    all.sort();
    assert_eq!(all, full_deck(), "deck/play/matched must partition the universe");
}

pub fn assert_selection_consistent(session: &GameSession) {
    let selected = session.selected_cards();
    assert!(selected.len() <= 3, "selection too large: {:?}", selected);
    for (i, card) in selected.iter().enumerate() {
        assert!(
            session.cards_in_play().contains(card),
            "selected {} is not in play",
            card
        );
        assert!(
            !selected[i + 1..].contains(card),
            "selected {} twice",
            card
        );
    }
}
