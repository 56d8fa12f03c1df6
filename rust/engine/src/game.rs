use crate::cards::{Card, DECK_SIZE};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::{Player, PlayerId, PlayerKind};
use crate::rules::{is_set, is_set_possible, one_possible_set};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Cards moved from the deck per regular deal.
pub const DEAL_SIZE: usize = 3;

/// Size limits of a session, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cards dealt face up by every reset
    pub initial_deal_size: usize,
    /// Capacity of the play area; a positive multiple of 3
    pub play_area_max: usize,
    /// Seed for the shuffles; random when absent
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_deal_size: 12,
            play_area_max: 24,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.play_area_max == 0 || self.play_area_max % DEAL_SIZE != 0 {
            return Err(GameError::PlayAreaNotMultipleOfThree {
                max: self.play_area_max,
            });
        }
        if self.play_area_max <= self.initial_deal_size {
            return Err(GameError::PlayAreaNotLargerThanInitialDeal {
                initial: self.initial_deal_size,
                max: self.play_area_max,
            });
        }
        if self.initial_deal_size > DECK_SIZE {
            return Err(GameError::InitialDealExceedsDeck {
                initial: self.initial_deal_size,
                deck: DECK_SIZE,
            });
        }
        Ok(())
    }
}

/// Mutable state of one game: deck, play area, selection and matched pile,
/// plus the counters of every registered player.
///
/// Deck, play area and matched cards always partition the 81-card universe.
/// Out-of-range or stale input is ignored; broken internal invariants panic.
///
/// # Examples
///
/// ```
/// use setgame_engine::game::{GameSession, SessionConfig};
/// use setgame_engine::player::Player;
///
/// let config = SessionConfig { seed: Some(7), ..SessionConfig::default() };
/// let mut session = GameSession::new(config, vec![Player::human("you")]).unwrap();
/// let you = session.player_ids()[0];
///
/// assert_eq!(session.cards_in_play().len(), 12);
/// session.deal_three_cards(you);
/// assert_eq!(session.cards_in_play().len(), 15);
/// assert_eq!(session.deck_len(), 81 - 15);
/// ```
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    shuffler: Deck,
    deck: VecDeque<Card>,
    cards_in_play: Vec<Card>,
    selected_cards: Vec<Card>,
    matched_cards: Vec<Card>,
    players: Vec<Player>,
    generation: u64,
}

impl GameSession {
    pub fn new(config: SessionConfig, players: Vec<Player>) -> Result<Self, GameError> {
        let mut session = Self::empty(config, players)?;
        session.reset();
        Ok(session)
    }

    /// Starts from a caller-ordered deck instead of a shuffle. The deck must
    /// be a permutation of the 81-card universe. Later resets shuffle as usual.
    pub fn from_deck(
        config: SessionConfig,
        players: Vec<Player>,
        deck: Vec<Card>,
    ) -> Result<Self, GameError> {
        let distinct: HashSet<Card> = deck.iter().copied().collect();
        if deck.len() != DECK_SIZE || distinct.len() != DECK_SIZE {
            return Err(GameError::InvalidDeck(format!(
                "expected {} distinct cards, got {} ({} distinct)",
                DECK_SIZE,
                deck.len(),
                distinct.len()
            )));
        }
        let mut session = Self::empty(config, players)?;
        session.start_with(deck);
        Ok(session)
    }

    fn empty(config: SessionConfig, players: Vec<Player>) -> Result<Self, GameError> {
        config.validate()?;
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let shuffler = match config.seed {
            Some(seed) => Deck::new_with_seed(seed),
            None => Deck::new_random(),
        };
        Ok(Self {
            config,
            shuffler,
            deck: VecDeque::with_capacity(DECK_SIZE),
            cards_in_play: Vec::with_capacity(config.play_area_max),
            selected_cards: Vec::with_capacity(DEAL_SIZE),
            matched_cards: Vec::with_capacity(DECK_SIZE),
            players,
            generation: 0,
        })
    }

    /// Hard reinitialization: fresh shuffle, empty piles, initial deal,
    /// every player's counters and clock reset.
    pub fn reset(&mut self) {
        let deck = self.shuffler.shuffled();
        self.start_with(deck);
    }

    fn start_with(&mut self, deck: Vec<Card>) {
        self.deck = deck.into();
        self.cards_in_play.clear();
        self.selected_cards.clear();
        self.matched_cards.clear();
        for _ in 0..self.config.initial_deal_size {
            let card = self.draw();
            self.cards_in_play.push(card);
        }
        for player in &mut self.players {
            player.reset();
        }
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(
            generation = self.generation,
            in_play = self.cards_in_play.len(),
            "session reset"
        );
    }

    /// Taps the card in slot `index` on behalf of `player`.
    ///
    /// Deselects a pending (fewer than three) selection, acknowledges a
    /// completed match by refilling its slots, or supersedes a mismatch.
    /// Taps on empty slots or matched cards are ignored.
    ///
    /// Acknowledging a match by tap credits it twice: once for the tap and
    /// once for collecting it. The new selection starts with the tapped card,
    /// or with its replacement when the tapped card was part of the match.
    ///
    /// # Panics
    ///
    /// Panics if `player` was not issued by this session.
    pub fn select_card(&mut self, index: usize, player: PlayerId) {
        let Some(&card) = self.cards_in_play.get(index) else {
            tracing::trace!(index, "select ignored: slot out of range");
            return;
        };
        if self.matched_cards.contains(&card) {
            tracing::trace!(index, %card, "select ignored: card already matched");
            return;
        }
        if self.selected_cards.len() < DEAL_SIZE {
            if let Some(pos) = self.selected_cards.iter().position(|c| *c == card) {
                self.selected_cards.remove(pos);
                return;
            }
        }

        self.players[player.0].record_move();

        let mut target = Some(card);
        if self.in_matched_state() {
            self.players[player.0].record_match();
            tracing::debug!(player = player.0, "match acknowledged by selection");
            // collecting the match credits it once more
            let refills = self.collect_match(player);
            if let Some(&(_, fresh)) = refills.iter().find(|(old, _)| *old == card) {
                // the tapped slot was part of the match: its replacement, if any
                target = fresh;
            }
        } else if self.selected_cards.len() == DEAL_SIZE {
            self.players[player.0].record_mismatch();
            tracing::debug!(player = player.0, "mismatch superseded");
        }

        if self.selected_cards.len() >= DEAL_SIZE {
            self.selected_cards.clear();
        }

        if let Some(card) = target {
            if !self.selected_cards.contains(&card) {
                self.selected_cards.push(card);
            }
        }
    }

    /// Refills a confirmed match, or deals up to three more cards.
    ///
    /// Dealing while a set is on the table counts as a wasted deal for
    /// `player`. Dealing from an exhausted deck or into a full play area
    /// moves nothing.
    ///
    /// # Panics
    ///
    /// Panics if `player` was not issued by this session.
    pub fn deal_three_cards(&mut self, player: PlayerId) {
        if self.in_matched_state() {
            self.collect_match(player);
        } else {
            if is_set_possible(&self.cards_in_play) {
                self.players[player.0].record_wasted_deal();
                tracing::debug!(player = player.0, "deal while a set is on the table");
            }
            let room = self.config.play_area_max - self.cards_in_play.len();
            let to_deal = DEAL_SIZE.min(room).min(self.deck.len());
            for _ in 0..to_deal {
                let card = self.draw();
                self.cards_in_play.push(card);
            }
            tracing::trace!(dealt = to_deal, remaining = self.deck.len(), "dealt cards");
        }
        assert!(
            self.cards_in_play.len() <= self.config.play_area_max,
            "deal_three_cards: {} cards in play exceeds the maximum of {}",
            self.cards_in_play.len(),
            self.config.play_area_max
        );
    }

    pub fn clear_selection(&mut self) {
        self.selected_cards.clear();
    }

    // Credits the selected match to `player` and moves it to the matched
    // pile. Each slot gets a fresh card, or is vacated when the deck is
    // exhausted. Returns every matched card with the card now in its slot.
    fn collect_match(&mut self, player: PlayerId) -> Vec<(Card, Option<Card>)> {
        self.players[player.0].record_match();
        tracing::debug!(player = player.0, "match collected");
        let matched = std::mem::take(&mut self.selected_cards);
        let mut refills = Vec::with_capacity(matched.len());
        for card in matched {
            let Some(pos) = self.position_in_play(&card) else {
                continue;
            };
            let fresh = self.deck.pop_front();
            match fresh {
                Some(fresh) => self.cards_in_play[pos] = fresh,
                None => {
                    self.cards_in_play.remove(pos);
                }
            }
            self.matched_cards.push(card);
            refills.push((card, fresh));
        }
        refills
    }

    fn draw(&mut self) -> Card {
        match self.deck.pop_front() {
            Some(card) => card,
            None => panic!("draw from an empty deck"),
        }
    }

    pub fn in_matched_state(&self) -> bool {
        self.selected_cards.len() == DEAL_SIZE && is_set(&self.selected_cards)
    }

    pub fn can_deal(&self) -> bool {
        !self.deck.is_empty()
            && (self.cards_in_play.len() < self.config.play_area_max || self.in_matched_state())
    }

    /// One set among the cards in play, if any. Does not touch the state.
    pub fn hint(&self) -> Option<[Card; 3]> {
        one_possible_set(&self.cards_in_play)
    }

    /// First slot holding `card`.
    pub fn position_in_play(&self, card: &Card) -> Option<usize> {
        self.cards_in_play.iter().position(|c| c == card)
    }

    pub fn cards_in_play(&self) -> &[Card] {
        &self.cards_in_play
    }
    pub fn selected_cards(&self) -> &[Card] {
        &self.selected_cards
    }
    pub fn matched_cards(&self) -> &[Card] {
        &self.matched_cards
    }
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Copy of the undealt cards, head first.
    pub fn remaining_deck(&self) -> Vec<Card> {
        self.deck.iter().copied().collect()
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Bumped by every reset; lets deferred work detect a superseded game.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.0]
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        (0..self.players.len()).map(PlayerId).collect()
    }

    pub fn first_player_of_kind(&self, kind: PlayerKind) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|p| p.kind() == kind)
            .map(PlayerId)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cards_in_play: self.cards_in_play.clone(),
            selected_cards: self.selected_cards.clone(),
            matched_cards: self.matched_cards.clone(),
            deck_remaining: self.deck.len(),
            in_matched_state: self.in_matched_state(),
            can_deal: self.can_deal(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name().to_string(),
                    kind: p.kind(),
                    moves: p.moves(),
                    matches: p.matches(),
                    mis_matches: p.mis_matches(),
                    deals_when_set_possible: p.deals_when_set_possible(),
                    score: p.score(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub name: String,
    pub kind: PlayerKind,
    pub moves: u32,
    pub matches: u32,
    pub mis_matches: u32,
    pub deals_when_set_possible: u32,
    pub score: i64,
}

/// Observable state of a session at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub cards_in_play: Vec<Card>,
    pub selected_cards: Vec<Card>,
    pub matched_cards: Vec<Card>,
    pub deck_remaining: usize,
    pub in_matched_state: bool,
    pub can_deal: bool,
    pub players: Vec<PlayerSnapshot>,
}
