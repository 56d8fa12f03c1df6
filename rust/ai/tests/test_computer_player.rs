use std::sync::Arc;
use std::time::Duration;

use setgame_ai::baseline::BaselineAI;
use setgame_ai::computer::{ComputerPlayer, RoundOutcome};
use setgame_ai::{ChannelArbiter, ComputerTiming, MoveEvent, MoveOutcome, Table};
use setgame_engine::cards::{full_deck, Card};
use setgame_engine::game::{GameSession, SessionConfig};
use setgame_engine::player::{Player, PlayerId, PlayerKind};
use tokio::sync::mpsc::Receiver;

struct Fixture {
    table: Table,
    human: PlayerId,
    computer: ComputerPlayer,
    events: Receiver<MoveEvent>,
}

fn fixture(config: SessionConfig, deck: Vec<Card>) -> Fixture {
    let session = GameSession::from_deck(
        config,
        vec![Player::human("you"), Player::computer("cpu")],
        deck,
    )
    .expect("valid fixture");
    let human = session.first_player_of_kind(PlayerKind::Human).unwrap();
    let cpu = session.first_player_of_kind(PlayerKind::Computer).unwrap();
    let (arbiter, events) = ChannelArbiter::channel();
    let computer = ComputerPlayer::new(
        cpu,
        Arc::new(BaselineAI::new()),
        ComputerTiming::default(),
        Arc::new(arbiter),
    );
    Fixture {
        table: Table::new(session),
        human,
        computer,
        events,
    }
}

/// Canonical order: slots 0, 1, 2 form a set.
fn canonical() -> Fixture {
    fixture(
        SessionConfig {
            seed: Some(4),
            ..SessionConfig::default()
        },
        full_deck(),
    )
}

/// First four cards share number and symbol and use only two shadings: no set.
fn set_free() -> Fixture {
    let mut deck = full_deck();
    // canonical indexes of 1111, 1112, 1121, 1122
    let front = [0usize, 1, 3, 4];
    let mut ordered: Vec<Card> = front.iter().map(|&i| deck[i]).collect();
    deck.retain(|c| !ordered.contains(c));
    ordered.extend(deck);
    fixture(
        SessionConfig {
            initial_deal_size: 4,
            play_area_max: 6,
            seed: Some(4),
        },
        ordered,
    )
}

fn drain(events: &mut Receiver<MoveEvent>) -> Vec<MoveEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    seen
}

#[tokio::test(start_paused = true)]
async fn round_selects_and_acknowledges_a_set() {
    let mut f = canonical();
    let outcome = f.computer.play_round(&f.table).await;
    assert_eq!(outcome, RoundOutcome::Played);

    let cpu = f.computer.player();
    f.table.with_session(|s| {
        assert_eq!(s.player(cpu).matches(), 1);
        assert_eq!(s.player(cpu).moves(), 3);
        assert_eq!(s.matched_cards(), &full_deck()[..3]);
        assert!(s.selected_cards().is_empty());
        assert_eq!(s.cards_in_play().len(), 12);
    });
    assert!(!f.table.is_computer_moving());
    assert_eq!(
        drain(&mut f.events),
        vec![
            MoveEvent::BeforeMove,
            MoveEvent::MoveStart,
            MoveEvent::MoveEnd,
            MoveEvent::AfterMove
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn round_without_a_set_only_brackets() {
    let mut f = set_free();
    assert!(f.table.hint().is_none());

    let outcome = f.computer.play_round(&f.table).await;

    assert_eq!(outcome, RoundOutcome::Passed);
    assert_eq!(
        drain(&mut f.events),
        vec![MoveEvent::BeforeMove, MoveEvent::AfterMove]
    );
    let cpu = f.computer.player();
    assert_eq!(f.table.with_session(|s| s.player(cpu).moves()), 0);
}

#[tokio::test(start_paused = true)]
async fn round_leaves_a_pending_match_alone() {
    let f = canonical();
    for i in 0..3 {
        assert_eq!(f.table.select_card(f.human, i), MoveOutcome::Applied);
    }
    assert!(f.table.with_session(|s| s.in_matched_state()));

    let outcome = f.computer.play_round(&f.table).await;

    assert_eq!(outcome, RoundOutcome::Passed);
    assert!(f.table.with_session(|s| s.in_matched_state()));
    assert_eq!(f.table.with_session(|s| s.selected_cards().len()), 3);
}

#[tokio::test(start_paused = true)]
async fn human_input_is_blocked_during_the_move() {
    let f = canonical();
    let table = f.table.clone();
    let computer = f.computer.clone();
    let round = tokio::spawn(async move { computer.play_round(&table).await });

    // think ends at 5 s, reveal ends at 7 s
    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(f.table.is_computer_moving());
    assert_eq!(f.table.select_card(f.human, 5), MoveOutcome::Blocked);
    assert_eq!(f.table.deal_three_cards(f.human), MoveOutcome::Blocked);
    assert_eq!(f.table.with_session(|s| s.selected_cards().len()), 3);

    assert_eq!(round.await.unwrap(), RoundOutcome::Played);
    assert!(!f.table.is_computer_moving());
    assert_eq!(f.table.select_card(f.human, 5), MoveOutcome::Applied);
    assert_eq!(f.table.with_session(|s| s.player(f.human).moves()), 1);
}

#[tokio::test(start_paused = true)]
async fn human_selection_is_cleared_before_the_computer_selects() {
    let f = canonical();
    f.table.select_card(f.human, 9);
    f.computer.play_round(&f.table).await;
    f.table.with_session(|s| {
        assert!(s.selected_cards().is_empty());
        assert_eq!(s.player(f.human).moves(), 1);
        assert_eq!(s.player(f.human).matches(), 0);
    });
}

#[tokio::test(start_paused = true)]
async fn scheduled_computer_waits_for_its_interval() {
    let mut f = canonical();
    f.table.start_computer(f.computer.clone());
    assert!(f.table.is_computer_running());

    tokio::time::sleep(Duration::from_secs(14)).await;
    assert!(drain(&mut f.events).is_empty());

    // round starts at 15 s, selects at 20 s, deals at 22 s
    tokio::time::sleep(Duration::from_secs(9)).await;
    assert_eq!(
        drain(&mut f.events),
        vec![
            MoveEvent::BeforeMove,
            MoveEvent::MoveStart,
            MoveEvent::MoveEnd,
            MoveEvent::AfterMove
        ]
    );
    let cpu = f.computer.player();
    assert_eq!(f.table.with_session(|s| s.player(cpu).matches()), 1);
}

#[tokio::test(start_paused = true)]
async fn new_game_cancels_the_round_in_flight() {
    let mut f = canonical();
    f.table.start_computer(f.computer.clone());
    let generation = f.table.with_session(|s| s.generation());

    // mid-think of the first round
    tokio::time::sleep(Duration::from_secs(17)).await;
    assert_eq!(drain(&mut f.events), vec![MoveEvent::BeforeMove]);

    f.table.new_game();
    assert_eq!(f.table.with_session(|s| s.generation()), generation + 1);

    // the cancelled round would have selected at 20 s and dealt at 22 s;
    // only its bracket is closed
    tokio::time::sleep(Duration::from_secs(8)).await;
    assert_eq!(drain(&mut f.events), vec![MoveEvent::AfterMove]);
    let cpu = f.computer.player();
    f.table.with_session(|s| {
        assert_eq!(s.player(cpu).moves(), 0);
        assert!(s.matched_cards().is_empty());
        assert!(s.selected_cards().is_empty());
    });
    assert!(!f.table.is_computer_moving());

    // restarted schedule: next round begins 15 s after the new game
    tokio::time::sleep(Duration::from_secs(8)).await;
    assert_eq!(drain(&mut f.events).first(), Some(&MoveEvent::BeforeMove));
}

#[tokio::test(start_paused = true)]
async fn new_game_during_the_reveal_closes_the_move() {
    let mut f = canonical();
    f.table.start_computer(f.computer.clone());

    // selected at 20 s, would deal at 22 s
    tokio::time::sleep(Duration::from_secs(21)).await;
    assert_eq!(
        drain(&mut f.events),
        vec![MoveEvent::BeforeMove, MoveEvent::MoveStart]
    );
    assert!(f.table.is_computer_moving());

    f.table.new_game();
    assert!(!f.table.is_computer_moving());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(
        drain(&mut f.events),
        vec![MoveEvent::MoveEnd, MoveEvent::AfterMove]
    );
    let cpu = f.computer.player();
    f.table.with_session(|s| {
        assert_eq!(s.player(cpu).matches(), 0);
        assert!(s.matched_cards().is_empty());
        assert!(s.selected_cards().is_empty());
    });
    assert_eq!(f.table.select_card(f.human, 0), MoveOutcome::Applied);
}

#[tokio::test(start_paused = true)]
async fn stopped_computer_never_moves() {
    let mut f = canonical();
    f.table.start_computer(f.computer.clone());
    tokio::time::sleep(Duration::from_secs(16)).await;
    assert!(f.table.stop_computer().is_some());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(
        drain(&mut f.events),
        vec![MoveEvent::BeforeMove, MoveEvent::AfterMove]
    );
    assert!(!f.table.is_computer_running());
    let cpu = f.computer.player();
    assert_eq!(f.table.with_session(|s| s.player(cpu).moves()), 0);
}

#[tokio::test(start_paused = true)]
async fn superseded_round_does_not_touch_the_new_game() {
    let mut f = canonical();
    let table = f.table.clone();
    let computer = f.computer.clone();
    let round = tokio::spawn(async move { computer.play_round(&table).await });

    tokio::time::sleep(Duration::from_secs(1)).await;
    // reset behind the round's back, without cancelling it
    f.table.new_game();

    assert_eq!(round.await.unwrap(), RoundOutcome::Superseded);
    let cpu = f.computer.player();
    assert_eq!(f.table.with_session(|s| s.player(cpu).moves()), 0);
    assert_eq!(
        drain(&mut f.events),
        vec![MoveEvent::BeforeMove, MoveEvent::AfterMove]
    );
}
