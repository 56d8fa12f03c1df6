mod helpers;

use helpers::{EnvGuard, write_config};
use serial_test::serial;
use setgame_cli::Vs;
use setgame_cli::commands::handle_play_command;
use setgame_engine::game::{GameSession, SessionConfig};
use setgame_engine::player::Player;
use setgame_engine::rules::is_set;
use std::cell::RefCell;
use std::io::{self, BufRead, Cursor, Read, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

fn opening(seed: u64) -> GameSession {
    let config = SessionConfig {
        seed: Some(seed),
        ..SessionConfig::default()
    };
    GameSession::new(config, vec![Player::human("probe")]).unwrap()
}

fn play(vs: Vs, seed: u64, input: impl BufRead) -> (String, String) {
    let mut input = input;
    let mut out = Vec::new();
    let mut err = Vec::new();
    handle_play_command(vs, Some(seed), None, &mut out, &mut err, &mut input)
        .expect("play should succeed");
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn lines(input: &str) -> Cursor<Vec<u8>> {
    Cursor::new(input.as_bytes().to_vec())
}

/// First seed whose opening layout holds a set, with its 1-based slots.
fn seed_with_set() -> (u64, [usize; 3]) {
    (0..)
        .find_map(|seed| {
            let session = opening(seed);
            let set = session.hint()?;
            let slot = |i: usize| session.position_in_play(&set[i]).map(|p| p + 1);
            Some((seed, [slot(0)?, slot(1)?, slot(2)?]))
        })
        .unwrap()
}

/// First triple of slots that is not a set, 1-based.
fn non_set_slots(seed: u64) -> [usize; 3] {
    let session = opening(seed);
    let cards = session.cards_in_play();
    for i in 0..cards.len() {
        for j in i + 1..cards.len() {
            for k in j + 1..cards.len() {
                if !is_set(&[cards[i], cards[j], cards[k]]) {
                    return [i + 1, j + 1, k + 1];
                }
            }
        }
    }
    unreachable!("twelve cards always contain a non-set");
}

#[test]
#[serial]
fn selecting_a_set_and_dealing_scores_a_match() {
    let _env = EnvGuard::clean();
    let (seed, [a, b, c]) = seed_with_set();

    let (out, err) = play(Vs::Solo, seed, lines(&format!("{a} {b} {c}\nd\nq\n")));

    assert!(err.is_empty(), "stderr={err}");
    assert!(out.contains("Set! Select a card or deal to collect it."));
    assert!(out.contains("Deck: 66  In play: 12  Matched: 3"));
    assert!(out.contains("You: score="));
    assert!(out.contains("matches=1 mismatches=0 moves=3"));
}

#[test]
#[serial]
fn tapping_after_a_mismatch_counts_it() {
    let _env = EnvGuard::clean();
    let seed = 4;
    let [a, b, c] = non_set_slots(seed);
    let other = (1..=12).find(|s| ![a, b, c].contains(s)).unwrap();

    let (out, _) = play(
        Vs::Solo,
        seed,
        lines(&format!("{a}\n{b}\n{c}\n{other}\nq\n")),
    );

    assert!(out.contains("matches=0 mismatches=1 moves=4"), "{out}");
}

#[test]
#[serial]
fn tapping_a_selected_card_deselects_it() {
    let _env = EnvGuard::clean();
    let (out, _) = play(Vs::Solo, 3, lines("5\n5\nq\n"));
    assert!(out.contains(" 5* ["));
    assert!(out.contains("matches=0 mismatches=0 moves=1"), "{out}");
}

#[test]
#[serial]
fn hint_points_at_the_engine_set() {
    let _env = EnvGuard::clean();
    let (seed, [a, b, c]) = seed_with_set();
    let (out, _) = play(Vs::Solo, seed, lines("h\nq\n"));
    assert!(out.contains(&format!("Hint: slots {a}, {b}, {c}")), "{out}");
}

#[test]
#[serial]
fn end_of_input_ends_the_session() {
    let _env = EnvGuard::clean();
    let (out, _) = play(Vs::Computer, 9, lines("s\n"));
    assert!(out.starts_with("play: vs=computer seed=9 ai=BaselineAI\n"));
    assert!(out.contains("Final scores:\nYou: 0\nBaselineAI: 0"));
}

// Output buffer the scripted input below can watch.
#[derive(Clone, Default)]
struct SharedOut(Rc<RefCell<Vec<u8>>>);

impl SharedOut {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedOut {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Keeps asking to redraw the table until `marker` shows up in the output
// (or the deadline passes), then quits.
struct ShowUntil {
    out: SharedOut,
    marker: &'static str,
    deadline: Instant,
    line: Cursor<Vec<u8>>,
    quit_sent: bool,
}

impl ShowUntil {
    fn new(out: SharedOut, marker: &'static str, timeout: Duration) -> Self {
        Self {
            out,
            marker,
            deadline: Instant::now() + timeout,
            line: Cursor::new(Vec::new()),
            quit_sent: false,
        }
    }
}

impl Read for ShowUntil {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = {
            let available = self.fill_buf()?;
            let n = available.len().min(buf.len());
            buf[..n].copy_from_slice(&available[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for ShowUntil {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        let drained = self.line.position() as usize >= self.line.get_ref().len();
        if drained && !self.quit_sent {
            let next: &[u8] =
                if self.out.text().contains(self.marker) || Instant::now() >= self.deadline {
                    self.quit_sent = true;
                    b"q\n"
                } else {
                    std::thread::sleep(Duration::from_millis(20));
                    b"s\n"
                };
            self.line = Cursor::new(next.to_vec());
        }
        self.line.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.line.consume(amt);
    }
}

#[test]
#[serial]
fn computer_moves_are_reported_between_prompts() {
    let (_dir, path) = write_config(
        "computer_interval_secs = 1\ncomputer_think_secs = 0\ncomputer_reveal_secs = 0\n",
    );
    let path = path.to_string_lossy().into_owned();
    let _env = EnvGuard::apply(&[("SETGAME_CONFIG", path.as_str())]);
    let (seed, _) = seed_with_set();

    let out = SharedOut::default();
    let mut writer = out.clone();
    let mut input = ShowUntil::new(
        out.clone(),
        "Computer collected its set.",
        Duration::from_secs(30),
    );
    let mut err = Vec::new();
    handle_play_command(Vs::Computer, Some(seed), None, &mut writer, &mut err, &mut input)
        .expect("play should succeed");
    let out = out.text();

    assert!(out.contains("Computer is looking for a set..."), "{out}");
    assert!(out.contains("Computer collected its set."), "{out}");
    let final_scores = out.split("Final scores:\n").nth(1).expect("final scores");
    let computer_score = final_scores
        .lines()
        .find_map(|l| l.strip_prefix("BaselineAI: "))
        .and_then(|s| s.parse::<i64>().ok())
        .expect("final computer score");
    assert!(computer_score > 0, "{out}");
}
