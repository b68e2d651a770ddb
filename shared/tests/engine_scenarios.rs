use shared::engine::{Engine, Event, Request, Scheduler, Status};
use shared::fsm::SessionPhase;
use shared::input::KeyInput;
use shared::session::Judgment;
use shared::words::{SupplierError, WordSupplier};
use shared::wpm::Outcome;
use std::cell::Cell;
use std::rc::Rc;

/// Counts countdowns that are still alive so leaks show up in assertions.
#[derive(Clone, Default)]
struct ManualScheduler {
    live: Rc<Cell<usize>>,
    started: Rc<Cell<usize>>,
}

struct CountdownGuard(Rc<Cell<usize>>);

impl Drop for CountdownGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = CountdownGuard;

    fn start_countdown(&mut self) -> CountdownGuard {
        self.live.set(self.live.get() + 1);
        self.started.set(self.started.get() + 1);
        CountdownGuard(self.live.clone())
    }
}

struct FixedWords(Vec<Vec<&'static str>>);

impl WordSupplier for FixedWords {
    fn fetch_words(&mut self) -> Result<Vec<String>, SupplierError> {
        if self.0.is_empty() {
            return Err(SupplierError::Unavailable("connection refused".into()));
        }
        Ok(self.0.remove(0).into_iter().map(String::from).collect())
    }
}

fn engine_with(words: &[&'static str]) -> (Engine<ManualScheduler>, ManualScheduler) {
    let scheduler = ManualScheduler::default();
    let mut engine = Engine::new(scheduler.clone());
    engine.restart_from(&mut FixedWords(vec![words.to_vec()]));
    assert_eq!(engine.status(), &Status::Ready);
    (engine, scheduler)
}

fn type_keys(engine: &mut Engine<ManualScheduler>, text: &str) {
    for c in text.chars() {
        assert_eq!(engine.handle_event(Event::Key(KeyInput::Char(c))), None);
    }
}

fn counters(engine: &Engine<ManualScheduler>) -> (usize, usize) {
    let session = engine.session().expect("session loaded");
    (session.total_typed(), session.errors())
}

#[test]
fn countdown_starts_on_first_keystroke() {
    let (mut engine, scheduler) = engine_with(&["cat", "dog"]);
    assert_eq!(scheduler.live.get(), 0);
    assert_eq!(engine.phase(), SessionPhase::Idle);

    type_keys(&mut engine, "c");
    assert_eq!(engine.phase(), SessionPhase::Running);
    assert_eq!(scheduler.live.get(), 1);

    type_keys(&mut engine, "at");
    assert_eq!(scheduler.started.get(), 1);
}

#[test]
fn typing_everything_finishes_before_the_timer() {
    let (mut engine, scheduler) = engine_with(&["cat", "dog"]);
    type_keys(&mut engine, "cat do");
    for _ in 0..10 {
        engine.handle_event(Event::Tick);
    }
    type_keys(&mut engine, "g ");

    assert_eq!(engine.phase(), SessionPhase::Finished);
    assert_eq!(engine.remaining(), 20);
    assert_eq!(engine.outcome(), Some(Outcome { wpm: 3, accuracy: 100 }));
    assert_eq!(scheduler.live.get(), 0);
    assert!(!engine.is_counting_down());
}

#[test]
fn one_mismatch_costs_accuracy() {
    let (mut engine, _) = engine_with(&["cat", "dog"]);
    type_keys(&mut engine, "cxt dog ");
    assert_eq!(counters(&engine), (8, 1));
    assert_eq!(engine.outcome().map(|o| o.accuracy), Some(88));
}

#[test]
fn timer_expiry_finishes_via_tick() {
    let (mut engine, scheduler) = engine_with(&["cat", "dog"]);
    type_keys(&mut engine, "cat ");
    for _ in 0..29 {
        engine.handle_event(Event::Tick);
    }
    assert_eq!(engine.phase(), SessionPhase::Running);
    engine.handle_event(Event::Tick);

    assert_eq!(engine.phase(), SessionPhase::Finished);
    assert_eq!(engine.cursor(), 4);
    assert_eq!(counters(&engine), (4, 0));
    assert_eq!(engine.outcome(), Some(Outcome { wpm: 2, accuracy: 100 }));
    assert_eq!(scheduler.live.get(), 0);

    type_keys(&mut engine, "d");
    assert_eq!(counters(&engine), (4, 0));
}

#[test]
fn backspace_round_trip_keeps_history() {
    let (mut engine, _) = engine_with(&["cat"]);
    type_keys(&mut engine, "cq");
    let after_keystroke = counters(&engine);

    engine.handle_event(Event::Key(KeyInput::Backspace));
    assert_eq!(engine.cursor(), 1);
    assert_eq!(engine.slots()[1].judgment, Judgment::Pending);
    assert_eq!(counters(&engine), after_keystroke);
}

#[test]
fn errors_never_exceed_keystrokes() {
    let (mut engine, _) = engine_with(&["logic", "focus", "pixel"]);
    let script = "lgo\u{8}\u{8}ogic fx\u{8}\u{8}\u{8}\u{8}ocus pixle\u{8}\u{8}el ";
    for c in script.chars() {
        let key = if c == '\u{8}' { KeyInput::Backspace } else { KeyInput::Char(c) };
        engine.handle_event(Event::Key(key));
        let (typed, errors) = counters(&engine);
        assert!(errors <= typed);
        let judged = engine
            .slots()
            .iter()
            .filter(|s| s.judgment != Judgment::Pending)
            .count();
        assert_eq!(engine.cursor(), judged);
    }
}

#[test]
fn ignored_keys_do_not_start_the_session() {
    let (mut engine, scheduler) = engine_with(&["cat"]);
    for key in ["Shift", "Alt", "ArrowLeft", "Enter"] {
        engine.handle_event(Event::Key(KeyInput::from_key(key)));
    }
    engine.handle_event(Event::Key(KeyInput::Backspace));
    assert_eq!(engine.phase(), SessionPhase::Idle);
    assert_eq!(counters(&engine), (0, 0));
    assert_eq!(scheduler.live.get(), 0);
}

#[test]
fn change_duration_mid_run_cancels_and_resets() {
    let (mut engine, scheduler) = engine_with(&["cat", "dog"]);
    type_keys(&mut engine, "ca");
    engine.handle_event(Event::Tick);
    assert_eq!(scheduler.live.get(), 1);

    let request = engine.handle_event(Event::SelectDuration(60));
    assert_eq!(request, Some(Request::FetchWords { generation: 2 }));
    assert_eq!(scheduler.live.get(), 0);
    assert_eq!(engine.status(), &Status::Loading);

    // A tick already queued by the old countdown must not leak into the new session.
    engine.handle_event(Event::Tick);
    engine.handle_event(Event::WordsLoaded {
        generation: 2,
        result: Ok(vec!["pixel".into()]),
    });
    engine.handle_event(Event::Tick);

    assert_eq!(engine.duration(), 60);
    assert_eq!(engine.remaining(), 60);
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.phase(), SessionPhase::Idle);
    assert_eq!(counters(&engine), (0, 0));
    assert_eq!(engine.slots().len(), 6);
    assert_eq!(scheduler.live.get(), 0);

    type_keys(&mut engine, "p");
    assert_eq!(scheduler.live.get(), 1);
}

#[test]
fn escape_restarts_from_any_phase() {
    let (mut engine, scheduler) = engine_with(&["cat"]);
    type_keys(&mut engine, "cat ");
    assert_eq!(engine.phase(), SessionPhase::Finished);

    let request = engine.handle_event(Event::Key(KeyInput::Escape));
    assert_eq!(request, Some(Request::FetchWords { generation: 2 }));
    assert_eq!(engine.phase(), SessionPhase::Idle);
    assert_eq!(engine.outcome(), None);

    engine.handle_event(Event::WordsLoaded {
        generation: 2,
        result: Ok(vec!["dog".into()]),
    });
    type_keys(&mut engine, "d");
    assert_eq!(scheduler.live.get(), 1);
    assert!(engine.handle_event(Event::Key(KeyInput::Escape)).is_some());
    assert_eq!(scheduler.live.get(), 0);
}

#[test]
fn stale_word_lists_are_dropped() {
    let (mut engine, _) = engine_with(&["cat"]);
    let Request::FetchWords { generation: first } = engine.restart();
    let Request::FetchWords { generation: second } = engine.restart();
    assert!(second > first);

    engine.handle_event(Event::WordsLoaded {
        generation: second,
        result: Ok(vec!["new".into()]),
    });
    engine.handle_event(Event::WordsLoaded {
        generation: first,
        result: Ok(vec!["old".into()]),
    });

    let text: String = engine.slots().iter().map(|s| s.expected).collect();
    assert_eq!(text, "new ");
}

#[test]
fn supplier_failure_stays_idle_and_can_retry() {
    let mut engine = Engine::new(ManualScheduler::default());
    let status = engine.restart_from(&mut FixedWords(vec![])).clone();
    assert!(matches!(status, Status::Unavailable(SupplierError::Unavailable(_))));
    assert_eq!(engine.phase(), SessionPhase::Idle);
    assert!(engine.slots().is_empty());

    // Keystrokes have nothing to act on.
    assert_eq!(engine.handle_event(Event::Key(KeyInput::Char('c'))), None);
    assert!(!engine.is_counting_down());

    let Request::FetchWords { generation } = engine.restart();
    engine.handle_event(Event::WordsLoaded {
        generation,
        result: Err(SupplierError::Empty),
    });
    assert_eq!(engine.status(), &Status::Unavailable(SupplierError::Empty));

    engine.restart_from(&mut FixedWords(vec![vec!["cat"]]));
    assert_eq!(engine.status(), &Status::Ready);
    assert_eq!(engine.slots().len(), 4);
}

#[test]
fn empty_word_list_is_unavailable() {
    let mut engine = Engine::new(ManualScheduler::default());
    engine.restart_from(&mut FixedWords(vec![vec![]]));
    assert_eq!(engine.status(), &Status::Unavailable(SupplierError::Empty));
}

#[test]
fn malformed_words_are_unavailable() {
    let mut engine = Engine::new(ManualScheduler::default());
    engine.restart_from(&mut FixedWords(vec![vec!["ca t", "Dog"]]));
    assert!(matches!(engine.status(), Status::Unavailable(SupplierError::Unavailable(_))));
    assert!(engine.slots().is_empty());
    assert_eq!(engine.phase(), SessionPhase::Idle);
}

#[test]
fn zero_duration_is_rejected() {
    let (mut engine, _) = engine_with(&["cat"]);
    assert_eq!(engine.handle_event(Event::SelectDuration(0)), None);
    assert_eq!(engine.duration(), 30);
    assert_eq!(engine.status(), &Status::Ready);
}

#[test]
fn snapshot_mirrors_engine() {
    let (mut engine, _) = engine_with(&["cat"]);
    type_keys(&mut engine, "cx");
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.cursor, 2);
    assert_eq!(snapshot.slots[0].judgment, Judgment::Correct);
    assert_eq!(snapshot.slots[1].judgment, Judgment::Incorrect);
    assert_eq!(snapshot.remaining, 30);
    assert_eq!(snapshot.phase, SessionPhase::Running);
    assert_eq!(snapshot.status, Status::Ready);
    assert_eq!(snapshot.outcome, None);
}
