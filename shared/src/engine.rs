//! Event-driven wrapper around [`Session`] that owns the countdown and the
//! word-fetch lifecycle.
//!
//! Presentation code translates raw input into [`Event`]s and performs any
//! [`Request`] the engine hands back. Everything else (phase changes, timer
//! ownership, scoring) happens here, synchronously.

use crate::fsm::SessionPhase;
use crate::input::KeyInput;
use crate::protocol::DEFAULT_DURATION;
use crate::session::{Session, SessionError, Slot, Transition};
use crate::words::{validate_words, SupplierError, WordSupplier};
use crate::wpm::Outcome;
use tracing::{debug, warn};

/// Starts the once-per-second countdown that feeds [`Event::Tick`] back to the engine.
pub trait Scheduler {
    /// Dropping the handle must cancel the countdown.
    type Handle;

    fn start_countdown(&mut self) -> Self::Handle;
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Key(KeyInput),
    Tick,
    WordsLoaded {
        generation: u64,
        result: Result<Vec<String>, SupplierError>,
    },
    SelectDuration(u32),
}

/// Work the engine needs the caller to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// Fetch a word list and answer with [`Event::WordsLoaded`] carrying the same generation.
    FetchWords { generation: u64 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Status {
    #[default]
    Loading,
    Ready,
    Unavailable(SupplierError),
}

/// Everything a view needs to draw the current state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub slots: Vec<Slot>,
    pub cursor: usize,
    pub remaining: u32,
    pub duration: u32,
    pub phase: SessionPhase,
    pub outcome: Option<Outcome>,
    pub status: Status,
}

pub struct Engine<S: Scheduler> {
    scheduler: S,
    countdown: Option<S::Handle>,
    session: Option<Session>,
    duration: u32,
    generation: u64,
    status: Status,
}

impl<S: Scheduler> Engine<S> {
    /// Engine waiting for its first word list; call [`Engine::restart`] to get the fetch request.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            countdown: None,
            session: None,
            duration: DEFAULT_DURATION,
            generation: 0,
            status: Status::Loading,
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Option<Request> {
        match event {
            Event::Key(KeyInput::Escape) => Some(self.restart()),
            Event::Key(KeyInput::Char(c)) => {
                let transition = self.session.as_mut()?.handle_char(c);
                self.apply(transition);
                None
            }
            Event::Key(KeyInput::Backspace) => {
                self.session.as_mut()?.handle_backspace();
                None
            }
            Event::Key(KeyInput::Ignored) => None,
            Event::Tick => {
                // A tick with no live countdown was already cancelled.
                self.countdown.as_ref()?;
                let transition = self.session.as_mut()?.tick();
                self.apply(transition);
                None
            }
            Event::WordsLoaded { generation, result } => {
                self.load(generation, result);
                None
            }
            Event::SelectDuration(secs) => self.change_duration(secs),
        }
    }

    /// Cancel any countdown, drop the current session and ask for fresh words.
    pub fn restart(&mut self) -> Request {
        self.countdown = None;
        self.session = None;
        self.generation += 1;
        self.status = Status::Loading;
        debug!(generation = self.generation, "restart requested");
        Request::FetchWords {
            generation: self.generation,
        }
    }

    /// Restart and load synchronously from `supplier`.
    pub fn restart_from<W: WordSupplier>(&mut self, supplier: &mut W) -> &Status {
        let Request::FetchWords { generation } = self.restart();
        let result = supplier.fetch_words();
        self.load(generation, result);
        &self.status
    }

    fn change_duration(&mut self, secs: u32) -> Option<Request> {
        if secs == 0 {
            warn!(error = %SessionError::ZeroDuration, "duration change ignored");
            return None;
        }
        self.duration = secs;
        Some(self.restart())
    }

    fn load(&mut self, generation: u64, result: Result<Vec<String>, SupplierError>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "stale word list dropped");
            return;
        }
        let session = result.and_then(validate_words).and_then(|words| {
            Session::start(&words, self.duration).map_err(supplier_error)
        });
        match session {
            Ok(session) => {
                self.session = Some(session);
                self.status = Status::Ready;
            }
            Err(e) => {
                warn!(error = %e, "cannot start session");
                self.session = None;
                self.status = Status::Unavailable(e);
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Started => {
                self.countdown = Some(self.scheduler.start_countdown());
            }
            Transition::Finished(_) => {
                self.countdown = None;
            }
            Transition::Unchanged | Transition::Updated => {}
        }
    }

    pub fn slots(&self) -> &[Slot] {
        self.session.as_ref().map(Session::slots).unwrap_or(&[])
    }

    pub fn cursor(&self) -> usize {
        self.session.as_ref().map_or(0, Session::cursor)
    }

    pub fn remaining(&self) -> u32 {
        self.session.as_ref().map_or(self.duration, Session::remaining)
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.as_ref().map(Session::phase).unwrap_or_default()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.session.as_ref().and_then(Session::outcome)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            slots: self.slots().to_vec(),
            cursor: self.cursor(),
            remaining: self.remaining(),
            duration: self.duration,
            phase: self.phase(),
            outcome: self.outcome(),
            status: self.status.clone(),
        }
    }
}

fn supplier_error(e: SessionError) -> SupplierError {
    match e {
        SessionError::EmptySequence => SupplierError::Empty,
        SessionError::ZeroDuration => SupplierError::Unavailable(e.to_string()),
    }
}
