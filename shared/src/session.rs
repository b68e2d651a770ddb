use crate::fsm::{SessionInput, SessionMachine, SessionPhase};
use crate::wpm::Outcome;
use rust_fsm::StateMachineImpl;
use thiserror::Error;
use tracing::debug;

/// Expected character of the slot after every word.
pub const SEPARATOR: char = ' ';

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("target sequence is empty")]
    EmptySequence,

    #[error("duration must be greater than zero")]
    ZeroDuration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Judgment {
    #[default]
    Pending,
    Correct,
    Incorrect,
}

/// One position of the flattened target text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub expected: char,
    pub judgment: Judgment,
}

impl Slot {
    fn new(expected: char) -> Self {
        Self {
            expected,
            judgment: Judgment::Pending,
        }
    }
}

/// What a call changed, so the caller knows whether to hold or release the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Updated,
    Started,
    Finished(Outcome),
}

/// State of one typing attempt over a fixed target sequence.
#[derive(Clone, Debug)]
pub struct Session {
    slots: Vec<Slot>,
    cursor: usize,
    total_typed: usize,
    errors: usize,
    duration: u32,
    remaining: u32,
    phase: SessionPhase,
    outcome: Option<Outcome>,
}

impl Session {
    /// Flatten `words` into slots, one separator after every word.
    pub fn start<S: AsRef<str>>(words: &[S], duration: u32) -> Result<Self, SessionError> {
        if duration == 0 {
            return Err(SessionError::ZeroDuration);
        }
        if words.is_empty() {
            return Err(SessionError::EmptySequence);
        }
        let slots: Vec<Slot> = words
            .iter()
            .flat_map(|w| w.as_ref().chars().chain(std::iter::once(SEPARATOR)))
            .map(Slot::new)
            .collect();

        debug!(slots = slots.len(), duration, "session started");
        Ok(Self {
            slots,
            cursor: 0,
            total_typed: 0,
            errors: 0,
            duration,
            remaining: duration,
            phase: SessionMachine::INITIAL_STATE,
            outcome: None,
        })
    }

    pub fn handle_char(&mut self, input: char) -> Transition {
        if self.remaining == 0 || self.cursor >= self.slots.len() {
            return Transition::Unchanged;
        }
        let Some(next) = SessionMachine::transition(&self.phase, &SessionInput::Keystroke) else {
            return Transition::Unchanged;
        };
        let started = self.phase == SessionPhase::Idle;
        self.phase = next;

        let slot = &mut self.slots[self.cursor];
        self.total_typed += 1;
        if input == slot.expected {
            slot.judgment = Judgment::Correct;
        } else {
            slot.judgment = Judgment::Incorrect;
            self.errors += 1;
        }
        self.cursor += 1;

        if self.cursor == self.slots.len() {
            return Transition::Finished(self.finish());
        }
        if started {
            Transition::Started
        } else {
            Transition::Updated
        }
    }

    pub fn handle_backspace(&mut self) -> Transition {
        if self.cursor == 0 || self.phase == SessionPhase::Finished {
            return Transition::Unchanged;
        }
        self.cursor -= 1;
        self.slots[self.cursor].judgment = Judgment::Pending;
        Transition::Updated
    }

    /// One elapsed second of the countdown.
    pub fn tick(&mut self) -> Transition {
        if self.phase != SessionPhase::Running || self.remaining == 0 {
            return Transition::Unchanged;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            return Transition::Finished(self.finish());
        }
        Transition::Updated
    }

    /// Idempotent: a second call returns the outcome computed by the first.
    pub fn finish(&mut self) -> Outcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        // Idle has no Finish edge; a session that never started still scores zero.
        self.phase = SessionMachine::transition(&self.phase, &SessionInput::Finish)
            .unwrap_or(SessionPhase::Finished);
        let outcome = Outcome::compute(self.total_typed, self.errors, self.duration);
        debug!(
            typed = self.total_typed,
            errors = self.errors,
            wpm = outcome.wpm,
            accuracy = outcome.accuracy,
            "session finished"
        );
        self.outcome = Some(outcome);
        outcome
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_typed(&self) -> usize {
        self.total_typed
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}
