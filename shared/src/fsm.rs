use rust_fsm::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionInput {
    Keystroke,
    Finish,
    Reset,
}

/// Phase machine for one typing attempt.
pub struct SessionMachine;

impl StateMachineImpl for SessionMachine {
    type Input = SessionInput;
    type State = SessionPhase;
    type Output = ();

    const INITIAL_STATE: Self::State = SessionPhase::Idle;

    fn transition(state: &Self::State, input: &Self::Input) -> Option<Self::State> {
        match (state, input) {
            (_, SessionInput::Reset) => Some(SessionPhase::Idle),
            (SessionPhase::Idle, SessionInput::Keystroke) => Some(SessionPhase::Running),
            (SessionPhase::Running, SessionInput::Keystroke) => Some(SessionPhase::Running),
            (SessionPhase::Running, SessionInput::Finish) => Some(SessionPhase::Finished),
            (SessionPhase::Finished, SessionInput::Finish) => Some(SessionPhase::Finished),
            _ => None,
        }
    }

    fn output(_state: &Self::State, _input: &Self::Input) -> Option<Self::Output> {
        None
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionMachine::INITIAL_STATE
    }
}
