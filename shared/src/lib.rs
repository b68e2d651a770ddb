//! Typing-test core: the session state machine, its scoring and the contract
//! with the word supplier. Shared by the server and the browser client.

pub mod engine;
pub mod fsm;
pub mod input;
pub mod protocol;
pub mod session;
pub mod words;
pub mod wpm;
