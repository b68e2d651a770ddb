use crate::fetch::fetch_words;
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use shared::engine::{Engine, Event, Request, Scheduler, Snapshot};
use shared::fsm::SessionPhase;
use std::cell::RefCell;

// Thread-local storage for the live engine. This avoids capturing non-Send/Sync
// types inside Leptos closures, which require Fn + Send + Sync.
thread_local! {
    static ENGINE: RefCell<Option<Engine<IntervalScheduler>>> = const { RefCell::new(None) };
}

/// Browser countdown: a 1s `Interval`, cancelled when the engine drops it.
pub struct IntervalScheduler {
    set_view: WriteSignal<Snapshot>,
}

impl Scheduler for IntervalScheduler {
    type Handle = Interval;

    fn start_countdown(&mut self) -> Interval {
        let set_view = self.set_view;
        Interval::new(1_000, move || {
            // Run outside the interval callback; finishing drops this very interval.
            wasm_bindgen_futures::spawn_local(async move { dispatch(set_view, Event::Tick) });
        })
    }
}

/// Install a fresh engine and request its first word list.
pub fn init(set_view: WriteSignal<Snapshot>) {
    let request = ENGINE.with(|cell| {
        let mut engine = Engine::new(IntervalScheduler { set_view });
        let request = engine.restart();
        set_view.set(engine.snapshot());
        *cell.borrow_mut() = Some(engine);
        request
    });
    perform(set_view, request);
}

pub fn dispatch(set_view: WriteSignal<Snapshot>, event: Event) {
    let update = ENGINE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let engine = slot.as_mut()?;
        let before = engine.phase();
        let request = engine.handle_event(event);
        Some((before, engine.snapshot(), request))
    });
    let Some((before, snapshot, request)) = update else {
        return;
    };

    if before != SessionPhase::Finished && snapshot.phase == SessionPhase::Finished {
        if let Some(outcome) = snapshot.outcome {
            web_sys::console::log_1(
                &format!("Finished: {} WPM, {}% accuracy", outcome.wpm, outcome.accuracy).into(),
            );
        }
    }
    set_view.set(snapshot);

    if let Some(request) = request {
        perform(set_view, request);
    }
}

fn perform(set_view: WriteSignal<Snapshot>, request: Request) {
    match request {
        Request::FetchWords { generation } => {
            wasm_bindgen_futures::spawn_local(async move {
                let result = fetch_words().await;
                if let Err(e) = &result {
                    web_sys::console::error_1(&format!("Failed to load words: {e}").into());
                }
                dispatch(set_view, Event::WordsLoaded { generation, result });
            });
        }
    }
}
