use crate::driver::{dispatch, init};
use crate::layout::{group_words, slot_class, slot_text};
use leptos::prelude::*;
use shared::engine::{Event, Snapshot, Status};
use shared::fsm::SessionPhase;
use shared::input::KeyInput;
use shared::protocol::DURATIONS;

#[component]
pub fn App() -> impl IntoView {
    let (snapshot, set_view) = signal(Snapshot::default());

    init(set_view);

    let _keys = window_event_listener(leptos::ev::keydown, move |ev| {
        let key = KeyInput::from_key(&ev.key());
        match key {
            KeyInput::Ignored => return,
            // Keep space from scrolling and backspace from navigating.
            KeyInput::Char(' ') | KeyInput::Backspace => ev.prevent_default(),
            _ => {}
        }
        dispatch(set_view, Event::Key(key));
    });

    let finished = move || snapshot.with(|v| v.phase == SessionPhase::Finished);
    let unavailable = move || {
        snapshot.with(|v| match &v.status {
            Status::Unavailable(e) => Some(e.to_string()),
            _ => None,
        })
    };

    view! {
        <div class="typing-app">
            <div id="settings">
                {DURATIONS
                    .iter()
                    .map(|&secs| {
                        view! {
                            <span
                                class="time-opt"
                                class:active=move || snapshot.with(|v| v.duration == secs)
                                on:click=move |_| dispatch(set_view, Event::SelectDuration(secs))
                            >
                                {secs}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>

            <div id="timer">{move || snapshot.with(|v| v.remaining)}</div>

            <Show when=move || unavailable().is_some()>
                <div class="load-error">
                    {move || unavailable().unwrap_or_default()} " • press Esc to retry"
                </div>
            </Show>

            <div id="word-wrapper">
                {move || {
                    snapshot.with(|v| {
                        group_words(&v.slots)
                            .into_iter()
                            .map(|word| {
                                let cursor = v.cursor;
                                view! {
                                    <div class="word">
                                        {word
                                            .into_iter()
                                            .map(|(i, slot)| {
                                                view! {
                                                    <span class=slot_class(&slot, i == cursor)>
                                                        {slot_text(&slot).to_string()}
                                                    </span>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                }
                            })
                            .collect_view()
                    })
                }}
            </div>

            <Show when=finished>
                <div id="results">
                    <div class="stat-val">
                        {move || snapshot.with(|v| v.outcome.map(|o| o.wpm).unwrap_or(0))}
                    </div>
                    <div class="stat-label">"WORDS PER MINUTE"</div>
                    <div class="stat-acc">
                        "Accuracy: "
                        {move || snapshot.with(|v| v.outcome.map(|o| o.accuracy).unwrap_or(0))} "%"
                    </div>
                    <button on:click=move |_| {
                        dispatch(set_view, Event::Key(KeyInput::Escape))
                    }>"Restart (Esc)"</button>
                </div>
            </Show>
        </div>
    }
}
