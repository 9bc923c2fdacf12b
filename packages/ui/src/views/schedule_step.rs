use dioxus::prelude::*;

use crate::clock::{local_hhmm, with_local_time};
use crate::session::{PickerEvent, PickerKind, SessionState};

/// Setup step 1: wake and sleep times.
#[component]
pub fn ScheduleStep(
    session: Signal<SessionState>,
    on_open_picker: EventHandler<PickerKind>,
    on_picker_event: EventHandler<(PickerKind, PickerEvent)>,
    on_done: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "screen",
            h1 { class: "screen-title", "Your day" }

            TimeField {
                session,
                kind: PickerKind::Wake,
                label: "When do you wake up?",
                on_open_picker,
                on_picker_event,
            }
            TimeField {
                session,
                kind: PickerKind::Sleep,
                label: "When do you go to sleep?",
                on_open_picker,
                on_picker_event,
            }

            button {
                class: "primary-button",
                onclick: move |_| on_done.call(()),
                "Done"
            }
        }
    }
}

#[component]
fn TimeField(
    session: Signal<SessionState>,
    kind: PickerKind,
    label: &'static str,
    on_open_picker: EventHandler<PickerKind>,
    on_picker_event: EventHandler<(PickerKind, PickerEvent)>,
) -> Element {
    let state = session.read();
    let current = match kind {
        PickerKind::Wake => state.schedule().wake_time,
        PickerKind::Sleep => state.schedule().sleep_time,
    };
    let visible = state.picker_visible(kind);
    let inline = state.config().supports_inline_picker;
    drop(state);
    let shown = local_hhmm(&current);

    rsx! {
        p { class: "field-label", "{label}" }
        button {
            class: "time-button",
            onclick: move |_| on_open_picker.call(kind),
            "{shown}"
        }
        if visible {
            input {
                class: if inline { "time-picker inline" } else { "time-picker" },
                r#type: "time",
                value: "{shown}",
                autofocus: !inline,
                onchange: move |evt: FormEvent| {
                    let event = match with_local_time(&current, &evt.value()) {
                        Some(ts) => PickerEvent::Set(ts),
                        None => PickerEvent::Dismissed,
                    };
                    on_picker_event.call((kind, event));
                },
                onblur: move |_| {
                    if !inline {
                        on_picker_event.call((kind, PickerEvent::Dismissed));
                    }
                },
            }
        }
    }
}
