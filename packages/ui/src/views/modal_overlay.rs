use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// One-shot blocking message with a single OK button.
#[component]
pub fn AlertDialog(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_dismiss.call(()),
            p { class: "alert-message", "{message}" }
            button {
                class: "primary-button",
                onclick: move |_| on_dismiss.call(()),
                "OK"
            }
        }
    }
}
