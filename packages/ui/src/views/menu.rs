use dioxus::prelude::*;

use crate::help::{HelpDesk, HelpRequest, LocalHelpDesk};
use crate::session::SessionState;

use super::ModalOverlay;

/// Menu with profile editing, the about text and the help form.
#[component]
pub fn MenuOverlay(session: Signal<SessionState>, show_help: bool) -> Element {
    let mut session = session;

    rsx! {
        ModalOverlay {
            on_close: move |_| session.write().close_menu(),
            div {
                class: "modal-body",
                if show_help {
                    HelpForm { session }
                } else {
                    h2 { class: "modal-title", "Menu" }
                    button {
                        class: "primary-button",
                        onclick: move |_| {
                            if let Err(e) = session.write().edit_profile() {
                                tracing::warn!(error = %e, "edit profile ignored");
                            }
                        },
                        "Edit profile"
                    }
                    button {
                        class: "primary-button",
                        onclick: move |_| session.write().about(),
                        "About"
                    }
                    button {
                        class: "primary-button",
                        onclick: move |_| session.write().open_help(),
                        "Help"
                    }
                    button {
                        class: "link-button",
                        onclick: move |_| session.write().close_menu(),
                        "Close"
                    }
                }
            }
        }
    }
}

/// Help form. Field values live here and are dropped with the overlay.
#[component]
fn HelpForm(session: Signal<SessionState>) -> Element {
    let mut session = session;
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut description = use_signal(String::new);

    let handle_submit = move |_| {
        let request = HelpRequest {
            name: name(),
            email: email(),
            description: description(),
        };
        if let Err(e) = request.validate() {
            session.write().show_alert(e.to_string());
            return;
        }
        spawn(async move {
            match LocalHelpDesk.submit_help_request(&request).await {
                Ok(()) => {
                    name.set(String::new());
                    email.set(String::new());
                    description.set(String::new());
                    session.write().close_menu();
                }
                Err(e) => session.write().show_alert(e.to_string()),
            }
        });
    };

    rsx! {
        h2 { class: "modal-title", "Help" }
        input {
            class: "field wide",
            r#type: "text",
            placeholder: "Name",
            value: name(),
            oninput: move |evt: FormEvent| name.set(evt.value()),
        }
        input {
            class: "field wide",
            r#type: "email",
            placeholder: "Email",
            value: email(),
            oninput: move |evt: FormEvent| email.set(evt.value()),
        }
        textarea {
            class: "field wide",
            rows: 4,
            placeholder: "Describe the problem",
            value: description(),
            oninput: move |evt: FormEvent| description.set(evt.value()),
        }
        button {
            class: "primary-button",
            onclick: handle_submit,
            "Send"
        }
        button {
            class: "link-button",
            onclick: move |_| session.write().back_to_menu(),
            "Back"
        }
    }
}
