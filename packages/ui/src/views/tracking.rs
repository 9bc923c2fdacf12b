use dioxus::prelude::*;

use store::Beverage;

use crate::glass::Glass;
use crate::icons::{FaBars, FaPlus};
use crate::session::{Overlay, SessionState, PRESET_AMOUNTS_ML};
use crate::Icon;

use super::{MenuOverlay, ModalOverlay};

/// Setup step 2: the glass, the counter and the intake controls.
#[component]
pub fn TrackingView(
    session: Signal<SessionState>,
    on_add: EventHandler<(Beverage, u32)>,
    on_add_custom: EventHandler<()>,
) -> Element {
    let mut session = session;
    let state = session.read();
    let fraction = state.fill_fraction();
    let total = state.total_ml();
    let goal = state.goal_ml();
    let entries: Vec<(Beverage, u32)> = state.ledger().iter().collect();
    let intake = state.intake();
    let overlay = state.overlay();
    drop(state);

    rsx! {
        div {
            class: "screen",
            button {
                class: "menu-button",
                title: "Menu",
                onclick: move |_| session.write().open_menu(),
                Icon { icon: FaBars, width: 18, height: 18 }
            }

            h1 { class: "screen-title", "Hydrate" }

            Glass { fill_fraction: fraction }
            p { class: "counter", "{total} ml of {goal} ml" }

            div {
                class: "beverage-list",
                for (beverage, ml) in entries {
                    div {
                        key: "{beverage.storage_name()}",
                        class: "beverage-row",
                        span { class: "beverage-name", "{beverage.label()}" }
                        span { class: "beverage-total", "{ml} ml" }
                        button {
                            class: "add-button",
                            title: "Add {beverage.label()}",
                            onclick: move |_| session.write().open_intake(beverage),
                            Icon { icon: FaPlus, width: 12, height: 12 }
                        }
                    }
                }
            }

            if let Some(beverage) = intake {
                IntakeModal {
                    session,
                    beverage,
                    on_add,
                    on_add_custom,
                }
            }

            if overlay != Overlay::None {
                MenuOverlay {
                    session,
                    show_help: overlay == Overlay::Help,
                }
            }
        }
    }
}

#[component]
fn IntakeModal(
    session: Signal<SessionState>,
    beverage: Beverage,
    on_add: EventHandler<(Beverage, u32)>,
    on_add_custom: EventHandler<()>,
) -> Element {
    let mut session = session;
    let custom_amount = session.read().custom_amount.clone();

    rsx! {
        ModalOverlay {
            on_close: move |_| session.write().close_intake(),
            div {
                class: "modal-body",
                h2 { class: "modal-title", "How much {beverage.label().to_lowercase()}?" }

                div {
                    class: "preset-row",
                    for amount in PRESET_AMOUNTS_ML {
                        button {
                            key: "{amount}",
                            class: "secondary-button",
                            onclick: move |_| on_add.call((beverage, amount)),
                            "{amount} ml"
                        }
                    }
                }

                input {
                    class: "field",
                    r#type: "number",
                    min: "1",
                    placeholder: "Custom amount (ml)",
                    value: "{custom_amount}",
                    oninput: move |evt: FormEvent| session.write().custom_amount = evt.value(),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            on_add_custom.call(());
                        }
                    },
                }
                button {
                    class: "primary-button",
                    onclick: move |_| on_add_custom.call(()),
                    "Add"
                }
                button {
                    class: "link-button",
                    onclick: move |_| session.write().close_intake(),
                    "Cancel"
                }
            }
        }
    }
}
