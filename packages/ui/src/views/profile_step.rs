use dioxus::prelude::*;

use store::Gender;

use crate::session::{preview_goal_ml, SessionState};

/// Setup step 0: height, weight and gender.
#[component]
pub fn ProfileStep(session: Signal<SessionState>, on_next: EventHandler<()>) -> Element {
    let mut session = session;
    let form = session.read().form.clone();
    let goal = preview_goal_ml(&form);

    rsx! {
        div {
            class: "screen",
            h1 { class: "screen-title", "Your profile" }

            input {
                class: "field",
                r#type: "number",
                min: "1",
                placeholder: "Height (cm)",
                value: "{form.height}",
                oninput: move |evt: FormEvent| session.write().form.height = evt.value(),
            }
            input {
                class: "field",
                r#type: "number",
                min: "1",
                placeholder: "Weight (kg)",
                value: "{form.weight}",
                oninput: move |evt: FormEvent| session.write().form.weight = evt.value(),
            }

            div {
                class: "gender-row",
                for gender in [Gender::Male, Gender::Female] {
                    button {
                        key: "{gender}",
                        class: if form.gender == Some(gender) { "gender-button selected" } else { "gender-button" },
                        onclick: move |_| session.write().form.gender = Some(gender),
                        "{gender.label()}"
                    }
                }
            }

            if let Some(goal) = goal {
                p { class: "muted", "Daily goal: {goal} ml" }
            }

            button {
                class: "primary-button",
                onclick: move |_| on_next.call(()),
                "Next"
            }
        }
    }
}
