use dioxus::prelude::*;

use crate::icons::FaDroplet;
use crate::reminders::Reminder;
use crate::Icon;

/// Banner for the most recently delivered reminder.
#[component]
pub fn ReminderBanner(reminder: Reminder, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "reminder-banner",
            onclick: move |_| on_dismiss.call(()),
            Icon { icon: FaDroplet, width: 16, height: 16 }
            div {
                class: "reminder-text",
                strong { "{reminder.title}" }
                span { "{reminder.body}" }
            }
        }
    }
}
