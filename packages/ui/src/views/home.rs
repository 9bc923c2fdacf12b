use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use store::{AppConfig, Beverage};

use crate::make_repo;
use crate::picker_timer::PickerTimers;
use crate::reminders::{presentation_policy, setup_reminders, InAppScheduler, Reminder};
use crate::session::{
    PickerAction, PickerEvent, PickerKind, SessionConfig, SessionState, SetupStep,
};

use super::{AlertDialog, ProfileStep, ReminderBanner, ScheduleStep, TrackingView};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// The whole app: setup wizard followed by the tracking screen.
///
/// Owns the session, loads it from storage on mount, persists every change that
/// returns data, schedules the reminder once and drives the picker timers.
#[component]
pub fn HydrationHome(config: AppConfig) -> Element {
    let session_config = SessionConfig {
        supports_inline_picker: config.pickers.inline_or(cfg!(target_os = "ios")),
    };
    let picker_timeout = config.pickers.inactivity_timeout();
    let reminder = Reminder::from_config(&config.reminders);

    let mut session = use_signal(move || SessionState::new(session_config));
    let mut loaded = use_signal(|| false);
    let mut banner = use_signal(|| Option::<Reminder>::None);
    let timers = use_hook(|| Rc::new(RefCell::new(PickerTimers::default())));
    let scheduler = use_hook(InAppScheduler::new);

    // Load persisted state on mount
    let _loader = use_resource(move || async move {
        let stored = make_repo().load_all().await;
        session.write().restore(stored);
        loaded.set(true);
    });

    // Reminder setup, once per launch
    let setup_scheduler = scheduler.clone();
    use_hook(move || {
        spawn(async move {
            match setup_reminders(&setup_scheduler, &reminder).await {
                Ok(()) => {}
                Err(e) if e.is_user_facing() => session.write().show_alert(e.to_string()),
                Err(e) => warn!(error = %e, "reminder setup failed"),
            }
        });
    });

    // In-app delivery
    use_future(move || {
        let mut rx = scheduler.subscribe();
        async move {
            loop {
                match rx.recv().await {
                    Ok(reminder) => {
                        if presentation_policy().show_banner {
                            banner.set(Some(reminder));
                        }
                    }
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        }
    });

    {
        let timers = timers.clone();
        use_drop(move || timers.borrow_mut().cancel_all());
    }

    let handle_save_profile = move |_: ()| {
        let result = session.write().save_profile();
        let Ok(profile) = result else {
            return;
        };
        spawn(async move {
            if let Err(e) = make_repo().save_profile(&profile).await {
                warn!(error = %e, "failed to persist profile");
            }
        });
    };

    let handle_save_schedule = {
        let timers = timers.clone();
        move |_: ()| {
            let result = session.write().save_schedule();
            let schedule = match result {
                Ok(schedule) => schedule,
                Err(e) => {
                    warn!(error = %e, "save schedule ignored");
                    return;
                }
            };
            timers.borrow_mut().cancel_all();
            spawn(async move {
                if let Err(e) = make_repo().save_schedule(&schedule).await {
                    warn!(error = %e, "failed to persist schedule");
                }
            });
        }
    };

    let handle_open_picker = {
        let timers = timers.clone();
        move |kind: PickerKind| {
            let action = session.write().open_picker(kind);
            apply_picker_action(&timers, session, kind, action, picker_timeout);
        }
    };

    let handle_picker_event = {
        let timers = timers.clone();
        move |(kind, event): (PickerKind, PickerEvent)| {
            let action = session.write().on_picker_event(kind, event);
            apply_picker_action(&timers, session, kind, action, picker_timeout);
        }
    };

    let handle_add = move |(beverage, amount): (Beverage, u32)| {
        let result = session.write().add_intake(beverage, amount);
        persist_ledger(result);
    };

    let handle_add_custom = move |_: ()| {
        let result = session.write().add_custom_intake();
        persist_ledger(result);
    };

    if !loaded() {
        return rsx! {
            document::Link { rel: "stylesheet", href: VIEWS_CSS }
            div { class: "screen", p { class: "muted", "Loading..." } }
        };
    }

    let step = session.read().step();
    let alert = session.read().alert().map(str::to_string);

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        match step {
            SetupStep::Profile => rsx! {
                ProfileStep { session, on_next: handle_save_profile }
            },
            SetupStep::Schedule => rsx! {
                ScheduleStep {
                    session,
                    on_open_picker: handle_open_picker,
                    on_picker_event: handle_picker_event,
                    on_done: handle_save_schedule,
                }
            },
            SetupStep::Tracking => rsx! {
                TrackingView {
                    session,
                    on_add: handle_add,
                    on_add_custom: handle_add_custom,
                }
            },
        }
        if let Some(reminder) = banner() {
            ReminderBanner {
                reminder,
                on_dismiss: move |_| banner.set(None),
            }
        }
        if let Some(message) = alert {
            AlertDialog {
                message,
                on_dismiss: move |_| session.write().dismiss_alert(),
            }
        }
    }
}

fn apply_picker_action(
    timers: &Rc<RefCell<PickerTimers>>,
    mut session: Signal<SessionState>,
    kind: PickerKind,
    action: PickerAction,
    timeout: Duration,
) {
    match action {
        PickerAction::RearmTimer => timers
            .borrow_mut()
            .rearm(kind, timeout, move || session.write().picker_timed_out(kind)),
        PickerAction::Hide => timers.borrow_mut().cancel(kind),
        PickerAction::None => {}
    }
}

fn persist_ledger(result: Result<store::IntakeLedger, crate::session::SessionError>) {
    let Ok(ledger) = result else {
        return;
    };
    spawn(async move {
        if let Err(e) = make_repo().save_ledger(&ledger).await {
            warn!(error = %e, "failed to persist intake ledger");
        }
    });
}
