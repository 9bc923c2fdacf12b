use dioxus::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::reminders::{install_presentation_policy, NotificationPolicy};

fn main() {
    // dioxus installs its own logger when none is set
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if let Err(e) = install_presentation_policy(NotificationPolicy::default()) {
        tracing::warn!(error = %e, "presentation policy not installed");
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| {
        tracing::info!(data_dir = %ui::data_dir().display(), "loading hydrate config");
        ui::load_config()
    });

    rsx! {
        ui::HydrationHome { config }
    }
}
