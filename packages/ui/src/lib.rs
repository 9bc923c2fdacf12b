//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod repo;
pub use repo::{config_path, data_dir, load_config, make_repo};

pub mod clock;
pub mod glass;
pub mod help;
pub mod picker_timer;
pub mod reminders;
pub mod session;

pub mod views;
pub use views::HydrationHome;
