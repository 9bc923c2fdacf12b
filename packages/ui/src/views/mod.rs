mod modal_overlay;
pub use modal_overlay::{AlertDialog, ModalOverlay};

mod profile_step;
pub use profile_step::ProfileStep;

mod schedule_step;
pub use schedule_step::ScheduleStep;

mod tracking;
pub use tracking::TrackingView;

mod menu;
pub use menu::MenuOverlay;

mod reminder_banner;
pub use reminder_banner::ReminderBanner;

mod home;
pub use home::HydrationHome;
