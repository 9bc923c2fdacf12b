//! Repeating hydration reminders.
//!
//! - [`NotificationPolicy`] is installed once at process start and read by the
//!   delivery side for the life of the process.
//! - [`NotificationScheduler`] is the seam to whatever actually shows
//!   notifications. [`InAppScheduler`] delivers them inside the app over a
//!   broadcast channel.
//! - [`setup_reminders`] runs once per launch from the root view.

use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// How delivered notifications are presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotificationPolicy {
    pub show_alert: bool,
    pub play_sound: bool,
    pub set_badge: bool,
    pub show_banner: bool,
    pub show_list: bool,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self {
            show_alert: true,
            play_sound: true,
            set_badge: false,
            show_banner: true,
            show_list: true,
        }
    }
}

static PRESENTATION_POLICY: OnceLock<NotificationPolicy> = OnceLock::new();

#[derive(Debug, Error, PartialEq, Eq)]
#[error("notification presentation policy is already installed")]
pub struct PolicyAlreadyInstalled;

/// Install the process-wide presentation policy. Only the first call wins.
pub fn install_presentation_policy(policy: NotificationPolicy) -> Result<(), PolicyAlreadyInstalled> {
    PRESENTATION_POLICY
        .set(policy)
        .map_err(|_| PolicyAlreadyInstalled)
}

/// The installed policy, or the default one if nothing was installed.
pub fn presentation_policy() -> NotificationPolicy {
    PRESENTATION_POLICY.get().copied().unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reminder {
    pub title: String,
    pub body: String,
    pub interval: Duration,
}

impl Reminder {
    pub fn from_config(config: &store::config::ReminderConfig) -> Self {
        Self {
            title: config.title.clone(),
            body: config.body.clone(),
            interval: config.interval(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("reminder interval must be greater than zero")]
    ZeroInterval,

    #[error("notification scheduler unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderSetupError {
    #[error("Notifications only work on a physical device")]
    NotPhysicalDevice,

    #[error("Notification permission was not granted")]
    PermissionDenied,

    #[error(transparent)]
    Scheduler(#[from] NotifyError),
}

impl ReminderSetupError {
    /// Whether the user should see this as an alert rather than only a log line.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ReminderSetupError::Scheduler(_))
    }
}

/// Async trait for the OS-level notification scheduler.
pub trait NotificationScheduler {
    fn is_physical_device(&self) -> bool;
    fn request_permission(
        &self,
    ) -> impl std::future::Future<Output = Result<PermissionStatus, NotifyError>>;
    fn cancel_all_scheduled(&self) -> impl std::future::Future<Output = Result<(), NotifyError>>;
    fn schedule_repeating(
        &self,
        reminder: &Reminder,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>>;
}

/// Replace any scheduled reminders with a single repeating one.
pub async fn setup_reminders<N: NotificationScheduler>(
    scheduler: &N,
    reminder: &Reminder,
) -> Result<(), ReminderSetupError> {
    if !scheduler.is_physical_device() {
        return Err(ReminderSetupError::NotPhysicalDevice);
    }
    if scheduler.request_permission().await? != PermissionStatus::Granted {
        return Err(ReminderSetupError::PermissionDenied);
    }
    scheduler.cancel_all_scheduled().await?;
    scheduler.schedule_repeating(reminder).await?;
    info!(interval_secs = reminder.interval.as_secs(), "hydration reminder scheduled");
    Ok(())
}

/// Simulator builds cannot deliver notifications.
pub fn running_on_physical_device() -> bool {
    !(cfg!(target_abi = "sim") || cfg!(all(target_os = "ios", target_arch = "x86_64")))
}

/// Scheduler that fires reminders inside the running app.
#[derive(Clone)]
pub struct InAppScheduler {
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
    sender: broadcast::Sender<Reminder>,
    physical_device: bool,
}

impl Default for InAppScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl InAppScheduler {
    pub fn new() -> Self {
        Self::with_device(running_on_physical_device())
    }

    pub fn with_device(physical_device: bool) -> Self {
        let (sender, _) = broadcast::channel(8);
        Self {
            tasks: Arc::new(Mutex::new(Vec::new())),
            sender,
            physical_device,
        }
    }

    /// Receive every reminder delivered from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Reminder> {
        self.sender.subscribe()
    }

    pub fn scheduled_count(&self) -> usize {
        self.tasks
            .lock()
            .map(|tasks| tasks.iter().filter(|t| !t.is_finished()).count())
            .unwrap_or(0)
    }

    fn lock_tasks(&self) -> Result<std::sync::MutexGuard<'_, Vec<JoinHandle<()>>>, NotifyError> {
        self.tasks
            .lock()
            .map_err(|_| NotifyError::Unavailable("task list poisoned".to_string()))
    }
}

impl NotificationScheduler for InAppScheduler {
    fn is_physical_device(&self) -> bool {
        self.physical_device
    }

    async fn request_permission(&self) -> Result<PermissionStatus, NotifyError> {
        // In-app delivery needs no OS grant.
        Ok(PermissionStatus::Granted)
    }

    async fn cancel_all_scheduled(&self) -> Result<(), NotifyError> {
        let mut tasks = self.lock_tasks()?;
        for task in tasks.drain(..) {
            task.abort();
        }
        Ok(())
    }

    async fn schedule_repeating(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        if reminder.interval.is_zero() {
            return Err(NotifyError::ZeroInterval);
        }
        let sender = self.sender.clone();
        let reminder = reminder.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(reminder.interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if presentation_policy().show_alert {
                    // No subscribers is not an error; nobody is looking.
                    let _ = sender.send(reminder.clone());
                }
                debug!(title = %reminder.title, "reminder delivered");
            }
        });
        self.lock_tasks()?.push(task);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeScheduler {
        physical: bool,
        permission: PermissionStatus,
        cancels: AtomicUsize,
        scheduled: Mutex<Vec<Reminder>>,
    }

    impl FakeScheduler {
        fn new(physical: bool, permission: PermissionStatus) -> Self {
            Self {
                physical,
                permission,
                cancels: AtomicUsize::new(0),
                scheduled: Mutex::new(Vec::new()),
            }
        }
    }

    impl NotificationScheduler for FakeScheduler {
        fn is_physical_device(&self) -> bool {
            self.physical
        }

        async fn request_permission(&self) -> Result<PermissionStatus, NotifyError> {
            Ok(self.permission)
        }

        async fn cancel_all_scheduled(&self) -> Result<(), NotifyError> {
            self.cancels.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn schedule_repeating(&self, reminder: &Reminder) -> Result<(), NotifyError> {
            self.scheduled.lock().unwrap().push(reminder.clone());
            Ok(())
        }
    }

    fn reminder(secs: u64) -> Reminder {
        Reminder {
            title: "Hydration reminder".to_string(),
            body: "Time to drink some water!".to_string(),
            interval: Duration::from_secs(secs),
        }
    }

    #[tokio::test]
    async fn test_setup_schedules_one_reminder_after_cancelling() {
        let scheduler = FakeScheduler::new(true, PermissionStatus::Granted);
        setup_reminders(&scheduler, &reminder(30)).await.unwrap();
        assert_eq!(scheduler.cancels.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.scheduled.lock().unwrap().clone(), vec![reminder(30)]);
    }

    #[tokio::test]
    async fn test_setup_on_simulator_does_nothing() {
        let scheduler = FakeScheduler::new(false, PermissionStatus::Granted);
        let err = setup_reminders(&scheduler, &reminder(30)).await.unwrap_err();
        assert_eq!(err, ReminderSetupError::NotPhysicalDevice);
        assert!(err.is_user_facing());
        assert_eq!(scheduler.cancels.load(Ordering::SeqCst), 0);
        assert!(scheduler.scheduled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_setup_without_permission_does_nothing() {
        let scheduler = FakeScheduler::new(true, PermissionStatus::Denied);
        let err = setup_reminders(&scheduler, &reminder(30)).await.unwrap_err();
        assert_eq!(err, ReminderSetupError::PermissionDenied);
        assert_eq!(err.to_string(), "Notification permission was not granted");
        assert!(scheduler.scheduled.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_app_scheduler_repeats() {
        let scheduler = InAppScheduler::with_device(true);
        let mut rx = scheduler.subscribe();
        setup_reminders(&scheduler, &reminder(30)).await.unwrap();
        assert_eq!(scheduler.scheduled_count(), 1);

        for _ in 0..2 {
            let delivered = rx.recv().await.unwrap();
            assert_eq!(delivered.body, "Time to drink some water!");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_app_scheduler_setup_replaces_previous() {
        let scheduler = InAppScheduler::with_device(true);
        setup_reminders(&scheduler, &reminder(30)).await.unwrap();
        setup_reminders(&scheduler, &reminder(60)).await.unwrap();
        tokio::task::yield_now().await;
        assert_eq!(scheduler.scheduled_count(), 1);

        scheduler.cancel_all_scheduled().await.unwrap();
        assert_eq!(scheduler.scheduled_count(), 0);
    }

    #[tokio::test]
    async fn test_in_app_scheduler_rejects_zero_interval() {
        let scheduler = InAppScheduler::with_device(true);
        let err = setup_reminders(&scheduler, &reminder(0)).await.unwrap_err();
        assert_eq!(err, ReminderSetupError::Scheduler(NotifyError::ZeroInterval));
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_default_policy_never_badges() {
        let policy = presentation_policy();
        assert!(policy.show_alert);
        assert!(policy.play_sound);
        assert!(!policy.set_badge);
    }

    #[test]
    fn test_policy_installs_once() {
        // Whichever test installs first wins; the second call always fails.
        let _ = install_presentation_policy(NotificationPolicy::default());
        assert_eq!(
            install_presentation_policy(NotificationPolicy::default()),
            Err(PolicyAlreadyInstalled)
        );
        assert_eq!(presentation_policy(), NotificationPolicy::default());
    }
}
