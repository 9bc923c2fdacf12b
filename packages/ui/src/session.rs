//! Session state for the single Hydrate screen.
//!
//! [`SessionState`] is a plain reducer: every user action is a method that
//! mutates the state synchronously and, when something has to be persisted,
//! hands the value back to the caller. The root view keeps it in a `Signal`
//! and does the async storage writes itself.
//!
//! ```text
//! Profile --save_profile (valid)--> Schedule --save_schedule--> Tracking
//!    ^                                                              |
//!    +------------------------- edit_profile -----------------------+
//! ```

use chrono::{DateTime, Utc};
use store::{
    fill_fraction, hydration_goal_ml, ActivitySchedule, Beverage, Gender, IntakeLedger,
    StoredState, UserProfile, DEFAULT_GOAL_ML,
};
use thiserror::Error;
use tracing::debug;

pub const ABOUT_TEXT: &str = "Hydrate is an open project for keeping track of how much you drink \
during the day, and a reminder that water is one of the key elements of your health.";

/// Quick-add amounts offered in the intake modal, in millilitres.
pub const PRESET_AMOUNTS_ML: [u32; 3] = [150, 250, 500];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupStep {
    Profile = 0,
    Schedule = 1,
    Tracking = 2,
}

/// Secondary overlay above the tracking screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    Menu,
    Help,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerKind {
    Wake,
    Sleep,
}

/// Event emitted by the native time picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerEvent {
    Set(DateTime<Utc>),
    Dismissed,
}

/// What the view has to do with a picker's inactivity timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerAction {
    None,
    RearmTimer,
    Hide,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Inline pickers stay open until idle; modal pickers close on every event.
    pub supports_inline_picker: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please fill in all fields")]
    MissingProfileFields,

    #[error("{field} must be a positive whole number")]
    InvalidNumber { field: &'static str },

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("no beverage selected")]
    NoBeverageSelected,

    #[error("action not available on the {from:?} step")]
    InvalidTransition { from: SetupStep },
}

/// Raw values of the profile form, as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileForm {
    pub height: String,
    pub weight: String,
    pub gender: Option<Gender>,
}

impl ProfileForm {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            height: profile.height_cm.to_string(),
            weight: profile.weight_kg.to_string(),
            gender: Some(profile.gender),
        }
    }

    /// Validate the form into a profile.
    pub fn parse(&self) -> Result<UserProfile, SessionError> {
        let height = self.height.trim();
        let weight = self.weight.trim();
        let (false, false, Some(gender)) = (height.is_empty(), weight.is_empty(), self.gender)
        else {
            return Err(SessionError::MissingProfileFields);
        };
        Ok(UserProfile {
            height_cm: parse_positive(height, "Height")?,
            weight_kg: parse_positive(weight, "Weight")?,
            gender,
        })
    }
}

fn parse_positive(value: &str, field: &'static str) -> Result<u32, SessionError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SessionError::InvalidNumber { field }),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    config: SessionConfig,
    step: SetupStep,
    pub form: ProfileForm,
    schedule: ActivitySchedule,
    wake_picker_visible: bool,
    sleep_picker_visible: bool,
    goal_ml: u32,
    ledger: IntakeLedger,
    intake: Option<Beverage>,
    pub custom_amount: String,
    overlay: Overlay,
    alert: Option<String>,
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            step: SetupStep::Profile,
            form: ProfileForm::default(),
            schedule: ActivitySchedule::default(),
            wake_picker_visible: false,
            sleep_picker_visible: false,
            goal_ml: DEFAULT_GOAL_ML,
            ledger: IntakeLedger::default(),
            intake: None,
            custom_amount: String::new(),
            overlay: Overlay::None,
            alert: None,
        }
    }

    /// Apply what was read from storage at launch.
    pub fn restore(&mut self, stored: StoredState) {
        self.ledger = stored.ledger;
        if let Some(profile) = &stored.profile {
            self.form = ProfileForm::from_profile(profile);
        }
        if let Some(schedule) = &stored.schedule {
            self.schedule = schedule.clone();
        }
        if let (Some(profile), Some(_)) = (&stored.profile, &stored.schedule) {
            self.goal_ml = profile.goal_ml();
            self.enter_tracking();
        }
        debug!(step = ?self.step, goal_ml = self.goal_ml, "session restored");
    }

    pub fn step(&self) -> SetupStep {
        self.step
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn schedule(&self) -> &ActivitySchedule {
        &self.schedule
    }

    pub fn goal_ml(&self) -> u32 {
        self.goal_ml
    }

    pub fn ledger(&self) -> &IntakeLedger {
        &self.ledger
    }

    pub fn total_ml(&self) -> u32 {
        self.ledger.total_ml()
    }

    pub fn fill_fraction(&self) -> f64 {
        fill_fraction(self.total_ml(), self.goal_ml)
    }

    pub fn intake(&self) -> Option<Beverage> {
        self.intake
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn require(&self, step: SetupStep) -> Result<(), SessionError> {
        if self.step == step {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition { from: self.step })
        }
    }

    fn enter_tracking(&mut self) {
        self.step = SetupStep::Tracking;
        self.intake = None;
        self.overlay = Overlay::None;
        self.custom_amount.clear();
    }

    /// "Next" on the profile step. Returns the profile to persist.
    pub fn save_profile(&mut self) -> Result<UserProfile, SessionError> {
        self.require(SetupStep::Profile)?;
        let profile = match self.form.parse() {
            Ok(profile) => profile,
            Err(e) => {
                self.show_alert(e.to_string());
                return Err(e);
            }
        };
        self.goal_ml = profile.goal_ml();
        self.step = SetupStep::Schedule;
        debug!(goal_ml = self.goal_ml, "profile saved");
        Ok(profile)
    }

    /// "Done" on the schedule step. Returns the schedule to persist.
    pub fn save_schedule(&mut self) -> Result<ActivitySchedule, SessionError> {
        self.require(SetupStep::Schedule)?;
        self.wake_picker_visible = false;
        self.sleep_picker_visible = false;
        self.enter_tracking();
        debug!("schedule saved");
        Ok(self.schedule.clone())
    }

    /// Back to the profile step. Stored values stay until overwritten.
    pub fn edit_profile(&mut self) -> Result<(), SessionError> {
        self.require(SetupStep::Tracking)?;
        self.step = SetupStep::Profile;
        self.overlay = Overlay::None;
        Ok(())
    }

    pub fn open_intake(&mut self, beverage: Beverage) {
        self.intake = Some(beverage);
    }

    pub fn close_intake(&mut self) {
        self.intake = None;
    }

    /// Log `amount_ml` of `beverage`. Returns the ledger to persist.
    pub fn add_intake(
        &mut self,
        beverage: Beverage,
        amount_ml: u32,
    ) -> Result<IntakeLedger, SessionError> {
        self.require(SetupStep::Tracking)?;
        if amount_ml == 0 {
            return Err(SessionError::InvalidAmount);
        }
        self.ledger.add(beverage, amount_ml);
        self.intake = None;
        self.custom_amount.clear();
        debug!(?beverage, amount_ml, total_ml = self.total_ml(), "intake added");
        Ok(self.ledger.clone())
    }

    /// Submit the typed custom amount for the beverage the modal was opened for.
    pub fn add_custom_intake(&mut self) -> Result<IntakeLedger, SessionError> {
        self.require(SetupStep::Tracking)?;
        let Some(beverage) = self.intake else {
            return Err(SessionError::NoBeverageSelected);
        };
        let parsed = self.custom_amount.trim().parse::<u32>();
        let result = match parsed {
            Ok(amount) => self.add_intake(beverage, amount),
            Err(_) => Err(SessionError::InvalidAmount),
        };
        if let Err(e @ SessionError::InvalidAmount) = &result {
            self.show_alert(e.to_string());
        }
        result
    }

    pub fn picker_visible(&self, kind: PickerKind) -> bool {
        match kind {
            PickerKind::Wake => self.wake_picker_visible,
            PickerKind::Sleep => self.sleep_picker_visible,
        }
    }

    fn set_picker_visible(&mut self, kind: PickerKind, visible: bool) {
        match kind {
            PickerKind::Wake => self.wake_picker_visible = visible,
            PickerKind::Sleep => self.sleep_picker_visible = visible,
        }
    }

    pub fn open_picker(&mut self, kind: PickerKind) -> PickerAction {
        self.set_picker_visible(kind, true);
        if self.config.supports_inline_picker {
            PickerAction::RearmTimer
        } else {
            PickerAction::None
        }
    }

    pub fn on_picker_event(&mut self, kind: PickerKind, event: PickerEvent) -> PickerAction {
        if let PickerEvent::Set(ts) = event {
            match kind {
                PickerKind::Wake => self.schedule.wake_time = ts,
                PickerKind::Sleep => self.schedule.sleep_time = ts,
            }
        }
        if self.config.supports_inline_picker {
            PickerAction::RearmTimer
        } else {
            self.set_picker_visible(kind, false);
            PickerAction::Hide
        }
    }

    pub fn picker_timed_out(&mut self, kind: PickerKind) {
        self.set_picker_visible(kind, false);
    }

    pub fn open_menu(&mut self) {
        self.overlay = Overlay::Menu;
    }

    pub fn close_menu(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn open_help(&mut self) {
        self.overlay = Overlay::Help;
    }

    pub fn back_to_menu(&mut self) {
        self.overlay = Overlay::Menu;
    }

    pub fn about(&mut self) {
        self.show_alert(ABOUT_TEXT);
    }
}

/// Goal the form would produce right now, if its weight parses.
pub fn preview_goal_ml(form: &ProfileForm) -> Option<u32> {
    form.weight.trim().parse::<u32>().ok().map(hydration_goal_ml)
}
