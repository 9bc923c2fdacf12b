//! # Domain models for profile, schedule and intake
//!
//! Defines the data Hydrate persists and the pure arithmetic derived from it.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Gender`] | Biological sex as entered in the profile step (`"male"` / `"female"` in storage). |
//! | [`UserProfile`] | Height, weight and gender collected on the first setup screen. |
//! | [`ActivitySchedule`] | Wake and sleep timestamps collected on the second setup screen. |
//! | [`Beverage`] | The drinks the user can log. Storage names are kebab-case: `energy-drink`. |
//! | [`IntakeLedger`] | Accumulated millilitres per beverage. Always carries every [`Beverage`]. |
//!
//! ## Helper functions
//!
//! - [`hydration_goal_ml`] — daily target from body weight:
//!   `1500 + max(weight − 20, 0) × 20`.
//! - [`fill_fraction`] — consumed / goal, clamped to `[0, 1]`, used by the glass visual.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Base daily goal in millilitres, before the weight surcharge.
pub const BASE_GOAL_ML: u32 = 1500;
/// Weight (kg) above which every extra kilogram adds [`ML_PER_EXTRA_KG`].
pub const GOAL_WEIGHT_THRESHOLD_KG: u32 = 20;
pub const ML_PER_EXTRA_KG: u32 = 20;
/// Goal shown before any profile is known.
pub const DEFAULT_GOAL_ML: u32 = 2000;

/// Daily hydration goal in millilitres for a body weight in kilograms.
pub fn hydration_goal_ml(weight_kg: u32) -> u32 {
    let extra_kg = weight_kg.saturating_sub(GOAL_WEIGHT_THRESHOLD_KG);
    BASE_GOAL_ML.saturating_add(extra_kg.saturating_mul(ML_PER_EXTRA_KG))
}

/// Fraction of the goal consumed, never below 0 or above 1.
pub fn fill_fraction(total_ml: u32, goal_ml: u32) -> f64 {
    if goal_ml == 0 {
        return if total_ml > 0 { 1.0 } else { 0.0 };
    }
    (f64::from(total_ml) / f64::from(goal_ml)).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored string is not a known enum value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(UnknownVariant {
                kind: "gender",
                value: other.to_string(),
            }),
        }
    }
}

/// Biometrics collected on the profile step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub height_cm: u32,
    pub weight_kg: u32,
    pub gender: Gender,
}

impl UserProfile {
    pub fn goal_ml(&self) -> u32 {
        hydration_goal_ml(self.weight_kg)
    }
}

/// Wake and sleep times. Full timestamps are kept, not just time-of-day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySchedule {
    pub wake_time: DateTime<Utc>,
    pub sleep_time: DateTime<Utc>,
}

impl Default for ActivitySchedule {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            wake_time: now,
            sleep_time: now,
        }
    }
}

/// ISO-8601 form used in storage: millisecond precision, `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s.trim()).map(|ts| ts.with_timezone(&Utc))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Beverage {
    Water,
    Juice,
    Beer,
    Wine,
    EnergyDrink,
}

impl Beverage {
    pub const ALL: [Beverage; 5] = [
        Beverage::Water,
        Beverage::Juice,
        Beverage::Beer,
        Beverage::Wine,
        Beverage::EnergyDrink,
    ];

    /// Key used inside the stored `drinkProgress` object.
    pub fn storage_name(&self) -> &'static str {
        match self {
            Beverage::Water => "water",
            Beverage::Juice => "juice",
            Beverage::Beer => "beer",
            Beverage::Wine => "wine",
            Beverage::EnergyDrink => "energy-drink",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Beverage::Water => "Water",
            Beverage::Juice => "Juice",
            Beverage::Beer => "Beer",
            Beverage::Wine => "Wine",
            Beverage::EnergyDrink => "Energy drink",
        }
    }
}

impl FromStr for Beverage {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Beverage::ALL
            .into_iter()
            .find(|b| b.storage_name() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "beverage",
                value: s.to_string(),
            })
    }
}

/// Accumulated intake per beverage, in millilitres.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IntakeLedger {
    totals: BTreeMap<Beverage, u32>,
}

impl Default for IntakeLedger {
    fn default() -> Self {
        Self {
            totals: Beverage::ALL.into_iter().map(|b| (b, 0)).collect(),
        }
    }
}

impl IntakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, beverage: Beverage) -> u32 {
        self.totals.get(&beverage).copied().unwrap_or(0)
    }

    pub fn add(&mut self, beverage: Beverage, ml: u32) {
        let entry = self.totals.entry(beverage).or_insert(0);
        *entry = entry.saturating_add(ml);
    }

    pub fn total_ml(&self) -> u32 {
        self.totals
            .values()
            .fold(0u32, |acc, ml| acc.saturating_add(*ml))
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Beverage, u32)> + '_ {
        self.totals.iter().map(|(b, ml)| (*b, *ml))
    }

    /// Serialize to the `drinkProgress` JSON object.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a `drinkProgress` JSON object.
    ///
    /// Missing beverages default to 0. Unknown names are skipped and reported
    /// back so the caller can log them.
    pub fn from_json(s: &str) -> Result<(Self, Vec<String>), serde_json::Error> {
        let raw: BTreeMap<String, u32> = serde_json::from_str(s)?;
        let mut ledger = Self::default();
        let mut unknown = Vec::new();
        for (name, ml) in raw {
            match name.parse::<Beverage>() {
                Ok(beverage) => ledger.add(beverage, ml),
                Err(_) => unknown.push(name),
            }
        }
        Ok((ledger, unknown))
    }
}
