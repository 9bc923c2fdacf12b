//! # Repository — typed persistence on an abstract key-value store
//!
//! [`HydrationRepo`] maps Hydrate's domain types onto the flat string keys kept
//! by a [`KeyValueStore`]. All reads and writes go through the trait, so the same
//! logic works against the in-memory store (tests) and the filesystem store
//! (devices).
//!
//! ## Key schema
//!
//! | Key | Value |
//! |-----|-------|
//! | `height` | centimetres, decimal integer string |
//! | `weight` | kilograms, decimal integer string |
//! | `gender` | `"male"` / `"female"` |
//! | `wakeTime` | ISO-8601 timestamp |
//! | `sleepTime` | ISO-8601 timestamp |
//! | `drinkProgress` | JSON object, beverage name → millilitres |
//! | `water` | **legacy** flat millilitre total, migrated on read |
//!
//! ## Read path
//!
//! Profile and schedule are all-or-nothing: a partially written or unparsable
//! group reads as `None` and the setup wizard runs again. The ledger always
//! reads as something, falling back to all zeros.
//!
//! ## Ledger migration
//!
//! Early installs stored a single `water` number. When `drinkProgress` is absent
//! and `water` is present, [`load_ledger`](HydrationRepo::load_ledger) moves the
//! old total into the `water` entry, writes `drinkProgress` and removes `water`.

use tracing::warn;

use crate::kv::{KeyValueStore, StoreError};
use crate::models::{
    format_timestamp, parse_timestamp, ActivitySchedule, Beverage, Gender, IntakeLedger,
    UserProfile,
};

pub const KEY_HEIGHT: &str = "height";
pub const KEY_WEIGHT: &str = "weight";
pub const KEY_GENDER: &str = "gender";
pub const KEY_WAKE_TIME: &str = "wakeTime";
pub const KEY_SLEEP_TIME: &str = "sleepTime";
pub const KEY_DRINK_PROGRESS: &str = "drinkProgress";
pub const LEGACY_KEY_WATER: &str = "water";

/// Everything read at launch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoredState {
    pub profile: Option<UserProfile>,
    pub schedule: Option<ActivitySchedule>,
    pub ledger: IntakeLedger,
}

/// Typed access to the persisted profile, schedule and ledger.
pub struct HydrationRepo<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HydrationRepo<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub async fn load_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        let height = self.store.get_item(KEY_HEIGHT).await?;
        let weight = self.store.get_item(KEY_WEIGHT).await?;
        let gender = self.store.get_item(KEY_GENDER).await?;
        let (Some(height), Some(weight), Some(gender)) = (height, weight, gender) else {
            return Ok(None);
        };

        let height_cm = height.trim().parse::<u32>();
        let weight_kg = weight.trim().parse::<u32>();
        let parsed_gender = gender.trim().parse::<Gender>();
        match (height_cm, weight_kg, parsed_gender) {
            (Ok(height_cm), Ok(weight_kg), Ok(gender)) => Ok(Some(UserProfile {
                height_cm,
                weight_kg,
                gender,
            })),
            _ => {
                warn!(%height, %weight, %gender, "stored profile is unreadable, ignoring it");
                Ok(None)
            }
        }
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.store
            .set_item(KEY_HEIGHT, &profile.height_cm.to_string())
            .await?;
        self.store
            .set_item(KEY_WEIGHT, &profile.weight_kg.to_string())
            .await?;
        self.store
            .set_item(KEY_GENDER, profile.gender.as_str())
            .await
    }

    pub async fn load_schedule(&self) -> Result<Option<ActivitySchedule>, StoreError> {
        let wake = self.store.get_item(KEY_WAKE_TIME).await?;
        let sleep = self.store.get_item(KEY_SLEEP_TIME).await?;
        let (Some(wake), Some(sleep)) = (wake, sleep) else {
            return Ok(None);
        };

        match (parse_timestamp(&wake), parse_timestamp(&sleep)) {
            (Ok(wake_time), Ok(sleep_time)) => Ok(Some(ActivitySchedule {
                wake_time,
                sleep_time,
            })),
            _ => {
                warn!(%wake, %sleep, "stored schedule is unreadable, ignoring it");
                Ok(None)
            }
        }
    }

    pub async fn save_schedule(&self, schedule: &ActivitySchedule) -> Result<(), StoreError> {
        self.store
            .set_item(KEY_WAKE_TIME, &format_timestamp(&schedule.wake_time))
            .await?;
        self.store
            .set_item(KEY_SLEEP_TIME, &format_timestamp(&schedule.sleep_time))
            .await
    }

    pub async fn load_ledger(&self) -> Result<IntakeLedger, StoreError> {
        if let Some(json) = self.store.get_item(KEY_DRINK_PROGRESS).await? {
            let (ledger, unknown) = IntakeLedger::from_json(&json)?;
            if !unknown.is_empty() {
                warn!(?unknown, "ignoring unknown beverages in stored ledger");
            }
            return Ok(ledger);
        }

        match self.store.get_item(LEGACY_KEY_WATER).await? {
            Some(legacy) => self.migrate_legacy_water(&legacy).await,
            None => Ok(IntakeLedger::default()),
        }
    }

    async fn migrate_legacy_water(&self, legacy: &str) -> Result<IntakeLedger, StoreError> {
        let mut ledger = IntakeLedger::default();
        match legacy.trim().parse::<u32>() {
            Ok(ml) => ledger.add(Beverage::Water, ml),
            Err(_) => warn!(%legacy, "legacy water total is not a number, starting from zero"),
        }
        self.save_ledger(&ledger).await?;
        self.store.remove_item(LEGACY_KEY_WATER).await?;
        tracing::info!(water_ml = ledger.get(Beverage::Water), "migrated legacy water total");
        Ok(ledger)
    }

    pub async fn save_ledger(&self, ledger: &IntakeLedger) -> Result<(), StoreError> {
        self.store
            .set_item(KEY_DRINK_PROGRESS, &ledger.to_json()?)
            .await
    }

    /// Load every persisted part independently.
    ///
    /// A failure in one part is logged and that part falls back to its default,
    /// so a corrupt ledger never hides a valid profile.
    pub async fn load_all(&self) -> StoredState {
        let profile = self.load_profile().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to load profile");
            None
        });
        let schedule = self.load_schedule().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to load schedule");
            None
        });
        let ledger = self.load_ledger().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to load intake ledger");
            IntakeLedger::default()
        });
        StoredState {
            profile,
            schedule,
            ledger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn profile() -> UserProfile {
        UserProfile {
            height_cm: 180,
            weight_kg: 80,
            gender: Gender::Male,
        }
    }

    #[tokio::test]
    async fn test_empty_store_loads_defaults() {
        let repo = HydrationRepo::new(MemoryStore::new());
        let state = repo.load_all().await;
        assert_eq!(state, StoredState::default());
        assert_eq!(state.ledger.total_ml(), 0);
    }

    #[tokio::test]
    async fn test_profile_roundtrip_uses_string_keys() {
        let repo = HydrationRepo::new(MemoryStore::new());
        repo.save_profile(&profile()).await.unwrap();

        let store = repo.store();
        assert_eq!(store.get_item(KEY_HEIGHT).await.unwrap().as_deref(), Some("180"));
        assert_eq!(store.get_item(KEY_WEIGHT).await.unwrap().as_deref(), Some("80"));
        assert_eq!(store.get_item(KEY_GENDER).await.unwrap().as_deref(), Some("male"));

        assert_eq!(repo.load_profile().await.unwrap(), Some(profile()));
    }

    #[tokio::test]
    async fn test_partial_profile_is_absent() {
        let store = MemoryStore::new();
        store.set_item(KEY_HEIGHT, "170").await.unwrap();
        store.set_item(KEY_WEIGHT, "60").await.unwrap();
        let repo = HydrationRepo::new(store);
        assert_eq!(repo.load_profile().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_profile_is_absent() {
        let store = MemoryStore::new();
        store.set_item(KEY_HEIGHT, "170").await.unwrap();
        store.set_item(KEY_WEIGHT, "sixty").await.unwrap();
        store.set_item(KEY_GENDER, "female").await.unwrap();
        let repo = HydrationRepo::new(store);
        assert_eq!(repo.load_profile().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_schedule_roundtrip() {
        let repo = HydrationRepo::new(MemoryStore::new());
        assert_eq!(repo.load_schedule().await.unwrap(), None);

        let schedule = ActivitySchedule {
            wake_time: parse_timestamp("2026-10-14T07:00:00.000Z").unwrap(),
            sleep_time: parse_timestamp("2026-10-14T23:15:00.000Z").unwrap(),
        };
        repo.save_schedule(&schedule).await.unwrap();
        assert_eq!(
            repo.store().get_item(KEY_WAKE_TIME).await.unwrap().as_deref(),
            Some("2026-10-14T07:00:00.000Z")
        );
        assert_eq!(repo.load_schedule().await.unwrap(), Some(schedule));
    }

    #[tokio::test]
    async fn test_ledger_roundtrip() {
        let repo = HydrationRepo::new(MemoryStore::new());
        let mut ledger = IntakeLedger::default();
        ledger.add(Beverage::Wine, 150);
        repo.save_ledger(&ledger).await.unwrap();
        assert_eq!(repo.load_ledger().await.unwrap(), ledger);
    }

    #[tokio::test]
    async fn test_legacy_water_is_migrated() {
        let store = MemoryStore::new();
        store.set_item(LEGACY_KEY_WATER, "750").await.unwrap();
        let repo = HydrationRepo::new(store);

        let ledger = repo.load_ledger().await.unwrap();
        assert_eq!(ledger.get(Beverage::Water), 750);
        assert_eq!(ledger.total_ml(), 750);

        let store = repo.store();
        assert_eq!(store.get_item(LEGACY_KEY_WATER).await.unwrap(), None);
        assert!(store.get_item(KEY_DRINK_PROGRESS).await.unwrap().is_some());

        // Second read comes from the new schema
        assert_eq!(repo.load_ledger().await.unwrap(), ledger);
    }

    #[tokio::test]
    async fn test_new_schema_wins_over_legacy() {
        let store = MemoryStore::new();
        store.set_item(LEGACY_KEY_WATER, "750").await.unwrap();
        store
            .set_item(KEY_DRINK_PROGRESS, r#"{"water":100}"#)
            .await
            .unwrap();
        let repo = HydrationRepo::new(store);
        assert_eq!(repo.load_ledger().await.unwrap().get(Beverage::Water), 100);
    }

    #[tokio::test]
    async fn test_corrupt_ledger_does_not_hide_profile() {
        let store = MemoryStore::new();
        store.set_item(KEY_DRINK_PROGRESS, "not json").await.unwrap();
        let repo = HydrationRepo::new(store);
        repo.save_profile(&profile()).await.unwrap();

        assert!(matches!(repo.load_ledger().await, Err(StoreError::Json(_))));
        let state = repo.load_all().await;
        assert_eq!(state.profile, Some(profile()));
        assert_eq!(state.ledger, IntakeLedger::default());
    }
}
