pub mod config;
pub mod kv;
pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

pub use config::{AppConfig, ConfigError};
pub use kv::{KeyValueStore, StoreError};
pub use models::{
    fill_fraction, hydration_goal_ml, ActivitySchedule, Beverage, Gender, IntakeLedger,
    UserProfile, DEFAULT_GOAL_ML,
};
pub use repo::{HydrationRepo, StoredState};
