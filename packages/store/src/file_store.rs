//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists each key as
//! its own small file. It is used on mobile and desktop to retain the profile,
//! schedule and intake ledger across app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── kv/
//!     ├── height             # "180"
//!     ├── wakeTime           # "2026-10-14T07:00:00.000Z"
//!     └── drinkProgress      # {"water":500,"juice":0,...}
//! ```
//!
//! ## Platform data directories
//!
//! The caller picks the base directory. The ui crate uses:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/hydrate/` (`dirs::data_dir()`) |
//! | Linux | `~/.local/share/hydrate/` (`dirs::data_dir()`) |
//! | Windows | `C:\Users\<user>\AppData\Roaming\hydrate\` (`dirs::data_dir()`) |
//! | Android | `/data/data/<package>/files/hydrate/` |

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::kv::{validate_key, KeyValueStore, StoreError};

/// Filesystem-backed KeyValueStore for device persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn items_dir(&self) -> PathBuf {
        self.base.join("kv")
    }

    fn item_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.items_dir().join(key))
    }
}

impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.item_path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.item_path(key)?;
        std::fs::create_dir_all(self.items_dir())?;
        std::fs::write(path, value)?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.item_path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
