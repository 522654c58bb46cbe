//! Keyed whole-value persistence.
//!
//! The core treats storage as `get(key) -> value | absent` and
//! `set(key, value)` over JSON payloads - no transactions, no partial
//! writes. Absent or malformed values always decode to a default, never
//! to an error.

pub mod keys;
mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// A simple keyed, whole-value read/write store.
pub trait PersistentStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deserialize the value at `key`, falling back to the type's default
    /// when the key is absent, unreadable, or holds malformed data.
    fn get_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.get_raw(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            _ => T::default(),
        }
    }

    /// Serialize `value` and write it as the whole value of `key`.
    fn set_json<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.set_raw(key, &raw)
    }
}

/// Returns `~/.config/readtimer[-dev]/` based on READTIMER_ENV.
///
/// Set READTIMER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("READTIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("readtimer-dev")
    } else {
        base_dir.join("readtimer")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
