mod config;
pub mod database;

pub use config::{CollectionConfig, Config, PlaybackConfig, SessionDefaults};
pub use database::Database;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::StoreError;

/// Key-value persistence used for the sticker collection and the premium flag.
///
/// Writes are synchronous: when `write` returns, the bytes are durable as far
/// as the backend can promise.
pub trait PersistenceStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }
}

impl PersistenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock()?.remove(key);
        Ok(())
    }
}

/// Returns the data directory, creating it if needed.
///
/// `BREWROOM_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/brewroom`, or `~/.config/brewroom-dev` when `BREWROOM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("BREWROOM_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("BREWROOM_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("brewroom-dev")
            } else {
                base_dir.join("brewroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StoreError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
