pub mod database;

pub use database::Database;

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Returns `~/.config/quotevault[-dev]/` based on QUOTEVAULT_ENV.
///
/// Set QUOTEVAULT_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("QUOTEVAULT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("quotevault-dev")
    } else {
        base_dir.join("quotevault")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Persisted key/value store the daily-engagement components write to.
///
/// Keys are plain strings; date-scoped entries (reveal marker, goal
/// counter) embed the calendar date in the key. The SQLite [`Database`]
/// is the production implementation; tests use [`MemoryStore`].
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// In-memory key/value store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| CoreError::Persistence(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CoreError::Persistence(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CoreError::Persistence(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
