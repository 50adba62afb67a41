/// Save data — the small record that survives between sessions.
///
/// One record per slot. The slot name differs between debug and release
/// builds so development runs never touch a player's real save.

use std::fs;
use std::path::{Path, PathBuf};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::{qulock_debug, qulock_err};

#[cfg(debug_assertions)]
pub const SAVE_SLOT_NAME: &str = "qulock_save_debug";
#[cfg(not(debug_assertions))]
pub const SAVE_SLOT_NAME: &str = "qulock_save";

/// Persisted settings and best score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveRecord {
    pub num_enemies: u32,
    /// Meters per second
    pub enemy_speed: u32,
    pub high_score: i32,
    pub is_fullscreen: bool,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            num_enemies: 4,
            enemy_speed: 4,
            high_score: 0,
            is_fullscreen: false,
        }
    }
}

/// Persistence surface
pub trait SaveStore {
    /// Record stored in `slot`, `None` if the slot was never written
    fn load(&self, slot: &str) -> Result<Option<SaveRecord>>;

    fn save(&mut self, slot: &str, record: &SaveRecord) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    slots: FxHashMap<String, SaveRecord>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `record` in `slot`
    pub fn with_record(slot: &str, record: SaveRecord) -> Self {
        let mut store = Self::new();
        store.slots.insert(slot.to_string(), record);
        store
    }
}

impl SaveStore for MemorySaveStore {
    fn load(&self, slot: &str) -> Result<Option<SaveRecord>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn save(&mut self, slot: &str, record: &SaveRecord) -> Result<()> {
        self.slots.insert(slot.to_string(), record.clone());
        Ok(())
    }
}

/// One pretty-printed `<slot>.json` file per slot
#[derive(Debug, Clone)]
pub struct JsonFileSaveStore {
    directory: PathBuf,
}

impl JsonFileSaveStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.directory.join(format!("{}.json", slot))
    }
}

impl SaveStore for JsonFileSaveStore {
    fn load(&self, slot: &str) -> Result<Option<SaveRecord>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path).map_err(|e| {
            qulock_err!("qulock::JsonFileSaveStore" => Error::SaveData(format!("reading {}: {}", path.display(), e)))
        })?;
        let record = serde_json::from_str(&text).map_err(|e| {
            qulock_err!("qulock::JsonFileSaveStore" => Error::SaveData(format!("parsing {}: {}", path.display(), e)))
        })?;

        qulock_debug!("qulock::JsonFileSaveStore", "Loaded {}", path.display());
        Ok(Some(record))
    }

    fn save(&mut self, slot: &str, record: &SaveRecord) -> Result<()> {
        fs::create_dir_all(&self.directory).map_err(|e| {
            qulock_err!("qulock::JsonFileSaveStore" => Error::SaveData(format!("creating {}: {}", self.directory.display(), e)))
        })?;

        let path = self.slot_path(slot);
        let text = serde_json::to_string_pretty(record)?;
        fs::write(&path, text).map_err(|e| {
            qulock_err!("qulock::JsonFileSaveStore" => Error::SaveData(format!("writing {}: {}", path.display(), e)))
        })?;

        qulock_debug!("qulock::JsonFileSaveStore", "Saved {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "save_data_tests.rs"]
mod tests;
