//! Visitor preferences
//!
//! A small string key-value store standing in for `localStorage`. The only
//! stored preference is the ambient mute flag, written as `"true"` or
//! `"false"`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, Result};

/// Default key of the ambient mute flag
pub const AMBIENT_MUTE_KEY: &str = "ufoSoundMuted";

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store; clones share their values
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// On-disk layout of a [`JsonFileStore`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PreferenceFile {
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Store persisted as a JSON file, rewritten on every `set`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Time of the last write, if the file exists
    pub fn updated_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.read("updated_at")?.updated_at)
    }

    fn read(&self, key: &str) -> Result<PreferenceFile> {
        if !self.path.exists() {
            return Ok(PreferenceFile::default());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| preference_error(key, e))?;
        serde_json::from_str(&text).map_err(|e| preference_error(key, e))
    }
}

fn preference_error(key: &str, err: impl std::fmt::Display) -> PortfolioError {
    PortfolioError::Preference {
        key: key.to_string(),
        reason: err.to_string(),
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read(key)?.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = self.read(key)?;
        file.values.insert(key.to_string(), value.to_string());
        file.updated_at = Some(Utc::now());

        let content = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, content).map_err(|e| preference_error(key, e))
    }
}

/// Read the ambient mute flag; anything but `"true"` (or a failed read)
/// means unmuted
pub fn load_ambient_mute(store: &dyn PreferenceStore, key: &str) -> bool {
    match store.get(key) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(err) => {
            warn!("{}; starting unmuted", err);
            false
        }
    }
}

pub fn save_ambient_mute(store: &mut dyn PreferenceStore, key: &str, muted: bool) -> Result<()> {
    store.set(key, if muted { "true" } else { "false" })
}
