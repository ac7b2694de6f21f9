// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Persistent user preferences.
//!
//! Preferences are a flat key-value document holding one boolean per catalog
//! item and one integer for the repeat policy. Values are staged in memory
//! and only become durable on [`PreferenceStore::commit`].

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::APP_NAME;

const PREFERENCES_NAME: &str = "preferences";

pub(crate) const REPEAT_KEY: &str = "repeat";

/// Storage key of the included flag for a catalog item.
pub(crate) fn item_key(index: usize) -> String {
    format!("item{}", index)
}

#[derive(Debug, Error)]
pub(crate) enum PreferencesError {
    #[error("failed to write preferences: {0}")]
    Store(#[from] confy::ConfyError),
}

/// Key-value interface to the preference storage.
pub(crate) trait PreferenceStore {
    /// Returns the stored flag, or `false` when the key is unknown.
    fn load_bool(&self, key: &str) -> bool;

    /// Returns the stored number, or `default` when the key is unknown.
    fn load_int(&self, key: &str, default: i64) -> i64;

    fn save_bool(&mut self, key: &str, value: bool);

    fn save_int(&mut self, key: &str, value: i64);

    /// Makes every staged value durable.
    fn commit(&mut self) -> Result<(), PreferencesError>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub(crate) struct PreferenceValues {
    flags: BTreeMap<String, bool>,
    numbers: BTreeMap<String, i64>,
}

/// Preferences persisted as a `confy` document next to the configuration.
pub(crate) struct ConfyPreferences {
    path: Option<PathBuf>,
    values: PreferenceValues,
}

impl ConfyPreferences {
    /// Opens the application's preference document, starting empty if it
    /// cannot be read.
    pub(crate) fn open() -> Self {
        let values = confy::load(APP_NAME, Some(PREFERENCES_NAME)).unwrap_or_else(|e| {
            warn!("Failed to load preferences, starting empty: {}", e);
            PreferenceValues::default()
        });

        Self { path: None, values }
    }

    /// Opens a preference document at an explicit location.
    pub(crate) fn open_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = confy::load_path(&path).unwrap_or_else(|e| {
            warn!("Failed to load preferences from {}, starting empty: {}", path.display(), e);
            PreferenceValues::default()
        });

        Self {
            path: Some(path),
            values,
        }
    }
}

impl PreferenceStore for ConfyPreferences {
    fn load_bool(&self, key: &str) -> bool {
        self.values.flags.get(key).copied().unwrap_or(false)
    }

    fn load_int(&self, key: &str, default: i64) -> i64 {
        self.values.numbers.get(key).copied().unwrap_or(default)
    }

    fn save_bool(&mut self, key: &str, value: bool) {
        self.values.flags.insert(key.to_string(), value);
    }

    fn save_int(&mut self, key: &str, value: i64) {
        self.values.numbers.insert(key.to_string(), value);
    }

    fn commit(&mut self) -> Result<(), PreferencesError> {
        match &self.path {
            Some(path) => confy::store_path(path, &self.values)?,
            None => confy::store(APP_NAME, Some(PREFERENCES_NAME), &self.values)?,
        }
        debug!(
            flags = self.values.flags.len(),
            numbers = self.values.numbers.len(),
            "Preferences committed"
        );

        Ok(())
    }
}

/// In-memory store, durable values are only those present at the last commit.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryPreferences {
    staged: PreferenceValues,
    pub(crate) committed: Option<PreferenceValues>,
    pub(crate) commits: usize,
    pub(crate) fail_commit: bool,
}

#[cfg(test)]
impl MemoryPreferences {
    pub(crate) fn committed_bool(&self, key: &str) -> Option<bool> {
        self.committed.as_ref()?.flags.get(key).copied()
    }

    pub(crate) fn committed_int(&self, key: &str) -> Option<i64> {
        self.committed.as_ref()?.numbers.get(key).copied()
    }
}

#[cfg(test)]
impl PreferenceStore for MemoryPreferences {
    fn load_bool(&self, key: &str) -> bool {
        self.staged.flags.get(key).copied().unwrap_or(false)
    }

    fn load_int(&self, key: &str, default: i64) -> i64 {
        self.staged.numbers.get(key).copied().unwrap_or(default)
    }

    fn save_bool(&mut self, key: &str, value: bool) {
        self.staged.flags.insert(key.to_string(), value);
    }

    fn save_int(&mut self, key: &str, value: i64) {
        self.staged.numbers.insert(key.to_string(), value);
    }

    fn commit(&mut self) -> Result<(), PreferencesError> {
        if self.fail_commit {
            return Err(PreferencesError::Store(confy::ConfyError::BadConfigDirectory(
                "read-only".to_string(),
            )));
        }
        self.committed = Some(self.staged.clone());
        self.commits += 1;

        Ok(())
    }
}
