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

//! Application configuration.
//!
//! This module manages the application configuration file, which names the
//! media directory and the fixed list of catalog entries.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub(crate) const APP_NAME: &str = "anthems";

const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct CatalogEntry {
    /// Display label, taken from the file's tags when absent.
    pub(crate) label: Option<String>,
    /// Media file, relative to the media directory.
    pub(crate) file: String,
}

impl CatalogEntry {
    fn new(label: &str, file: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            file: file.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) media_dir: String,
    pub(crate) log_dir: String,
    pub(crate) items: Vec<CatalogEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dir: "media".to_string(),
            log_dir: DEFAULT_LOG_DIR.to_string(),
            items: vec![
                CatalogEntry::new("No God Except Allah", "no_god_except_allah.mp3"),
                CatalogEntry::new("The Moon Appeared", "moon_appeared.mp3"),
                CatalogEntry::new("Rahman", "rahman.mp3"),
                CatalogEntry::new("My Mother", "my_mother.mp3"),
                CatalogEntry::new("I Am A Slave", "i_am_slave.mp3"),
                CatalogEntry::new("Disappear", "disappear.mp3"),
                CatalogEntry::new("Not A Stranger", "not_stranger.mp3"),
            ],
        }
    }
}

impl AppConfig {
    pub(crate) fn media_path(&self, entry: &CatalogEntry) -> PathBuf {
        PathBuf::from(&self.media_dir).join(&entry.file)
    }
}

/// Loads the configuration file, creating it with defaults on first run.
///
/// Logging is not up yet when this runs, so the caller decides how to report
/// a failure.
pub(crate) fn load_config() -> Result<AppConfig, confy::ConfyError> {
    confy::load(APP_NAME, None)
}
