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

//! Domain models and core data structures.
//!
//! This module defines the playable [`Item`]s of the fixed catalog and the
//! [`Catalog`] that tracks which of them the user has included for playback.

pub(crate) mod catalog;
pub(crate) mod probe;

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

pub(crate) use catalog::Catalog;

/// One fixed, selectable, playable entry of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Item {
    pub(crate) label: String,
    pub(crate) path: PathBuf,
    pub(crate) duration: Option<Duration>,
}

impl Item {
    pub(crate) fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            duration: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CatalogError {
    #[error("item index {index} is out of range (catalog has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },
}
