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

//! Catalog construction from configuration.
//!
//! Labels and durations missing from the configuration are read from the
//! media files' tags with `Lofty`. A file that cannot be probed still becomes
//! a catalog item, it just has no duration and is labelled by its file name.

use std::path::Path;

use lofty::prelude::*;
use lofty::probe::Probe;
use tracing::{debug, warn};

use crate::{
    config::AppConfig,
    model::{Catalog, Item},
};

struct ProbedTags {
    title: Option<String>,
    duration: std::time::Duration,
}

/// Builds the fixed catalog described by the configuration, in entry order.
pub(crate) fn load_catalog(config: &AppConfig) -> Catalog {
    let items = config
        .items
        .iter()
        .map(|entry| {
            let path = config.media_path(entry);
            let tags = probe_tags(&path);

            let label = entry
                .label
                .clone()
                .or_else(|| tags.as_ref().and_then(|t| t.title.clone()))
                .unwrap_or_else(|| fallback_label(&path));

            Item {
                label,
                duration: tags.map(|t| t.duration),
                path,
            }
        })
        .collect();

    Catalog::new(items)
}

fn probe_tags(path: &Path) -> Option<ProbedTags> {
    let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
        Ok(file) => file,
        Err(e) => {
            warn!("Unable to probe {}: {}", path.display(), e);
            return None;
        }
    };

    let title = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
        .and_then(|tag| tag.title().map(|t| t.to_string()));

    let duration = tagged_file.properties().duration();
    debug!(?title, ?duration, "Probed {}", path.display());

    Some(ProbedTags { title, duration })
}

fn fallback_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('_', " "))
        .unwrap_or_else(|| path.display().to_string())
}
