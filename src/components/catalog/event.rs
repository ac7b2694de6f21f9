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

//! Input handling for the catalog list.
//!
//! This module maps keyboard events to row navigation and to selection
//! changes, which are sent to the application as events.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::{components::CatalogView, events::AppEvent, model::Catalog};

impl CatalogView {
    /// Returns `true` if the key was consumed by the list.
    pub(crate) fn process_key(
        &mut self,
        key: KeyEvent,
        catalog: &Catalog,
        event_tx: &Sender<AppEvent>,
    ) -> Result<bool> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.goto_next(),
            KeyCode::Char('k') | KeyCode::Up => self.goto_previous(),
            KeyCode::Char('g') | KeyCode::Home => self.goto_first(),
            KeyCode::Char('G') | KeyCode::End => self.goto_last(),

            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some(index) = self.selected_row() {
                    let included = catalog.is_included(index)?;
                    event_tx.send(AppEvent::ItemSelectionChanged(index, !included))?;
                }
            }

            _ => return Ok(false),
        }

        Ok(true)
    }
}
