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

//! Catalog list state.
//!
//! The view keeps the row cursor used for toggling selection, and which item
//! is emphasized as the active one. Whether an item is included is always
//! read from the [`Catalog`](crate::model::Catalog) itself.

mod event;
mod render;

use ratatui::widgets::TableState;

pub(crate) struct CatalogView {
    table_state: TableState,
    emphasized: Option<usize>,
    len: usize,
}

impl CatalogView {
    pub(crate) fn new(len: usize) -> Self {
        let mut table_state = TableState::new();
        if len > 0 {
            table_state.select(Some(0));
        }

        Self {
            table_state,
            emphasized: None,
            len,
        }
    }

    pub(crate) fn emphasized(&self) -> Option<usize> {
        self.emphasized
    }

    pub(crate) fn emphasize(&mut self, index: usize) {
        self.emphasized = Some(index);
    }

    pub(crate) fn deemphasize(&mut self, index: usize) {
        if self.emphasized == Some(index) {
            self.emphasized = None;
        }
    }

    pub(crate) fn selected_row(&self) -> Option<usize> {
        self.table_state.selected()
    }

    fn goto_next(&mut self) {
        if self.len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < self.len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        if self.len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => self.len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self) {
        if self.len > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self) {
        if self.len > 0 {
            self.table_state.select(Some(self.len - 1));
        }
    }
}
