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

//! Catalog and selection model.
//!
//! The catalog is a fixed, ordered list of items. Each item carries an
//! "included" flag that decides whether it takes part in traversal. All
//! traversal queries are pure linear scans relative to a cursor, where a
//! cursor of `None` sits before the first item.

use crate::model::{CatalogError, Item};

pub(crate) struct Catalog {
    items: Vec<Item>,
    included: Vec<bool>,
}

impl Catalog {
    /// Creates a catalog with every item excluded.
    pub(crate) fn new(items: Vec<Item>) -> Self {
        let included = vec![false; items.len()];
        Self { items, included }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn item(&self, index: usize) -> Result<&Item, CatalogError> {
        self.items.get(index).ok_or(CatalogError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    pub(crate) fn is_included(&self, index: usize) -> Result<bool, CatalogError> {
        self.included
            .get(index)
            .copied()
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Changes the included flag of one item.
    ///
    /// This only affects future traversal decisions, an item that is already
    /// playing keeps playing.
    pub(crate) fn set_included(&mut self, index: usize, included: bool) -> Result<(), CatalogError> {
        let len = self.len();
        let flag = self
            .included
            .get_mut(index)
            .ok_or(CatalogError::IndexOutOfRange { index, len })?;
        *flag = included;

        Ok(())
    }

    pub(crate) fn included_count(&self) -> usize {
        self.included.iter().filter(|&&included| included).count()
    }

    pub(crate) fn has_next(&self, cursor: Option<usize>) -> bool {
        self.next_included(cursor).is_some()
    }

    pub(crate) fn has_previous(&self, cursor: Option<usize>) -> bool {
        self.previous_included(cursor).is_some()
    }

    /// Returns the smallest included index strictly after the cursor.
    pub(crate) fn next_included(&self, cursor: Option<usize>) -> Option<usize> {
        let start = match cursor {
            Some(index) => {
                self.assert_cursor(index);
                index + 1
            }
            None => 0,
        };

        (start..self.len()).find(|&i| self.included[i])
    }

    /// Returns the largest included index strictly before the cursor.
    pub(crate) fn previous_included(&self, cursor: Option<usize>) -> Option<usize> {
        let end = cursor?;
        self.assert_cursor(end);

        (0..end).rev().find(|&i| self.included[i])
    }

    // A cursor past the end can only come from a wiring bug.
    fn assert_cursor(&self, index: usize) {
        assert!(
            index < self.len(),
            "cursor {} is out of range (catalog has {} items)",
            index,
            self.len()
        );
    }
}
