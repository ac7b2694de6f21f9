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

//! Stateful UI components.
//!
//! * [`CatalogView`]: the catalog list, with the include checkboxes and the
//!   emphasized (now playing) item.
//! * [`StatusLine`]: transient notices shown at the bottom of the screen.

mod catalog;
mod status;

pub(crate) use catalog::CatalogView;
pub(crate) use status::StatusLine;
