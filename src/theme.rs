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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palette and provides utilities
//! for converting colors between Ratatui's internal representation and external
//! formats (such as hexadecimal strings) used for terminal emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) notice_colour: Color,
    pub(crate) hint_colour: Color,

    pub(crate) table_time_fg: Color,
    pub(crate) table_number_fg: Color,
    pub(crate) table_label_fg: Color,
    pub(crate) table_excluded_fg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(20, 36, 32),
            accent_colour: Color::Rgb(212, 175, 55),
            border_colour: Color::Rgb(102, 102, 102),
            gauge_track_colour: Color::Rgb(32, 52, 46),
            commander_colour: Color::Rgb(255, 255, 255),
            notice_colour: Color::Rgb(255, 160, 122),
            hint_colour: Color::Rgb(130, 140, 136),

            table_time_fg: Color::Rgb(162, 161, 166),
            table_number_fg: Color::Rgb(162, 161, 166),
            table_label_fg: Color::Rgb(255, 255, 255),
            table_excluded_fg: Color::Rgb(110, 110, 110),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string, used to set the terminal emulator's background color.
    ///
    /// Non-RGB colours have no hex form and yield `None`.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}
