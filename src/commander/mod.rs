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

//! Command-line input logic and state management.
//!
//! This module implements the logic for a command-line processing component,
//! handling a text input component, and dispatching the corresponding
//! application event when a command is submitted.
//!
//! Item numbers typed on the command line are 1-based, as shown in the
//! catalog list.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};
use tracing::debug;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::events::AppEvent;

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Returns `true` if the key was consumed by the command line.
    pub(crate) fn handle_key(&mut self, key: KeyEvent, event_tx: &Sender<AppEvent>) -> bool {
        if !self.active {
            if key.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                if !buffer.is_empty() {
                    let _ = self.run_command(&buffer, event_tx);
                }
                self.input.reset();
                self.active = false;
            }

            // Delegate all other keys to the managed input component.
            _ => {
                self.input.handle_event(&Event::Key(key));
            }
        }

        true
    }

    fn run_command(&self, buffer: &str, event_tx: &Sender<AppEvent>) -> Result<()> {
        debug!("Running command: {}", buffer);

        match parse_command(buffer) {
            Ok(event) => event_tx.send(event)?,
            Err(message) => event_tx.send(AppEvent::Error(message))?,
        }

        Ok(())
    }
}

fn parse_command(buffer: &str) -> Result<AppEvent, String> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    match parts.as_slice() {
        ["q"] => Ok(AppEvent::ExitApplication),

        ["p"] => Ok(AppEvent::PlayPressed),   // play/pause/resume
        ["pn"] => Ok(AppEvent::NextPressed),  // play next
        ["pp"] => Ok(AppEvent::PreviousPressed), // play previous
        ["rp"] => Ok(AppEvent::RepeatTogglePressed),

        ["sel", "all"] => Ok(AppEvent::SelectAll(true)),
        ["desel", "all"] => Ok(AppEvent::SelectAll(false)),
        ["sel", number] => item_index(number).map(|i| AppEvent::ItemSelectionChanged(i, true)),
        ["desel", number] => item_index(number).map(|i| AppEvent::ItemSelectionChanged(i, false)),

        [cmd, ..] => Err(format!("Unknown command: {}", cmd)),

        [] => Err("Empty command".to_string()),
    }
}

fn item_index(number: &str) -> Result<usize, String> {
    match number.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Not an item number: {}", number)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_commands() {
        assert!(matches!(parse_command("p"), Ok(AppEvent::PlayPressed)));
        assert!(matches!(parse_command("pn"), Ok(AppEvent::NextPressed)));
        assert!(matches!(parse_command("pp"), Ok(AppEvent::PreviousPressed)));
        assert!(matches!(parse_command("rp"), Ok(AppEvent::RepeatTogglePressed)));
        assert!(matches!(parse_command("q"), Ok(AppEvent::ExitApplication)));
    }

    #[test]
    fn selection_commands_use_one_based_numbers() {
        assert!(matches!(
            parse_command("sel 1"),
            Ok(AppEvent::ItemSelectionChanged(0, true))
        ));
        assert!(matches!(
            parse_command("desel  7"),
            Ok(AppEvent::ItemSelectionChanged(6, false))
        ));
        assert!(matches!(parse_command("sel all"), Ok(AppEvent::SelectAll(true))));
        assert!(parse_command("sel 0").is_err());
        assert!(parse_command("sel two").is_err());
    }

    #[test]
    fn unknown_commands_are_errors() {
        assert_eq!(
            parse_command("shuffle").err(),
            Some("Unknown command: shuffle".to_string())
        );
    }
}
