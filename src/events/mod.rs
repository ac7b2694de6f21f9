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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging user input (keyboard, command line), signals from the audio
//! worker, and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through a
//!    single channel, so the session never sees two events at once.
//! 2. **Process**: The [`process_events`] function feeds the session, which
//!    drives the player and answers with the UI updates to apply.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.

mod handlers;
use handlers::*;
pub(crate) use handlers::apply_ui_updates;

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::{debug, error};

use crate::{App, player::PlayerHandle, render::draw, sequencer::SequencerEvent};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    PlayPressed,
    NextPressed,
    PreviousPressed,
    RepeatTogglePressed,

    ItemSelectionChanged(usize, bool),
    SelectAll(bool),

    PlaybackCompleted(PlayerHandle),
    PlaybackFailed(PlayerHandle, String),
    DurationChanged(u64),
    TimeChanged(f64),

    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            debug!("Exit requested");
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::PlayPressed => handle_sequencer_event(app, SequencerEvent::PlayPressed)?,
            AppEvent::NextPressed => handle_sequencer_event(app, SequencerEvent::NextPressed)?,
            AppEvent::PreviousPressed => {
                handle_sequencer_event(app, SequencerEvent::PreviousPressed)?
            }
            AppEvent::RepeatTogglePressed => {
                handle_sequencer_event(app, SequencerEvent::RepeatTogglePressed)?
            }
            AppEvent::ItemSelectionChanged(index, included) => {
                handle_item_selection_changed(app, index, included)
            }
            AppEvent::SelectAll(included) => handle_select_all(app, included),
            AppEvent::PlaybackCompleted(handle) => {
                handle_sequencer_event(app, SequencerEvent::PlaybackCompleted(handle))?
            }
            AppEvent::PlaybackFailed(handle, reason) => {
                handle_sequencer_event(app, SequencerEvent::PlaybackFailed(handle, reason))?
            }
            AppEvent::DurationChanged(duration) => handle_duration_changed(app, duration),
            AppEvent::TimeChanged(secs) => handle_time_changed(app, secs),
            AppEvent::Error(message) => handle_error(app, message),
            AppEvent::FatalError(message) => {
                error!("Fatal error: {}", message);
                return Err(anyhow!(message));
            }
            AppEvent::Tick => handle_tick(app),
            AppEvent::ExitApplication => {}
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Maps keyboard input to application actions and playback controls.
///
/// The command line gets the first chance at every key, then the catalog
/// list, then the global bindings:
///
/// * **Application Control**: `q` quits.
/// * **Playback**: `p`/`Enter` play button, `n` next, `b` previous, `r`
///   repeat policy.
/// * **Selection**: `a` includes every item.
///
/// # Errors
///
/// Returns an error if an event cannot be queued.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.commander.handle_key(key, &app.event_tx) {
        return Ok(());
    }

    if app
        .catalog_view
        .process_key(key, app.session.catalog(), &app.event_tx)?
    {
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('p') | KeyCode::Enter => app.event_tx.send(AppEvent::PlayPressed)?,
        KeyCode::Char('n') => app.event_tx.send(AppEvent::NextPressed)?,
        KeyCode::Char('b') => app.event_tx.send(AppEvent::PreviousPressed)?,
        KeyCode::Char('r') => app.event_tx.send(AppEvent::RepeatTogglePressed)?,

        KeyCode::Char('a') => app.event_tx.send(AppEvent::SelectAll(true))?,

        _ => {}
    }

    Ok(())
}
