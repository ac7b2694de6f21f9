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

use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    App,
    events::AppEvent,
    sequencer::{SequencerEvent, UiUpdate},
};

pub(super) fn handle_sequencer_event(app: &mut App, event: SequencerEvent) -> Result<()> {
    let live = app.session.snapshot().live;

    let updates = app.session.handle(event);

    // Progress belongs to the instance that reported it
    if app.session.snapshot().live != live {
        reset_progress(app);
    }
    apply_ui_updates(app, updates)
}

/// Applies the updates produced by a session transition to the view state.
pub(crate) fn apply_ui_updates(app: &mut App, updates: Vec<UiUpdate>) -> Result<()> {
    for update in updates {
        match update {
            UiUpdate::SetPlayButton(state) => app.play_button = state,
            UiUpdate::SetRepeatButton(repeat) => app.repeat = repeat,
            UiUpdate::Emphasize(index) => app.catalog_view.emphasize(index),
            UiUpdate::Deemphasize(index) => app.catalog_view.deemphasize(index),
            UiUpdate::Notice(notice) => app.status.show(notice.to_string(), Instant::now()),
            UiUpdate::CloseSession => {
                info!("Playback finished, closing");
                app.event_tx.send(AppEvent::ExitApplication)?;
            }
        }
    }

    Ok(())
}

pub(super) fn handle_item_selection_changed(app: &mut App, index: usize, included: bool) {
    if let Err(e) = app.session.set_included(index, included) {
        // Only reachable through a bad command line argument
        warn!("Ignoring selection change: {}", e);
        app.status.show(e.to_string(), Instant::now());
    }
}

pub(super) fn handle_select_all(app: &mut App, included: bool) {
    for index in 0..app.session.catalog().len() {
        handle_item_selection_changed(app, index, included);
    }
}

pub(super) fn handle_duration_changed(app: &mut App, duration: u64) {
    app.player_duration = Some(duration);
}

pub(super) fn handle_time_changed(app: &mut App, seconds: f64) {
    app.player_time = Some(seconds as u64);
    if let Some(duration) = app.player_duration {
        app.player_position = if duration > 0 {
            Some(seconds / duration as f64)
        } else {
            None
        };
    }
}

pub(super) fn handle_error(app: &mut App, message: String) {
    warn!("{}", message);
    app.status.show(message, Instant::now());
}

pub(super) fn handle_tick(app: &mut App) {
    app.status.expire(Instant::now());
}

fn reset_progress(app: &mut App) {
    app.player_duration = None;
    app.player_time = None;
    app.player_position = None;
}
