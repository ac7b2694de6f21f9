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

//! Playback sequencing.
//!
//! The [`Sequencer`] walks the included items of the [`Catalog`] in catalog
//! order. It owns the cursor, the play-button state, the repeat policy and
//! the single live player instance, and it is the only place that creates or
//! releases player instances.
//!
//! Every input, whether a button press or a completion signal from the
//! player, is a [`SequencerEvent`] handled by [`Sequencer::handle`]. Each
//! transition returns the [`UiUpdate`]s the front end must apply, and the
//! front end renders from [`Sequencer::snapshot`].
//!
//! Item changes always release the live instance before a new one is
//! created, so at most one instance is ever alive.

#[cfg(test)]
mod tests;

use std::fmt;

use tracing::{debug, info, warn};

use crate::{
    model::{Catalog, Item},
    player::{Player, PlayerError, PlayerHandle},
};

/// What pressing the play button will do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayButtonState {
    ReadyToPlay,
    /// Currently playing.
    ReadyToPause,
    /// Currently paused.
    ReadyToResume,
}

impl PlayButtonState {
    pub(crate) fn label(self) -> &'static str {
        match self {
            PlayButtonState::ReadyToPlay => "Play",
            PlayButtonState::ReadyToPause => "Pause",
            PlayButtonState::ReadyToResume => "Resume",
        }
    }
}

/// What happens when playback runs past the last included item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum RepeatPolicy {
    #[default]
    StopAtEnd,
    RestartAtEnd,
}

impl RepeatPolicy {
    const RESTART_CODE: i64 = 0;
    const STOP_CODE: i64 = 1;

    pub(crate) fn toggled(self) -> Self {
        match self {
            RepeatPolicy::StopAtEnd => RepeatPolicy::RestartAtEnd,
            RepeatPolicy::RestartAtEnd => RepeatPolicy::StopAtEnd,
        }
    }

    /// Stable storage encoding.
    pub(crate) fn code(self) -> i64 {
        match self {
            RepeatPolicy::RestartAtEnd => Self::RESTART_CODE,
            RepeatPolicy::StopAtEnd => Self::STOP_CODE,
        }
    }

    pub(crate) fn from_code(code: i64) -> Self {
        match code {
            Self::RESTART_CODE => RepeatPolicy::RestartAtEnd,
            Self::STOP_CODE => RepeatPolicy::StopAtEnd,
            other => {
                warn!("Unknown repeat policy code {}, stopping at end", other);
                RepeatPolicy::StopAtEnd
            }
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            RepeatPolicy::StopAtEnd => "After finish: close",
            RepeatPolicy::RestartAtEnd => "After finish: repeat",
        }
    }
}

/// Non-fatal conditions reported to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    NothingSelected,
    NoNextItem,
    NoPreviousItem,
    PlaybackFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NothingSelected => write!(f, "Nothing selected"),
            Notice::NoNextItem => write!(f, "No next item"),
            Notice::NoPreviousItem => write!(f, "No previous item"),
            Notice::PlaybackFailed(reason) => write!(f, "Playback failed: {}", reason),
        }
    }
}

/// Changes the front end must apply after a transition, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum UiUpdate {
    SetPlayButton(PlayButtonState),
    SetRepeatButton(RepeatPolicy),
    Emphasize(usize),
    Deemphasize(usize),
    Notice(Notice),
    CloseSession,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SequencerEvent {
    PlayPressed,
    NextPressed,
    PreviousPressed,
    RepeatTogglePressed,
    PlaybackCompleted(PlayerHandle),
    PlaybackFailed(PlayerHandle, String),
}

/// The sequencer's observable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SequencerState {
    pub(crate) cursor: Option<usize>,
    pub(crate) play_button: PlayButtonState,
    pub(crate) repeat: RepeatPolicy,
    pub(crate) live: Option<PlayerHandle>,
}

impl SequencerState {
    fn new(repeat: RepeatPolicy) -> Self {
        Self {
            cursor: None,
            play_button: PlayButtonState::ReadyToPlay,
            repeat,
            live: None,
        }
    }
}

pub(crate) struct Sequencer<P: Player> {
    player: P,
    state: SequencerState,
}

impl<P: Player> Sequencer<P> {
    pub(crate) fn new(player: P, repeat: RepeatPolicy) -> Self {
        Self {
            player,
            state: SequencerState::new(repeat),
        }
    }

    pub(crate) fn snapshot(&self) -> SequencerState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn player(&self) -> &P {
        &self.player
    }

    /// Applies one event and returns the resulting UI updates.
    pub(crate) fn handle(&mut self, event: SequencerEvent, catalog: &Catalog) -> Vec<UiUpdate> {
        debug!(?event, state = ?self.state, "Sequencer event");

        let mut updates = Vec::new();
        match event {
            SequencerEvent::PlayPressed => self.play_pressed(catalog, &mut updates),
            SequencerEvent::NextPressed => self.next_pressed(catalog, &mut updates),
            SequencerEvent::PreviousPressed => self.previous_pressed(catalog, &mut updates),
            SequencerEvent::RepeatTogglePressed => self.repeat_toggle_pressed(&mut updates),
            SequencerEvent::PlaybackCompleted(handle) => {
                self.playback_completed(handle, catalog, &mut updates)
            }
            SequencerEvent::PlaybackFailed(handle, reason) => {
                self.playback_failed(handle, reason, &mut updates)
            }
        }
        updates
    }

    /// Releases the live instance and returns to idle.
    pub(crate) fn stop(&mut self) -> Vec<UiUpdate> {
        let mut updates = Vec::new();
        self.release_live();
        self.clear_cursor(&mut updates);
        self.set_play_button(PlayButtonState::ReadyToPlay, &mut updates);
        updates
    }

    fn play_pressed(&mut self, catalog: &Catalog, updates: &mut Vec<UiUpdate>) {
        match self.state.play_button {
            PlayButtonState::ReadyToPlay => match catalog.next_included(self.state.cursor) {
                Some(index) => self.play_item(index, catalog, updates),
                None if self.state.cursor.is_none() => {
                    updates.push(UiUpdate::Notice(Notice::NothingSelected))
                }
                None => updates.push(UiUpdate::Notice(Notice::NoNextItem)),
            },
            PlayButtonState::ReadyToPause => {
                let result = self.with_live(|player, handle| player.pause(handle));
                self.after_transport(result, PlayButtonState::ReadyToResume, updates);
            }
            PlayButtonState::ReadyToResume => {
                let result = self.with_live(|player, handle| player.resume(handle));
                self.after_transport(result, PlayButtonState::ReadyToPause, updates);
            }
        }
    }

    fn next_pressed(&mut self, catalog: &Catalog, updates: &mut Vec<UiUpdate>) {
        match catalog.next_included(self.state.cursor) {
            Some(index) => self.play_item(index, catalog, updates),
            None => updates.push(UiUpdate::Notice(Notice::NoNextItem)),
        }
    }

    fn previous_pressed(&mut self, catalog: &Catalog, updates: &mut Vec<UiUpdate>) {
        match catalog.previous_included(self.state.cursor) {
            Some(index) => self.play_item(index, catalog, updates),
            None => updates.push(UiUpdate::Notice(Notice::NoPreviousItem)),
        }
    }

    fn repeat_toggle_pressed(&mut self, updates: &mut Vec<UiUpdate>) {
        self.state.repeat = self.state.repeat.toggled();
        info!(repeat = ?self.state.repeat, "Repeat policy changed");
        updates.push(UiUpdate::SetRepeatButton(self.state.repeat));
    }

    fn playback_completed(&mut self, handle: PlayerHandle, catalog: &Catalog, updates: &mut Vec<UiUpdate>) {
        if self.state.live != Some(handle) {
            debug!(%handle, "Ignoring completion of a released player");
            return;
        }

        self.release_live();

        if let Some(index) = catalog.next_included(self.state.cursor) {
            self.play_item(index, catalog, updates);
            return;
        }

        self.clear_cursor(updates);

        match self.state.repeat {
            RepeatPolicy::RestartAtEnd => match catalog.next_included(None) {
                Some(index) => {
                    info!("End of selection, restarting");
                    self.play_item(index, catalog, updates);
                }
                None => {
                    // Nothing left to restart with, so stop looking like we play
                    info!("End of selection, nothing included to restart");
                    self.set_play_button(PlayButtonState::ReadyToPlay, updates);
                    updates.push(UiUpdate::Notice(Notice::NothingSelected));
                }
            },
            RepeatPolicy::StopAtEnd => {
                info!("End of selection, closing session");
                updates.push(UiUpdate::CloseSession);
            }
        }
    }

    fn playback_failed(&mut self, handle: PlayerHandle, reason: String, updates: &mut Vec<UiUpdate>) {
        if self.state.live != Some(handle) {
            debug!(%handle, "Ignoring failure of a released player: {}", reason);
            return;
        }

        warn!(%handle, "Playback failed: {}", reason);
        self.fall_back_to_idle(Notice::PlaybackFailed(reason), updates);
    }

    /// Moves the cursor to an item and starts a fresh player for it.
    fn play_item(&mut self, index: usize, catalog: &Catalog, updates: &mut Vec<UiUpdate>) {
        let item = item_at(catalog, index);

        self.release_live();
        self.move_cursor(index, updates);

        match self.start_player(item) {
            Ok(handle) => {
                info!(index, %handle, "Playing {}", item.label);
                self.state.live = Some(handle);
                self.set_play_button(PlayButtonState::ReadyToPause, updates);
            }
            Err(e) => {
                warn!(index, "Unable to play {}: {}", item.label, e);
                self.fall_back_to_idle(Notice::PlaybackFailed(e.to_string()), updates);
            }
        }
    }

    fn start_player(&mut self, item: &Item) -> Result<PlayerHandle, PlayerError> {
        let handle = self.player.create(item)?;
        if let Err(e) = self.player.start(handle) {
            self.release(handle);
            return Err(e);
        }

        Ok(handle)
    }

    fn with_live(
        &mut self,
        command: impl FnOnce(&mut P, PlayerHandle) -> Result<(), PlayerError>,
    ) -> Result<(), PlayerError> {
        let Some(handle) = self.state.live else {
            return Err(PlayerError::Disconnected);
        };

        command(&mut self.player, handle)
    }

    fn after_transport(
        &mut self,
        result: Result<(), PlayerError>,
        next: PlayButtonState,
        updates: &mut Vec<UiUpdate>,
    ) {
        match result {
            Ok(()) => self.set_play_button(next, updates),
            Err(e) => {
                warn!("Transport command failed: {}", e);
                self.fall_back_to_idle(Notice::PlaybackFailed(e.to_string()), updates);
            }
        }
    }

    fn fall_back_to_idle(&mut self, notice: Notice, updates: &mut Vec<UiUpdate>) {
        self.release_live();
        self.clear_cursor(updates);
        self.set_play_button(PlayButtonState::ReadyToPlay, updates);
        updates.push(UiUpdate::Notice(notice));
    }

    fn release_live(&mut self) {
        if let Some(handle) = self.state.live.take() {
            self.release(handle);
        }
    }

    // The instance is gone from our side either way.
    fn release(&mut self, handle: PlayerHandle) {
        if let Err(e) = self.player.release(handle) {
            warn!(%handle, "Failed to release player: {}", e);
        }
    }

    fn move_cursor(&mut self, index: usize, updates: &mut Vec<UiUpdate>) {
        let previous = self.state.cursor.replace(index);

        updates.push(UiUpdate::Emphasize(index));
        if let Some(previous) = previous.filter(|&p| p != index) {
            updates.push(UiUpdate::Deemphasize(previous));
        }
    }

    fn clear_cursor(&mut self, updates: &mut Vec<UiUpdate>) {
        if let Some(previous) = self.state.cursor.take() {
            updates.push(UiUpdate::Deemphasize(previous));
        }
    }

    fn set_play_button(&mut self, state: PlayButtonState, updates: &mut Vec<UiUpdate>) {
        self.state.play_button = state;
        updates.push(UiUpdate::SetPlayButton(state));
    }
}

fn item_at(catalog: &Catalog, index: usize) -> &Item {
    match catalog.item(index) {
        Ok(item) => item,
        Err(e) => panic!("sequencer cursor invariant violated: {}", e),
    }
}
