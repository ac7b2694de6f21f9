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

//! Audio playback control.
//!
//! This module defines the [`Player`] capability the sequencer drives, and
//! [`MpvPlayer`], the production implementation. `MpvPlayer` manages a
//! background worker thread that interfaces with the underlying audio library
//! (MPV), ensuring that audio operations do not block the main application
//! thread.
//!
//! Every call to [`Player::create`] mints a fresh [`PlayerHandle`]. Completion
//! and failure signals are delivered on the application event queue tagged
//! with the handle they belong to, so a late signal from a released instance
//! can be told apart from one for the live instance.

mod commands;
#[cfg(test)]
pub(crate) mod fake;

use std::{
    fmt,
    path::PathBuf,
    sync::mpsc::{self, Sender},
};

use anyhow::Result;
use thiserror::Error;

use crate::{events::AppEvent, model::Item, player::commands::AudioPlayerCommand};

/// Identifies one player instance, from creation until release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PlayerHandle(pub(crate) u64);

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub(crate) enum PlayerError {
    #[error("media file not found: {}", .0.display())]
    MissingMedia(PathBuf),

    #[error("audio engine is not running")]
    Disconnected,
}

/// An audio resource that renders one item at a time.
///
/// Commands are fire-and-forget, success only means the command was accepted.
/// Natural end of media is reported later through
/// [`AppEvent::PlaybackCompleted`], never for an instance that was released.
pub(crate) trait Player {
    /// Prepares playback of an item, without starting it.
    fn create(&mut self, item: &Item) -> Result<PlayerHandle, PlayerError>;

    fn start(&mut self, handle: PlayerHandle) -> Result<(), PlayerError>;

    fn pause(&mut self, handle: PlayerHandle) -> Result<(), PlayerError>;

    fn resume(&mut self, handle: PlayerHandle) -> Result<(), PlayerError>;

    /// Stops playback and frees the instance, no completion will follow.
    fn release(&mut self, handle: PlayerHandle) -> Result<(), PlayerError>;
}

/// A handle to the MPV audio playback engine.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread.
pub(crate) struct MpvPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<AudioPlayerCommand>,
    next_handle: u64,
}

impl MpvPlayer {
    /// Spawns the audio worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (completion,
    ///   progress updates and errors) back to the main event loop.
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx);

        Ok(Self {
            command_tx,
            next_handle: 1,
        })
    }

    fn send(&self, command: AudioPlayerCommand) -> Result<(), PlayerError> {
        self.command_tx
            .send(command)
            .map_err(|_| PlayerError::Disconnected)
    }
}

impl Player for MpvPlayer {
    fn create(&mut self, item: &Item) -> Result<PlayerHandle, PlayerError> {
        if !item.path.exists() {
            return Err(PlayerError::MissingMedia(item.path.clone()));
        }

        let handle = PlayerHandle(self.next_handle);
        self.next_handle += 1;

        let filename = item.path.to_string_lossy().into_owned();
        self.send(AudioPlayerCommand::Load(handle, filename))?;

        Ok(handle)
    }

    fn start(&mut self, handle: PlayerHandle) -> Result<(), PlayerError> {
        self.send(AudioPlayerCommand::Play(handle))
    }

    fn pause(&mut self, handle: PlayerHandle) -> Result<(), PlayerError> {
        self.send(AudioPlayerCommand::Pause(handle))
    }

    fn resume(&mut self, handle: PlayerHandle) -> Result<(), PlayerError> {
        self.send(AudioPlayerCommand::Play(handle))
    }

    fn release(&mut self, handle: PlayerHandle) -> Result<(), PlayerError> {
        self.send(AudioPlayerCommand::Release(handle))
    }
}
