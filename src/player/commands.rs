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

//! MPV-backed audio playback engine and event processing.
//!
//! This module provides the core audio playback logic, leveraging `libmpv` for
//! audio decoding and playback control. It manages a background worker thread
//! that bridges the gap between the application's command-based interface and
//! the low-level MPV event system.
//!
//! # Architecture
//!
//! The engine operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`AudioPlayerCommand`]s from the UI thread
//!    to control playback (load, play, pause, release).
//! 2. **Event Channel**: Broadcasts [`AppEvent`]s to notify the UI thread of
//!    completion, failure and progress of the live player instance.
//!
//! Only one file is ever loaded. Commands addressed to a handle that is no
//! longer live are dropped. MPV reports exactly one end-file event per loaded
//! file, in load order, which is how an end-file event is matched back to the
//! handle it belongs to.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    collections::VecDeque,
    sync::mpsc::{self, Receiver, Sender},
    thread,
};
use tracing::{debug, error, warn};

use crate::{events::AppEvent, player::PlayerHandle};

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    Load(PlayerHandle, String),
    Play(PlayerHandle),
    Pause(PlayerHandle),
    Release(PlayerHandle),
}

#[derive(Default)]
struct WorkerState {
    /// The instance that commands and signals currently apply to.
    live: Option<PlayerHandle>,
    /// Loaded files whose end-file event has not been seen yet.
    pending_ends: VecDeque<PlayerHandle>,
}

impl WorkerState {
    fn is_live(&self, handle: PlayerHandle) -> bool {
        self.live == Some(handle)
    }

    /// Matches an end-file event to its handle, taking it if it is live.
    fn end_file(&mut self) -> Option<PlayerHandle> {
        let ended = self.pending_ends.pop_front()?;
        if self.is_live(ended) {
            self.live = None;
            Some(ended)
        } else {
            debug!(handle = %ended, "Ignoring end of a released player");
            None
        }
    }
}

/// Spawns the audio worker thread to process playback commands.
///
/// This function takes ownership of the command receiver and the event sender,
/// moving them into a dedicated background thread.
///
/// If the internal worker returns an error, it is caught here and broadcast as
/// a fatal application event.
///
/// # Arguments
///
/// * `command_rx` - The receiving end of the player command channel.
/// * `event_tx` - The channel used to broadcast playback updates and errors.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx) {
            error!("MPV worker failure: {:?}", e);
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// The primary execution loop for the audio player backend.
///
/// This function initializes a local `libmpv` context and alternates between
/// draining incoming commands and waiting briefly for MPV events.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize, if MPV rejects a
/// transport command, or if the application event channel is closed.
fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;

    let mut state = WorkerState::default();

    loop {
        if !process_commands(&mut handler, &command_rx, &mut state, &event_tx)? {
            debug!("Player command channel closed, stopping worker");
            return Ok(());
        }
        process_mpv_events(&mut handler, &mut state, &event_tx)?;
    }
}

/// Drains and executes all pending commands from the application channel.
///
/// Returns `false` once the application has dropped its player.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &mpsc::Receiver<AudioPlayerCommand>,
    state: &mut WorkerState,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<bool> {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(mpsc::TryRecvError::Empty) => return Ok(true),
            Err(mpsc::TryRecvError::Disconnected) => return Ok(false),
        };

        match command {
            AudioPlayerCommand::Load(handle, filename) => {
                handler.set_property("pause", true)?;
                match handler.command(&["loadfile", &filename, "replace"]) {
                    Ok(()) => {
                        debug!(%handle, "Loaded {}", filename);
                        state.live = Some(handle);
                        state.pending_ends.push_back(handle);
                    }
                    Err(e) => {
                        warn!(%handle, "Failed to load file {}: {:?}", filename, e);
                        state.live = None;
                        event_tx
                            .send(AppEvent::PlaybackFailed(handle, format!("cannot load {}", filename)))
                            .context("Failed to send playback failure event")?;
                    }
                }
            }
            AudioPlayerCommand::Play(handle) if state.is_live(handle) => {
                handler.set_property("pause", false)?;
            }
            AudioPlayerCommand::Pause(handle) if state.is_live(handle) => {
                handler.set_property("pause", true)?;
            }
            AudioPlayerCommand::Release(handle) if state.is_live(handle) => {
                state.live = None;
                handler.command(&["stop"])?;
            }
            command => debug!("Dropping command for a released player: {:?}", command),
        }
    }
}

/// Polls for MPV events and forwards those concerning the live instance.
///
/// This function waits for up to 50ms for an event from the MPV context.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    state: &mut WorkerState,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        let app_event = match mpv_event {
            mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                ("duration", Format::Double(duration)) => {
                    Some(AppEvent::DurationChanged(duration as u64))
                }
                ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                    Some(AppEvent::TimeChanged(seconds))
                }
                _ => None,
            },
            mpv::Event::EndFile(result) => state.end_file().and_then(|handle| match result {
                Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF) => {
                    Some(AppEvent::PlaybackCompleted(handle))
                }
                Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR) => Some(
                    AppEvent::PlaybackFailed(handle, "decoding failed".to_string()),
                ),
                Ok(_) => {
                    debug!(%handle, "Playback ended early");
                    None
                }
                Err(e) => Some(AppEvent::PlaybackFailed(handle, format!("{:?}", e))),
            }),
            _ => None,
        };

        if let Some(event) = app_event {
            event_tx.send(event).context("Failed to send event")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_the_live_file_is_reported() {
        let mut state = WorkerState::default();
        state.live = Some(PlayerHandle(1));
        state.pending_ends.push_back(PlayerHandle(1));

        assert_eq!(state.end_file(), Some(PlayerHandle(1)));
        assert_eq!(state.live, None);
    }

    #[test]
    fn stale_end_after_replacement_is_ignored() {
        let mut state = WorkerState::default();
        state.pending_ends.push_back(PlayerHandle(1));
        state.pending_ends.push_back(PlayerHandle(2));
        state.live = Some(PlayerHandle(2));

        // The end of file 1 arrives after file 2 was loaded
        assert_eq!(state.end_file(), None);
        assert_eq!(state.live, Some(PlayerHandle(2)));

        assert_eq!(state.end_file(), Some(PlayerHandle(2)));
    }

    #[test]
    fn end_file_without_a_load_is_ignored() {
        let mut state = WorkerState::default();

        assert_eq!(state.end_file(), None);
    }
}
