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

//! Scripted player used by the tests.

use std::{collections::HashSet, path::PathBuf};

use crate::{
    model::Item,
    player::{Player, PlayerError, PlayerHandle},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Create(PlayerHandle, PathBuf),
    Start(PlayerHandle),
    Pause(PlayerHandle),
    Resume(PlayerHandle),
    Release(PlayerHandle),
}

/// Records every command and tracks which instances are still alive.
#[derive(Default)]
pub(crate) struct FakePlayer {
    next_handle: u64,
    pub(crate) calls: Vec<Call>,
    pub(crate) alive: HashSet<PlayerHandle>,
    pub(crate) max_alive: usize,
    pub(crate) fail_create: bool,
    pub(crate) fail_start: bool,
}

impl FakePlayer {
    pub(crate) fn created_paths(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Create(_, path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    fn check_alive(&self, handle: PlayerHandle) {
        assert!(self.alive.contains(&handle), "command for dead player {}", handle);
    }
}

impl Player for FakePlayer {
    fn create(&mut self, item: &Item) -> Result<PlayerHandle, PlayerError> {
        if self.fail_create {
            return Err(PlayerError::MissingMedia(item.path.clone()));
        }

        self.next_handle += 1;
        let handle = PlayerHandle(self.next_handle);
        self.alive.insert(handle);
        self.max_alive = self.max_alive.max(self.alive.len());
        self.calls.push(Call::Create(handle, item.path.clone()));

        Ok(handle)
    }

    fn start(&mut self, handle: PlayerHandle) -> Result<(), PlayerError> {
        self.check_alive(handle);
        self.calls.push(Call::Start(handle));
        if self.fail_start {
            return Err(PlayerError::Disconnected);
        }

        Ok(())
    }

    fn pause(&mut self, handle: PlayerHandle) -> Result<(), PlayerError> {
        self.check_alive(handle);
        self.calls.push(Call::Pause(handle));
        Ok(())
    }

    fn resume(&mut self, handle: PlayerHandle) -> Result<(), PlayerError> {
        self.check_alive(handle);
        self.calls.push(Call::Resume(handle));
        Ok(())
    }

    fn release(&mut self, handle: PlayerHandle) -> Result<(), PlayerError> {
        assert!(self.alive.remove(&handle), "double release of {}", handle);
        self.calls.push(Call::Release(handle));
        Ok(())
    }
}
