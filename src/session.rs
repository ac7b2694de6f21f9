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

//! Session lifecycle.
//!
//! A [`Session`] ties the catalog, the sequencer and the preference store
//! together. Selection flags and the repeat policy are loaded once when the
//! session starts and flushed once when it is suspended. Suspension also
//! runs when the session is dropped, so preferences are written even when the
//! application unwinds from an error.

use tracing::{debug, info, warn};

use crate::{
    model::{Catalog, CatalogError},
    player::Player,
    prefs::{self, PreferenceStore},
    sequencer::{RepeatPolicy, Sequencer, SequencerEvent, SequencerState, UiUpdate},
};

pub(crate) struct Session<P: Player, S: PreferenceStore> {
    catalog: Catalog,
    sequencer: Sequencer<P>,
    store: S,
    suspended: bool,
}

impl<P: Player, S: PreferenceStore> Session<P, S> {
    /// Restores the saved selection and repeat policy and returns the session
    /// with the updates needed to draw its initial state.
    pub(crate) fn start(mut catalog: Catalog, player: P, store: S) -> (Self, Vec<UiUpdate>) {
        for index in 0..catalog.len() {
            let included = store.load_bool(&prefs::item_key(index));
            if let Err(e) = catalog.set_included(index, included) {
                unreachable!("restoring selection: {}", e);
            }
        }

        let repeat = RepeatPolicy::from_code(
            store.load_int(prefs::REPEAT_KEY, RepeatPolicy::StopAtEnd.code()),
        );

        info!(
            items = catalog.len(),
            included = catalog.included_count(),
            ?repeat,
            "Session started"
        );

        let sequencer = Sequencer::new(player, repeat);
        let state = sequencer.snapshot();
        let updates = vec![
            UiUpdate::SetPlayButton(state.play_button),
            UiUpdate::SetRepeatButton(state.repeat),
        ];

        let session = Self {
            catalog,
            sequencer,
            store,
            suspended: false,
        };

        (session, updates)
    }

    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(crate) fn snapshot(&self) -> SequencerState {
        self.sequencer.snapshot()
    }

    pub(crate) fn handle(&mut self, event: SequencerEvent) -> Vec<UiUpdate> {
        self.sequencer.handle(event, &self.catalog)
    }

    /// Changes whether an item takes part in traversal.
    pub(crate) fn set_included(&mut self, index: usize, included: bool) -> Result<(), CatalogError> {
        self.catalog.set_included(index, included)?;
        debug!(index, included, "Selection changed");

        Ok(())
    }

    /// Stops playback and flushes the selection and repeat policy.
    ///
    /// Failing to persist is logged and otherwise ignored. Calling this again
    /// after a successful suspend does nothing.
    pub(crate) fn suspend(&mut self) -> Vec<UiUpdate> {
        if self.suspended {
            return Vec::new();
        }
        self.suspended = true;

        let updates = self.sequencer.stop();
        self.save_preferences();

        info!("Session suspended");
        updates
    }

    fn save_preferences(&mut self) {
        for index in 0..self.catalog.len() {
            let included = self.catalog.is_included(index).unwrap_or(false);
            self.store.save_bool(&prefs::item_key(index), included);
        }
        self.store
            .save_int(prefs::REPEAT_KEY, self.sequencer.snapshot().repeat.code());

        if let Err(e) = self.store.commit() {
            warn!("Preferences were not saved: {}", e);
        }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn player(&self) -> &P {
        self.sequencer.player()
    }
}

impl<P: Player, S: PreferenceStore> Drop for Session<P, S> {
    fn drop(&mut self) {
        if !self.suspended {
            debug!("Session dropped without suspend");
            self.suspend();
        }
    }
}
