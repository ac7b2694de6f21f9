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

use std::path::PathBuf;

use proptest::prelude::*;

use super::*;
use crate::player::fake::{Call, FakePlayer};

fn catalog_with(len: usize, included: &[usize]) -> Catalog {
    let items = (0..len)
        .map(|i| Item::new(format!("Item {}", i), format!("/media/{}.mp3", i)))
        .collect();
    let mut catalog = Catalog::new(items);
    for &i in included {
        catalog.set_included(i, true).unwrap();
    }
    catalog
}

fn sequencer(repeat: RepeatPolicy) -> Sequencer<FakePlayer> {
    Sequencer::new(FakePlayer::default(), repeat)
}

fn live(sequencer: &Sequencer<FakePlayer>) -> PlayerHandle {
    sequencer.snapshot().live.expect("no live player")
}

fn complete(sequencer: &mut Sequencer<FakePlayer>, catalog: &Catalog) -> Vec<UiUpdate> {
    let handle = live(sequencer);
    sequencer.handle(SequencerEvent::PlaybackCompleted(handle), catalog)
}

#[test]
fn initial_state_is_idle() {
    let sequencer = sequencer(RepeatPolicy::RestartAtEnd);
    let state = sequencer.snapshot();

    assert_eq!(state.cursor, None);
    assert_eq!(state.play_button, PlayButtonState::ReadyToPlay);
    assert_eq!(state.repeat, RepeatPolicy::RestartAtEnd);
    assert_eq!(state.live, None);
}

#[test]
fn play_then_next_then_no_next() {
    let catalog = catalog_with(3, &[0, 2]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    let updates = sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    assert_eq!(sequencer.snapshot().cursor, Some(0));
    assert_eq!(sequencer.snapshot().play_button, PlayButtonState::ReadyToPause);
    assert_eq!(
        updates,
        vec![
            UiUpdate::Emphasize(0),
            UiUpdate::SetPlayButton(PlayButtonState::ReadyToPause),
        ]
    );

    let updates = sequencer.handle(SequencerEvent::NextPressed, &catalog);
    assert_eq!(sequencer.snapshot().cursor, Some(2));
    assert_eq!(sequencer.snapshot().play_button, PlayButtonState::ReadyToPause);
    assert_eq!(
        updates,
        vec![
            UiUpdate::Emphasize(2),
            UiUpdate::Deemphasize(0),
            UiUpdate::SetPlayButton(PlayButtonState::ReadyToPause),
        ]
    );

    let before = sequencer.snapshot();
    let updates = sequencer.handle(SequencerEvent::NextPressed, &catalog);
    assert_eq!(updates, vec![UiUpdate::Notice(Notice::NoNextItem)]);
    assert_eq!(sequencer.snapshot(), before);
}

#[test]
fn single_item_loops_when_restarting_at_end() {
    let catalog = catalog_with(3, &[1]);
    let mut sequencer = sequencer(RepeatPolicy::RestartAtEnd);

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    assert_eq!(sequencer.snapshot().cursor, Some(1));
    let first = live(&sequencer);

    let updates = complete(&mut sequencer, &catalog);

    let state = sequencer.snapshot();
    assert_eq!(state.cursor, Some(1));
    assert_eq!(state.play_button, PlayButtonState::ReadyToPause);
    assert_ne!(state.live, Some(first));
    assert_eq!(
        updates,
        vec![
            UiUpdate::Deemphasize(1),
            UiUpdate::Emphasize(1),
            UiUpdate::SetPlayButton(PlayButtonState::ReadyToPause),
        ]
    );
    assert_eq!(
        sequencer.player().created_paths(),
        vec![PathBuf::from("/media/1.mp3"), PathBuf::from("/media/1.mp3")]
    );
}

#[test]
fn stop_at_end_closes_the_session_once() {
    let catalog = catalog_with(2, &[0, 1]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    let updates = complete(&mut sequencer, &catalog);
    assert_eq!(sequencer.snapshot().cursor, Some(1));
    assert!(!updates.contains(&UiUpdate::CloseSession));

    let updates = complete(&mut sequencer, &catalog);

    let closes = updates.iter().filter(|u| **u == UiUpdate::CloseSession).count();
    assert_eq!(closes, 1);
    let state = sequencer.snapshot();
    assert_eq!(state.cursor, None);
    assert_eq!(state.live, None);
    // The host closes, the button is left alone
    assert_eq!(state.play_button, PlayButtonState::ReadyToPause);
    assert!(sequencer.player().alive.is_empty());
}

#[test]
fn play_with_nothing_selected_reports_a_notice() {
    let catalog = catalog_with(4, &[]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    let updates = sequencer.handle(SequencerEvent::PlayPressed, &catalog);

    assert_eq!(updates, vec![UiUpdate::Notice(Notice::NothingSelected)]);
    assert_eq!(sequencer.snapshot().cursor, None);
    assert_eq!(sequencer.snapshot().play_button, PlayButtonState::ReadyToPlay);
    assert!(sequencer.player().calls.is_empty());
}

#[test]
fn play_button_pauses_and_resumes_the_live_player() {
    let catalog = catalog_with(3, &[0, 1]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    let handle = live(&sequencer);

    let updates = sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    assert_eq!(updates, vec![UiUpdate::SetPlayButton(PlayButtonState::ReadyToResume)]);
    assert_eq!(sequencer.player().calls.last(), Some(&Call::Pause(handle)));

    let updates = sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    assert_eq!(updates, vec![UiUpdate::SetPlayButton(PlayButtonState::ReadyToPause)]);
    assert_eq!(sequencer.player().calls.last(), Some(&Call::Resume(handle)));
    assert_eq!(sequencer.snapshot().cursor, Some(0));
}

#[test]
fn next_while_paused_starts_playing() {
    let catalog = catalog_with(3, &[0, 1]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    assert_eq!(sequencer.snapshot().play_button, PlayButtonState::ReadyToResume);
    let paused = live(&sequencer);

    sequencer.handle(SequencerEvent::NextPressed, &catalog);

    assert_eq!(sequencer.snapshot().play_button, PlayButtonState::ReadyToPause);
    assert_eq!(sequencer.snapshot().cursor, Some(1));
    assert!(sequencer.player().calls.contains(&Call::Release(paused)));
}

#[test]
fn previous_walks_back_and_reports_the_start() {
    let catalog = catalog_with(5, &[1, 3, 4]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    let updates = sequencer.handle(SequencerEvent::PreviousPressed, &catalog);
    assert_eq!(updates, vec![UiUpdate::Notice(Notice::NoPreviousItem)]);

    sequencer.handle(SequencerEvent::NextPressed, &catalog);
    sequencer.handle(SequencerEvent::NextPressed, &catalog);
    sequencer.handle(SequencerEvent::NextPressed, &catalog);
    assert_eq!(sequencer.snapshot().cursor, Some(4));

    sequencer.handle(SequencerEvent::PreviousPressed, &catalog);
    assert_eq!(sequencer.snapshot().cursor, Some(3));
    sequencer.handle(SequencerEvent::PreviousPressed, &catalog);
    assert_eq!(sequencer.snapshot().cursor, Some(1));

    let updates = sequencer.handle(SequencerEvent::PreviousPressed, &catalog);
    assert_eq!(updates, vec![UiUpdate::Notice(Notice::NoPreviousItem)]);
    assert_eq!(sequencer.snapshot().cursor, Some(1));
}

#[test]
fn next_visits_included_items_in_order_then_stops() {
    let catalog = catalog_with(7, &[0, 2, 3, 6]);
    let mut sequencer = sequencer(RepeatPolicy::RestartAtEnd);

    let mut visited = Vec::new();
    let mut no_next = 0;
    for _ in 0..6 {
        let updates = sequencer.handle(SequencerEvent::NextPressed, &catalog);
        if updates.contains(&UiUpdate::Notice(Notice::NoNextItem)) {
            no_next += 1;
        } else {
            visited.push(sequencer.snapshot().cursor.unwrap());
        }
    }

    assert_eq!(visited, vec![0, 2, 3, 6]);
    assert_eq!(no_next, 2);
}

#[test]
fn repeat_toggle_twice_restores_the_policy() {
    let catalog = catalog_with(2, &[0]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    let updates = sequencer.handle(SequencerEvent::RepeatTogglePressed, &catalog);
    assert_eq!(updates, vec![UiUpdate::SetRepeatButton(RepeatPolicy::RestartAtEnd)]);

    sequencer.handle(SequencerEvent::RepeatTogglePressed, &catalog);

    let state = sequencer.snapshot();
    assert_eq!(state.repeat, RepeatPolicy::StopAtEnd);
    assert_eq!(state.cursor, None);
    assert_eq!(state.play_button, PlayButtonState::ReadyToPlay);
    assert!(sequencer.player().calls.is_empty());
}

#[test]
fn deselecting_the_playing_item_does_not_stop_it() {
    let mut catalog = catalog_with(3, &[0, 1]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    let handle = live(&sequencer);

    catalog.set_included(0, false).unwrap();

    assert_eq!(sequencer.snapshot().live, Some(handle));
    assert!(sequencer.player().alive.contains(&handle));

    complete(&mut sequencer, &catalog);
    assert_eq!(sequencer.snapshot().cursor, Some(1));
}

#[test]
fn restart_with_empty_selection_returns_to_ready_to_play() {
    let mut catalog = catalog_with(3, &[2]);
    let mut sequencer = sequencer(RepeatPolicy::RestartAtEnd);

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    catalog.set_included(2, false).unwrap();

    let updates = complete(&mut sequencer, &catalog);

    let state = sequencer.snapshot();
    assert_eq!(state.cursor, None);
    assert_eq!(state.live, None);
    assert_eq!(state.play_button, PlayButtonState::ReadyToPlay);
    assert_eq!(
        updates,
        vec![
            UiUpdate::Deemphasize(2),
            UiUpdate::SetPlayButton(PlayButtonState::ReadyToPlay),
            UiUpdate::Notice(Notice::NothingSelected),
        ]
    );
    assert!(!updates.contains(&UiUpdate::CloseSession));
}

#[test]
fn stale_completion_is_ignored() {
    let catalog = catalog_with(3, &[0, 1, 2]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    let first = live(&sequencer);
    sequencer.handle(SequencerEvent::NextPressed, &catalog);

    let before = sequencer.snapshot();
    let updates = sequencer.handle(SequencerEvent::PlaybackCompleted(first), &catalog);

    assert!(updates.is_empty());
    assert_eq!(sequencer.snapshot(), before);
}

#[test]
fn create_failure_falls_back_to_idle() {
    let catalog = catalog_with(3, &[0, 1]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    sequencer.player.fail_create = true;

    let updates = sequencer.handle(SequencerEvent::NextPressed, &catalog);

    let state = sequencer.snapshot();
    assert_eq!(state.cursor, None);
    assert_eq!(state.live, None);
    assert_eq!(state.play_button, PlayButtonState::ReadyToPlay);
    assert!(sequencer.player().alive.is_empty());
    assert!(matches!(
        updates.last(),
        Some(UiUpdate::Notice(Notice::PlaybackFailed(_)))
    ));
    assert!(updates.contains(&UiUpdate::Deemphasize(1)));
}

#[test]
fn start_failure_releases_the_new_instance() {
    let catalog = catalog_with(2, &[0]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);
    sequencer.player.fail_start = true;

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);

    assert_eq!(sequencer.snapshot().live, None);
    assert_eq!(sequencer.snapshot().play_button, PlayButtonState::ReadyToPlay);
    assert!(sequencer.player().alive.is_empty());
}

#[test]
fn playback_failure_of_the_live_player_falls_back_to_idle() {
    let catalog = catalog_with(3, &[0, 1]);
    let mut sequencer = sequencer(RepeatPolicy::RestartAtEnd);

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    let handle = live(&sequencer);

    let updates = sequencer.handle(
        SequencerEvent::PlaybackFailed(handle, "decoding failed".to_string()),
        &catalog,
    );

    assert_eq!(sequencer.snapshot().cursor, None);
    assert_eq!(sequencer.snapshot().play_button, PlayButtonState::ReadyToPlay);
    assert_eq!(
        updates.last(),
        Some(&UiUpdate::Notice(Notice::PlaybackFailed("decoding failed".to_string())))
    );

    // A later press starts over from the first included item
    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    assert_eq!(sequencer.snapshot().cursor, Some(0));
}

#[test]
fn stop_releases_the_live_player() {
    let catalog = catalog_with(3, &[0, 1]);
    let mut sequencer = sequencer(RepeatPolicy::StopAtEnd);

    sequencer.handle(SequencerEvent::PlayPressed, &catalog);
    let updates = sequencer.stop();

    assert!(sequencer.player().alive.is_empty());
    assert_eq!(
        updates,
        vec![
            UiUpdate::Deemphasize(0),
            UiUpdate::SetPlayButton(PlayButtonState::ReadyToPlay),
        ]
    );
}

#[test]
fn repeat_policy_codes_are_stable() {
    assert_eq!(RepeatPolicy::RestartAtEnd.code(), 0);
    assert_eq!(RepeatPolicy::StopAtEnd.code(), 1);
    assert_eq!(RepeatPolicy::from_code(0), RepeatPolicy::RestartAtEnd);
    assert_eq!(RepeatPolicy::from_code(1), RepeatPolicy::StopAtEnd);
    assert_eq!(RepeatPolicy::from_code(42), RepeatPolicy::StopAtEnd);
    assert_eq!(RepeatPolicy::default(), RepeatPolicy::StopAtEnd);
}

fn arbitrary_event() -> impl Strategy<Value = u8> {
    0u8..7
}

proptest! {
    #[test]
    fn at_most_one_player_is_ever_alive(
        flags in prop::collection::vec(any::<bool>(), 1..10),
        events in prop::collection::vec(arbitrary_event(), 1..60),
        restart in any::<bool>(),
    ) {
        let mut catalog = catalog_with(flags.len(), &[]);
        for (i, &flag) in flags.iter().enumerate() {
            catalog.set_included(i, flag).unwrap();
        }
        let repeat = if restart { RepeatPolicy::RestartAtEnd } else { RepeatPolicy::StopAtEnd };
        let mut sequencer = sequencer(repeat);
        let mut toggle = 0;

        for event in events {
            let updates = match event {
                0 => sequencer.handle(SequencerEvent::PlayPressed, &catalog),
                1 => sequencer.handle(SequencerEvent::NextPressed, &catalog),
                2 => sequencer.handle(SequencerEvent::PreviousPressed, &catalog),
                3 => sequencer.handle(SequencerEvent::RepeatTogglePressed, &catalog),
                4 => match sequencer.snapshot().live {
                    Some(handle) => sequencer.handle(SequencerEvent::PlaybackCompleted(handle), &catalog),
                    None => Vec::new(),
                },
                5 => {
                    let i = toggle % flags.len();
                    toggle += 1;
                    let included = catalog.is_included(i).unwrap();
                    catalog.set_included(i, !included).unwrap();
                    Vec::new()
                }
                _ => sequencer.stop(),
            };

            let state = sequencer.snapshot();
            prop_assert!(sequencer.player().alive.len() <= 1);
            prop_assert_eq!(sequencer.player().alive.len(), usize::from(state.live.is_some()));
            if let Some(cursor) = state.cursor {
                prop_assert!(cursor < flags.len());
            }
            // Playing or paused always has an instance behind it
            if state.play_button != PlayButtonState::ReadyToPlay && !updates.contains(&UiUpdate::CloseSession) {
                prop_assert!(state.live.is_some());
            }
            if updates.contains(&UiUpdate::CloseSession) {
                // The host ends the session here
                break;
            }
        }

        prop_assert!(sequencer.player().max_alive <= 1);
    }
}
