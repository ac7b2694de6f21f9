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

//! # Anthems.
//!
//! A terminal player for a short, fixed list of recordings.
//!
//! The user picks which items take part, then plays them in list order with
//! play, pause, next and previous controls. When the last included item
//! finishes the player either closes or starts again from the top.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering and the
//!   playback session.
//! * **Background Workers** drive the audio engine and report completion and
//!   progress back as events.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Every input,
//! whether a key press or a completion from the audio worker, arrives on one
//! `std::sync::mpsc` channel and is handled in order on the main thread.

mod commander;
mod components;
mod config;
mod events;
mod logging;
mod model;
mod player;
mod prefs;
mod render;
mod sequencer;
mod session;
mod theme;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::{info, warn};

use crate::{
    commander::Commander,
    components::{CatalogView, StatusLine},
    config::AppConfig,
    events::{AppEvent, apply_ui_updates, process_events},
    player::MpvPlayer,
    prefs::ConfyPreferences,
    sequencer::{PlayButtonState, RepeatPolicy},
    session::Session,
    theme::Theme,
};

#[derive(Parser, Debug)]
#[command(name = "anthems")]
#[command(about = "Play a fixed list of recordings in order")]
struct Args {
    /// Log at debug level and print the log location before starting
    #[arg(long)]
    dev: bool,

    /// Directory containing the media files, overrides the configuration
    #[arg(long, value_name = "DIR")]
    media_dir: Option<String>,
}

/// Application state.
struct App {
    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub session: Session<MpvPlayer, ConfyPreferences>,

    pub catalog_view: CatalogView,
    pub status: StatusLine,
    pub commander: Commander,

    pub play_button: PlayButtonState,
    pub repeat: RepeatPolicy,
    pub player_duration: Option<u64>,
    pub player_time: Option<u64>,
    pub player_position: Option<f64>,
}

impl App {
    /// Create a new instance of application state, restoring the saved
    /// selection and repeat policy.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let catalog = model::probe::load_catalog(config);
        let player = MpvPlayer::new(event_tx.clone())?;
        let (session, updates) = Session::start(catalog, player, ConfyPreferences::open());

        let mut app = Self {
            theme: Theme::default(),
            event_tx,
            event_rx,
            catalog_view: CatalogView::new(session.catalog().len()),
            session,
            status: StatusLine::default(),
            commander: Commander::new(),
            play_button: PlayButtonState::ReadyToPlay,
            repeat: RepeatPolicy::default(),
            player_duration: None,
            player_time: None,
            player_position: None,
        };

        apply_ui_updates(&mut app, updates)?;

        Ok(app)
    }
}

/// The entry point of the application.
///
/// Loads the configuration, starts logging, initializes the application
/// state, manages the terminal lifecycle, and returns an error if any part of
/// the execution fails.
fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = config::load_config();
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    if let Some(media_dir) = args.media_dir {
        config.media_dir = media_dir;
    }

    let _log_guard = logging::init_logging(&PathBuf::from(&config.log_dir), args.dev)?;
    if let Err(e) = &loaded {
        warn!("Failed to load configuration, using defaults: {}", e);
    }
    info!(media_dir = %config.media_dir, items = config.items.len(), "Starting");

    let mut app = App::new(&config).context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    app.session.suspend();

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex).ok();
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is best-effort and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads and enters the main event loop.
///
/// The audio worker is already running, it was spawned with the player.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Application event loop, process events until the user quits or the
    // session closes itself
    process_events(terminal, app)
}
