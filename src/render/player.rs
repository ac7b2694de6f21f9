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

//! Render the player controls.
//!
//! This module renders the now-playing line, the play, navigation and repeat
//! buttons, and the progress bar of the live item.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    render::icons::{ICON_NEXT, ICON_PAUSE, ICON_PLAY, ICON_PREV, ICON_REPEAT, ICON_STOP},
    sequencer::PlayButtonState,
    util,
};

/// Renders the player widget including the now-playing item and controls.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)])
        .split(chunks[0]);

    let icon = match app.play_button {
        PlayButtonState::ReadyToPlay => ICON_STOP,
        PlayButtonState::ReadyToPause => ICON_PLAY,
        PlayButtonState::ReadyToResume => ICON_PAUSE,
    };

    let now_playing = app
        .catalog_view
        .emphasized()
        .and_then(|index| app.session.catalog().item(index).ok());

    let mut track_line = vec![Span::styled(
        format!(" {} ", icon),
        Style::default().add_modifier(Modifier::BOLD),
    )
    .fg(Color::White)];
    match now_playing {
        Some(item) => track_line.push(
            Span::styled(item.label.as_str(), Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.accent_colour),
        ),
        None => track_line.push(Span::raw("Nothing playing")),
    }
    f.render_widget(Paragraph::new(Line::from(track_line)), info_chunks[0]);

    if now_playing.is_some() {
        let duration = app.player_duration.unwrap_or(0);
        let time = app.player_time.unwrap_or(0);

        let time_line = Line::from(vec![
            Span::styled(util::format::format_time(time), Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.accent_colour),
            Span::styled(" / ", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
            Span::styled(util::format::format_time(duration), Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.accent_colour),
        ]);
        f.render_widget(Paragraph::new(time_line).alignment(Alignment::Right), info_chunks[1]);
    }

    let button = |key: &str, text: String| {
        vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(app.theme.hint_colour)),
            Span::styled(text, Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
            Span::raw("   "),
        ]
    };

    let mut controls = Vec::new();
    controls.extend(button("p", app.play_button.label().to_string()));
    controls.extend(button("b", format!("{} Previous", ICON_PREV)));
    controls.extend(button("n", format!("{} Next", ICON_NEXT)));
    controls.extend(button("r", format!("{} {}", ICON_REPEAT, app.repeat.label())));
    f.render_widget(Paragraph::new(Line::from(controls)), chunks[2]);

    let position = app.player_position.unwrap_or(0.0).clamp(0.0, 1.0);

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(position)
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[3]);
}
