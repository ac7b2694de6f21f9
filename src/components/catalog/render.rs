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

//! UI rendering logic for the catalog list.
//!
//! This module draws one row per catalog item with its include checkbox,
//! number, label and duration. The emphasized item is drawn in the accent
//! colour, bold and italic.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    prelude::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::{components::CatalogView, model::Catalog, theme::Theme, util};

impl CatalogView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, catalog: &Catalog, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let header = Paragraph::new(format!(
            "Anthems | {} items | {} selected",
            catalog.len(),
            catalog.included_count()
        ))
        .block(header_block);

        f.render_widget(header, chunks[0]);

        let rows = catalog.items().iter().enumerate().map(|(index, item)| {
            let included = catalog.is_included(index).unwrap_or(false);
            let checkbox = if included {
                Line::from("[x]").style(Style::default().fg(theme.accent_colour))
            } else {
                Line::from("[ ]").style(Style::default().fg(theme.table_excluded_fg))
            };

            let label_style = if self.emphasized == Some(index) {
                Style::default()
                    .fg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC)
            } else if included {
                Style::default().fg(theme.table_label_fg)
            } else {
                Style::default().fg(theme.table_excluded_fg)
            };

            let duration = item
                .duration
                .map(|d| util::format::format_time(d.as_secs()))
                .unwrap_or_else(|| "--:--".to_string());

            Row::new(vec![
                Cell::from(checkbox),
                Cell::from(
                    Line::from(format!("{}", index + 1))
                        .style(Style::default().fg(theme.table_number_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(Line::from(item.label.as_str()).style(label_style)),
                Cell::from(
                    Line::from(duration)
                        .style(Style::default().fg(theme.table_time_fg))
                        .alignment(Alignment::Right),
                ),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(20),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from(Line::from("#").alignment(Alignment::Right)),
                Cell::from("Title"),
                Cell::from(Line::from("Time").alignment(Alignment::Right)),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .block(Block::default().padding(Padding::horizontal(1)))
        .column_spacing(2);

        f.render_stateful_widget(table, chunks[1], &mut self.table_state);
    }
}
