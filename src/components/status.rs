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

//! Transient status notices.

use std::time::{Duration, Instant};

const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Default)]
pub(crate) struct StatusLine {
    message: Option<(String, Instant)>,
}

impl StatusLine {
    pub(crate) fn show(&mut self, message: String, now: Instant) {
        self.message = Some((message, now));
    }

    pub(crate) fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|(message, _)| message.as_str())
    }

    /// Drops the notice once it has been shown long enough.
    pub(crate) fn expire(&mut self, now: Instant) {
        if let Some((_, shown_at)) = &self.message {
            if now.duration_since(*shown_at) >= NOTICE_TTL {
                self.message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_its_ttl() {
        let start = Instant::now();
        let mut status = StatusLine::default();

        status.show("No next item".to_string(), start);
        status.expire(start + Duration::from_secs(1));
        assert_eq!(status.message(), Some("No next item"));

        status.expire(start + NOTICE_TTL);
        assert_eq!(status.message(), None);
    }

    #[test]
    fn a_new_notice_restarts_the_clock() {
        let start = Instant::now();
        let mut status = StatusLine::default();

        status.show("Nothing selected".to_string(), start);
        status.show("No previous item".to_string(), start + Duration::from_secs(2));
        status.expire(start + Duration::from_secs(4));

        assert_eq!(status.message(), Some("No previous item"));
    }
}
