//! Thread view
//!
//! Turns the message list plus the typing flag into rows, and rows into
//! text. User bubbles sit on the right, the peer's on the left.

use chrono::{DateTime, Utc};

use crate::cli::TimeStyle;
use crate::consts::{CLOCK_FORMAT, MAX_WIDTH};
use crate::core::{DeliveryStatus, Message};
use crate::utils::Timezone;

use super::format::{CYAN, DIM, GREEN, ITALIC, display_width, format_relative, paint, wrap_text};

const SEEN_MARKER: &str = "✓✓";
const TYPING_DOTS: &str = "• • •";

/// One visual row of the thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Row<'a> {
    Message(&'a Message),
    Typing,
}

/// Rows for a thread: every message in order, then a typing row if a reply
/// is outstanding. Cloning the iterator restarts it.
pub(crate) fn rows<'a>(
    messages: &'a [Message],
    typing: bool,
) -> impl Iterator<Item = Row<'a>> + Clone + 'a {
    messages
        .iter()
        .map(Row::Message)
        .chain(typing.then_some(Row::Typing))
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewOptions {
    pub(crate) use_color: bool,
    pub(crate) time_style: TimeStyle,
    pub(crate) timezone: Timezone,
    pub(crate) width: usize,
}

pub(crate) struct ThreadView<'a> {
    peer: &'a str,
    options: ViewOptions,
}

impl<'a> ThreadView<'a> {
    pub(crate) fn new(peer: &'a str, options: ViewOptions) -> Self {
        Self { peer, options }
    }

    fn width(&self) -> usize {
        self.options.width.min(MAX_WIDTH)
    }

    fn bubble_width(&self) -> usize {
        (self.width() * 7 / 10).max(8)
    }

    /// Peer name and presence, followed by a rule
    pub(crate) fn header(&self, typing: bool) -> String {
        let use_color = self.options.use_color;
        let presence = if typing {
            paint("typing...", &format!("{ITALIC}{CYAN}"), use_color)
        } else {
            paint("online", DIM, use_color)
        };
        let rule = "─".repeat(self.width());
        format!("{} · {}\n{}", self.peer, presence, paint(&rule, DIM, use_color))
    }

    fn time_label(&self, message: &Message, now: DateTime<Utc>) -> String {
        match self.options.time_style {
            TimeStyle::Clock => self.options.timezone.format(message.timestamp, CLOCK_FORMAT),
            TimeStyle::Relative => format_relative(message.timestamp, now),
        }
    }

    /// Render a single row as one or more lines, without a trailing newline
    pub(crate) fn render_row(&self, row: Row<'_>, now: DateTime<Utc>) -> String {
        let use_color = self.options.use_color;
        let Row::Message(message) = row else {
            return paint(TYPING_DOTS, DIM, use_color);
        };

        let time = self.time_label(message, now);
        let mut lines = Vec::new();

        if message.is_from_user() {
            let seen = message.status == Some(DeliveryStatus::Seen);
            for line in wrap_text(&message.text, self.bubble_width()) {
                let pad = self.width().saturating_sub(display_width(&line));
                lines.push(format!("{}{}", " ".repeat(pad), paint(&line, GREEN, use_color)));
            }
            let meta_width = display_width(&time) + if seen { 1 + display_width(SEEN_MARKER) } else { 0 };
            let mut meta = paint(&time, DIM, use_color);
            if seen {
                meta.push(' ');
                meta.push_str(&paint(SEEN_MARKER, CYAN, use_color));
            }
            let pad = self.width().saturating_sub(meta_width);
            lines.push(format!("{}{}", " ".repeat(pad), meta));
        } else {
            lines.extend(wrap_text(&message.text, self.bubble_width()));
            lines.push(paint(&time, DIM, use_color));
        }

        lines.join("\n")
    }

    /// Header plus every row, separated by blank lines
    pub(crate) fn render(&self, messages: &[Message], typing: bool, now: DateTime<Utc>) -> String {
        let mut out = self.header(typing);
        for row in rows(messages, typing) {
            out.push_str("\n\n");
            out.push_str(&self.render_row(row, now));
        }
        out
    }
}
