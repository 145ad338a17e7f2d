// Presentation conventions for a single todo line

use chrono::{DateTime, Local, TimeZone};

/// chrono format of the optional `[MM/DD HH:MM]` stamp
pub const STAMP_FORMAT: &str = "%m/%d %H:%M";

/// Strip the line terminator for display
pub fn display_text(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// A todo line split into its optional timestamp and its text
///
/// Only some front-ends write stamps, so the store never relies on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    pub stamp: Option<&'a str>,
    pub text: &'a str,
}

impl<'a> Entry<'a> {
    /// Parse `[stamp] text`; anything else is plain text
    pub fn parse(line: &'a str) -> Self {
        let line = display_text(line);

        if let Some(rest) = line.strip_prefix('[')
            && let Some(end) = rest.find(']')
        {
            let text = &rest[end + 1..];
            return Self {
                stamp: Some(&rest[..end]),
                text: text.strip_prefix(' ').unwrap_or(text),
            };
        }

        Self { stamp: None, text: line }
    }

    /// Render back to a stored line without terminator
    pub fn render(&self) -> String {
        match self.stamp {
            Some(stamp) => format!("[{}] {}", stamp, self.text),
            None => self.text.to_string(),
        }
    }
}

/// Prefix `text` with a stamp for `at`
pub fn stamp_text<Tz: TimeZone>(text: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] {}", at.format(STAMP_FORMAT), text)
}

/// Prefix `text` with a stamp for the current local time
pub fn stamp_now(text: &str) -> String {
    stamp_text(text, &Local::now())
}

/// Replace the text of `line`, keeping its stamp if it has one
pub fn replace_text(line: &str, new_text: &str) -> String {
    let entry = Entry::parse(line);
    Entry {
        stamp: entry.stamp,
        text: new_text,
    }
    .render()
}
