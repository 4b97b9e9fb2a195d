//! Timelog line codec.
//!
//! A timelog file is a flat sequence of lines. A well-formed line is
//! `YYYY-MM-DD HH:MM: description`; a blank line separates day groups.
//! Anything else is tolerated (hand-edited and legacy files stay loadable)
//! and acts as a separator when the file is scanned.

use chrono::{NaiveDate, NaiveDateTime};

/// One scanned line of a timelog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// A well-formed `YYYY-MM-DD HH:MM: description` entry.
    Entry {
        timestamp: NaiveDateTime,
        description: String,
    },
    /// Nothing but the newline.
    Blank,
    /// Any other content. Treated like a blank line when scanning.
    Malformed,
}

/// Length of the `YYYY-MM-DD HH:MM` prefix.
const STAMP_LEN: usize = 16;

/// Checks the fixed `YYYY-MM-DD HH:MM` shape: digit positions and
/// separator positions, nothing else.
fn is_stamp(bytes: &[u8]) -> bool {
    if bytes.len() != STAMP_LEN {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b' ',
        13 => *b == b':',
        _ => b.is_ascii_digit(),
    })
}

/// Parses the digits of `s` as a number. Only called on verified digit runs.
fn digits(s: &str) -> u32 {
    s.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Parses one line of a timelog file.
///
/// The trailing newline, if present, is stripped; all other whitespace is
/// preserved as part of the description. Out-of-range components (month 13,
/// hour 25) are rejected as [`ParsedLine::Malformed`], never clamped.
pub fn parse_line(line: &str) -> ParsedLine {
    let line = line.strip_suffix('\n').unwrap_or(line);
    if line.is_empty() {
        return ParsedLine::Blank;
    }

    let bytes = line.as_bytes();
    if bytes.len() < STAMP_LEN + 2
        || !is_stamp(&bytes[..STAMP_LEN])
        || &bytes[STAMP_LEN..STAMP_LEN + 2] != b": "
    {
        return ParsedLine::Malformed;
    }

    let year = line[0..4]
        .bytes()
        .fold(0i32, |acc, b| acc * 10 + i32::from(b - b'0'));
    let month = digits(&line[5..7]);
    let day = digits(&line[8..10]);
    let hour = digits(&line[11..13]);
    let minute = digits(&line[14..16]);

    let timestamp = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0));
    match timestamp {
        Some(timestamp) => ParsedLine::Entry {
            timestamp,
            description: line[STAMP_LEN + 2..].to_string(),
        },
        None => ParsedLine::Malformed,
    }
}

/// Renders an entry back into its canonical line, newline included.
///
/// Round-trip property: `parse_line(&render_line(t, d))` yields the same
/// entry for any minute-resolution timestamp and newline-free description.
pub fn render_line(timestamp: NaiveDateTime, description: &str) -> String {
    format!("{}: {description}\n", timestamp.format("%Y-%m-%d %H:%M"))
}
