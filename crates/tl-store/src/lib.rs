//! Storage layer for the timelog.
//!
//! A timelog is an append-only text file, one entry per line. An entry
//! records the moment an activity *ended*; the activity's start is the end
//! of the previous entry in the same day group. Blank lines separate day
//! groups, so the first entry after a separator only marks when work
//! started.
//!
//! [`Timelog::load`] replays the whole file into a list of [`Activity`]
//! values, and [`Timelog::record`] appends new entries while keeping the
//! in-memory list and the on-disk bytes in step. No prior bytes are ever
//! rewritten; a crash mid-write can at worst lose the final line.
//!
//! Single-writer access is assumed. Callers that share the file between
//! processes should hold an exclusive lock for the lifetime of the store.

use std::io::{BufRead, Write};

use chrono::NaiveDateTime;
use thiserror::Error;

use tl_core::activity::{Activity, DayBoundary};
use tl_core::line::{ParsedLine, parse_line, render_line};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying stream.
    #[error("timelog I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The caller tried to record an empty or whitespace-only description.
    #[error("activity description is empty")]
    EmptyDescription,
}

/// The activity store: reconstructed history plus the append sink.
pub struct Timelog<W> {
    activities: Vec<Activity>,
    /// A recorded start that has not been paired with a closing entry yet.
    /// Consumed on the next successful pairing.
    next_start: Option<NaiveDateTime>,
    boundary: DayBoundary,
    sink: W,
}

impl<W: Write> Timelog<W> {
    /// Reconstructs activity history from `history` and takes ownership of
    /// the sink new entries will be appended to.
    ///
    /// Blank and malformed lines are not errors: each one resets the
    /// pending start, forcing the next entry to open a new interval.
    pub fn load<R: BufRead>(history: R, sink: W, boundary: DayBoundary) -> Result<Self, StoreError> {
        let mut activities = Vec::new();
        let mut pending_start = None;

        for line in history.lines() {
            match parse_line(&line?) {
                ParsedLine::Entry {
                    timestamp,
                    description,
                } => {
                    if let Some(start_time) = pending_start {
                        activities.push(Activity {
                            start_time,
                            end_time: timestamp,
                            description,
                        });
                    }
                    pending_start = Some(timestamp);
                }
                ParsedLine::Blank | ParsedLine::Malformed => pending_start = None,
            }
        }

        tracing::debug!(
            activities = activities.len(),
            trailing_start = pending_start.is_some(),
            "loaded timelog"
        );
        Ok(Self {
            activities,
            next_start: pending_start,
            boundary,
            sink,
        })
    }

    /// Records an activity that finished at `end_time`.
    ///
    /// The start of the interval is the pending start if one exists,
    /// otherwise the end of the last activity. When the day-boundary rule
    /// says `end_time` belongs to a new day (or there is no start at all),
    /// the entry becomes a bare start marker instead: a blank separator is
    /// written after any previous entry and no activity is added. The
    /// rendered entry line is always appended.
    pub fn record(&mut self, description: &str, end_time: NaiveDateTime) -> Result<(), StoreError> {
        if description.trim().is_empty() {
            return Err(StoreError::EmptyDescription);
        }

        let candidate = self
            .next_start
            .take()
            .or_else(|| self.activities.last().map(|a| a.end_time));
        let start_time =
            candidate.filter(|&start| !self.boundary.starts_new_day(start, end_time));

        if let Some(start_time) = start_time {
            self.activities.push(Activity {
                start_time,
                end_time,
                description: description.to_string(),
            });
        } else {
            self.next_start = Some(end_time);
            if candidate.is_some() || !self.activities.is_empty() {
                self.sink.write_all(b"\n")?;
            }
        }

        self.sink
            .write_all(render_line(end_time, description).as_bytes())?;
        self.sink.flush()?;
        Ok(())
    }

    /// Read-only snapshot of the reconstructed activities, ordered by
    /// start time.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// The trailing unmatched start, if any.
    pub fn next_start(&self) -> Option<NaiveDateTime> {
        self.next_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Read;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn load(history: &str) -> Timelog<Vec<u8>> {
        Timelog::load(history.as_bytes(), Vec::new(), DayBoundary::default()).unwrap()
    }

    fn sink(store: &Timelog<Vec<u8>>) -> &str {
        std::str::from_utf8(&store.sink).unwrap()
    }

    #[test]
    fn load_empty_stream() {
        let store = load("");
        assert!(store.activities().is_empty());
        assert_eq!(store.next_start(), None);
    }

    #[test]
    fn single_entry_is_a_start_marker() {
        let store = load("2012-01-31 10:59: Arrived\n");
        assert!(store.activities().is_empty());
        assert_eq!(store.next_start(), Some(ts(2012, 1, 31, 10, 59)));
    }

    #[test]
    fn adjacent_entries_form_an_activity() {
        let store = load(
            "2012-01-31 10:00: Arrived\n\
             2012-01-31 10:59: Writing a test\n",
        );
        assert_eq!(
            store.activities(),
            [Activity {
                start_time: ts(2012, 1, 31, 10, 0),
                end_time: ts(2012, 1, 31, 10, 59),
                description: "Writing a test".to_string(),
            }]
        );
        // The last entry also opens the next interval.
        assert_eq!(store.next_start(), Some(ts(2012, 1, 31, 10, 59)));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let store = load("\n\n\n");
        assert!(store.activities().is_empty());
        assert_eq!(store.next_start(), None);
    }

    #[test]
    fn blank_line_breaks_the_chain() {
        let store = load(
            "2012-01-30 17:00: Writing code\n\
             \n\
             2012-01-31 09:00: Arrived\n\
             2012-01-31 09:30: Reading mail\n",
        );
        assert_eq!(
            store.activities(),
            [Activity {
                start_time: ts(2012, 1, 31, 9, 0),
                end_time: ts(2012, 1, 31, 9, 30),
                description: "Reading mail".to_string(),
            }]
        );
    }

    #[test]
    fn malformed_line_breaks_the_chain() {
        let store = load(
            "2012-01-31 09:00: Arrived\n\
             This isn't a valid activity line\n\
             2012-01-31 09:30: Reading mail\n",
        );
        assert!(store.activities().is_empty());
        assert_eq!(store.next_start(), Some(ts(2012, 1, 31, 9, 30)));
    }

    #[test]
    fn first_record_writes_a_bare_entry() {
        let mut store = load("");
        store.record("Writing a test", ts(2012, 1, 31, 10, 59)).unwrap();
        assert_eq!(sink(&store), "2012-01-31 10:59: Writing a test\n");
        assert!(store.activities().is_empty());
        assert_eq!(store.next_start(), Some(ts(2012, 1, 31, 10, 59)));
    }

    #[test]
    fn same_day_records_group_together() {
        let mut store = load("");
        store.record("Writing a test", ts(2012, 1, 31, 15, 0)).unwrap();
        store
            .record("Writing another test", ts(2012, 1, 31, 15, 5))
            .unwrap();
        assert_eq!(
            sink(&store),
            "2012-01-31 15:00: Writing a test\n\
             2012-01-31 15:05: Writing another test\n"
        );
        assert_eq!(
            store.activities(),
            [Activity {
                start_time: ts(2012, 1, 31, 15, 0),
                end_time: ts(2012, 1, 31, 15, 5),
                description: "Writing another test".to_string(),
            }]
        );
    }

    #[test]
    fn crossing_four_am_writes_a_separator() {
        let mut store = load("");
        store.record("Writing a test", ts(2012, 1, 31, 3, 59)).unwrap();
        store
            .record("Writing another test", ts(2012, 1, 31, 4, 0))
            .unwrap();
        assert_eq!(
            sink(&store),
            "2012-01-31 03:59: Writing a test\n\
             \n\
             2012-01-31 04:00: Writing another test\n"
        );
        // No activity spans the boundary.
        assert!(store.activities().is_empty());
        assert_eq!(store.next_start(), Some(ts(2012, 1, 31, 4, 0)));
    }

    #[test]
    fn multi_day_gap_writes_a_separator() {
        let mut store = load("");
        store.record("Writing a test", ts(2012, 1, 29, 12, 0)).unwrap();
        store
            .record("Writing another test", ts(2012, 1, 31, 15, 0))
            .unwrap();
        assert_eq!(
            sink(&store),
            "2012-01-29 12:00: Writing a test\n\
             \n\
             2012-01-31 15:00: Writing another test\n"
        );
    }

    #[test]
    fn record_continues_loaded_history() {
        let mut store = load("2012-01-31 10:00: Arrived\n");
        store.record("Writing a test", ts(2012, 1, 31, 10, 30)).unwrap();
        // Only the new entry reaches the sink.
        assert_eq!(sink(&store), "2012-01-31 10:30: Writing a test\n");
        assert_eq!(
            store.activities(),
            [Activity {
                start_time: ts(2012, 1, 31, 10, 0),
                end_time: ts(2012, 1, 31, 10, 30),
                description: "Writing a test".to_string(),
            }]
        );
    }

    #[test]
    fn start_carries_over_from_last_activity() {
        let mut store = load(
            "2012-01-31 10:00: Arrived\n\
             2012-01-31 10:30: Reading mail\n",
        );
        // next_start is consumed by the first record; the second one falls
        // back to the last activity's end time.
        store.record("Writing a test", ts(2012, 1, 31, 11, 0)).unwrap();
        store.record("Writing more", ts(2012, 1, 31, 11, 45)).unwrap();
        let last = store.activities().last().unwrap();
        assert_eq!(last.start_time, ts(2012, 1, 31, 11, 0));
        assert_eq!(last.end_time, ts(2012, 1, 31, 11, 45));
    }

    #[test]
    fn separator_follows_a_lone_start_marker() {
        // History ends in an unpaired start; a next-day record still gets
        // a separator even though no activity exists yet.
        let mut store = load("2012-01-29 12:00: Arrived\n");
        store.record("Arrived", ts(2012, 1, 31, 9, 0)).unwrap();
        assert_eq!(sink(&store), "\n2012-01-31 09:00: Arrived\n");
        assert!(store.activities().is_empty());
    }

    #[test]
    fn reversed_timestamp_is_a_day_break() {
        let mut store = load("2012-01-31 12:00: Arrived\n");
        store.record("Clock went backwards", ts(2012, 1, 31, 11, 0)).unwrap();
        assert!(store.activities().is_empty());
        assert_eq!(sink(&store), "\n2012-01-31 11:00: Clock went backwards\n");
    }

    #[test]
    fn empty_description_is_rejected() {
        let mut store = load("");
        let err = store.record("   ", ts(2012, 1, 31, 10, 0)).unwrap_err();
        assert!(matches!(err, StoreError::EmptyDescription));
        assert_eq!(sink(&store), "");
    }

    #[test]
    fn reloading_recorded_output_reproduces_state() {
        let mut store = load("");
        store.record("Arrived", ts(2012, 1, 30, 9, 0)).unwrap();
        store.record("Writing code", ts(2012, 1, 30, 11, 30)).unwrap();
        store.record("Arrived", ts(2012, 1, 31, 9, 0)).unwrap();
        store.record("Reading mail", ts(2012, 1, 31, 9, 20)).unwrap();
        store.record("Long walk **", ts(2012, 1, 31, 10, 0)).unwrap();

        let bytes = store.sink.clone();
        let mut reloaded =
            Timelog::load(bytes.as_slice(), Vec::new(), DayBoundary::default()).unwrap();
        assert_eq!(reloaded.activities(), store.activities());

        // The reloaded store carries the last entry as its pending start,
        // so a follow-up record appends byte-identically in both stores.
        assert_eq!(reloaded.next_start(), Some(ts(2012, 1, 31, 10, 0)));
        store.record("Writing code", ts(2012, 1, 31, 10, 30)).unwrap();
        reloaded.record("Writing code", ts(2012, 1, 31, 10, 30)).unwrap();
        assert_eq!(reloaded.sink, "2012-01-31 10:30: Writing code\n".as_bytes());
        assert_eq!(reloaded.activities().last(), store.activities().last());
    }

    #[test]
    fn appends_to_a_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timelog.txt");
        std::fs::write(&path, "2012-01-31 09:00: Arrived\n").unwrap();

        let history = std::fs::read_to_string(&path).unwrap();
        let file = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap();
        let mut store =
            Timelog::load(history.as_bytes(), file, DayBoundary::default()).unwrap();
        store.record("Reading mail", ts(2012, 1, 31, 9, 30)).unwrap();
        drop(store);

        let mut contents = String::new();
        std::fs::File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(
            contents,
            "2012-01-31 09:00: Arrived\n\
             2012-01-31 09:30: Reading mail\n"
        );
    }
}
