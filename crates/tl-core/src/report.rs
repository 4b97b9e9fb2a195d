//! Daily and weekly report rendering.
//!
//! Reports aggregate activity durations by exact description string, split
//! totals into working and slacking time, and write plain text to any
//! [`Write`] sink.

use std::collections::HashMap;
use std::io::{self, Write};

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::activity::{Activity, is_slacking};
use crate::duration::{WORK_DAY_SECONDS, format_duration};

/// One aggregated report row: a description and its summed duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub description: String,
    pub seconds: i64,
}

impl ReportLine {
    pub fn is_slacking(&self) -> bool {
        is_slacking(&self.description)
    }
}

/// Working and slacking totals over an aggregated window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    pub working_seconds: i64,
    pub slacking_seconds: i64,
}

impl ReportTotals {
    /// Sums report lines into working and slacking buckets.
    pub fn from_lines(lines: &[ReportLine]) -> Self {
        lines.iter().fold(Self::default(), |mut totals, line| {
            if line.is_slacking() {
                totals.slacking_seconds += line.seconds;
            } else {
                totals.working_seconds += line.seconds;
            }
            totals
        })
    }

    /// Seconds left in an eight-hour workday, floored at zero.
    pub fn seconds_left(&self) -> i64 {
        (WORK_DAY_SECONDS - self.working_seconds).max(0)
    }
}

/// Sums activity durations by description.
///
/// The intermediate map iterates in arbitrary order; rows are sorted by
/// description before being returned so output is deterministic.
pub fn aggregate<'a>(activities: impl IntoIterator<Item = &'a Activity>) -> Vec<ReportLine> {
    let mut by_description: HashMap<&str, i64> = HashMap::new();
    for activity in activities {
        *by_description
            .entry(activity.description.as_str())
            .or_insert(0) += activity.duration_seconds();
    }

    let mut lines: Vec<ReportLine> = by_description
        .into_iter()
        .map(|(description, seconds)| ReportLine {
            description: description.to_string(),
            seconds,
        })
        .collect();
    lines.sort_by(|a, b| a.description.cmp(&b.description));
    lines
}

/// Monday of the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

fn starts_on(activity: &Activity, day: NaiveDate) -> bool {
    activity.start_time.date() == day
}

fn starts_in_week(activity: &Activity, day: NaiveDate) -> bool {
    let monday = week_start(day);
    let date = activity.start_time.date();
    date >= monday && date < monday + Duration::days(7)
}

/// Aggregated rows for activities that started on `day`.
pub fn daily_lines(activities: &[Activity], day: NaiveDate) -> Vec<ReportLine> {
    aggregate(activities.iter().filter(|a| starts_on(a, day)))
}

/// Aggregated rows for activities in the Monday-to-Sunday week
/// containing `day`.
pub fn weekly_lines(activities: &[Activity], day: NaiveDate) -> Vec<ReportLine> {
    aggregate(activities.iter().filter(|a| starts_in_week(a, day)))
}

fn render<W: Write>(lines: &[ReportLine], out: &mut W, time_left: bool) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}   {}", format_duration(line.seconds), line.description)?;
    }
    if !lines.is_empty() {
        writeln!(out)?;
    }

    let totals = ReportTotals::from_lines(lines);
    writeln!(
        out,
        "Time spent working:   {}",
        format_duration(totals.working_seconds)
    )?;
    writeln!(
        out,
        "Time spent slacking:  {}",
        format_duration(totals.slacking_seconds)
    )?;
    if time_left {
        writeln!(
            out,
            "Time left at work:    {}",
            format_duration(totals.seconds_left())
        )?;
    }
    Ok(())
}

/// Renders the report for activities that started on `day`.
pub fn render_daily<W: Write>(
    activities: &[Activity],
    out: &mut W,
    day: NaiveDate,
) -> io::Result<()> {
    render(&daily_lines(activities, day), out, true)
}

/// Renders the report for activities in the Monday-to-Sunday week
/// containing `day`. No daily quota applies, so there is no time-left line.
pub fn render_weekly<W: Write>(
    activities: &[Activity],
    out: &mut W,
    day: NaiveDate,
) -> io::Result<()> {
    render(&weekly_lines(activities, day), out, false)
}
