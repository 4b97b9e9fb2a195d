//! Weekly report command.

use std::io::Write;

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;

use tl_core::report::{self, ReportLine, ReportTotals};

use crate::Config;
use crate::commands::util::open_timelog;

/// JSON shape of the weekly report.
#[derive(Debug, Serialize)]
struct JsonReport {
    week_start: String,
    week_end: String,
    lines: Vec<ReportLine>,
    working_seconds: i64,
    slacking_seconds: i64,
}

/// Runs the weekly report for the week containing `date` (today when
/// omitted).
pub fn run<W: Write>(
    config: &Config,
    out: &mut W,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let store = open_timelog(config)?;
    let day = date.unwrap_or_else(|| Local::now().date_naive());

    if json {
        let monday = report::week_start(day);
        let sunday = monday + Duration::days(6);
        let lines = report::weekly_lines(store.activities(), day);
        let totals = ReportTotals::from_lines(&lines);
        let payload = JsonReport {
            week_start: monday.format("%Y-%m-%d").to_string(),
            week_end: sunday.format("%Y-%m-%d").to_string(),
            working_seconds: totals.working_seconds,
            slacking_seconds: totals.slacking_seconds,
            lines,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    } else {
        report::render_weekly(store.activities(), out, day)?;
    }
    Ok(())
}
