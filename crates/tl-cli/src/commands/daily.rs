//! Daily report command.

use std::io::Write;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;

use tl_core::report::{self, ReportLine, ReportTotals};

use crate::Config;
use crate::commands::util::open_timelog;

/// JSON shape of the daily report.
#[derive(Debug, Serialize)]
struct JsonReport {
    date: String,
    lines: Vec<ReportLine>,
    working_seconds: i64,
    slacking_seconds: i64,
    seconds_left: i64,
}

/// Runs the daily report for `date` (today when omitted).
pub fn run<W: Write>(
    config: &Config,
    out: &mut W,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let store = open_timelog(config)?;
    let day = date.unwrap_or_else(|| Local::now().date_naive());

    if json {
        let lines = report::daily_lines(store.activities(), day);
        let totals = ReportTotals::from_lines(&lines);
        let payload = JsonReport {
            date: day.format("%Y-%m-%d").to_string(),
            working_seconds: totals.working_seconds,
            slacking_seconds: totals.slacking_seconds,
            seconds_left: totals.seconds_left(),
            lines,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    } else {
        report::render_daily(store.activities(), out, day)?;
    }
    Ok(())
}
