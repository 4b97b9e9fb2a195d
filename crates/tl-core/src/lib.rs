//! Core domain logic for the timelog.
//!
//! This crate contains the fundamental types and logic for:
//! - Line codec: parsing and rendering `YYYY-MM-DD HH:MM: description` lines
//! - Activities: closed work intervals and the day-boundary policy
//! - Reports: daily and weekly per-description aggregation

pub mod activity;
pub mod duration;
pub mod line;
pub mod report;

pub use activity::{Activity, DAY_BOUNDARY_HOUR, DayBoundary, is_slacking};
pub use duration::{WORK_DAY_SECONDS, format_duration};
pub use line::{ParsedLine, parse_line, render_line};
pub use report::{
    ReportLine, ReportTotals, aggregate, daily_lines, render_daily, render_weekly, week_start,
    weekly_lines,
};
