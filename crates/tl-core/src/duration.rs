//! Duration formatting for reports.

/// Seconds in a standard working day.
pub const WORK_DAY_SECONDS: i64 = 8 * 3600;

/// Formats a number of seconds as `H h MM min`.
///
/// Sub-minute precision is discarded by truncation: 59 seconds formats as
/// `0 h 00 min`. Hours are unpadded, minutes always two digits. Negative
/// input renders as zero.
pub fn format_duration(seconds: i64) -> String {
    let total_minutes = seconds.max(0) / 60;
    format!("{} h {:02} min", total_minutes / 60, total_minutes % 60)
}
