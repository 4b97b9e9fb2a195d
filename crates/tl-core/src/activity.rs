//! Activities and the day-boundary policy.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Hour at which a new workday starts by default.
///
/// Evening work followed by next-morning work after this hour belongs to a
/// new day, even when both fall on the same calendar date.
pub const DAY_BOUNDARY_HOUR: u32 = 4;

/// A closed work interval between two consecutive timelog entries.
///
/// The description comes from the later entry, the one that marked the
/// moment the activity ended. `start_time <= end_time` always holds for
/// activities produced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// When the activity began.
    pub start_time: NaiveDateTime,
    /// When the activity ended.
    pub end_time: NaiveDateTime,
    /// What was being done.
    pub description: String,
}

impl Activity {
    /// Length of the interval in whole seconds.
    pub fn duration_seconds(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }

    /// True when this activity counts as slack time rather than work.
    pub fn is_slacking(&self) -> bool {
        is_slacking(&self.description)
    }
}

/// Returns true when a description marks slack time.
///
/// The marker is a literal `**` suffix. All slacking policy goes through
/// this one predicate so the tag scheme can change without touching
/// aggregation.
pub fn is_slacking(description: &str) -> bool {
    description.ends_with("**")
}

/// Decides whether two consecutive entry times belong to the same workday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBoundary {
    /// Hour of day at which a new workday begins.
    pub hour: u32,
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self {
            hour: DAY_BOUNDARY_HOUR,
        }
    }
}

impl DayBoundary {
    /// True when `next` starts a new workday relative to `start`.
    ///
    /// A new day starts when the clock ran backwards, more than 24 hours
    /// elapsed, the calendar day changed, or the interval crosses the
    /// boundary hour.
    pub fn starts_new_day(&self, start: NaiveDateTime, next: NaiveDateTime) -> bool {
        if next < start {
            return true;
        }
        if next - start > Duration::hours(24) {
            return true;
        }
        if start.date() != next.date() {
            return true;
        }
        start.hour() < self.hour && next.hour() >= self.hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2012, 1, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn same_day_continues() {
        let boundary = DayBoundary::default();
        assert!(!boundary.starts_new_day(ts(31, 15, 0), ts(31, 15, 5)));
    }

    #[test]
    fn crossing_four_am_starts_new_day() {
        let boundary = DayBoundary::default();
        // 03:59 -> 04:00 on the same date.
        assert!(boundary.starts_new_day(ts(31, 3, 59), ts(31, 4, 0)));
    }

    #[test]
    fn staying_before_four_am_continues() {
        let boundary = DayBoundary::default();
        assert!(!boundary.starts_new_day(ts(31, 1, 0), ts(31, 3, 59)));
    }

    #[test]
    fn calendar_day_change_starts_new_day() {
        let boundary = DayBoundary::default();
        assert!(boundary.starts_new_day(ts(30, 23, 0), ts(31, 1, 0)));
    }

    #[test]
    fn multi_day_gap_starts_new_day() {
        let boundary = DayBoundary::default();
        assert!(boundary.starts_new_day(ts(29, 12, 0), ts(31, 15, 0)));
    }

    #[test]
    fn reversed_timestamps_start_new_day() {
        let boundary = DayBoundary::default();
        assert!(boundary.starts_new_day(ts(31, 15, 5), ts(31, 15, 0)));
    }

    #[test]
    fn configured_hour_is_honored() {
        let boundary = DayBoundary { hour: 6 };
        assert!(!boundary.starts_new_day(ts(31, 3, 59), ts(31, 4, 0)));
        assert!(boundary.starts_new_day(ts(31, 5, 59), ts(31, 6, 0)));
    }

    #[test]
    fn slacking_marker_is_a_suffix() {
        assert!(is_slacking("Long walk **"));
        assert!(!is_slacking("** prefixed"));
        assert!(!is_slacking("Writing a test"));
    }

    #[test]
    fn activity_duration_in_seconds() {
        let activity = Activity {
            start_time: ts(31, 15, 0),
            end_time: ts(31, 15, 5),
            description: "Writing a test".to_string(),
        };
        assert_eq!(activity.duration_seconds(), 300);
        assert!(!activity.is_slacking());
    }
}
