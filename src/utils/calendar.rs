//! Calendar grid math for the scheduler view.
//!
//! The month view shows a full Sunday-to-Saturday grid: it starts on the
//! Sunday on or before the 1st of the month and ends on the Saturday on or
//! after the last day, so every row is a complete week.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};

use crate::models::Post;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Inclusive UTC instant range, used for scheduled-post queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Range covering every day shown in the month grid for `month`.
    /// Wider than the calendar month so leading/trailing cells get posts too.
    pub fn for_month_grid(month: NaiveDate) -> Self {
        let days = month_grid(month);
        let first = days.first().copied().unwrap_or(month);
        let last = days.last().copied().unwrap_or(month);
        Self::spanning_days(first, last)
    }

    /// Range covering the week containing `day`.
    pub fn for_week(day: NaiveDate) -> Self {
        let start = start_of_week(day);
        Self::spanning_days(start, start + Duration::days(6))
    }

    fn spanning_days(first: NaiveDate, last: NaiveDate) -> Self {
        let start = Utc.from_utc_datetime(&first.and_hms_opt(0, 0, 0).unwrap_or_default());
        let end = Utc.from_utc_datetime(&last.and_hms_opt(23, 59, 59).unwrap_or_default());
        Self { start, end }
    }
}

/// Sunday on or before the given day.
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    let offset = day.weekday().num_days_from_sunday() as i64;
    day - Duration::days(offset)
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

fn last_of_month(day: NaiveDate) -> NaiveDate {
    let next = next_month(day);
    first_of_month(next) - Duration::days(1)
}

/// Same day-of-month (clamped) one month later.
pub fn next_month(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    clamp_day(year, month, day.day())
}

/// Same day-of-month (clamped) one month earlier.
pub fn prev_month(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 1 {
        (day.year() - 1, 12)
    } else {
        (day.year(), day.month() - 1)
    };
    clamp_day(year, month, day.day())
}

fn clamp_day(year: i32, month: u32, day: u32) -> NaiveDate {
    // Walk back from the requested day until it exists (handles Jan 31 -> Feb 28)
    for d in (1..=day).rev() {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, d) {
            return date;
        }
    }
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

/// Every day shown in the month grid containing `month`, in order.
/// Always a whole number of weeks (28, 35, or 42 days).
pub fn month_grid(month: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month(month);
    let last = last_of_month(month);

    let grid_start = start_of_week(first);
    let mut grid_end = last;
    while grid_end.weekday() != Weekday::Sat {
        grid_end += Duration::days(1);
    }

    let mut days = Vec::new();
    let mut day = grid_start;
    while day <= grid_end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// Bucket posts by their scheduled day (UTC). Posts with no scheduled time
/// are skipped. Values are indices into the input slice.
pub fn bucket_by_day(posts: &[Post]) -> HashMap<NaiveDate, Vec<usize>> {
    let mut buckets: HashMap<NaiveDate, Vec<usize>> = HashMap::new();
    for (idx, post) in posts.iter().enumerate() {
        if let Some(date) = post.scheduled_date() {
            buckets.entry(date).or_default().push(idx);
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn scheduled_post(id: &str, at: Option<&str>) -> Post {
        let scheduled = at
            .map(|s| format!(r#""scheduledAt": "{}","#, s))
            .unwrap_or_default();
        serde_json::from_str(&format!(
            r#"{{"_id": "{}", "content": "c", {} "status": "scheduled"}}"#,
            id, scheduled
        ))
        .expect("valid post JSON")
    }

    #[test]
    fn test_month_grid_is_whole_weeks() {
        // March 2026: Mar 1 is a Sunday, Mar 31 a Tuesday -> 5 weeks
        let days = month_grid(date(2026, 3, 15));
        assert_eq!(days.len(), 35);
        assert_eq!(days[0], date(2026, 3, 1));
        assert_eq!(*days.last().expect("non-empty"), date(2026, 4, 4));
        assert_eq!(days[0].weekday(), Weekday::Sun);
    }

    #[test]
    fn test_month_grid_includes_leading_days() {
        // May 2026 starts on a Friday -> grid starts Apr 26 (Sunday)
        let days = month_grid(date(2026, 5, 1));
        assert_eq!(days[0], date(2026, 4, 26));
        assert_eq!(days.len(), 42);
    }

    #[test]
    fn test_month_navigation_clamps_day() {
        assert_eq!(next_month(date(2026, 1, 31)), date(2026, 2, 28));
        assert_eq!(prev_month(date(2026, 3, 31)), date(2026, 2, 28));
        assert_eq!(next_month(date(2026, 12, 15)), date(2027, 1, 15));
        assert_eq!(prev_month(date(2026, 1, 15)), date(2025, 12, 15));
    }

    #[test]
    fn test_start_of_week() {
        // Aug 28 2026 is a Friday
        assert_eq!(start_of_week(date(2026, 8, 28)), date(2026, 8, 23));
        // A Sunday maps to itself
        assert_eq!(start_of_week(date(2026, 8, 23)), date(2026, 8, 23));
    }

    #[test]
    fn test_bucket_by_day() {
        let posts = vec![
            scheduled_post("p1", Some("2026-03-14T09:00:00Z")),
            scheduled_post("p2", Some("2026-03-14T18:00:00Z")),
            scheduled_post("p3", Some("2026-03-15T08:00:00Z")),
            scheduled_post("p4", None),
        ];

        let buckets = bucket_by_day(&posts);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[&date(2026, 3, 14)], vec![0, 1]);
        assert_eq!(buckets[&date(2026, 3, 15)], vec![2]);
        assert_eq!(posts[0].status, PostStatus::Scheduled);
    }

    #[test]
    fn test_month_grid_range_spans_grid_not_month() {
        let range = DateRange::for_month_grid(date(2026, 5, 10));
        assert_eq!(range.start.date_naive(), date(2026, 4, 26));
        assert_eq!(range.end.date_naive(), date(2026, 6, 6));
        assert!(range.start < range.end);
    }
}
