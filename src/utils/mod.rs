//! Utility functions: string formatting and calendar grid math.

pub mod calendar;
pub mod format;

// Re-export commonly used items at module level
pub use calendar::{bucket_by_day, month_grid, next_month, prev_month, DateRange, WEEKDAY_LABELS};
pub use format::{cmp_ignore_case, contains_ignore_case, format_count, format_date, truncate};
