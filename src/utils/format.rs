/// Format a large count for display: 1234 -> "1.2K", 5600000 -> "5.6M"
pub fn format_count(count: i64) -> String {
    let abs = count.abs();
    if abs >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if abs >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Format an engagement rate percentage for display
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        chars.into_iter().take(max_len).collect()
    } else {
        let truncated: String = chars.into_iter().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an ISO timestamp string to a readable date
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if date.len() >= 10 {
        // Fall back to the YYYY-MM-DD prefix
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

/// Format an ISO timestamp string with time of day
pub fn format_datetime(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y %H:%M").to_string()
    } else {
        format_date(date)
    }
}

/// Case-insensitive substring match for search filtering
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive string comparison for sorting
pub fn cmp_ignore_case(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1234), "1.2K");
        assert_eq!(format_count(15200), "15.2K");
        assert_eq!(format_count(5_600_000), "5.6M");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-03-14T15:30:00Z"), "Mar 14, 2026");
        assert_eq!(format_date("2026-03-14"), "2026-03-14");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Launch Day", "launch"));
        assert!(contains_ignore_case("Launch Day", "DAY"));
        assert!(!contains_ignore_case("Launch Day", "week"));
    }
}
