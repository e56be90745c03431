//! Timestamp parsing for Jira `updated` values and the batch `--since` filter.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

/// Parse a Jira timestamp.
///
/// Jira writes `2024-06-23T16:00:00.000+0800`; RFC 3339 forms such as
/// `2024-06-23T16:00:00.000+08:00` and `...Z` are accepted too.
pub fn parse_jira_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok())
}

/// Parse human-readable `--since` input relative to `today`.
///
/// Supports:
/// - "today", "yesterday"
/// - "3d", "2w" (days or weeks ago)
/// - "YYYY-MM-DD" format
pub fn parse_since_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }

    if let Some(nd) = s.strip_suffix('d') {
        if let Ok(days) = nd.trim().parse::<i64>() {
            return Duration::try_days(days).and_then(|d| today.checked_sub_signed(d));
        }
    }
    if let Some(nw) = s.strip_suffix('w') {
        if let Ok(weeks) = nw.trim().parse::<i64>() {
            return Duration::try_weeks(weeks).and_then(|d| today.checked_sub_signed(d));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Whether an `updated` timestamp falls on or after `since`.
///
/// Returns `None` when the timestamp cannot be parsed. The date is taken in the
/// timestamp's own offset.
pub fn updated_on_or_after(updated: &str, since: NaiveDate) -> Option<bool> {
    parse_jira_timestamp(updated).map(|ts| ts.date_naive() >= since)
}
