//! Month values and date-range labels.
//!
//! Dates are stored as `YYYY-MM` month values (what a browser month picker produces)
//! and shown as `{short month} {4-digit year}`, e.g. `Mar 2021`.

use chrono::NaiveDate;

/// Label used for the end of a range that is still ongoing.
pub const PRESENT: &str = "Present";
/// Placeholder shown when a start date exists but no end date was entered.
pub const END_DATE_PLACEHOLDER: &str = "End Date";

/// Formats a `YYYY-MM` month value as e.g. `Jan 2024`.
///
/// Values that don't parse are returned verbatim rather than dropped.
pub fn format_month(value: &str) -> String {
    let value = value.trim();
    match NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d") {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Builds the `start - end` label for an entry.
///
/// Returns `None` when there is no start date; in that case no range is shown at all.
/// A `current` entry always ends in "Present", regardless of any stale end date.
pub fn date_range(start_date: &str, end_date: &str, current: bool) -> Option<String> {
    if start_date.trim().is_empty() {
        return None;
    }

    let end = if current {
        PRESENT.to_string()
    } else if !end_date.trim().is_empty() {
        format_month(end_date)
    } else {
        END_DATE_PLACEHOLDER.to_string()
    };

    Some(format!("{} - {}", format_month(start_date), end))
}
