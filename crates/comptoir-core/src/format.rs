//! Locale-aware display formatting for dashboard values.
//!
//! The dashboard renders dates, prices and mobile-data volumes with French
//! conventions: `dd/mm/yyyy` dates, no-break-space thousands grouping with a
//! comma decimal point, and `Mo`/`Go` data units. These helpers are pure and
//! deterministic; timestamps are rendered in their own wall-clock time
//! rather than the viewer's time zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an API date string as `dd/mm/yyyy`.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps and
/// plain `YYYY-MM-DD` dates. Absent, empty or unparseable input renders as
/// `"-"`, the dashboard's placeholder for missing values.
///
/// # Example
///
/// ```
/// use comptoir_core::format::format_date;
///
/// assert_eq!(format_date(Some("2026-08-23T14:30:00Z")), "23/08/2026");
/// assert_eq!(format_date(None), "-");
/// ```
pub fn format_date(value: Option<&str>) -> String {
    match value.and_then(parse_timestamp) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}

/// Format an API date string as `dd/mm/yyyy hh:mm`.
///
/// Same input handling as [`format_date`]; plain dates render with a
/// midnight time component.
pub fn format_datetime(value: Option<&str>) -> String {
    match value.and_then(parse_timestamp) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Format a price with French digit grouping and a currency label.
///
/// Thousands are grouped with no-break spaces and the decimal point is a
/// comma; at most three fraction digits are kept and trailing zeros are
/// trimmed, so whole amounts render without decimals:
///
/// ```
/// use comptoir_core::format::format_price;
///
/// assert_eq!(format_price(1500.0, "DA"), "1\u{a0}500 DA");
/// assert_eq!(format_price(1234.5, "DA"), "1\u{a0}234,5 DA");
/// ```
pub fn format_price(amount: f64, currency: &str) -> String {
    format!("{} {}", format_number_fr(amount), currency)
}

/// Format a mobile-data volume given in megabytes.
///
/// Volumes below 1024 render as `"N Mo"`; larger ones as gigabytes rounded
/// to the nearest integer, `"N Go"` (1536 → `"2 Go"`).
pub fn format_data_allowance(mb: u64) -> String {
    if mb >= 1024 {
        let gb = (mb as f64 / 1024.0).round();
        format!("{} Go", gb as u64)
    } else {
        format!("{} Mo", mb)
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        // Keep the wall-clock time the timestamp itself states
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

fn format_number_fr(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let fixed = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = String::new();
    if amount < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));

    let frac = frac_part.trim_end_matches('0');
    if !frac.is_empty() {
        out.push(',');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('\u{a0}');
        }
        out.push(c);
    }
    out
}
