//! Number and date formatting

use chrono::{DateTime, Utc};

/// Compact count: `999`, `1.2k`, `3.4M`
pub fn format_number(n: u64) -> String {
    if n < 1_000 {
        n.to_string()
    } else if n < 999_950 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    }
}

/// Short calendar date: `Jan 5, 2024`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}
