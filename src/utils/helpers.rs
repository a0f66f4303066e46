//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the crate.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Sanitize a storage key for safe use as a filename
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Check whether two instants fall in the same calendar month (UTC)
pub fn same_calendar_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// First instant of the calendar month following `t` (UTC)
pub fn next_month_start(t: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if t.month() == 12 {
        (t.year() + 1, 1)
    } else {
        (t.year(), t.month() + 1)
    };
    // Day 1 at midnight UTC is always a single valid instant.
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single().unwrap()
}
