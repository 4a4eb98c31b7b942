//! Canonical textual form for dates and timestamps stored in the graph.
//!
//! Dates are `YYYY-MM-DD`. Timestamps are ISO-8601 local date-times,
//! `YYYY-MM-DDTHH:MM:SS`, with a fractional part only when it is non-zero.
//! Both forms sort lexicographically in chronological order.

use chrono::{NaiveDate, NaiveDateTime};

/// Format a calendar date.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a timestamp without time zone.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
