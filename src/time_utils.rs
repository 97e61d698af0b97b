// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.
//!
//! Every timestamp stored in a document uses the same fixed-width UTC form
//! (`2024-01-07T08:00:00.000Z`) so that string comparison in store queries
//! orders timestamps chronologically.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Format a timestamp as RFC3339 in UTC with millisecond precision and a `Z` suffix.
pub fn format_iso_timestamp<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored ISO timestamp back into UTC.
pub fn parse_iso_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
