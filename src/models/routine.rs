// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weekly routine documents (`weeklyRoutines` collection).

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;
use crate::models::Exercise;

/// Day-slot key inside a week's `routines` map, serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayKey {
    /// Sunday first, matching the week-start rule.
    pub const ALL: [DayKey; 7] = [
        DayKey::Sunday,
        DayKey::Monday,
        DayKey::Tuesday,
        DayKey::Wednesday,
        DayKey::Thursday,
        DayKey::Friday,
        DayKey::Saturday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DayKey::Sunday => "sunday",
            DayKey::Monday => "monday",
            DayKey::Tuesday => "tuesday",
            DayKey::Wednesday => "wednesday",
            DayKey::Thursday => "thursday",
            DayKey::Friday => "friday",
            DayKey::Saturday => "saturday",
        }
    }

    /// Days after the week start (Sunday = 0).
    pub fn offset(self) -> u32 {
        self.weekday().num_days_from_sunday()
    }

    pub fn weekday(self) -> Weekday {
        match self {
            DayKey::Sunday => Weekday::Sun,
            DayKey::Monday => Weekday::Mon,
            DayKey::Tuesday => Weekday::Tue,
            DayKey::Wednesday => Weekday::Wed,
            DayKey::Thursday => Weekday::Thu,
            DayKey::Friday => Weekday::Fri,
            DayKey::Saturday => Weekday::Sat,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_sunday() as usize]
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    /// Accepts any case ("Monday", "monday").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str() == lower)
            .ok_or_else(|| ValidationError::UnknownDay(s.to_string()))
    }
}

/// One day's exercises. Replaced wholesale on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct DayRoutine {
    /// `{weekId}-{dayKey}`
    pub id: String,
    /// Last edit time (ISO 8601)
    pub date: String,
    /// Display order only
    pub exercises: Vec<Exercise>,
    /// Sum of `exercises[].calories`
    pub total_calories: f64,
}

/// A user's week, keyed by `{userId}-{weekStart epoch millis}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRoutine {
    pub id: String,
    pub user_id: String,
    /// Local midnight of the week's Sunday (ISO 8601, UTC)
    pub start_date: String,
    /// Only days edited at least once are present
    #[serde(default)]
    pub routines: BTreeMap<DayKey, DayRoutine>,
}

impl WeeklyRoutine {
    pub fn day(&self, day: DayKey) -> Option<&DayRoutine> {
        self.routines.get(&day)
    }
}

/// Partial update of a weekly routine document.
///
/// Only `Some` fields are written; the rest of the stored document is left as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRoutineUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routines: Option<BTreeMap<DayKey, DayRoutine>>,
}
