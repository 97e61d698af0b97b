// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly routine aggregation.
//!
//! Weeks are bucketed by the local midnight of their Sunday. A user has at
//! most one document per week (`{userId}-{weekStart millis}`), and saving a
//! day replaces only that day's slot in the `routines` map.

use chrono::{DateTime, Datelike, Duration, Local, NaiveTime, TimeZone};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::{
    collections, from_document, to_document, Direction, DocumentQuery, DocumentStore, FilterOp,
};
use crate::error::{AppError, Result, ValidationError};
use crate::models::{DayKey, DayRoutine, Exercise, WeeklyRoutine, WeeklyRoutineUpdate};
use crate::services::calories::{compute_calories, validate_duration, validate_weight};
use crate::time_utils::format_iso_timestamp;

/// Source of "now", injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock in the server's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Local midnight of the most recent Sunday at or before `now`.
///
/// When midnight does not exist locally (DST gap) the first instant after
/// the gap is used.
pub fn week_start_of<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let date = now.date_naive();
    let sunday = date - Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    let midnight = sunday.and_time(NaiveTime::MIN);
    let tz = now.timezone();

    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Document id of a user's week.
pub fn week_id<Tz: TimeZone>(user_id: &str, week_start: &DateTime<Tz>) -> String {
    format!("{}-{}", user_id, week_start.timestamp_millis())
}

/// Sum of the entries' calories.
pub fn day_total(exercises: &[Exercise]) -> f64 {
    exercises.iter().map(|e| e.calories).sum()
}

/// Locates, creates and merges weekly routine documents.
#[derive(Clone)]
pub struct RoutineService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl RoutineService {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    /// Start of the week containing "now".
    pub fn current_week_start(&self) -> DateTime<Local> {
        week_start_of(&self.clock.now())
    }

    /// Whether `week` is the document for the current week.
    pub fn is_current_week(&self, week: &WeeklyRoutine) -> bool {
        week.start_date == format_iso_timestamp(&self.current_week_start())
    }

    /// Most recent week document at or before the current week start.
    ///
    /// This may be an older week when the current one has no document yet;
    /// use [`Self::is_current_week`] when the difference matters.
    pub async fn load_current_week(&self, user_id: &str) -> Result<Option<WeeklyRoutine>> {
        let week_start = format_iso_timestamp(&self.current_week_start());

        let query = DocumentQuery::new()
            .filter("userId", FilterOp::Equal, user_id)
            .filter("startDate", FilterOp::LessThanOrEqual, week_start.as_str())
            .order_by("startDate", Direction::Descending)
            .limit(1);

        let docs = self
            .store
            .query(collections::WEEKLY_ROUTINES, &query)
            .await
            .inspect_err(|e| {
                tracing::error!(user_id, error = %e, "Failed to load weekly routine");
            })?;

        let week = docs
            .into_iter()
            .next()
            .map(from_document::<WeeklyRoutine>)
            .transpose()?;

        tracing::debug!(
            user_id,
            week_start = %week_start,
            found = ?week.as_ref().map(|w| w.start_date.as_str()),
            "Loaded weekly routine"
        );
        Ok(week)
    }

    /// Exact week document for `week_start`, if any.
    pub async fn load_week<Tz: TimeZone>(
        &self,
        user_id: &str,
        week_start: &DateTime<Tz>,
    ) -> Result<Option<WeeklyRoutine>> {
        self.store
            .get_by_id(collections::WEEKLY_ROUTINES, &week_id(user_id, week_start))
            .await?
            .map(from_document)
            .transpose()
    }

    /// Replace one day's exercises in the current week and persist.
    ///
    /// `week` is the caller's copy of the week it is editing, if any. It is
    /// advisory only: the merge always starts from the stored current-week
    /// document, re-read by id, and only its `routines` field is written. So
    /// days saved from another session are kept, and a `week` belonging to an
    /// earlier week or another user is never written to. A mismatched `week`
    /// is only logged.
    ///
    /// Each entry's calories are recomputed from its other fields before
    /// writing. On error nothing is returned to replace the caller's state.
    pub async fn save_day(
        &self,
        week: Option<&WeeklyRoutine>,
        user_id: &str,
        day: DayKey,
        exercises: Vec<Exercise>,
    ) -> Result<WeeklyRoutine> {
        let exercises = normalize_exercises(exercises)?;
        let now = self.clock.now();
        let week_start = week_start_of(&now);
        let start_date = format_iso_timestamp(&week_start);

        if let Some(stale) = week.filter(|w| w.user_id != user_id || w.start_date != start_date) {
            tracing::debug!(
                user_id,
                stale_start = %stale.start_date,
                "Supplied week is not the current week; using current week document"
            );
        }
        let base = self.load_week(user_id, &week_start).await?;

        let id = base
            .as_ref()
            .map(|w| w.id.clone())
            .unwrap_or_else(|| week_id(user_id, &week_start));

        let total_calories = day_total(&exercises);
        let exercise_count = exercises.len();
        let day_routine = DayRoutine {
            id: format!("{}-{}", id, day),
            date: format_iso_timestamp(&now),
            exercises,
            total_calories,
        };

        let result = match base {
            Some(mut existing) => {
                existing.routines.insert(day, day_routine);
                let update = WeeklyRoutineUpdate {
                    routines: Some(existing.routines.clone()),
                };
                self.store
                    .update(collections::WEEKLY_ROUTINES, &id, to_document(&update)?)
                    .await
                    .map(|_| existing)
            }
            None => {
                let mut routines = BTreeMap::new();
                routines.insert(day, day_routine);
                let created = WeeklyRoutine {
                    id: id.clone(),
                    user_id: user_id.to_string(),
                    start_date,
                    routines,
                };
                self.store
                    .create_with_id(collections::WEEKLY_ROUTINES, &id, to_document(&created)?)
                    .await
                    .map(|_| created)
            }
        };

        match &result {
            Ok(_) => tracing::info!(
                user_id,
                week_id = %id,
                day = %day,
                exercise_count,
                total_calories,
                "Saved day routine"
            ),
            Err(e) => tracing::error!(
                user_id,
                week_id = %id,
                day = %day,
                error = %e,
                "Failed to save day routine"
            ),
        }

        result
    }
}

/// Reject out-of-range inputs and re-derive calories.
///
/// Non-finite numbers serialize as `null`, which would leave a week document
/// that can no longer be read back, so they never get this far.
fn normalize_exercises(exercises: Vec<Exercise>) -> Result<Vec<Exercise>> {
    let exercises = exercises
        .into_iter()
        .map(|mut e| -> Result<Exercise> {
            validate_duration(e.duration)?;
            validate_weight(e.weight)?;
            e.calories = compute_calories(e.weight, e.met, e.duration, e.intensity);
            if !e.calories.is_finite() {
                return Err(ValidationError::NonFiniteCalories(e.calories).into());
            }
            Ok(e)
        })
        .collect::<Result<Vec<_>>>()?;

    let total = day_total(&exercises);
    if !total.is_finite() {
        return Err(ValidationError::NonFiniteCalories(total).into());
    }
    Ok(exercises)
}
