// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flat per-day routine documents in the `routines` collection.

use chrono::Duration;
use std::sync::Arc;

use crate::db::{
    collections, from_document, to_document, Direction, DocumentQuery, DocumentStore, FilterOp,
};
use crate::error::{AppError, Result, ValidationError};
use crate::models::{
    Intensity, LegacyDailyRoutine, LegacyExercise, LegacyRoutineUpdate, NewLegacyRoutine,
};
use crate::services::calories::{compute_calories, validate_duration, validate_weight};
use crate::services::week::Clock;
use crate::time_utils::{format_iso_timestamp, parse_iso_timestamp};

/// How far back `get_weekly_routines` looks.
const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Clone)]
pub struct LegacyRoutineService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl LegacyRoutineService {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Store a new routine under a generated id.
    ///
    /// The date is stored in canonical UTC form and calories are derived
    /// from the entries; any client-supplied totals are discarded.
    pub async fn save_routine(
        &self,
        user_id: &str,
        routine: NewLegacyRoutine,
    ) -> Result<LegacyDailyRoutine> {
        let date = canonical_date(&routine.date)?;
        let exercises = normalize_entries(routine.exercises)?;
        let now = format_iso_timestamp(&self.clock.now());
        let created = LegacyDailyRoutine {
            id: uuid::Uuid::new_v4().simple().to_string(),
            user_id: user_id.to_string(),
            date,
            total_calories: entries_total(&exercises)?,
            exercises,
            created_at: now.clone(),
            updated_at: now,
        };

        self.store
            .create_with_id(collections::ROUTINES, &created.id, to_document(&created)?)
            .await
            .inspect_err(|e| tracing::error!(user_id, error = %e, "Failed to save routine"))?;

        tracing::info!(user_id, routine_id = %created.id, "Saved routine");
        Ok(created)
    }

    /// Routines dated within the last seven days, newest first.
    pub async fn get_weekly_routines(&self, user_id: &str) -> Result<Vec<LegacyDailyRoutine>> {
        let since = format_iso_timestamp(&(self.clock.now() - Duration::days(RECENT_WINDOW_DAYS)));
        let query = DocumentQuery::new()
            .filter("userId", FilterOp::Equal, user_id)
            .filter("date", FilterOp::GreaterThanOrEqual, since.as_str())
            .order_by("date", Direction::Descending);

        self.store
            .query(collections::ROUTINES, &query)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Apply a partial update and bump `updatedAt`.
    ///
    /// `totalCalories` follows the entries: it is rewritten when `exercises`
    /// changes and otherwise left as stored.
    pub async fn update_routine(
        &self,
        user_id: &str,
        routine_id: &str,
        mut update: LegacyRoutineUpdate,
    ) -> Result<LegacyDailyRoutine> {
        self.owned(user_id, routine_id).await?;

        update.date = update.date.as_deref().map(canonical_date).transpose()?;
        update.exercises = update.exercises.map(normalize_entries).transpose()?;
        update.total_calories = update
            .exercises
            .as_deref()
            .map(entries_total)
            .transpose()?;
        update.updated_at = Some(format_iso_timestamp(&self.clock.now()));
        self.store
            .update(collections::ROUTINES, routine_id, to_document(&update)?)
            .await?;

        tracing::info!(user_id, routine_id, "Updated routine");
        self.owned(user_id, routine_id).await
    }

    pub async fn delete_routine(&self, user_id: &str, routine_id: &str) -> Result<()> {
        self.owned(user_id, routine_id).await?;
        self.store.delete(collections::ROUTINES, routine_id).await?;
        tracing::info!(user_id, routine_id, "Deleted routine");
        Ok(())
    }

    /// The routine, if it exists and belongs to `user_id`.
    async fn owned(&self, user_id: &str, routine_id: &str) -> Result<LegacyDailyRoutine> {
        let not_found = || AppError::NotFound(format!("Routine {} not found", routine_id));

        let doc = self
            .store
            .get_by_id(collections::ROUTINES, routine_id)
            .await?
            .ok_or_else(not_found)?;
        let routine: LegacyDailyRoutine = from_document(doc)?;
        if routine.user_id != user_id {
            tracing::warn!(user_id, routine_id, "Routine belongs to another user");
            return Err(not_found());
        }
        Ok(routine)
    }
}

/// Re-format a client date in the fixed UTC form the date-window query
/// compares against.
pub fn canonical_date(raw: &str) -> Result<String> {
    parse_iso_timestamp(raw)
        .map(|date| format_iso_timestamp(&date))
        .ok_or_else(|| AppError::BadRequest("Invalid 'date': must be an ISO 8601 datetime".into()))
}

/// Validate entries and derive each one's calories. Flat routines carry no
/// intensity, so the moderate factor applies.
fn normalize_entries(exercises: Vec<LegacyExercise>) -> Result<Vec<LegacyExercise>> {
    exercises
        .into_iter()
        .map(|mut e| -> Result<LegacyExercise> {
            validate_duration(e.duration)?;
            validate_weight(e.weight)?;
            e.calories_burned = compute_calories(e.weight, e.met, e.duration, Intensity::Moderate);
            if !(e.calories_burned.is_finite() && e.calories_burned > 0.0) {
                return Err(ValidationError::NonFiniteCalories(e.calories_burned).into());
            }
            Ok(e)
        })
        .collect()
}

fn entries_total(exercises: &[LegacyExercise]) -> Result<f64> {
    let total: f64 = exercises.iter().map(|e| e.calories_burned).sum();
    if total.is_finite() {
        Ok(total)
    } else {
        Err(ValidationError::NonFiniteCalories(total).into())
    }
}
