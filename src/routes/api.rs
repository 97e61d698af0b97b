// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{
    DayKey, DayRoutine, Intensity, LegacyDailyRoutine, LegacyRoutineUpdate, NewLegacyRoutine,
    UserSettings, UserSettingsUpdate, WeeklyRoutine, WeeklySummary,
};
use crate::services::calories::{
    compute_calories, effective_met, lookup, validate_duration, validate_weight, CatalogEntry,
    EXERCISE_CATALOG,
};
use crate::services::editor::{DayEditor, NewExercise};
use crate::services::stats::summarize;
use crate::time_utils::format_iso_timestamp;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Upper bound on entries accepted for a single day.
const MAX_EXERCISES_PER_DAY: u64 = 50;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/catalog", get(get_catalog))
        .route("/api/calories", post(preview_calories))
        .route("/api/week", get(get_week))
        .route("/api/week/days/{day}", put(save_day))
        .route("/api/stats", get(get_stats))
        .route("/api/settings", get(get_settings).put(update_settings))
        .route("/api/routines", get(list_routines).post(create_routine))
        .route(
            "/api/routines/{id}",
            patch(update_routine).delete(delete_routine),
        )
}

// ─── User Profile ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
}

async fn get_me(Extension(user): Extension<AuthUser>) -> Json<UserResponse> {
    Json(UserResponse {
        user_id: user.user_id,
        email: user.email,
    })
}

// ─── Calorie Engine ──────────────────────────────────────────

#[derive(Serialize)]
pub struct IntensityOption {
    pub value: Intensity,
    pub factor: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub exercises: &'static [CatalogEntry],
    pub intensities: Vec<IntensityOption>,
    pub default_weight: f64,
}

async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        exercises: &EXERCISE_CATALOG,
        intensities: Intensity::ALL
            .into_iter()
            .map(|value| IntensityOption {
                value,
                factor: value.factor(),
            })
            .collect(),
        default_weight: state.config.default_body_weight_kg,
    })
}

#[derive(Debug, Deserialize)]
pub struct CaloriesRequest {
    pub name: String,
    pub weight: f64,
    pub duration: f64,
    #[serde(default)]
    pub intensity: Intensity,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaloriesResponse {
    pub met: f64,
    pub effective_met: f64,
    pub calories: f64,
}

/// Compute calories for a prospective entry without storing anything.
async fn preview_calories(Json(body): Json<CaloriesRequest>) -> Result<Json<CaloriesResponse>> {
    let entry = lookup(&body.name)?;
    let weight = validate_weight(body.weight)?;
    let duration = validate_duration(body.duration)?;

    Ok(Json(CaloriesResponse {
        met: entry.met,
        effective_met: effective_met(entry.met, body.intensity),
        calories: compute_calories(weight, entry.met, duration, body.intensity),
    }))
}

// ─── Weekly Routine ──────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekResponse {
    /// Latest week document at or before the current week start
    pub week: Option<WeeklyRoutine>,
    pub week_start: String,
    /// False when `week` is an earlier week (or absent)
    pub is_current_week: bool,
}

async fn get_week(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<WeekResponse>> {
    let week = state.routines.load_current_week(&user.user_id).await?;
    let is_current_week = week
        .as_ref()
        .is_some_and(|w| state.routines.is_current_week(w));

    Ok(Json(WeekResponse {
        week,
        week_start: format_iso_timestamp(&state.routines.current_week_start()),
        is_current_week,
    }))
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExerciseInput {
    /// Existing entry id; omitted for new entries
    pub id: Option<String>,
    pub name: String,
    pub duration: f64,
    #[serde(default)]
    pub intensity: Intensity,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveDayRequest {
    /// Body weight for every entry of the day; defaults to the saved day's
    /// weight, then to the configured default
    pub weight: Option<f64>,
    #[validate(length(max = MAX_EXERCISES_PER_DAY))]
    pub exercises: Vec<ExerciseInput>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDayResponse {
    pub week: WeeklyRoutine,
    pub day: Option<DayRoutine>,
}

/// Replace one day's exercises in the current week.
async fn save_day(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(day): Path<String>,
    Json(body): Json<SaveDayRequest>,
) -> Result<Json<SaveDayResponse>> {
    body.validate()?;
    let day: DayKey = day.parse()?;

    let week_start = state.routines.current_week_start();
    let week = state.routines.load_week(&user.user_id, &week_start).await?;

    let weight = match body.weight {
        Some(weight) => weight,
        None => week
            .as_ref()
            .and_then(|w| w.day(day))
            .and_then(|d| d.exercises.first())
            .map(|e| e.weight)
            .unwrap_or(state.config.default_body_weight_kg),
    };

    let now = state.routines.now().with_timezone(&chrono::Utc);
    let mut editor = DayEditor::new(day, weight)?;
    for input in body.exercises {
        editor.add_entry(
            NewExercise {
                id: input.id,
                name: input.name,
                duration: input.duration,
                intensity: input.intensity,
            },
            now,
        )?;
    }

    let saved = editor
        .save(&state.routines, week.as_ref(), &user.user_id)
        .await?;
    let day_routine = saved.day(day).cloned();

    Ok(Json(SaveDayResponse {
        week: saved,
        day: day_routine,
    }))
}

// ─── Stats & Settings ────────────────────────────────────────

/// Weekly dashboard: totals, goal progress and per-exercise breakdown.
///
/// Only the current week's document counts; an older week reads as empty.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<WeeklySummary>> {
    let (week, settings) = tokio::try_join!(
        state.routines.load_current_week(&user.user_id),
        state.settings.get_settings(&user.user_id),
    )?;

    let week = week.filter(|w| state.routines.is_current_week(w));
    Ok(Json(summarize(week.as_ref(), settings.calorie_goal)))
}

async fn get_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserSettings>> {
    Ok(Json(state.settings.get_settings(&user.user_id).await?))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<UserSettingsUpdate>,
) -> Result<Json<UserSettings>> {
    Ok(Json(
        state.settings.update_settings(&user.user_id, body).await?,
    ))
}

// ─── Flat Routines ───────────────────────────────────────────

async fn list_routines(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<LegacyDailyRoutine>>> {
    Ok(Json(state.legacy.get_weekly_routines(&user.user_id).await?))
}

async fn create_routine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewLegacyRoutine>,
) -> Result<(StatusCode, Json<LegacyDailyRoutine>)> {
    let created = state.legacy.save_routine(&user.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_routine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<LegacyRoutineUpdate>,
) -> Result<Json<LegacyDailyRoutine>> {
    Ok(Json(
        state
            .legacy
            .update_routine(&user.user_id, &id, body)
            .await?,
    ))
}

async fn delete_routine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.legacy.delete_routine(&user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_day_request_defaults() {
        let body: SaveDayRequest = serde_json::from_value(serde_json::json!({
            "exercises": [{"name": "Yoga", "duration": 20}]
        }))
        .unwrap();
        assert!(body.weight.is_none());
        assert_eq!(body.exercises[0].intensity, Intensity::Moderate);
        assert!(body.exercises[0].id.is_none());
        assert!(body.validate().is_ok());
    }
}
