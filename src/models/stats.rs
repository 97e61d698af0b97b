//! Weekly statistics view returned to the dashboard.
//!
//! Computed on read from the week document and the user's calorie goal;
//! nothing here is persisted.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::DayKey;

/// Calories attributed to one catalog exercise across the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCalories {
    pub exercise_name: String,
    pub calories: f64,
}

/// Total for a single saved day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    pub day: DayKey,
    pub total_calories: f64,
    pub exercise_count: u32,
}

/// Aggregate progress of a week against the calorie goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    /// Start of the week the numbers describe, if a week document exists
    pub week_start: Option<String>,
    pub total_calories: f64,
    pub calorie_goal: f64,
    /// Percent of goal reached, clamped to 100
    pub progress: f64,
    pub remaining: f64,
    /// Sorted by calories, largest first
    pub exercise_distribution: Vec<ExerciseCalories>,
    /// Sunday first; only saved days
    pub day_totals: Vec<DayTotal>,
}
