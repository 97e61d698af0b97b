// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Flat single-day routine documents (`routines` collection).
//!
//! Older clients wrote one document per logged day instead of a weekly
//! document. These shapes are still read and written for compatibility.

use serde::{Deserialize, Serialize};

/// Exercise entry as stored by the flat routine shape (no intensity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyExercise {
    pub id: String,
    pub name: String,
    pub duration: f64,
    pub weight: f64,
    pub met: f64,
    #[serde(default)]
    pub calories_burned: f64,
}

/// A stored flat routine document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDailyRoutine {
    pub id: String,
    pub user_id: String,
    /// Day of the routine (ISO 8601)
    pub date: String,
    pub exercises: Vec<LegacyExercise>,
    pub total_calories: f64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Fields a client supplies when creating a flat routine.
///
/// `caloriesBurned` and `totalCalories` are accepted for compatibility but
/// always recomputed from the entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLegacyRoutine {
    pub date: String,
    pub exercises: Vec<LegacyExercise>,
    #[serde(default)]
    pub total_calories: f64,
}

/// Partial update of a flat routine; `updatedAt` is always bumped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRoutineUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<LegacyExercise>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
