// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod exercise;
pub mod legacy;
pub mod routine;
pub mod settings;
pub mod stats;
pub mod user;

pub use exercise::{Exercise, Intensity};
pub use legacy::{LegacyDailyRoutine, LegacyExercise, LegacyRoutineUpdate, NewLegacyRoutine};
pub use routine::{DayKey, DayRoutine, WeeklyRoutine, WeeklyRoutineUpdate};
pub use settings::{UserSettings, UserSettingsUpdate, DEFAULT_CALORIE_GOAL};
pub use stats::{DayTotal, ExerciseCalories, WeeklySummary};
pub use user::IdentityUser;
