// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calorie engine and the fixed exercise catalog.
//!
//! Calories follow the standard MET formula with an intensity multiplier:
//!
//! ```text
//! kcal = met * intensity_factor * 3.5 * weight_kg * minutes / 200
//! ```
//!
//! No rounding happens here; formatting is left to the presentation layer.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;
use crate::models::Intensity;

/// A catalog activity with its base MET.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub met: f64,
}

/// Selectable exercises, in display order.
pub const EXERCISE_CATALOG: [CatalogEntry; 10] = [
    CatalogEntry { name: "Running", met: 8.3 },
    CatalogEntry { name: "Cycling", met: 7.5 },
    CatalogEntry { name: "Swimming", met: 6.0 },
    CatalogEntry { name: "Weight Training", met: 5.0 },
    CatalogEntry { name: "HIIT", met: 8.0 },
    CatalogEntry { name: "Yoga", met: 3.0 },
    CatalogEntry { name: "Boxing", met: 7.8 },
    CatalogEntry { name: "Jump Rope", met: 10.0 },
    CatalogEntry { name: "Walking", met: 3.5 },
    CatalogEntry { name: "Pilates", met: 3.8 },
];

/// Entry used for newly added exercises.
pub fn default_exercise() -> &'static CatalogEntry {
    &EXERCISE_CATALOG[0]
}

/// Look up a catalog entry by exact name.
pub fn lookup(name: &str) -> Result<&'static CatalogEntry, ValidationError> {
    EXERCISE_CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| ValidationError::UnknownExercise(name.to_string()))
}

/// MET after applying the intensity multiplier.
pub fn effective_met(met: f64, intensity: Intensity) -> f64 {
    met * intensity.factor()
}

/// Calories burned. Inputs are assumed positive; see [`validate_duration`]
/// and [`validate_weight`].
pub fn compute_calories(weight: f64, met: f64, duration: f64, intensity: Intensity) -> f64 {
    effective_met(met, intensity) * 3.5 * weight * duration / 200.0
}

/// Longest single entry: one full day.
pub const MAX_DURATION_MINUTES: f64 = 1440.0;

/// Heaviest accepted body weight.
pub const MAX_WEIGHT_KG: f64 = 500.0;

pub fn validate_duration(duration: f64) -> Result<f64, ValidationError> {
    if !(duration.is_finite() && duration > 0.0) {
        Err(ValidationError::NonPositiveDuration(duration))
    } else if duration > MAX_DURATION_MINUTES {
        Err(ValidationError::DurationTooLong(duration))
    } else {
        Ok(duration)
    }
}

pub fn validate_weight(weight: f64) -> Result<f64, ValidationError> {
    if !(weight.is_finite() && weight > 0.0) {
        Err(ValidationError::NonPositiveWeight(weight))
    } else if weight > MAX_WEIGHT_KG {
        Err(ValidationError::WeightTooLarge(weight))
    } else {
        Ok(weight)
    }
}
