// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise entry model stored inside a day routine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;

/// How hard an exercise was performed; scales the base MET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Moderate,
    High,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Moderate, Intensity::High];

    /// Multiplier applied to the base MET.
    pub fn factor(self) -> f64 {
        match self {
            Intensity::Low => 0.75,
            Intensity::Moderate => 1.0,
            Intensity::High => 1.25,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Moderate => "moderate",
            Intensity::High => "high",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Intensity::Low),
            "moderate" => Ok(Intensity::Moderate),
            "high" => Ok(Intensity::High),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown intensity: {}",
                other
            ))),
        }
    }
}

/// One logged exercise within a day.
///
/// `calories` is derived from the other numeric fields and is never
/// authored directly; see [`crate::services::calories::compute_calories`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    /// Client-generated id, unique within its day
    pub id: String,
    /// Catalog name (e.g., "Running")
    pub name: String,
    /// Base metabolic equivalent for `name`
    pub met: f64,
    /// Minutes
    pub duration: f64,
    /// Body weight in kg at time of entry
    pub weight: f64,
    /// Entries saved before intensity existed read back as moderate
    #[serde(default)]
    pub intensity: Intensity,
    /// Derived kcal
    pub calories: f64,
}
