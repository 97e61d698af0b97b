// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-user settings (`userSettings` collection, keyed by user id).

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Weekly calorie goal used when the user never set one.
pub const DEFAULT_CALORIE_GOAL: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default = "default_calorie_goal")]
    pub calorie_goal: f64,
}

fn default_calorie_goal() -> f64 {
    DEFAULT_CALORIE_GOAL
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            calorie_goal: DEFAULT_CALORIE_GOAL,
        }
    }
}

/// Partial settings write, merged into the stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_goal: Option<f64>,
}
