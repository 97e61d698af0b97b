//! Read-side aggregation over a week document.
//!
//! All functions are pure; a missing week counts as an empty one.

use std::collections::HashMap;

use crate::models::{DayTotal, ExerciseCalories, WeeklyRoutine, WeeklySummary};

/// Sum of every saved day's total.
pub fn total_week_calories(week: Option<&WeeklyRoutine>) -> f64 {
    week.map(|w| w.routines.values().map(|d| d.total_calories).sum())
        .unwrap_or(0.0)
}

/// Calories per exercise name across all days and entries.
pub fn per_exercise_breakdown(week: Option<&WeeklyRoutine>) -> HashMap<String, f64> {
    let mut breakdown = HashMap::new();
    let Some(week) = week else {
        return breakdown;
    };

    for day in week.routines.values() {
        for exercise in &day.exercises {
            *breakdown.entry(exercise.name.clone()).or_insert(0.0) += exercise.calories;
        }
    }
    breakdown
}

/// Percent of `goal` reached, clamped to 100.
///
/// A zero (or negative) goal reports 100 once anything is logged and 0
/// while the total is still 0.
pub fn progress(total: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return if total > 0.0 { 100.0 } else { 0.0 };
    }
    (total / goal * 100.0).min(100.0)
}

/// Calories still needed to reach `goal`, never negative.
pub fn remaining(total: f64, goal: f64) -> f64 {
    (goal - total).max(0.0)
}

/// Build the dashboard view of `week` against `goal`.
pub fn summarize(week: Option<&WeeklyRoutine>, goal: f64) -> WeeklySummary {
    let total_calories = total_week_calories(week);

    let mut exercise_distribution: Vec<ExerciseCalories> = per_exercise_breakdown(week)
        .into_iter()
        .map(|(exercise_name, calories)| ExerciseCalories {
            exercise_name,
            calories,
        })
        .collect();
    exercise_distribution.sort_by(|a, b| {
        b.calories
            .total_cmp(&a.calories)
            .then_with(|| a.exercise_name.cmp(&b.exercise_name))
    });

    // BTreeMap keys iterate Sunday first.
    let day_totals = week
        .map(|w| {
            w.routines
                .iter()
                .map(|(day, routine)| DayTotal {
                    day: *day,
                    total_calories: routine.total_calories,
                    exercise_count: routine.exercises.len() as u32,
                })
                .collect()
        })
        .unwrap_or_default();

    WeeklySummary {
        week_start: week.map(|w| w.start_date.clone()),
        total_calories,
        calorie_goal: goal,
        progress: progress(total_calories, goal),
        remaining: remaining(total_calories, goal),
        exercise_distribution,
        day_totals,
    }
}
