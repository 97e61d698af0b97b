// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Edit session for a single day's exercises.
//!
//! Holds the in-memory entries between explicit saves. Every edit keeps each
//! entry's calories consistent with its weight, MET, duration and intensity.
//! Body weight is edited once for the whole day and copied onto each entry.

use chrono::{DateTime, Utc};

use crate::error::{Result, ValidationError};
use crate::models::{DayKey, DayRoutine, Exercise, Intensity, WeeklyRoutine};
use crate::services::calories::{
    compute_calories, default_exercise, lookup, validate_duration, validate_weight,
};
use crate::services::week::{day_total, RoutineService};

/// Minutes assigned to a newly added exercise.
pub const DEFAULT_DURATION_MINUTES: f64 = 30.0;

/// A single-field change to an existing entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseEdit {
    Name(String),
    Duration(f64),
    Intensity(Intensity),
}

/// Fields supplied when adding a specific exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    /// Keep an existing id; a fresh one is generated when `None`
    pub id: Option<String>,
    pub name: String,
    pub duration: f64,
    pub intensity: Intensity,
}

#[derive(Debug, Clone)]
pub struct DayEditor {
    day: DayKey,
    weight: f64,
    exercises: Vec<Exercise>,
    dirty: bool,
}

impl DayEditor {
    /// Empty session for `day`.
    pub fn new(day: DayKey, weight: f64) -> Result<Self> {
        Ok(Self {
            day,
            weight: validate_weight(weight)?,
            exercises: Vec::new(),
            dirty: false,
        })
    }

    /// Session seeded from a saved day. The weight comes from the first
    /// saved entry when there is one.
    pub fn load(day: DayKey, saved: Option<&DayRoutine>, default_weight: f64) -> Result<Self> {
        let mut editor = Self::new(day, default_weight)?;
        if let Some(saved) = saved {
            editor.exercises = saved.exercises.clone();
            if let Some(first) = saved.exercises.first().filter(|e| e.weight > 0.0) {
                editor.weight = first.weight;
            }
        }
        Ok(editor)
    }

    pub fn day(&self) -> DayKey {
        self.day
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// True when there are edits not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn total_calories(&self) -> f64 {
        day_total(&self.exercises)
    }

    /// Append the default catalog exercise (30 minutes, moderate).
    pub fn add_exercise(&mut self, now: DateTime<Utc>) -> &Exercise {
        let entry = default_exercise();
        let id = self.next_id(now);
        self.push(Exercise {
            id,
            name: entry.name.to_string(),
            met: entry.met,
            duration: DEFAULT_DURATION_MINUTES,
            weight: self.weight,
            intensity: Intensity::Moderate,
            calories: compute_calories(
                self.weight,
                entry.met,
                DEFAULT_DURATION_MINUTES,
                Intensity::Moderate,
            ),
        })
    }

    /// Append a specific catalog exercise.
    pub fn add_entry(&mut self, new: NewExercise, now: DateTime<Utc>) -> Result<&Exercise> {
        let entry = lookup(&new.name)?;
        let duration = validate_duration(new.duration)?;
        let id = match new.id {
            Some(id) if self.exercises.iter().any(|e| e.id == id) => {
                return Err(ValidationError::InvalidInput(format!(
                    "Duplicate exercise id: {}",
                    id
                ))
                .into());
            }
            Some(id) => id,
            None => self.next_id(now),
        };

        Ok(self.push(Exercise {
            id,
            name: entry.name.to_string(),
            met: entry.met,
            duration,
            weight: self.weight,
            intensity: new.intensity,
            calories: compute_calories(self.weight, entry.met, duration, new.intensity),
        }))
    }

    /// Change one field of an entry and recompute its calories.
    ///
    /// Invalid edits leave the entry unchanged.
    pub fn update_exercise(&mut self, id: &str, edit: ExerciseEdit) -> Result<&Exercise> {
        let index = self
            .exercises
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ValidationError::ExerciseNotFound(id.to_string()))?;

        let mut updated = self.exercises[index].clone();
        match edit {
            ExerciseEdit::Name(name) => {
                let entry = lookup(&name)?;
                updated.name = entry.name.to_string();
                updated.met = entry.met;
            }
            ExerciseEdit::Duration(duration) => updated.duration = validate_duration(duration)?,
            ExerciseEdit::Intensity(intensity) => updated.intensity = intensity,
        }
        updated.calories =
            compute_calories(updated.weight, updated.met, updated.duration, updated.intensity);

        self.exercises[index] = updated;
        self.dirty = true;
        Ok(&self.exercises[index])
    }

    /// Set the day's body weight and recompute every entry.
    pub fn update_weight(&mut self, weight: f64) -> Result<()> {
        self.weight = validate_weight(weight)?;
        for exercise in &mut self.exercises {
            exercise.weight = self.weight;
            exercise.calories = compute_calories(
                self.weight,
                exercise.met,
                exercise.duration,
                exercise.intensity,
            );
        }
        self.dirty = true;
        Ok(())
    }

    pub fn remove_exercise(&mut self, id: &str) -> Result<Exercise> {
        let index = self
            .exercises
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ValidationError::ExerciseNotFound(id.to_string()))?;
        self.dirty = true;
        Ok(self.exercises.remove(index))
    }

    /// Persist this day into the current week.
    ///
    /// The session is marked clean only on success; after a failure the
    /// entries are untouched and `save` can simply be called again.
    pub async fn save(
        &mut self,
        routines: &RoutineService,
        week: Option<&WeeklyRoutine>,
        user_id: &str,
    ) -> Result<WeeklyRoutine> {
        let saved = routines
            .save_day(week, user_id, self.day, self.exercises.clone())
            .await?;
        self.dirty = false;
        Ok(saved)
    }

    fn push(&mut self, exercise: Exercise) -> &Exercise {
        self.exercises.push(exercise);
        self.dirty = true;
        let last = self.exercises.len() - 1;
        &self.exercises[last]
    }

    /// Millisecond timestamp, bumped until unique within the day.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        loop {
            let candidate = millis.to_string();
            if !self.exercises.iter().any(|e| e.id == candidate) {
                return candidate;
            }
            millis += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_add_exercise_defaults() {
        let mut editor = DayEditor::new(DayKey::Monday, 70.0).unwrap();
        let added = editor.add_exercise(now()).clone();

        assert_eq!(added.name, "Running");
        assert_eq!(added.duration, 30.0);
        assert_eq!(added.intensity, Intensity::Moderate);
        assert!(close(added.calories, 305.025));
        assert_eq!(added.id, now().timestamp_millis().to_string());
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_ids_unique_within_day() {
        let mut editor = DayEditor::new(DayKey::Monday, 70.0).unwrap();
        let a = editor.add_exercise(now()).id.clone();
        let b = editor.add_exercise(now()).id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_name_change_refreshes_met_and_calories() {
        let mut editor = DayEditor::new(DayKey::Monday, 70.0).unwrap();
        let id = editor.add_exercise(now()).id.clone();

        let updated = editor
            .update_exercise(&id, ExerciseEdit::Name("Yoga".to_string()))
            .unwrap();
        assert_eq!(updated.met, 3.0);
        assert!(close(updated.calories, compute_calories(70.0, 3.0, 30.0, Intensity::Moderate)));
    }

    #[test]
    fn test_unknown_name_leaves_entry_unchanged() {
        let mut editor = DayEditor::new(DayKey::Monday, 70.0).unwrap();
        let id = editor.add_exercise(now()).id.clone();
        let before = editor.exercises()[0].clone();

        let err = editor
            .update_exercise(&id, ExerciseEdit::Name("Curling".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::UnknownExercise(_))
        ));
        assert_eq!(editor.exercises()[0], before);
    }

    #[test]
    fn test_duration_and_intensity_edits() {
        let mut editor = DayEditor::new(DayKey::Monday, 80.0).unwrap();
        let id = editor.add_exercise(now()).id.clone();

        editor
            .update_exercise(&id, ExerciseEdit::Duration(60.0))
            .unwrap();
        let high = editor
            .update_exercise(&id, ExerciseEdit::Intensity(Intensity::High))
            .unwrap();
        assert!(close(high.calories, compute_calories(80.0, 8.3, 60.0, Intensity::High)));

        assert!(editor
            .update_exercise(&id, ExerciseEdit::Duration(0.0))
            .is_err());
        assert_eq!(editor.exercises()[0].duration, 60.0);
    }

    #[test]
    fn test_weight_change_applies_to_every_entry() {
        let mut editor = DayEditor::new(DayKey::Tuesday, 70.0).unwrap();
        editor.add_exercise(now());
        editor
            .add_entry(
                NewExercise {
                    id: None,
                    name: "Swimming".to_string(),
                    duration: 45.0,
                    intensity: Intensity::Low,
                },
                now(),
            )
            .unwrap();

        editor.update_weight(90.0).unwrap();
        for e in editor.exercises() {
            assert_eq!(e.weight, 90.0);
            assert!(close(e.calories, compute_calories(90.0, e.met, e.duration, e.intensity)));
        }
        assert!(editor.update_weight(-3.0).is_err());
        assert_eq!(editor.weight(), 90.0);
    }

    #[test]
    fn test_load_takes_weight_from_first_entry() {
        let saved = DayRoutine {
            id: "w-monday".to_string(),
            date: "2024-01-08T10:00:00.000Z".to_string(),
            exercises: vec![Exercise {
                id: "1".to_string(),
                name: "Walking".to_string(),
                met: 3.5,
                duration: 40.0,
                weight: 64.0,
                intensity: Intensity::Moderate,
                calories: compute_calories(64.0, 3.5, 40.0, Intensity::Moderate),
            }],
            total_calories: compute_calories(64.0, 3.5, 40.0, Intensity::Moderate),
        };
        let editor = DayEditor::load(DayKey::Monday, Some(&saved), 70.0).unwrap();

        assert_eq!(editor.weight(), 64.0);
        assert_eq!(editor.exercises().len(), 1);
        assert!(!editor.is_dirty());
        assert!(close(editor.total_calories(), saved.total_calories));
    }

    #[test]
    fn test_remove_and_duplicate_ids() {
        let mut editor = DayEditor::new(DayKey::Friday, 70.0).unwrap();
        let new = NewExercise {
            id: Some("abc".to_string()),
            name: "Boxing".to_string(),
            duration: 20.0,
            intensity: Intensity::High,
        };
        editor.add_entry(new.clone(), now()).unwrap();
        assert!(editor.add_entry(new, now()).is_err());

        let removed = editor.remove_exercise("abc").unwrap();
        assert_eq!(removed.name, "Boxing");
        assert!(editor.exercises().is_empty());
        assert!(editor.remove_exercise("abc").is_err());
    }

    #[test]
    fn test_new_rejects_non_positive_weight() {
        assert!(DayEditor::new(DayKey::Monday, 0.0).is_err());
    }
}
