// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod calories;
pub mod editor;
pub mod firebase_auth;
pub mod identity;
pub mod legacy;
pub mod settings;
pub mod stats;
pub mod week;

pub use editor::{DayEditor, ExerciseEdit, NewExercise};
pub use firebase_auth::FirebaseAuthClient;
pub use identity::{IdentityProvider, MemoryIdentity};
pub use legacy::LegacyRoutineService;
pub use settings::SettingsService;
pub use week::{Clock, FixedClock, RoutineService, SystemClock};
