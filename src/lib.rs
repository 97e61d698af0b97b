// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Cyber Fitness Tracker: log workouts, estimate calories burned
//!
//! This crate provides the backend API: a MET-based calorie engine, weekly
//! routine documents with per-day replacement, and goal tracking stats.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{DocumentStore, MemoryStore};
use services::{
    Clock, IdentityProvider, LegacyRoutineService, MemoryIdentity, RoutineService,
    SettingsService, SystemClock,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub identity: Arc<dyn IdentityProvider>,
    pub routines: RoutineService,
    pub settings: SettingsService,
    pub legacy: LegacyRoutineService,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            routines: RoutineService::new(store.clone(), clock.clone()),
            settings: SettingsService::new(store.clone()),
            legacy: LegacyRoutineService::new(store, clock),
            config,
            identity,
        }
    }

    /// State backed entirely by process memory, on the wall clock.
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryIdentity::new()),
            Arc::new(SystemClock),
        )
    }
}
