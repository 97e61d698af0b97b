// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cyber Fitness Tracker API Server
//!
//! Serves the workout log, weekly routines and goal stats over HTTP.

use cyber_fitness_tracker::{
    config::{Config, IdentityBackend, StoreBackend},
    db::{DocumentStore, FirestoreDb, MemoryStore},
    services::{FirebaseAuthClient, IdentityProvider, MemoryIdentity, SystemClock},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Cyber Fitness Tracker API");

    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let identity: Arc<dyn IdentityProvider> = match (&config.identity_backend, &config.firebase_api_key) {
        (IdentityBackend::Firebase, Some(api_key)) => {
            Arc::new(FirebaseAuthClient::new(api_key.clone()))
        }
        (IdentityBackend::Firebase, None) => {
            anyhow::bail!("FIREBASE_API_KEY is required for the firebase identity backend")
        }
        (IdentityBackend::Memory, _) => {
            tracing::warn!("Using in-memory identity provider; accounts are lost on restart");
            Arc::new(MemoryIdentity::new())
        }
    };

    // Build shared state
    let state = Arc::new(AppState::new(
        config.clone(),
        store,
        identity,
        Arc::new(SystemClock),
    ));

    // Build router
    let app = cyber_fitness_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cyber_fitness_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
