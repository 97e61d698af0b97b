// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use chrono::{DateTime, Local, TimeZone};
use cyber_fitness_tracker::config::Config;
use cyber_fitness_tracker::db::{Document, DocumentQuery, DocumentStore, FirestoreDb, MemoryStore};
use cyber_fitness_tracker::error::AppError;
use cyber_fitness_tracker::middleware::auth::create_jwt;
use cyber_fitness_tracker::models::IdentityUser;
use cyber_fitness_tracker::routes::create_router;
use cyber_fitness_tracker::services::{FixedClock, MemoryIdentity};
use cyber_fitness_tracker::AppState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Wednesday 2024-01-10 09:00 local; its week starts Sunday 2024-01-07.
#[allow(dead_code)]
pub fn wednesday() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
}

/// Store wrapper whose writes can be switched to fail.
#[allow(dead_code)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_writes: AtomicBool,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(AppError::Database("simulated write failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        self.inner.get_by_id(collection, id).await
    }

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, AppError> {
        self.inner.query(collection, query).await
    }

    async fn create_with_id(
        &self,
        collection: &str,
        id: &str,
        data: Document,
    ) -> Result<(), AppError> {
        self.check()?;
        self.inner.create_with_id(collection, id, data).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), AppError> {
        self.check()?;
        self.inner.update(collection, id, fields).await
    }

    async fn upsert_merge(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), AppError> {
        self.check()?;
        self.inner.upsert_merge(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.check()?;
        self.inner.delete(collection, id).await
    }
}

/// State over `store` with the clock frozen at `now`.
#[allow(dead_code)]
pub fn test_state(store: Arc<dyn DocumentStore>, now: DateTime<Local>) -> Arc<AppState> {
    Arc::new(AppState::new(
        Config::test_default(),
        store,
        Arc::new(MemoryIdentity::with_cost(4)),
        Arc::new(FixedClock(now)),
    ))
}

/// Create a test app over an in-memory store, frozen on a Wednesday.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = test_state(Arc::new(MemoryStore::new()), wednesday());
    (create_router(state.clone()), state)
}

/// Session token for `user_id` signed with the test key.
#[allow(dead_code)]
pub fn test_token(user_id: &str) -> String {
    let user = IdentityUser {
        id: user_id.to_string(),
        email: format!("{}@example.com", user_id),
    };
    create_jwt(&user, &Config::test_default().jwt_signing_key).unwrap()
}

/// Authenticated JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, user_id: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", test_token(user_id)))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Authenticated GET.
#[allow(dead_code)]
pub fn get_request(uri: &str, user_id: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", test_token(user_id)))
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
