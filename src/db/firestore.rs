// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed document store.
//!
//! Documents are exchanged as JSON maps; the typed shapes live in
//! `crate::models` and are converted at the service layer.

use super::{Direction, Document, DocumentQuery, DocumentStore, FilterOp};
use crate::error::AppError;
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client; every operation returns a database error.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Write only the listed top-level fields (Firestore field mask).
    async fn write_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), AppError> {
        let mask: Vec<String> = fields.keys().cloned().collect();
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(mask)
            .in_col(collection)
            .document_id(id)
            .object(&fields)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FirestoreDb {
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, AppError> {
        let mut select = self.get_client()?.fluent().select().from(collection);

        if !query.filters.is_empty() {
            let filters = query.filters.clone();
            select = select.filter(move |q| {
                q.for_all(filters.iter().map(|f| {
                    let field = q.field(f.field.as_str());
                    let value = f.value.clone();
                    match f.op {
                        FilterOp::Equal => field.eq(value),
                        FilterOp::NotEqual => field.not_equal(value),
                        FilterOp::LessThan => field.less_than(value),
                        FilterOp::LessThanOrEqual => field.less_than_or_equal(value),
                        FilterOp::GreaterThan => field.greater_than(value),
                        FilterOp::GreaterThanOrEqual => field.greater_than_or_equal(value),
                    }
                }))
            });
        }

        if let Some(order) = &query.order_by {
            let direction = match order.direction {
                Direction::Ascending => firestore::FirestoreQueryDirection::Ascending,
                Direction::Descending => firestore::FirestoreQueryDirection::Descending,
            };
            select = select.order_by([(order.field.as_str(), direction)]);
        }

        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        select
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn create_with_id(
        &self,
        collection: &str,
        id: &str,
        data: Document,
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id)
            .object(&data)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), AppError> {
        // A masked write would create the document; check existence first.
        if self.get_by_id(collection, id).await?.is_none() {
            return Err(AppError::NotFound(format!("{}/{}", collection, id)));
        }
        self.write_fields(collection, id, fields).await
    }

    async fn upsert_merge(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), AppError> {
        self.write_fields(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
