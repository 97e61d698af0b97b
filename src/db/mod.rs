//! Database layer: a backend-agnostic document store with Firestore and
//! in-memory implementations.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Collection names as constants.
pub mod collections {
    /// Weekly routine documents (keyed by `{userId}-{weekStart millis}`)
    pub const WEEKLY_ROUTINES: &str = "weeklyRoutines";
    /// User settings (keyed by user id)
    pub const USER_SETTINGS: &str = "userSettings";
    /// Flat single-day routines (generated ids)
    pub const ROUTINES: &str = "routines";
}

/// A JSON-like document body.
pub type Document = serde_json::Map<String, Value>;

/// Comparison applied by a query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Conjunction of field filters with optional ordering and limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<u32>,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Document store collaborator.
///
/// Every failure is reported as [`AppError::Database`] (or
/// [`AppError::NotFound`] for `update` on a missing document); callers
/// decide how to surface it. Absent documents on read are `Ok(None)`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError>;

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, AppError>;

    /// Store under a generated id and return it.
    async fn create(&self, collection: &str, data: Document) -> Result<String, AppError> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.create_with_id(collection, &id, data).await?;
        Ok(id)
    }

    /// Write the full document, replacing any existing one.
    async fn create_with_id(
        &self,
        collection: &str,
        id: &str,
        data: Document,
    ) -> Result<(), AppError>;

    /// Overwrite the given top-level fields; fails if the document is absent.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), AppError>;

    /// Overwrite the given top-level fields, creating the document if absent.
    async fn upsert_merge(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), AppError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError>;
}

/// Serialize a typed value into a document body.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, AppError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AppError::Internal(anyhow::anyhow!(
            "Expected a JSON object document, got {}",
            other
        ))),
        Err(e) => Err(AppError::Internal(e.into())),
    }
}

/// Deserialize a stored document into a typed value.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(doc))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Malformed document: {}", e)))
}

/// Order two field values the way the store orders them: numbers
/// numerically, strings lexicographically. Mixed types are incomparable.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

impl FieldFilter {
    /// Whether `doc` satisfies this filter. A missing field never matches.
    pub fn matches(&self, doc: &Document) -> bool {
        let Some(actual) = doc.get(&self.field) else {
            return false;
        };
        let ordering = compare_values(actual, &self.value);
        match self.op {
            FilterOp::Equal => ordering == Some(Ordering::Equal),
            FilterOp::NotEqual => ordering != Some(Ordering::Equal),
            FilterOp::LessThan => ordering == Some(Ordering::Less),
            FilterOp::LessThanOrEqual => {
                matches!(ordering, Some(Ordering::Less | Ordering::Equal))
            }
            FilterOp::GreaterThan => ordering == Some(Ordering::Greater),
            FilterOp::GreaterThanOrEqual => {
                matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
            }
        }
    }
}
