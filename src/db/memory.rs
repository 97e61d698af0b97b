//! In-memory document store for local development and tests.
//!
//! Mirrors the Firestore semantics the application relies on: full-document
//! sets, field-mask merges, conjunctive filters, single-field ordering.

use super::{compare_values, Direction, Document, DocumentQuery, DocumentStore};
use crate::error::AppError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Documents grouped by collection, then keyed by document id.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned()))
    }

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, AppError> {
        let mut results: Vec<Document> = match self.collections.get(collection) {
            Some(docs) => docs
                .values()
                .filter(|doc| query.filters.iter().all(|f| f.matches(doc)))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        if let Some(order) = &query.order_by {
            // Documents lacking the order field are excluded, as Firestore does.
            results.retain(|doc| doc.contains_key(&order.field));
            results.sort_by(|a, b| {
                let ordering = compare_values(&a[&order.field], &b[&order.field])
                    .unwrap_or(Ordering::Equal);
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            results.truncate(limit as usize);
        }

        Ok(results)
    }

    async fn create_with_id(
        &self,
        collection: &str,
        id: &str,
        data: Document,
    ) -> Result<(), AppError> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), AppError> {
        let mut docs = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| AppError::NotFound(format!("{}/{}", collection, id)))?;
        let doc = docs
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("{}/{}", collection, id)))?;
        doc.extend(fields);
        Ok(())
    }

    async fn upsert_merge(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), AppError> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .or_default()
            .extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        if let Some(mut docs) = self.collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}
