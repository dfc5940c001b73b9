//! Document store abstraction
//!
//! The engine persists nothing itself. It reads and writes plain JSON
//! documents through this narrow interface, addressed by slash-separated
//! paths (`users/{uid}/goals/weight`). A document path always has an even
//! number of segments; its parent collection path has an odd number.

pub mod memory;
pub mod paths;

use crate::error::StoreResult;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A stored document with its id (last path segment)
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Sort direction for collection queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Collection query over a timestamp field
///
/// Range bounds are `[start_at, end_before)`. Documents whose `order_by`
/// field is missing or not an RFC 3339 timestamp are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub order_by: String,
    pub direction: SortDirection,
    pub start_at: Option<DateTime<Utc>>,
    pub end_before: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn order_by(field: impl Into<String>) -> Self {
        Self {
            order_by: field.into(),
            direction: SortDirection::Ascending,
            start_at: None,
            end_before: None,
            limit: None,
        }
    }

    pub fn descending(mut self) -> Self {
        self.direction = SortDirection::Descending;
        self
    }

    pub fn between(mut self, start_at: DateTime<Utc>, end_before: DateTime<Utc>) -> Self {
        self.start_at = Some(start_at);
        self.end_before = Some(end_before);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Condition checked atomically by [`DocumentStore::set_if`]
#[derive(Debug, Clone, PartialEq)]
pub enum Precondition {
    /// The document must not exist
    Missing,
    /// Top-level `field` must equal `value`; `None` means absent or null
    FieldEquals { field: String, value: Option<Value> },
}

/// Narrow read/write interface to the external document store
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a single document
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the path is invalid
    async fn get(&self, path: &str) -> StoreResult<Option<Document>>;

    /// Create or replace a document
    async fn set(&self, path: &str, data: Value) -> StoreResult<()>;

    /// Replace a document only if `precondition` holds at write time.
    ///
    /// Returns `Ok(false)` without writing when it does not.
    async fn set_if(&self, path: &str, data: Value, precondition: &Precondition)
        -> StoreResult<bool>;

    /// Append a document with a generated id, returning the id
    async fn add(&self, collection: &str, data: Value) -> StoreResult<String>;

    /// List every document of a collection, in id order
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Range query ordered by a timestamp field
    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>>;
}
