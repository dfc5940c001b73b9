//! In-memory document store
//!
//! Reference backend used by tests and local runs. Collections are kept in a
//! `BTreeMap` behind a `tokio::sync::RwLock`; `set_if` holds the write lock
//! across the check and the write, which makes it atomic.

use super::paths::{is_collection, split_document};
use super::{Document, DocumentStore, Precondition, Query, SortDirection};
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

type Collections = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the store going offline; every call fails while set
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn document_path(path: &str) -> StoreResult<(&str, &str)> {
        split_document(path).ok_or_else(|| StoreError::InvalidPath(path.to_string()))
    }

    fn collection_path(path: &str) -> StoreResult<&str> {
        if is_collection(path) {
            Ok(path)
        } else {
            Err(StoreError::InvalidPath(path.to_string()))
        }
    }

    fn holds(existing: Option<&Value>, precondition: &Precondition) -> bool {
        match precondition {
            Precondition::Missing => existing.is_none(),
            Precondition::FieldEquals { field, value } => {
                let Some(doc) = existing else {
                    return false;
                };
                let current = doc.get(field).filter(|v| !v.is_null());
                current == value.as_ref().filter(|v| !v.is_null())
            }
        }
    }
}

fn timestamp_field(data: &Value, field: &str) -> Option<DateTime<Utc>> {
    data.get(field)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, path: &str) -> StoreResult<Option<Document>> {
        self.check_available()?;
        let (collection, id) = Self::document_path(path)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn set(&self, path: &str, data: Value) -> StoreResult<()> {
        self.check_available()?;
        let (collection, id) = Self::document_path(path)?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn set_if(
        &self,
        path: &str,
        data: Value,
        precondition: &Precondition,
    ) -> StoreResult<bool> {
        self.check_available()?;
        let (collection, id) = Self::document_path(path)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if !Self::holds(docs.get(id), precondition) {
            return Ok(false);
        }
        docs.insert(id.to_string(), data);
        Ok(true)
    }

    async fn add(&self, collection: &str, data: Value) -> StoreResult<String> {
        self.check_available()?;
        let collection = Self::collection_path(collection)?;
        let id = Uuid::new_v4().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data);
        Ok(id)
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.check_available()?;
        let collection = Self::collection_path(collection)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>> {
        let mut matched: Vec<(DateTime<Utc>, Document)> = self
            .list(collection)
            .await?
            .into_iter()
            .filter_map(|doc| timestamp_field(&doc.data, &query.order_by).map(|ts| (ts, doc)))
            .filter(|(ts, _)| query.start_at.map_or(true, |start| *ts >= start))
            .filter(|(ts, _)| query.end_before.map_or(true, |end| *ts < end))
            .collect();

        matched.sort_by(|(a, da), (b, db)| a.cmp(b).then_with(|| da.id.cmp(&db.id)));
        if query.direction == SortDirection::Descending {
            matched.reverse();
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(matched.into_iter().take(limit).map(|(_, doc)| doc).collect())
    }
}
