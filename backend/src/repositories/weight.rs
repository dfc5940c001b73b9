//! Weight goal and weigh-in repository

use super::{decode, decode_all, encode};
use crate::error::EngineResult;
use crate::store::{paths, DocumentStore, Query};
use chrono::{DateTime, Utc};
use fitplan_shared::{WeightEntry, WeightGoal};
use serde_json::Value;

/// Weight goal repository (`users/{uid}/goals/weight`)
pub struct WeightGoalRepository;

impl WeightGoalRepository {
    pub async fn get(store: &dyn DocumentStore, uid: &str) -> EngineResult<Option<WeightGoal>> {
        let path = paths::weight_goal(uid);
        match store.get(&path).await? {
            Some(doc) => Ok(Some(decode(&path, doc.data)?)),
            None => Ok(None),
        }
    }

    pub async fn set(store: &dyn DocumentStore, uid: &str, goal: &WeightGoal) -> EngineResult<()> {
        store.set(&paths::weight_goal(uid), encode(goal)?).await?;
        Ok(())
    }

    /// Refresh `currentWeight` on an existing goal. Returns false when no goal is set.
    pub async fn update_current_weight(
        store: &dyn DocumentStore,
        uid: &str,
        weight: f64,
    ) -> EngineResult<bool> {
        let path = paths::weight_goal(uid);
        let Some(doc) = store.get(&path).await? else {
            return Ok(false);
        };

        let mut data = doc.data;
        if let Value::Object(fields) = &mut data {
            fields.insert("currentWeight".to_string(), Value::from(weight));
        }
        // Validate the merged document before writing it back
        let _: WeightGoal = decode(&path, data.clone())?;
        store.set(&path, data).await?;
        Ok(true)
    }
}

/// Weigh-in repository (`users/{uid}/weightEntries`)
pub struct WeightEntryRepository;

impl WeightEntryRepository {
    /// Append a weigh-in, returning its generated id
    pub async fn create(
        store: &dyn DocumentStore,
        uid: &str,
        entry: &WeightEntry,
    ) -> EngineResult<String> {
        let id = store.add(&paths::weight_entries(uid), encode(entry)?).await?;
        Ok(id)
    }

    /// Entries with `start <= date < end`, oldest first
    pub async fn get_by_date_range(
        store: &dyn DocumentStore,
        uid: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<Vec<WeightEntry>> {
        let collection = paths::weight_entries(uid);
        let docs = store
            .query(&collection, &Query::order_by("date").between(start, end))
            .await?;
        decode_all(&collection, docs)
    }
}
