//! Workout log repository (`users/{uid}/workoutLogs`)

use super::{decode_keyed, encode};
use crate::error::EngineResult;
use crate::store::{paths, Document, DocumentStore, Query};
use chrono::{DateTime, Utc};
use fitplan_shared::WorkoutLog;

/// A workout log together with its document id
#[derive(Debug, Clone, PartialEq)]
pub struct StoredWorkoutLog {
    pub id: String,
    pub log: WorkoutLog,
}

pub struct WorkoutLogRepository;

impl WorkoutLogRepository {
    pub async fn create(store: &dyn DocumentStore, uid: &str, log: &WorkoutLog) -> EngineResult<String> {
        let id = store.add(&paths::workout_logs(uid), encode(log)?).await?;
        Ok(id)
    }

    /// Logs completed in `[start, end)`, oldest first
    pub async fn get_by_date_range(
        store: &dyn DocumentStore,
        uid: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<Vec<StoredWorkoutLog>> {
        let collection = paths::workout_logs(uid);
        let docs = store
            .query(&collection, &Query::order_by("completedAt").between(start, end))
            .await?;
        Self::keyed(&collection, docs)
    }

    /// The `limit` most recently completed logs, newest first
    pub async fn get_recent(
        store: &dyn DocumentStore,
        uid: &str,
        limit: usize,
    ) -> EngineResult<Vec<StoredWorkoutLog>> {
        let collection = paths::workout_logs(uid);
        let docs = store
            .query(&collection, &Query::order_by("completedAt").descending().limit(limit))
            .await?;
        Self::keyed(&collection, docs)
    }

    fn keyed(collection: &str, docs: Vec<Document>) -> EngineResult<Vec<StoredWorkoutLog>> {
        Ok(decode_keyed(collection, docs)?
            .into_iter()
            .map(|(id, log)| StoredWorkoutLog { id, log })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use chrono::TimeZone;
    use serde_json::json;

    fn log(day: u32) -> WorkoutLog {
        WorkoutLog {
            completed_at: Utc.with_ymd_and_hms(2024, 1, day, 18, 30, 0).unwrap(),
            program_day: Some(day),
            title: None,
            sets: vec![],
        }
    }

    #[tokio::test]
    async fn test_range_is_half_open() {
        let store = InMemoryStore::new();
        for day in [10, 12, 14, 16] {
            WorkoutLogRepository::create(&store, "u1", &log(day)).await.unwrap();
        }

        let logs = WorkoutLogRepository::get_by_date_range(
            &store,
            "u1",
            Utc.with_ymd_and_hms(2024, 1, 12, 18, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 16, 18, 30, 0).unwrap(),
        )
        .await
        .unwrap();
        let days: Vec<_> = logs.iter().filter_map(|l| l.log.program_day).collect();
        assert_eq!(days, vec![12, 14]);
    }

    #[tokio::test]
    async fn test_identical_logs_keep_their_own_ids() {
        let store = InMemoryStore::new();
        let first = WorkoutLogRepository::create(&store, "u1", &log(10)).await.unwrap();
        let second = WorkoutLogRepository::create(&store, "u1", &log(10)).await.unwrap();

        let recent = WorkoutLogRepository::get_recent(&store, "u1", 10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].log, recent[1].log);
        let mut ids: Vec<_> = recent.into_iter().map(|stored| stored.id).collect();
        ids.sort();
        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_malformed_log_is_reported() {
        let store = InMemoryStore::new();
        WorkoutLogRepository::create(&store, "u1", &log(10)).await.unwrap();
        store
            .add("users/u1/workoutLogs", json!({ "completedAt": "2024-01-11T08:00:00Z", "sets": "lots" }))
            .await
            .unwrap();

        let err = WorkoutLogRepository::get_recent(&store, "u1", 10).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_DOCUMENT");
    }
}
