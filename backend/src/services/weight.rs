//! Weight tracking service
//!
//! Provides business logic for:
//! - Weigh-in logging with range validation
//! - Keeping the goal's current weight in step with the latest weigh-in
//! - Goal setting
//! - Reading the recent weigh-in history

use crate::error::{EngineError, EngineResult};
use crate::repositories::{WeightEntryRepository, WeightGoalRepository};
use crate::store::DocumentStore;
use chrono::{DateTime, FixedOffset, Utc};
use fitplan_shared::validation::{validate_goal, validate_weight};
use fitplan_shared::{DateWindow, WeightEntry, WeightGoal};
use tracing::info;

/// Weigh-in input
#[derive(Debug, Clone)]
pub struct WeightEntryInput {
    pub weight: f64,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Weight service for business logic
pub struct WeightService;

impl WeightService {
    /// Log a weigh-in and refresh the goal's current weight, if a goal exists
    pub async fn log_weight(
        store: &dyn DocumentStore,
        uid: &str,
        input: WeightEntryInput,
    ) -> EngineResult<WeightEntry> {
        validate_weight(input.weight)?;

        let entry = WeightEntry {
            weight: input.weight,
            date: input.date,
            notes: input.notes.filter(|notes| !notes.trim().is_empty()),
        };
        let id = WeightEntryRepository::create(store, uid, &entry)
            .await
            .map_err(EngineError::logged)?;
        let goal_refreshed = WeightGoalRepository::update_current_weight(store, uid, entry.weight)
            .await
            .map_err(EngineError::logged)?;

        info!(uid = %uid, entry_id = %id, weight = entry.weight, goal_refreshed, "Weight logged");
        Ok(entry)
    }

    /// Weigh-ins of the trailing `days` window, oldest first
    pub async fn recent_entries(
        store: &dyn DocumentStore,
        uid: &str,
        now: DateTime<FixedOffset>,
        days: i64,
    ) -> EngineResult<Vec<WeightEntry>> {
        let window = DateWindow::trailing_days(now, days);
        WeightEntryRepository::get_by_date_range(store, uid, window.start, window.end)
            .await
            .map_err(EngineError::logged)
    }

    /// Validate and store a weight goal, replacing any existing one
    pub async fn set_goal(store: &dyn DocumentStore, uid: &str, goal: &WeightGoal) -> EngineResult<()> {
        validate_goal(goal)?;
        WeightGoalRepository::set(store, uid, goal)
            .await
            .map_err(EngineError::logged)?;
        info!(uid = %uid, weekly_goal = goal.weekly_goal, "Weight goal set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use chrono::{Duration, TimeZone};
    use fitplan_shared::ValidationError;

    fn now() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2024, 1, 29, 12, 0, 0).unwrap().fixed_offset()
    }

    fn input(weight: f64, days_ago: i64) -> WeightEntryInput {
        WeightEntryInput {
            weight,
            date: now().with_timezone(&Utc) - Duration::days(days_ago),
            notes: None,
        }
    }

    fn goal() -> WeightGoal {
        WeightGoal {
            current_weight: 190.0,
            target_weight: 180.0,
            weekly_goal: -1.0,
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_log_weight_refreshes_goal() {
        let store = InMemoryStore::new();
        WeightService::set_goal(&store, "u1", &goal()).await.unwrap();

        WeightService::log_weight(&store, "u1", input(187.4, 0)).await.unwrap();

        let goal = WeightGoalRepository::get(&store, "u1").await.unwrap().unwrap();
        assert_eq!(goal.current_weight, 187.4);
    }

    #[tokio::test]
    async fn test_log_weight_without_goal() {
        let store = InMemoryStore::new();
        let entry = WeightService::log_weight(&store, "u1", input(187.4, 0)).await.unwrap();
        assert_eq!(entry.weight, 187.4);
        assert!(WeightGoalRepository::get(&store, "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_weight() {
        let store = InMemoryStore::new();
        let err = WeightService::log_weight(&store, "u1", input(f64::NAN, 0)).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(ValidationError::NonFiniteWeight)));
        assert_eq!(store.count("users/u1/weightEntries").await, 0);
    }

    #[tokio::test]
    async fn test_rejects_aggressive_goal() {
        let store = InMemoryStore::new();
        let mut aggressive = goal();
        aggressive.weekly_goal = -5.0;
        let err = WeightService::set_goal(&store, "u1", &aggressive).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_recent_entries_window() {
        let store = InMemoryStore::new();
        for days_ago in [30, 10, 2] {
            WeightService::log_weight(&store, "u1", input(190.0 - days_ago as f64 / 10.0, days_ago))
                .await
                .unwrap();
        }

        let entries = WeightService::recent_entries(&store, "u1", now(), 14).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].date < entries[1].date);
    }
}
