//! Consistency snapshot service
//!
//! Gathers the rolling workout, meal and hydration logs and reduces them to a
//! `ConsistencySnapshot`.

use std::collections::{BTreeMap, HashSet};

use crate::error::{EngineError, EngineResult};
use crate::repositories::{
    HydrationLogRepository, MealLogRepository, ProgramRepository, WorkoutLogRepository,
};
use crate::store::DocumentStore;
use chrono::{DateTime, FixedOffset};
use fitplan_shared::consistency::{build_snapshot, ConsistencyInputs};
use fitplan_shared::time_window::local_dates_back;
use fitplan_shared::{ConsistencySnapshot, DateWindow, EnginePolicy};
use tracing::debug;

pub struct ConsistencyService;

impl ConsistencyService {
    pub async fn snapshot(
        store: &dyn DocumentStore,
        uid: &str,
        now: DateTime<FixedOffset>,
        policy: &EnginePolicy,
    ) -> EngineResult<ConsistencySnapshot> {
        let inputs = Self::gather(store, uid, now, policy)
            .await
            .map_err(EngineError::logged)?;
        let snapshot = build_snapshot(&inputs, now, &policy.consistency);

        debug!(
            uid = %uid,
            workouts = snapshot.workouts_completed,
            meals = snapshot.meals_logged,
            hydration = snapshot.hydration_days,
            streak = snapshot.workout_streak,
            "Consistency snapshot built"
        );
        Ok(snapshot)
    }

    async fn gather(
        store: &dyn DocumentStore,
        uid: &str,
        now: DateTime<FixedOffset>,
        policy: &EnginePolicy,
    ) -> EngineResult<ConsistencyInputs> {
        let window_days = policy.consistency.window_days;
        let window = DateWindow::local_days(now, window_days);

        // Newest logs feed the PR scan, the window feeds the completed count.
        // Both land in one list, merged on document id.
        let recent =
            WorkoutLogRepository::get_recent(store, uid, policy.consistency.pr_scan_logs).await?;
        let windowed =
            WorkoutLogRepository::get_by_date_range(store, uid, window.start, window.end).await?;
        let mut seen = HashSet::new();
        let workout_logs = recent
            .into_iter()
            .chain(windowed)
            .filter(|stored| seen.insert(stored.id.clone()))
            .map(|stored| stored.log)
            .collect();

        let mut meal_counts = BTreeMap::new();
        let mut hydration = BTreeMap::new();
        for date in local_dates_back(now, window_days.max(0) as usize) {
            meal_counts.insert(date, MealLogRepository::count_for_date(store, uid, date).await?);
            if let Some(log) = HydrationLogRepository::get_for_date(store, uid, date).await? {
                hydration.insert(date, log);
            }
        }

        let days_per_week = ProgramRepository::get_active(store, uid)
            .await?
            .map_or(0, |program| program.template.days_per_week);

        Ok(ConsistencyInputs {
            workout_logs,
            meal_counts,
            hydration,
            days_per_week,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use fitplan_shared::{HydrationLog, MealEntry, SetEntry, WorkoutLog};

    fn now() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2024, 1, 20, 18, 0, 0).unwrap().fixed_offset()
    }

    fn workout(days_ago: i64, pr: Option<&str>) -> WorkoutLog {
        WorkoutLog {
            completed_at: now().with_timezone(&Utc) - Duration::days(days_ago),
            program_day: None,
            title: None,
            sets: pr
                .map(|exercise| {
                    vec![SetEntry {
                        exercise: exercise.to_string(),
                        weight: 225.0,
                        reps: 5,
                        is_pr: true,
                    }]
                })
                .unwrap_or_default(),
        }
    }

    #[tokio::test]
    async fn test_empty_history() {
        let store = InMemoryStore::new();
        let snapshot = ConsistencyService::snapshot(&store, "u1", now(), &EnginePolicy::default())
            .await
            .unwrap();
        assert_eq!(snapshot, ConsistencySnapshot::default());
    }

    #[tokio::test]
    async fn test_old_prs_still_found_outside_window() {
        let store = InMemoryStore::new();
        WorkoutLogRepository::create(&store, "u1", &workout(1, None)).await.unwrap();
        WorkoutLogRepository::create(&store, "u1", &workout(20, Some("Bench"))).await.unwrap();

        let snapshot = ConsistencyService::snapshot(&store, "u1", now(), &EnginePolicy::default())
            .await
            .unwrap();
        assert_eq!(snapshot.workouts_completed, 1);
        assert_eq!(snapshot.recent_prs.len(), 1);
        assert_eq!(snapshot.recent_prs[0].exercise, "Bench");
    }

    #[tokio::test]
    async fn test_counts_meals_and_hydration_per_day() {
        let store = InMemoryStore::new();
        let today = now().date_naive();
        for offset in 0..3 {
            let date = today - Duration::days(offset);
            for _ in 0..3 {
                let meal = MealEntry {
                    name: None,
                    calories: Some(600.0),
                    logged_at: None,
                };
                MealLogRepository::create(&store, "u1", date, &meal).await.unwrap();
            }
            let log = HydrationLog {
                current_oz: if offset == 0 { 40.0 } else { 90.0 },
                goal_oz: 100.0,
            };
            HydrationLogRepository::set_for_date(&store, "u1", date, &log).await.unwrap();
            WorkoutLogRepository::create(&store, "u1", &workout(offset, None)).await.unwrap();
        }

        let snapshot = ConsistencyService::snapshot(&store, "u1", now(), &EnginePolicy::default())
            .await
            .unwrap();
        assert_eq!(snapshot.workouts_completed, 3);
        assert_eq!(snapshot.meals_logged, 3);
        assert_eq!(snapshot.hydration_days, 2);
        assert_eq!(snapshot.workout_streak, 2);
    }

    #[tokio::test]
    async fn test_identical_logs_count_separately() {
        let store = InMemoryStore::new();
        let mut policy = EnginePolicy::default();
        policy.consistency.pr_scan_logs = 1;

        // Same content written twice, as a retried client write would
        WorkoutLogRepository::create(&store, "u1", &workout(0, None)).await.unwrap();
        WorkoutLogRepository::create(&store, "u1", &workout(0, None)).await.unwrap();

        let snapshot = ConsistencyService::snapshot(&store, "u1", now(), &policy)
            .await
            .unwrap();
        assert_eq!(snapshot.workouts_completed, 2);
    }

    #[tokio::test]
    async fn test_workouts_counted_over_seven_local_days() {
        let store = InMemoryStore::new();
        for offset in 0..8 {
            WorkoutLogRepository::create(&store, "u1", &workout(offset, None)).await.unwrap();
        }

        let snapshot = ConsistencyService::snapshot(&store, "u1", now(), &EnginePolicy::default())
            .await
            .unwrap();
        assert_eq!(snapshot.workouts_completed, 7);
    }

    #[tokio::test]
    async fn test_unavailable_store_is_an_error() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);
        let err = ConsistencyService::snapshot(&store, "u1", now(), &EnginePolicy::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "STORE_UNAVAILABLE");
    }
}
