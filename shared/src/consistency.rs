//! Rolling consistency snapshot over workout, meal and hydration logs

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::models::{ConsistencySnapshot, HydrationLog, PersonalRecord, WorkoutLog};
use crate::policy::ConsistencyPolicy;
use crate::time_window::{local_dates_back, DateWindow};

/// Raw logs the snapshot is reduced from
#[derive(Debug, Clone, Default)]
pub struct ConsistencyInputs {
    /// Recent workout logs, any order
    pub workout_logs: Vec<WorkoutLog>,
    /// Number of meal entries per local date
    pub meal_counts: BTreeMap<NaiveDate, usize>,
    pub hydration: BTreeMap<NaiveDate, HydrationLog>,
    /// From the active program; 0 when there is none
    pub days_per_week: u32,
}

pub fn build_snapshot(
    inputs: &ConsistencyInputs,
    now: DateTime<FixedOffset>,
    policy: &ConsistencyPolicy,
) -> ConsistencySnapshot {
    let window = DateWindow::local_days(now, policy.window_days);
    let dates = local_dates_back(now, policy.window_days.max(0) as usize);

    let workouts_completed = inputs
        .workout_logs
        .iter()
        .filter(|log| window.contains(log.completed_at))
        .count() as u32;

    let meals_logged = dates
        .iter()
        .filter(|date| {
            inputs
                .meal_counts
                .get(date)
                .is_some_and(|count| *count >= policy.meals_per_day)
        })
        .count() as u32;

    let hydration_days = dates
        .iter()
        .filter(|date| {
            inputs
                .hydration
                .get(date)
                .is_some_and(|log| is_hydrated(log, policy.hydration_ratio))
        })
        .count() as u32;

    ConsistencySnapshot {
        workouts_completed,
        workouts_planned: inputs.days_per_week,
        meals_logged,
        hydration_days,
        recent_prs: recent_personal_records(&inputs.workout_logs, policy),
        // Deliberately the weakest axis, not a consecutive-day count
        workout_streak: workouts_completed.min(meals_logged).min(hydration_days),
    }
}

/// A day counts when intake reaches `ratio` of a positive goal
pub fn is_hydrated(log: &HydrationLog, ratio: f64) -> bool {
    if log.goal_oz <= 0.0 || !log.goal_oz.is_finite() {
        return false;
    }
    log.current_oz / log.goal_oz >= ratio
}

/// Up to `max_recent_prs` PR sets from the newest `pr_scan_logs` workouts,
/// in scan order (newest log first, set order within a log)
pub fn recent_personal_records(
    logs: &[WorkoutLog],
    policy: &ConsistencyPolicy,
) -> Vec<PersonalRecord> {
    let mut newest_first: Vec<&WorkoutLog> = logs.iter().collect();
    newest_first.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    newest_first
        .into_iter()
        .take(policy.pr_scan_logs)
        .flat_map(|log| {
            log.sets
                .iter()
                .filter(|set| set.is_pr)
                .map(move |set| PersonalRecord {
                    exercise: set.exercise.clone(),
                    weight: set.weight,
                    reps: set.reps,
                    achieved_at: log.completed_at,
                })
        })
        .take(policy.max_recent_prs)
        .collect()
}
