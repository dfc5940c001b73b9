//! Document and collection paths used by the engine

use chrono::{DateTime, NaiveDate, Utc};
use fitplan_shared::time_window::date_key;

/// Profile document holding `schedule.environmentMap`
pub fn user(uid: &str) -> String {
    format!("users/{}", uid)
}

pub fn weight_goal(uid: &str) -> String {
    format!("users/{}/goals/weight", uid)
}

pub fn weight_entries(uid: &str) -> String {
    format!("users/{}/weightEntries", uid)
}

pub fn meal_plan(uid: &str) -> String {
    format!("users/{}/mealPlan/active", uid)
}

/// Audit record keyed by the adjustment time in epoch milliseconds
pub fn nutrition_adjustment(uid: &str, at: DateTime<Utc>) -> String {
    format!("users/{}/nutritionAdjustments/{}", uid, at.timestamp_millis())
}

pub fn active_program(uid: &str) -> String {
    format!("users/{}/program/active", uid)
}

pub fn workout_logs(uid: &str) -> String {
    format!("users/{}/workoutLogs", uid)
}

pub fn meals(uid: &str, date: NaiveDate) -> String {
    format!("users/{}/mealLogs/{}/meals", uid, date_key(date))
}

pub fn hydration_log(uid: &str, date: NaiveDate) -> String {
    format!("users/{}/hydrationLogs/{}", uid, date_key(date))
}

/// Split a document path into `(collection, id)`.
///
/// Returns `None` unless the path has an even, non-zero number of
/// non-empty segments.
pub fn split_document(path: &str) -> Option<(&str, &str)> {
    let segments = path.split('/').collect::<Vec<_>>();
    if segments.is_empty() || segments.len() % 2 != 0 || segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    path.rsplit_once('/')
}

/// A collection path has an odd number of non-empty segments
pub fn is_collection(path: &str) -> bool {
    let segments = path.split('/').collect::<Vec<_>>();
    segments.len() % 2 == 1 && segments.iter().all(|s| !s.is_empty())
}
