//! Data models for the Fitplan engine
//!
//! Persisted records use camelCase field names so they line up with the
//! documents written by the mobile client.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time_window::WeekdayKey;

// ============================================================================
// Weight
// ============================================================================

/// A single weigh-in. Append-only, never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    /// Body weight in lbs
    pub weight: f64,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The user's active weight goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightGoal {
    pub current_weight: f64,
    pub target_weight: f64,
    /// Signed lbs/week: negative = loss, positive = gain, zero = maintain
    pub weekly_goal: f64,
    pub start_date: DateTime<Utc>,
}

/// Which branch of the progress policy a goal falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalDirection {
    Loss,
    Gain,
    Maintain,
}

impl WeightGoal {
    pub fn direction(&self) -> GoalDirection {
        if self.weekly_goal < 0.0 {
            GoalDirection::Loss
        } else if self.weekly_goal > 0.0 {
            GoalDirection::Gain
        } else {
            GoalDirection::Maintain
        }
    }
}

// ============================================================================
// Nutrition
// ============================================================================

/// Goal type attached to a macro plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    #[default]
    Maintain,
    Fatloss,
    Muscle,
}

/// Daily calorie and macro targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroPlan {
    pub calorie_target: i32,
    pub protein_grams: i32,
    pub carb_grams: i32,
    pub fat_grams: i32,
    #[serde(default)]
    pub goal_type: GoalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_adjustment: Option<DateTime<Utc>>,
}

impl MacroPlan {
    /// Energy implied by the gram targets, using the given kcal/g factors
    pub fn macro_calories(&self, protein_kcal: f64, carb_kcal: f64, fat_kcal: f64) -> f64 {
        self.protein_grams as f64 * protein_kcal
            + self.carb_grams as f64 * carb_kcal
            + self.fat_grams as f64 * fat_kcal
    }
}

/// Action recommended by the progress analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    Maintain,
    IncreaseCalories,
    DecreaseCalories,
    SlowDown,
}

impl RecommendedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maintain => "maintain",
            Self::IncreaseCalories => "increase_calories",
            Self::DecreaseCalories => "decrease_calories",
            Self::SlowDown => "slow_down",
        }
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived, never persisted. Recomputed from weight history on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAnalysis {
    pub weeks_passed: f64,
    pub expected_weight_change: f64,
    pub actual_weight_change: f64,
    pub progress_rate: f64,
    pub recommended_action: RecommendedAction,
    pub adjustment_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_goal_date: Option<DateTime<Utc>>,
}

impl ProgressAnalysis {
    /// Observed lbs/week over the analysis window
    pub fn weekly_rate(&self) -> f64 {
        self.actual_weight_change / self.weeks_passed
    }
}

/// Audit entry written after every automatic plan change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentRecord {
    pub previous_calories: i32,
    pub new_calories: i32,
    pub delta: i32,
    pub reason: RecommendedAction,
    pub progress_rate: f64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Training schedule
// ============================================================================

/// Environment tag meaning "rest day"
pub const REST_TAG: &str = "off";

/// Per-weekday training environment ("gym", "home", ...) or `"off"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentMap(BTreeMap<WeekdayKey, String>);

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: WeekdayKey, environment: impl Into<String>) -> Self {
        self.insert(key, environment);
        self
    }

    pub fn insert(&mut self, key: WeekdayKey, environment: impl Into<String>) {
        self.0.insert(key, environment.into());
    }

    pub fn get(&self, key: WeekdayKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(WeekdayKey, String)> for EnvironmentMap {
    fn from_iter<I: IntoIterator<Item = (WeekdayKey, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramExercise {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
}

/// One day of a repeating program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDay {
    pub title: String,
    #[serde(default)]
    pub exercises: Vec<ProgramExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub days_per_week: u32,
    pub days: Vec<ProgramDay>,
}

/// A template instance plus its linear progress cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveProgram {
    #[serde(flatten)]
    pub template: ProgramTemplate,
    /// 1-based, advanced once per completed workout
    pub current_day: u32,
}

// ============================================================================
// Logs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    pub exercise: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub reps: u32,
    #[serde(default, rename = "isPR")]
    pub is_pr: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub completed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<DateTime<Utc>>,
}

/// One day's water intake, in fluid ounces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationLog {
    pub current_oz: f64,
    pub goal_oz: f64,
}

// ============================================================================
// Consistency
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
    pub achieved_at: DateTime<Utc>,
}

/// Rolling 7-day consistency summary. Derived on each load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencySnapshot {
    pub workouts_completed: u32,
    pub workouts_planned: u32,
    /// Days in the last 7 with at least 3 meals logged
    pub meals_logged: u32,
    /// Days in the last 7 at or above 80% of the hydration goal
    pub hydration_days: u32,
    #[serde(rename = "recentPRs")]
    pub recent_prs: Vec<PersonalRecord>,
    pub workout_streak: u32,
}
