//! Tunable policy for the progress and scheduling engine
//!
//! Every threshold the engine applies lives here so it can be audited and
//! overridden from configuration. Defaults reproduce the shipped behaviour.

use serde::{Deserialize, Serialize};

/// Cap and multiplier for one branch of the calorie adjustment table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRule {
    /// Maximum kcal change per adjustment
    pub cap: f64,
    /// kcal per lb of deviation from the expected change
    pub multiplier: f64,
}

impl AdjustmentRule {
    pub const fn new(cap: f64, multiplier: f64) -> Self {
        Self { cap, multiplier }
    }

    /// `min(cap, |deviation| * multiplier)`
    pub fn amount(&self, deviation: f64) -> f64 {
        (deviation.abs() * self.multiplier).min(self.cap)
    }
}

/// Weight progress analysis thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPolicy {
    /// Only entries from the trailing window are analyzed
    pub window_days: i64,
    pub min_entries: usize,
    /// Floor for `weeks_passed`
    pub min_weeks: f64,
    /// Allowed deviation of the progress rate around 1.0
    pub tolerance: f64,
    /// lbs/week above which the engine recommends slowing down
    pub safe_weekly_rate_limit: f64,
    /// Projections beyond this horizon are discarded
    pub projection_horizon_weeks: f64,
    /// Losing too fast
    pub loss_increase: AdjustmentRule,
    /// Losing too slowly
    pub loss_decrease: AdjustmentRule,
    /// Gaining too fast
    pub gain_decrease: AdjustmentRule,
    /// Gaining too slowly
    pub gain_increase: AdjustmentRule,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            window_days: 28,
            min_entries: 2,
            min_weeks: 0.5,
            tolerance: 0.25,
            safe_weekly_rate_limit: 2.5,
            projection_horizon_weeks: 104.0,
            loss_increase: AdjustmentRule::new(200.0, 100.0),
            loss_decrease: AdjustmentRule::new(300.0, 150.0),
            gain_decrease: AdjustmentRule::new(250.0, 125.0),
            gain_increase: AdjustmentRule::new(400.0, 200.0),
        }
    }
}

impl AnalysisPolicy {
    pub fn upper_rate(&self) -> f64 {
        1.0 + self.tolerance
    }

    pub fn lower_rate(&self) -> f64 {
        1.0 - self.tolerance
    }
}

/// Macro plan bounds, cooldown and redistribution split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroPolicy {
    pub cooldown_days: i64,
    pub min_calories: i32,
    pub max_calories: i32,
    pub min_protein_grams: i32,
    pub min_carb_grams: i32,
    pub min_fat_grams: i32,
    pub carb_share: f64,
    pub fat_share: f64,
    pub protein_share: f64,
    pub protein_kcal_per_gram: f64,
    pub carb_kcal_per_gram: f64,
    pub fat_kcal_per_gram: f64,
}

impl Default for MacroPolicy {
    fn default() -> Self {
        Self {
            cooldown_days: 7,
            min_calories: 1200,
            max_calories: 4000,
            min_protein_grams: 80,
            min_carb_grams: 50,
            min_fat_grams: 30,
            carb_share: 0.5,
            fat_share: 0.3,
            protein_share: 0.2,
            protein_kcal_per_gram: 4.0,
            carb_kcal_per_gram: 4.0,
            fat_kcal_per_gram: 9.0,
        }
    }
}

/// Rolling consistency thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsistencyPolicy {
    pub window_days: i64,
    /// A day counts as "meals logged" at this many entries
    pub meals_per_day: usize,
    /// A day counts as hydrated at this fraction of the goal
    pub hydration_ratio: f64,
    /// Number of most recent workout logs scanned for PRs
    pub pr_scan_logs: usize,
    pub max_recent_prs: usize,
}

impl Default for ConsistencyPolicy {
    fn default() -> Self {
        Self {
            window_days: 7,
            meals_per_day: 3,
            hydration_ratio: 0.8,
            pr_scan_logs: 10,
            max_recent_prs: 3,
        }
    }
}

/// Complete engine policy
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePolicy {
    pub analysis: AnalysisPolicy,
    pub macros: MacroPolicy,
    pub consistency: ConsistencyPolicy,
}
