//! Weight progress analysis
//!
//! Compares the observed rate of weight change against the goal's weekly
//! target and recommends a calorie action. The model is a straight line
//! between the earliest and latest weigh-in of the trailing window; there is
//! no smoothing or outlier rejection.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::models::{GoalDirection, ProgressAnalysis, RecommendedAction, WeightEntry, WeightGoal};
use crate::policy::AnalysisPolicy;
use crate::time_window::DateWindow;

const DAYS_PER_WEEK: f64 = 7.0;

/// Analyze recent weigh-ins against a goal.
///
/// Returns `None` when fewer than two entries fall inside the analysis
/// window. That is "not enough data yet", not a failure.
pub fn analyze(
    goal: &WeightGoal,
    entries: &[WeightEntry],
    now: DateTime<FixedOffset>,
    policy: &AnalysisPolicy,
) -> Option<ProgressAnalysis> {
    let window = DateWindow::trailing_days(now, policy.window_days);
    let mut recent: Vec<&WeightEntry> = entries
        .iter()
        .filter(|e| window.contains(e.date) && e.weight.is_finite())
        .collect();

    if recent.len() < policy.min_entries.max(2) {
        return None;
    }
    recent.sort_by_key(|e| e.date);

    let earliest = recent[0];
    let latest = recent[recent.len() - 1];

    let days_between = (latest.date - earliest.date).num_days().max(1) as f64;
    let weeks_passed = (days_between / DAYS_PER_WEEK).max(policy.min_weeks);

    let actual_weight_change = latest.weight - earliest.weight;
    let expected_weight_change = goal.weekly_goal * weeks_passed;

    let progress_rate = if expected_weight_change != 0.0 {
        actual_weight_change / expected_weight_change
    } else {
        1.0
    };

    let (mut recommended_action, adjustment_amount) = recommend(
        goal.direction(),
        progress_rate,
        actual_weight_change - expected_weight_change,
        policy,
    );

    let mut warning_message = None;
    let weekly_rate = actual_weight_change / weeks_passed;
    if goal.direction() != GoalDirection::Maintain
        && weekly_rate.abs() > policy.safe_weekly_rate_limit
    {
        recommended_action = RecommendedAction::SlowDown;
        warning_message = Some(format!(
            "You're {} {:.1} lbs per week, faster than the {:.1} lbs/week safe limit. \
             Review your plan before making further changes.",
            if weekly_rate < 0.0 { "losing" } else { "gaining" },
            weekly_rate.abs(),
            policy.safe_weekly_rate_limit,
        ));
    }

    let projected_goal_date = project_goal_date(
        goal.target_weight - latest.weight,
        actual_weight_change,
        weeks_passed,
        now.with_timezone(&Utc),
        policy.projection_horizon_weeks,
    );

    Some(ProgressAnalysis {
        weeks_passed,
        expected_weight_change,
        actual_weight_change,
        progress_rate: if progress_rate.is_finite() { progress_rate } else { 1.0 },
        recommended_action,
        adjustment_amount,
        warning_message,
        projected_goal_date,
    })
}

/// Goal-direction decision table. Returns the action and its kcal amount.
fn recommend(
    direction: GoalDirection,
    progress_rate: f64,
    deviation: f64,
    policy: &AnalysisPolicy,
) -> (RecommendedAction, f64) {
    let too_fast = progress_rate > policy.upper_rate();
    let too_slow = progress_rate < policy.lower_rate();

    let (action, rule) = match direction {
        GoalDirection::Maintain => return (RecommendedAction::Maintain, 0.0),
        GoalDirection::Loss if too_fast => {
            (RecommendedAction::IncreaseCalories, policy.loss_increase)
        }
        GoalDirection::Loss if too_slow => {
            (RecommendedAction::DecreaseCalories, policy.loss_decrease)
        }
        GoalDirection::Gain if too_fast => {
            (RecommendedAction::DecreaseCalories, policy.gain_decrease)
        }
        GoalDirection::Gain if too_slow => {
            (RecommendedAction::IncreaseCalories, policy.gain_increase)
        }
        _ => return (RecommendedAction::Maintain, 0.0),
    };

    let amount = rule.amount(deviation);
    (action, if amount.is_finite() { amount } else { 0.0 })
}

/// Linear extrapolation of the current rate to the target weight
pub fn project_goal_date(
    remaining_weight: f64,
    actual_weight_change: f64,
    weeks_passed: f64,
    now: DateTime<Utc>,
    horizon_weeks: f64,
) -> Option<DateTime<Utc>> {
    if actual_weight_change == 0.0 {
        return None;
    }

    let current_rate = actual_weight_change / weeks_passed;
    let weeks_to_goal = (remaining_weight / current_rate).abs();
    if !weeks_to_goal.is_finite() || weeks_to_goal > horizon_weeks {
        return None;
    }

    let seconds = (weeks_to_goal * DAYS_PER_WEEK * 86_400.0).round() as i64;
    now.checked_add_signed(Duration::seconds(seconds))
}
