//! Input validation functions
//!
//! Checks applied to user supplied values before they are written to the
//! document store.

use crate::errors::ValidationError;
use crate::models::{ProgramTemplate, WeightGoal};

/// Accepted body weight range, lbs
pub const MIN_WEIGHT_LBS: f64 = 50.0;
pub const MAX_WEIGHT_LBS: f64 = 1000.0;

/// Largest weekly goal magnitude accepted, lbs/week
pub const MAX_WEEKLY_GOAL_LBS: f64 = 3.0;

/// Validate weight value (in lbs)
pub fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if weight.is_nan() || weight.is_infinite() {
        return Err(ValidationError::NonFiniteWeight);
    }
    if !(MIN_WEIGHT_LBS..=MAX_WEIGHT_LBS).contains(&weight) {
        return Err(ValidationError::WeightOutOfRange {
            min: MIN_WEIGHT_LBS,
            max: MAX_WEIGHT_LBS,
        });
    }
    Ok(())
}

/// Validate a weight goal before it is stored
pub fn validate_goal(goal: &WeightGoal) -> Result<(), ValidationError> {
    validate_weight(goal.current_weight)?;
    validate_weight(goal.target_weight)?;
    if !goal.weekly_goal.is_finite() || goal.weekly_goal.abs() > MAX_WEEKLY_GOAL_LBS {
        return Err(ValidationError::WeeklyGoalOutOfRange {
            limit: MAX_WEEKLY_GOAL_LBS,
        });
    }
    Ok(())
}

/// Validate a program template before it becomes the active program
pub fn validate_program(template: &ProgramTemplate) -> Result<(), ValidationError> {
    if template.days.is_empty() {
        return Err(ValidationError::EmptyProgram);
    }
    if !(1..=7).contains(&template.days_per_week) {
        return Err(ValidationError::DaysPerWeekOutOfRange);
    }
    Ok(())
}
