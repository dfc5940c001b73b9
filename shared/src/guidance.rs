//! Human-readable nutrition guidance from a progress analysis

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{GoalDirection, ProgressAnalysis, RecommendedAction, WeightGoal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceTone {
    Info,
    Positive,
    Adjust,
    Caution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionGuidance {
    pub tone: GuidanceTone,
    pub headline: String,
    pub detail: String,
}

impl fmt::Display for NutritionGuidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.headline, self.detail)
    }
}

pub fn format_guidance(
    analysis: Option<&ProgressAnalysis>,
    goal: Option<&WeightGoal>,
) -> NutritionGuidance {
    let (Some(analysis), Some(goal)) = (analysis, goal) else {
        return NutritionGuidance {
            tone: GuidanceTone::Info,
            headline: "Not enough data yet".to_string(),
            detail: "Log at least two weigh-ins over the next few days to unlock personalized guidance."
                .to_string(),
        };
    };

    let observed = format_rate(analysis.weekly_rate());
    let planned = format_rate(goal.weekly_goal);
    let amount = analysis.adjustment_amount.round() as i64;

    match analysis.recommended_action {
        RecommendedAction::SlowDown => NutritionGuidance {
            tone: GuidanceTone::Caution,
            headline: "Slow down".to_string(),
            detail: analysis.warning_message.clone().unwrap_or_else(|| {
                format!("Your weight is changing at {}, which is faster than is safe.", observed)
            }),
        },
        RecommendedAction::IncreaseCalories => NutritionGuidance {
            tone: GuidanceTone::Adjust,
            headline: format!("Add about {} calories a day", amount),
            detail: match goal.direction() {
                GoalDirection::Gain => format!(
                    "You're gaining {} against a plan of {}. A little more fuel will help.",
                    observed, planned
                ),
                _ => format!(
                    "You're losing {} against a plan of {}. Eating a bit more protects muscle and energy.",
                    observed, planned
                ),
            },
        },
        RecommendedAction::DecreaseCalories => NutritionGuidance {
            tone: GuidanceTone::Adjust,
            headline: format!("Trim about {} calories a day", amount),
            detail: match goal.direction() {
                GoalDirection::Gain => format!(
                    "You're gaining {} against a plan of {}. Easing off keeps the gain lean.",
                    observed, planned
                ),
                _ => format!(
                    "You're changing {} against a plan of {}. A small cut gets you back on pace.",
                    observed, planned
                ),
            },
        },
        RecommendedAction::Maintain => NutritionGuidance {
            tone: GuidanceTone::Positive,
            headline: "Right on track".to_string(),
            detail: match goal.direction() {
                GoalDirection::Maintain => {
                    "You're holding steady. Keep your current targets.".to_string()
                }
                _ => format!(
                    "You're changing {} against a plan of {}. Keep doing what you're doing.",
                    observed, planned
                ),
            },
        },
    }
}

fn format_rate(lbs_per_week: f64) -> String {
    format!("{:.1} lbs/week", lbs_per_week.abs())
}
