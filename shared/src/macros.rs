//! Macro plan arithmetic
//!
//! Pure half of the plan adjuster: applies a calorie delta to a plan,
//! redistributes it across macros and enforces the plan bounds.

use crate::models::MacroPlan;
use crate::policy::MacroPolicy;

/// Result of applying a calorie delta
#[derive(Debug, Clone, PartialEq)]
pub struct MacroChange {
    pub plan: MacroPlan,
    /// Calorie change actually applied after clamping
    pub applied_delta: i32,
}

/// Clamp a calorie target into the allowed range
pub fn clamp_calories(calories: f64, policy: &MacroPolicy) -> i32 {
    if !calories.is_finite() {
        return policy.min_calories;
    }
    let rounded = calories.round();
    rounded.clamp(policy.min_calories as f64, policy.max_calories as f64) as i32
}

/// Apply `delta` kcal to a plan.
///
/// The applied delta is split 50% carbs, 30% fat, 20% protein (by default),
/// converted to grams and rounded. Each macro is floored at its minimum.
/// `last_adjustment` is left untouched; the caller stamps it.
pub fn apply_calorie_delta(plan: &MacroPlan, delta: f64, policy: &MacroPolicy) -> MacroChange {
    let calorie_target = clamp_calories(plan.calorie_target as f64 + delta, policy);
    let applied_delta = calorie_target - plan.calorie_target;
    let applied = applied_delta as f64;

    let grams = |share: f64, kcal_per_gram: f64| (applied * share / kcal_per_gram).round() as i32;

    let protein_grams = (plan.protein_grams
        + grams(policy.protein_share, policy.protein_kcal_per_gram))
    .max(policy.min_protein_grams);
    let carb_grams =
        (plan.carb_grams + grams(policy.carb_share, policy.carb_kcal_per_gram)).max(policy.min_carb_grams);
    let fat_grams =
        (plan.fat_grams + grams(policy.fat_share, policy.fat_kcal_per_gram)).max(policy.min_fat_grams);

    MacroChange {
        plan: MacroPlan {
            calorie_target,
            protein_grams,
            carb_grams,
            fat_grams,
            goal_type: plan.goal_type,
            last_adjustment: plan.last_adjustment,
        },
        applied_delta,
    }
}

/// Energy implied by a plan's grams under the policy's kcal/g factors
pub fn plan_macro_calories(plan: &MacroPlan, policy: &MacroPolicy) -> f64 {
    plan.macro_calories(
        policy.protein_kcal_per_gram,
        policy.carb_kcal_per_gram,
        policy.fat_kcal_per_gram,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoalType;
    use proptest::prelude::*;

    fn plan(calories: i32, protein: i32, carbs: i32, fat: i32) -> MacroPlan {
        MacroPlan {
            calorie_target: calories,
            protein_grams: protein,
            carb_grams: carbs,
            fat_grams: fat,
            goal_type: GoalType::Fatloss,
            last_adjustment: None,
        }
    }

    #[test]
    fn test_increase_splits_across_macros() {
        let policy = MacroPolicy::default();
        // 180*4 + 220*4 + 60*9 = 2140
        let change = apply_calorie_delta(&plan(2140, 180, 220, 60), 200.0, &policy);
        assert_eq!(change.applied_delta, 200);
        assert_eq!(change.plan.calorie_target, 2340);
        assert_eq!(change.plan.protein_grams, 190); // 40 kcal
        assert_eq!(change.plan.carb_grams, 245); // 100 kcal
        assert_eq!(change.plan.fat_grams, 67); // 60 kcal → 6.67g
        assert_eq!(change.plan.goal_type, GoalType::Fatloss);
    }

    #[test]
    fn test_decrease_respects_gram_floors() {
        let policy = MacroPolicy::default();
        let change = apply_calorie_delta(&plan(1500, 85, 60, 32), -300.0, &policy);
        assert_eq!(change.plan.calorie_target, 1200);
        assert_eq!(change.plan.protein_grams, 80);
        assert_eq!(change.plan.carb_grams, 50);
        assert_eq!(change.plan.fat_grams, 30);
    }

    #[test]
    fn test_calorie_ceiling_limits_applied_delta() {
        let policy = MacroPolicy::default();
        let change = apply_calorie_delta(&plan(3900, 250, 450, 120), 400.0, &policy);
        assert_eq!(change.plan.calorie_target, 4000);
        assert_eq!(change.applied_delta, 100);
        assert_eq!(change.plan.carb_grams, 450 + 13);
    }

    #[test]
    fn test_clamp_calories_non_finite() {
        let policy = MacroPolicy::default();
        assert_eq!(clamp_calories(f64::NAN, &policy), 1200);
        assert_eq!(clamp_calories(f64::INFINITY, &policy), 1200);
        assert_eq!(clamp_calories(800.0, &policy), 1200);
        assert_eq!(clamp_calories(9000.0, &policy), 4000);
        assert_eq!(clamp_calories(2149.6, &policy), 2150);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_calories_stay_in_bounds(
            calories in 0i32..6000,
            delta in -1000.0f64..1000.0,
        ) {
            let policy = MacroPolicy::default();
            let change = apply_calorie_delta(&plan(calories, 150, 200, 60), delta, &policy);
            prop_assert!(change.plan.calorie_target >= 1200 && change.plan.calorie_target <= 4000);
            prop_assert!(change.plan.protein_grams >= 80);
            prop_assert!(change.plan.carb_grams >= 50);
            prop_assert!(change.plan.fat_grams >= 30);
        }

        // A balanced plan stays balanced within rounding
        #[test]
        fn prop_energy_balance_preserved(
            protein in 120i32..250,
            carbs in 100i32..400,
            fat in 50i32..120,
            delta in -300.0f64..400.0,
        ) {
            let policy = MacroPolicy::default();
            let calories = protein * 4 + carbs * 4 + fat * 9;
            prop_assume!((1200..=4000).contains(&calories));

            let change = apply_calorie_delta(&plan(calories, protein, carbs, fat), delta, &policy);
            let implied = plan_macro_calories(&change.plan, &policy);
            prop_assert!(
                (implied - change.plan.calorie_target as f64).abs() <= 10.0,
                "implied {} vs target {}", implied, change.plan.calorie_target
            );
        }
    }
}
