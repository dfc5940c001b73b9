//! Automatic macro plan adjustment
//!
//! Turns a progress analysis into a calorie change on the active macro plan:
//! - Cooldown between automatic adjustments (skipped when forced)
//! - Compare-and-set write keyed on the plan's `lastAdjustment`
//! - Audit record per applied change

use crate::error::{EngineError, EngineResult};
use crate::repositories::{AdjustmentLogRepository, MacroPlanRepository};
use crate::services::progress::ProgressService;
use crate::store::DocumentStore;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use fitplan_shared::macros::apply_calorie_delta;
use fitplan_shared::{AdjustmentRecord, EnginePolicy, RecommendedAction};
use tracing::{debug, info, warn};

/// Counter of applied adjustments, labelled by action
pub const ADJUSTMENTS_METRIC: &str = "fitplan_macro_adjustments_total";

pub struct MacroAdjustmentService;

impl MacroAdjustmentService {
    /// Adjust the active macro plan from recent progress.
    ///
    /// Returns `Ok(true)` only when a new plan was written. Missing goal,
    /// plan or analysis, a `maintain`/`slow_down` recommendation, an active
    /// cooldown, a delta fully absorbed by the calorie bounds and a lost
    /// concurrent write all return `Ok(false)`.
    pub async fn adjust(
        store: &dyn DocumentStore,
        uid: &str,
        now: DateTime<FixedOffset>,
        force_adjust: bool,
        policy: &EnginePolicy,
    ) -> EngineResult<bool> {
        Self::try_adjust(store, uid, now, force_adjust, policy)
            .await
            .map_err(EngineError::logged)
    }

    async fn try_adjust(
        store: &dyn DocumentStore,
        uid: &str,
        now: DateTime<FixedOffset>,
        force_adjust: bool,
        policy: &EnginePolicy,
    ) -> EngineResult<bool> {
        let Some(stored) = MacroPlanRepository::get(store, uid).await? else {
            debug!(uid = %uid, "No macro plan to adjust");
            return Ok(false);
        };

        let now_utc = now.with_timezone(&Utc);
        if !force_adjust {
            if let Some(last) = stored.plan.last_adjustment {
                if now_utc - last < Duration::days(policy.macros.cooldown_days) {
                    debug!(uid = %uid, last_adjustment = %last, "Adjustment cooldown active");
                    return Ok(false);
                }
            }
        }

        let Some(progress) = ProgressService::load(store, uid, now, policy).await? else {
            return Ok(false);
        };
        let Some(analysis) = progress.analysis else {
            return Ok(false);
        };

        let sign = match analysis.recommended_action {
            RecommendedAction::IncreaseCalories => 1.0,
            RecommendedAction::DecreaseCalories => -1.0,
            RecommendedAction::Maintain | RecommendedAction::SlowDown => {
                debug!(uid = %uid, action = %analysis.recommended_action, "No calorie change recommended");
                return Ok(false);
            }
        };

        let change = apply_calorie_delta(&stored.plan, sign * analysis.adjustment_amount, &policy.macros);
        if change.applied_delta == 0 {
            debug!(
                uid = %uid,
                calorie_target = stored.plan.calorie_target,
                "Calorie target already at its bound"
            );
            return Ok(false);
        }
        if (change.applied_delta > 0) != (sign > 0.0) {
            // Stored target was outside the bounds; clamping would move it the wrong way
            warn!(
                uid = %uid,
                calorie_target = stored.plan.calorie_target,
                action = %analysis.recommended_action,
                "Calorie target out of bounds, adjustment skipped"
            );
            return Ok(false);
        }

        let mut plan = change.plan;
        plan.last_adjustment = Some(now_utc);
        if !MacroPlanRepository::replace_if_unchanged(store, uid, &plan, &stored).await? {
            warn!(uid = %uid, "Macro plan changed concurrently, adjustment dropped");
            return Ok(false);
        }

        let record = AdjustmentRecord {
            previous_calories: stored.plan.calorie_target,
            new_calories: plan.calorie_target,
            delta: change.applied_delta,
            reason: analysis.recommended_action,
            progress_rate: analysis.progress_rate,
            created_at: now_utc,
        };
        AdjustmentLogRepository::append(store, uid, &record).await?;

        metrics::counter!(ADJUSTMENTS_METRIC, "action" => analysis.recommended_action.as_str())
            .increment(1);
        info!(
            uid = %uid,
            action = %analysis.recommended_action,
            previous_calories = record.previous_calories,
            new_calories = record.new_calories,
            progress_rate = analysis.progress_rate,
            forced = force_adjust,
            "Macro plan adjusted"
        );
        Ok(true)
    }
}
