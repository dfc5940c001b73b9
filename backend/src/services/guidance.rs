//! Nutrition guidance service

use crate::error::{EngineError, EngineResult};
use crate::services::progress::ProgressService;
use crate::store::DocumentStore;
use chrono::{DateTime, FixedOffset};
use fitplan_shared::guidance::{format_guidance, NutritionGuidance};
use fitplan_shared::EnginePolicy;

pub struct GuidanceService;

impl GuidanceService {
    /// Guidance for the current weight trend. Without a goal or enough
    /// weigh-ins this is the "not enough data yet" message.
    pub async fn current(
        store: &dyn DocumentStore,
        uid: &str,
        now: DateTime<FixedOffset>,
        policy: &EnginePolicy,
    ) -> EngineResult<NutritionGuidance> {
        let progress = ProgressService::load(store, uid, now, policy)
            .await
            .map_err(EngineError::logged)?;

        Ok(match &progress {
            Some(progress) => format_guidance(progress.analysis.as_ref(), Some(&progress.goal)),
            None => format_guidance(None, None),
        })
    }
}
