//! Weight progress service
//!
//! Loads the weight goal and the weigh-ins of the analysis window, then runs
//! the pure analyzer over them.

use crate::error::EngineResult;
use crate::repositories::{WeightEntryRepository, WeightGoalRepository};
use crate::store::DocumentStore;
use chrono::{DateTime, FixedOffset};
use fitplan_shared::progress::analyze;
use fitplan_shared::{DateWindow, EnginePolicy, ProgressAnalysis, WeightGoal};
use tracing::debug;

/// A goal and its analysis; `analysis` is `None` until enough weigh-ins exist
#[derive(Debug, Clone)]
pub struct GoalProgress {
    pub goal: WeightGoal,
    pub analysis: Option<ProgressAnalysis>,
}

pub struct ProgressService;

impl ProgressService {
    /// Load the goal and analyze it. Returns `None` when no goal is set.
    pub async fn load(
        store: &dyn DocumentStore,
        uid: &str,
        now: DateTime<FixedOffset>,
        policy: &EnginePolicy,
    ) -> EngineResult<Option<GoalProgress>> {
        let Some(goal) = WeightGoalRepository::get(store, uid).await? else {
            debug!(uid = %uid, "No weight goal set");
            return Ok(None);
        };

        let window = DateWindow::trailing_days(now, policy.analysis.window_days);
        let entries =
            WeightEntryRepository::get_by_date_range(store, uid, window.start, window.end).await?;
        let analysis = analyze(&goal, &entries, now, &policy.analysis);
        if analysis.is_none() {
            debug!(uid = %uid, entries = entries.len(), "Not enough weigh-ins to analyze");
        }

        Ok(Some(GoalProgress { goal, analysis }))
    }

    pub async fn analyze(
        store: &dyn DocumentStore,
        uid: &str,
        now: DateTime<FixedOffset>,
        policy: &EnginePolicy,
    ) -> EngineResult<Option<ProgressAnalysis>> {
        Ok(Self::load(store, uid, now, policy)
            .await?
            .and_then(|progress| progress.analysis))
    }
}
