//! Macro plan, adjustment audit log and meal log repository

use super::{decode, encode};
use crate::error::EngineResult;
use crate::store::{paths, DocumentStore, Precondition};
use chrono::NaiveDate;
use fitplan_shared::{AdjustmentRecord, MacroPlan, MealEntry};
use serde_json::Value;

const LAST_ADJUSTMENT_FIELD: &str = "lastAdjustment";

/// A macro plan together with the raw `lastAdjustment` value it was read with,
/// used as the compare-and-set token on write
#[derive(Debug, Clone)]
pub struct StoredMacroPlan {
    pub plan: MacroPlan,
    pub last_adjustment_token: Option<Value>,
}

/// Active macro plan repository (`users/{uid}/mealPlan/active`)
pub struct MacroPlanRepository;

impl MacroPlanRepository {
    pub async fn get(store: &dyn DocumentStore, uid: &str) -> EngineResult<Option<StoredMacroPlan>> {
        let path = paths::meal_plan(uid);
        let Some(doc) = store.get(&path).await? else {
            return Ok(None);
        };

        let last_adjustment_token = doc
            .data
            .get(LAST_ADJUSTMENT_FIELD)
            .filter(|v| !v.is_null())
            .cloned();
        let plan = decode(&path, doc.data)?;
        Ok(Some(StoredMacroPlan {
            plan,
            last_adjustment_token,
        }))
    }

    pub async fn set(store: &dyn DocumentStore, uid: &str, plan: &MacroPlan) -> EngineResult<()> {
        store.set(&paths::meal_plan(uid), encode(plan)?).await?;
        Ok(())
    }

    /// Write `plan` only if `lastAdjustment` still matches what was read.
    ///
    /// Returns false when another writer adjusted the plan in between.
    pub async fn replace_if_unchanged(
        store: &dyn DocumentStore,
        uid: &str,
        plan: &MacroPlan,
        read: &StoredMacroPlan,
    ) -> EngineResult<bool> {
        let precondition = Precondition::FieldEquals {
            field: LAST_ADJUSTMENT_FIELD.to_string(),
            value: read.last_adjustment_token.clone(),
        };
        let written = store
            .set_if(&paths::meal_plan(uid), encode(plan)?, &precondition)
            .await?;
        Ok(written)
    }
}

/// Write-only audit trail of automatic plan changes
pub struct AdjustmentLogRepository;

impl AdjustmentLogRepository {
    /// Record an adjustment at `users/{uid}/nutritionAdjustments/{millis}`
    pub async fn append(
        store: &dyn DocumentStore,
        uid: &str,
        record: &AdjustmentRecord,
    ) -> EngineResult<String> {
        let path = paths::nutrition_adjustment(uid, record.created_at);
        store.set(&path, encode(record)?).await?;
        Ok(path)
    }
}

/// Per-day meal logs (`users/{uid}/mealLogs/{date}/meals`)
pub struct MealLogRepository;

impl MealLogRepository {
    pub async fn create(
        store: &dyn DocumentStore,
        uid: &str,
        date: NaiveDate,
        meal: &MealEntry,
    ) -> EngineResult<String> {
        let id = store.add(&paths::meals(uid, date), encode(meal)?).await?;
        Ok(id)
    }

    /// Number of meal entries logged on a date; contents are not inspected
    pub async fn count_for_date(
        store: &dyn DocumentStore,
        uid: &str,
        date: NaiveDate,
    ) -> EngineResult<usize> {
        Ok(store.list(&paths::meals(uid, date)).await?.len())
    }
}
