//! Hydration log repository (`users/{uid}/hydrationLogs/{date}`)

use super::{decode, encode};
use crate::error::EngineResult;
use crate::store::{paths, DocumentStore};
use chrono::NaiveDate;
use fitplan_shared::HydrationLog;

pub struct HydrationLogRepository;

impl HydrationLogRepository {
    pub async fn get_for_date(
        store: &dyn DocumentStore,
        uid: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<HydrationLog>> {
        let path = paths::hydration_log(uid, date);
        match store.get(&path).await? {
            Some(doc) => Ok(Some(decode(&path, doc.data)?)),
            None => Ok(None),
        }
    }

    pub async fn set_for_date(
        store: &dyn DocumentStore,
        uid: &str,
        date: NaiveDate,
        log: &HydrationLog,
    ) -> EngineResult<()> {
        store.set(&paths::hydration_log(uid, date), encode(log)?).await?;
        Ok(())
    }
}
