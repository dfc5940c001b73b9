//! Document repositories
//!
//! Typed access to the documents the engine reads and writes. This is the
//! boundary where loose store documents become validated records: anything
//! that does not decode surfaces as a `DocumentError` here and never reaches
//! the analysis core.

pub mod hydration;
pub mod nutrition;
pub mod program;
pub mod weight;
pub mod workout;

pub use hydration::HydrationLogRepository;
pub use nutrition::{AdjustmentLogRepository, MacroPlanRepository, MealLogRepository, StoredMacroPlan};
pub use program::{ProfileRepository, ProgramRepository};
pub use weight::{WeightEntryRepository, WeightGoalRepository};
pub use workout::{StoredWorkoutLog, WorkoutLogRepository};

use crate::error::{EngineResult, StoreError};
use crate::store::Document;
use fitplan_shared::DocumentError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Decode a stored document into a typed record
pub(crate) fn decode<T: DeserializeOwned>(path: &str, data: Value) -> Result<T, DocumentError> {
    serde_json::from_value(data).map_err(|err| {
        let message = err.to_string();
        match missing_field_name(&message) {
            Some(field) => DocumentError::missing(path, field),
            None => DocumentError::Malformed {
                document: path.to_string(),
                reason: message,
            },
        }
    })
}

/// Decode every document of a query result, naming the offending document on failure
pub(crate) fn decode_all<T: DeserializeOwned>(
    collection: &str,
    docs: Vec<Document>,
) -> EngineResult<Vec<T>> {
    docs.into_iter()
        .map(|doc| {
            let path = format!("{}/{}", collection, doc.id);
            decode(&path, doc.data).map_err(Into::into)
        })
        .collect()
}

/// Like [`decode_all`], keeping each record's document id
pub(crate) fn decode_keyed<T: DeserializeOwned>(
    collection: &str,
    docs: Vec<Document>,
) -> EngineResult<Vec<(String, T)>> {
    docs.into_iter()
        .map(|doc| -> EngineResult<(String, T)> {
            let path = format!("{}/{}", collection, doc.id);
            let record = decode(&path, doc.data)?;
            Ok((doc.id, record))
        })
        .collect()
}

pub(crate) fn encode<T: Serialize>(record: &T) -> Result<Value, StoreError> {
    Ok(serde_json::to_value(record)?)
}

/// serde_json reports missing fields as "missing field `name` at line ..."
fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}
