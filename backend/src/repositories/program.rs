//! Active program and weekly environment map repository

use super::{decode, encode};
use crate::error::{EngineError, EngineResult};
use crate::store::{paths, DocumentStore, Precondition};
use fitplan_shared::schedule::advance_cursor;
use fitplan_shared::validation::validate_program;
use fitplan_shared::{ActiveProgram, DocumentError, EnvironmentMap, WeekdayKey};
use serde_json::{Map, Value};
use tracing::warn;

const SCHEDULE_FIELD: &str = "schedule";
const ENVIRONMENT_MAP_FIELD: &str = "environmentMap";
const CURRENT_DAY_FIELD: &str = "currentDay";

/// Reads and writes `schedule.environmentMap` on the profile document
pub struct ProfileRepository;

impl ProfileRepository {
    /// Weekly environment map; empty when the profile or map is absent.
    ///
    /// Unknown weekday keys and non-string values are skipped with a warning.
    pub async fn get_environment_map(
        store: &dyn DocumentStore,
        uid: &str,
    ) -> EngineResult<EnvironmentMap> {
        let path = paths::user(uid);
        let Some(doc) = store.get(&path).await? else {
            return Ok(EnvironmentMap::new());
        };

        let raw = doc
            .data
            .get(SCHEDULE_FIELD)
            .and_then(|schedule| schedule.get(ENVIRONMENT_MAP_FIELD));
        let entries = match raw {
            None | Some(Value::Null) => return Ok(EnvironmentMap::new()),
            Some(Value::Object(entries)) => entries,
            Some(_) => {
                return Err(DocumentError::invalid(
                    path,
                    "schedule.environmentMap",
                    "expected an object keyed by weekday",
                )
                .into())
            }
        };

        let mut map = EnvironmentMap::new();
        for (key, value) in entries {
            let Ok(weekday) = key.parse::<WeekdayKey>() else {
                warn!(uid = %uid, key = %key, "Skipping unknown weekday in environment map");
                continue;
            };
            match value.as_str() {
                Some(environment) => map.insert(weekday, environment),
                None => warn!(uid = %uid, key = %key, "Skipping non-string environment"),
            }
        }
        Ok(map)
    }

    /// Replace the environment map, keeping the rest of the profile intact
    pub async fn set_environment_map(
        store: &dyn DocumentStore,
        uid: &str,
        map: &EnvironmentMap,
    ) -> EngineResult<()> {
        let path = paths::user(uid);
        let mut profile = match store.get(&path).await? {
            Some(doc) => doc.data,
            None => Value::Object(Map::new()),
        };

        let Value::Object(fields) = &mut profile else {
            return Err(DocumentError::Malformed {
                document: path,
                reason: "profile is not an object".to_string(),
            }
            .into());
        };
        let schedule = fields
            .entry(SCHEDULE_FIELD)
            .or_insert_with(|| Value::Object(Map::new()));
        match schedule {
            Value::Object(schedule) => {
                schedule.insert(ENVIRONMENT_MAP_FIELD.to_string(), encode(map)?);
            }
            other => {
                let mut replacement = Map::new();
                replacement.insert(ENVIRONMENT_MAP_FIELD.to_string(), encode(map)?);
                *other = Value::Object(replacement);
            }
        }

        store.set(&path, profile).await?;
        Ok(())
    }
}

/// Active program repository (`users/{uid}/program/active`)
pub struct ProgramRepository;

impl ProgramRepository {
    pub async fn get_active(
        store: &dyn DocumentStore,
        uid: &str,
    ) -> EngineResult<Option<ActiveProgram>> {
        let path = paths::active_program(uid);
        match store.get(&path).await? {
            Some(doc) => Ok(Some(decode(&path, doc.data)?)),
            None => Ok(None),
        }
    }

    /// Store a new active program; templates without days are rejected
    pub async fn set_active(
        store: &dyn DocumentStore,
        uid: &str,
        program: &ActiveProgram,
    ) -> EngineResult<()> {
        validate_program(&program.template)?;
        store
            .set(&paths::active_program(uid), encode(program)?)
            .await?;
        Ok(())
    }

    /// Move the cursor one day forward, wrapping to 1 after the last day.
    ///
    /// Returns the new cursor, or `None` when there is no active program.
    /// Fails with `Conflict` if `currentDay` changed between read and write.
    pub async fn advance_cursor(store: &dyn DocumentStore, uid: &str) -> EngineResult<Option<u32>> {
        let path = paths::active_program(uid);
        let Some(doc) = store.get(&path).await? else {
            return Ok(None);
        };

        let read_cursor = doc.data.get(CURRENT_DAY_FIELD).cloned();
        let mut program: ActiveProgram = decode(&path, doc.data)?;
        program.current_day = advance_cursor(program.current_day, program.template.days.len());

        let precondition = Precondition::FieldEquals {
            field: CURRENT_DAY_FIELD.to_string(),
            value: read_cursor,
        };
        if !store.set_if(&path, encode(&program)?, &precondition).await? {
            return Err(EngineError::Conflict(path));
        }
        Ok(Some(program.current_day))
    }
}
