//! Training schedule service
//!
//! Resolves today and tomorrow from the profile's weekly environment map and
//! the active program, and records completed workouts.

use crate::error::{EngineError, EngineResult};
use crate::repositories::{ProfileRepository, ProgramRepository, WorkoutLogRepository};
use crate::store::DocumentStore;
use chrono::{DateTime, FixedOffset};
use fitplan_shared::schedule::{resolve_day, resolve_tomorrow, DaySchedule, TomorrowSchedule};
use fitplan_shared::WorkoutLog;
use tracing::{debug, info};

pub struct ScheduleService;

impl ScheduleService {
    /// Today's schedule, or `None` when no program is active
    pub async fn today(
        store: &dyn DocumentStore,
        uid: &str,
        now: DateTime<FixedOffset>,
    ) -> EngineResult<Option<DaySchedule>> {
        let Some(program) = ProgramRepository::get_active(store, uid)
            .await
            .map_err(EngineError::logged)?
        else {
            debug!(uid = %uid, "No active program");
            return Ok(None);
        };
        let map = ProfileRepository::get_environment_map(store, uid)
            .await
            .map_err(EngineError::logged)?;

        Ok(Some(resolve_day(&map, Some(&program.template), now)))
    }

    /// Tomorrow under both weekday and cursor addressing, or `None` when no
    /// program is active
    pub async fn tomorrow(
        store: &dyn DocumentStore,
        uid: &str,
        now: DateTime<FixedOffset>,
    ) -> EngineResult<Option<TomorrowSchedule>> {
        let Some(program) = ProgramRepository::get_active(store, uid)
            .await
            .map_err(EngineError::logged)?
        else {
            debug!(uid = %uid, "No active program");
            return Ok(None);
        };
        let map = ProfileRepository::get_environment_map(store, uid)
            .await
            .map_err(EngineError::logged)?;

        let tomorrow = resolve_tomorrow(&map, Some(&program), now);
        if tomorrow.is_divergent() {
            debug!(
                uid = %uid,
                weekday_index = ?tomorrow.day.program_day_index,
                cursor_index = ?tomorrow.next_program_day_index,
                "Weekday and cursor addressing disagree"
            );
        }
        Ok(Some(tomorrow))
    }

    /// Record a completed workout and advance the program cursor.
    ///
    /// Returns the new cursor, or `None` when no program is active (the log
    /// is still written).
    pub async fn complete_workout(
        store: &dyn DocumentStore,
        uid: &str,
        log: &WorkoutLog,
    ) -> EngineResult<Option<u32>> {
        let id = WorkoutLogRepository::create(store, uid, log)
            .await
            .map_err(EngineError::logged)?;
        let cursor = ProgramRepository::advance_cursor(store, uid)
            .await
            .map_err(EngineError::logged)?;

        info!(uid = %uid, log_id = %id, current_day = ?cursor, "Workout completed");
        Ok(cursor)
    }
}
