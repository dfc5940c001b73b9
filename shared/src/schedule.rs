//! Weekly schedule resolution
//!
//! Two addressing schemes coexist and are intentionally not reconciled:
//!
//! - **Weekday addressing** (today): the Nth training day of the current
//!   Sunday-based week maps to program day `N % days_per_week`.
//! - **Cursor addressing** (next): the program's 1-based `current_day`
//!   cursor, advanced on each completed workout, points at the next day of
//!   the template regardless of the calendar.
//!
//! A user who skips or doubles up workouts will see the two disagree.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{ActiveProgram, EnvironmentMap, ProgramDay, ProgramTemplate, REST_TAG};
use crate::time_window::{week_start, weekday_key, WeekdayKey};

/// Missing weekdays default to rest
pub fn is_rest_day(map: &EnvironmentMap, key: WeekdayKey) -> bool {
    map.get(key).map_or(true, |environment| environment == REST_TAG)
}

/// Training weekdays in calendar order (Sun..Sat)
pub fn training_days(map: &EnvironmentMap) -> Vec<WeekdayKey> {
    WeekdayKey::ALL
        .iter()
        .copied()
        .filter(|key| !is_rest_day(map, *key))
        .collect()
}

/// Weekday-addressed view of a single date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub weekday: WeekdayKey,
    pub week_start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub is_rest_day: bool,
    pub training_days_in_week: usize,
    /// 0-based position of this date among the week's training days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_slot: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_day_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_day: Option<ProgramDay>,
}

impl DaySchedule {
    pub fn has_workout(&self) -> bool {
        self.program_day.is_some()
    }
}

/// Tomorrow, resolved both ways
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TomorrowSchedule {
    /// Weekday-addressed
    pub day: DaySchedule,
    /// Cursor-addressed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_program_day_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_program_day: Option<ProgramDay>,
}

impl TomorrowSchedule {
    /// True when weekday and cursor addressing point at different program days
    pub fn is_divergent(&self) -> bool {
        !self.day.is_rest_day && self.day.program_day_index != self.next_program_day_index
    }
}

/// Resolve a date against the weekly environment map and a program template.
///
/// A training weekday with no matching program day (no template, zero
/// `days_per_week`, or fewer defined days than slots) resolves to "no
/// workout" instead of failing.
pub fn resolve_day(
    map: &EnvironmentMap,
    template: Option<&ProgramTemplate>,
    date: DateTime<FixedOffset>,
) -> DaySchedule {
    let weekday = weekday_key(date);
    let training = training_days(map);
    let rest = is_rest_day(map, weekday);

    let workout_slot = if rest {
        None
    } else {
        training.iter().position(|key| *key == weekday)
    };

    let (program_day_index, program_day) = match (workout_slot, template) {
        (Some(slot), Some(template)) if template.days_per_week > 0 => {
            let index = slot % template.days_per_week as usize;
            match template.days.get(index) {
                Some(day) => (Some(index), Some(day.clone())),
                None => (None, None),
            }
        }
        _ => (None, None),
    };

    DaySchedule {
        date: date.date_naive(),
        weekday,
        week_start: week_start(date).date_naive(),
        environment: map.get(weekday).map(str::to_string),
        is_rest_day: rest,
        training_days_in_week: training.len(),
        workout_slot,
        program_day_index,
        program_day,
    }
}

/// Index of the next program day under cursor addressing
pub fn next_program_index(program: &ActiveProgram) -> Option<usize> {
    let total = program.template.days.len();
    if total == 0 {
        return None;
    }
    Some(program.current_day as usize % total)
}

/// Cursor value after completing one workout (1-based, wraps to 1)
pub fn advance_cursor(current_day: u32, total_days: usize) -> u32 {
    if total_days == 0 {
        return 1;
    }
    (current_day as usize % total_days) as u32 + 1
}

pub fn resolve_tomorrow(
    map: &EnvironmentMap,
    program: Option<&ActiveProgram>,
    today: DateTime<FixedOffset>,
) -> TomorrowSchedule {
    let day = resolve_day(map, program.map(|p| &p.template), today + Duration::days(1));
    let next_program_day_index = program.and_then(next_program_index);
    let next_program_day = match (program, next_program_day_index) {
        (Some(program), Some(index)) => program.template.days.get(index).cloned(),
        _ => None,
    };

    TomorrowSchedule {
        day,
        next_program_day_index,
        next_program_day,
    }
}
