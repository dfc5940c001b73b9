//! Fitplan WASM Module
//!
//! WebAssembly bindings so the client can run the pure engine rules
//! on-device. Every binding takes and returns JSON strings using the same
//! camelCase shapes as the stored documents. `now` is an RFC 3339 timestamp
//! carrying the device's UTC offset, which decides the local day.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use fitplan_shared::consistency::{build_snapshot, ConsistencyInputs};
use fitplan_shared::{
    ActiveProgram, EnginePolicy, EnvironmentMap, HydrationLog, MacroPlan, ProgramTemplate,
    ProgressAnalysis, WeekdayKey, WeightEntry, WeightGoal, WorkoutLog,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Raw logs for `consistency_snapshot`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SnapshotInputs {
    workout_logs: Vec<WorkoutLog>,
    /// Meal entry count keyed by `YYYY-MM-DD`
    meal_counts: BTreeMap<NaiveDate, usize>,
    hydration: BTreeMap<NaiveDate, HydrationLog>,
    days_per_week: u32,
}

impl From<SnapshotInputs> for ConsistencyInputs {
    fn from(inputs: SnapshotInputs) -> Self {
        Self {
            workout_logs: inputs.workout_logs,
            meal_counts: inputs.meal_counts,
            hydration: inputs.hydration,
            days_per_week: inputs.days_per_week,
        }
    }
}

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {}: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn parse_now(now: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(now).map_err(|e| format!("Invalid now: {}", e))
}

fn parse_policy(policy: Option<&str>) -> Result<EnginePolicy, String> {
    match policy {
        Some(json) => parse("policy", json),
        None => Ok(EnginePolicy::default()),
    }
}

// ============================================================================
// JSON API (native, testable off-wasm)
// ============================================================================

pub mod api {
    use super::*;

    /// `ProgressAnalysis` JSON, or `null` when there is not enough data
    pub fn analyze_progress(
        goal: &str,
        entries: &str,
        now: &str,
        policy: Option<&str>,
    ) -> Result<String, String> {
        let goal: WeightGoal = parse("goal", goal)?;
        let entries: Vec<WeightEntry> = parse("entries", entries)?;
        let policy = parse_policy(policy)?;
        let analysis =
            fitplan_shared::progress::analyze(&goal, &entries, parse_now(now)?, &policy.analysis);
        to_json(&analysis)
    }

    /// `analysis` and `goal` may each be `null`
    pub fn nutrition_guidance(analysis: &str, goal: &str) -> Result<String, String> {
        let analysis: Option<ProgressAnalysis> = parse("analysis", analysis)?;
        let goal: Option<WeightGoal> = parse("goal", goal)?;
        let guidance =
            fitplan_shared::guidance::format_guidance(analysis.as_ref(), goal.as_ref());
        to_json(&guidance)
    }

    /// Preview of a plan after a calorie change; `lastAdjustment` is untouched
    pub fn apply_calorie_delta(plan: &str, delta: f64, policy: Option<&str>) -> Result<String, String> {
        let plan: MacroPlan = parse("plan", plan)?;
        let policy = parse_policy(policy)?;
        let change = fitplan_shared::macros::apply_calorie_delta(&plan, delta, &policy.macros);
        to_json(&change.plan)
    }

    pub fn is_rest_day(environment_map: &str, weekday: &str) -> Result<bool, String> {
        let map: EnvironmentMap = parse("environment map", environment_map)?;
        let key: WeekdayKey = weekday.parse()?;
        Ok(fitplan_shared::schedule::is_rest_day(&map, key))
    }

    /// `template` may be `null`
    pub fn resolve_today(environment_map: &str, template: &str, now: &str) -> Result<String, String> {
        let map: EnvironmentMap = parse("environment map", environment_map)?;
        let template: Option<ProgramTemplate> = parse("template", template)?;
        let day = fitplan_shared::schedule::resolve_day(&map, template.as_ref(), parse_now(now)?);
        to_json(&day)
    }

    /// `program` may be `null`
    pub fn resolve_tomorrow(environment_map: &str, program: &str, now: &str) -> Result<String, String> {
        let map: EnvironmentMap = parse("environment map", environment_map)?;
        let program: Option<ActiveProgram> = parse("program", program)?;
        let tomorrow =
            fitplan_shared::schedule::resolve_tomorrow(&map, program.as_ref(), parse_now(now)?);
        to_json(&tomorrow)
    }

    pub fn consistency_snapshot(inputs: &str, now: &str, policy: Option<&str>) -> Result<String, String> {
        let inputs: ConsistencyInputs = parse::<SnapshotInputs>("inputs", inputs)?.into();
        let policy = parse_policy(policy)?;
        let snapshot = build_snapshot(&inputs, parse_now(now)?, &policy.consistency);
        to_json(&snapshot)
    }
}

// ============================================================================
// wasm-bindgen exports
// ============================================================================

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

#[wasm_bindgen(js_name = analyzeProgress)]
pub fn analyze_progress(
    goal: &str,
    entries: &str,
    now: &str,
    policy: Option<String>,
) -> Result<String, JsValue> {
    api::analyze_progress(goal, entries, now, policy.as_deref()).map_err(js_err)
}

#[wasm_bindgen(js_name = nutritionGuidance)]
pub fn nutrition_guidance(analysis: &str, goal: &str) -> Result<String, JsValue> {
    api::nutrition_guidance(analysis, goal).map_err(js_err)
}

#[wasm_bindgen(js_name = applyCalorieDelta)]
pub fn apply_calorie_delta(plan: &str, delta: f64, policy: Option<String>) -> Result<String, JsValue> {
    api::apply_calorie_delta(plan, delta, policy.as_deref()).map_err(js_err)
}

#[wasm_bindgen(js_name = isRestDay)]
pub fn is_rest_day(environment_map: &str, weekday: &str) -> Result<bool, JsValue> {
    api::is_rest_day(environment_map, weekday).map_err(js_err)
}

#[wasm_bindgen(js_name = resolveToday)]
pub fn resolve_today(environment_map: &str, template: &str, now: &str) -> Result<String, JsValue> {
    api::resolve_today(environment_map, template, now).map_err(js_err)
}

#[wasm_bindgen(js_name = resolveTomorrow)]
pub fn resolve_tomorrow(environment_map: &str, program: &str, now: &str) -> Result<String, JsValue> {
    api::resolve_tomorrow(environment_map, program, now).map_err(js_err)
}

#[wasm_bindgen(js_name = consistencySnapshot)]
pub fn consistency_snapshot(inputs: &str, now: &str, policy: Option<String>) -> Result<String, JsValue> {
    api::consistency_snapshot(inputs, now, policy.as_deref()).map_err(js_err)
}
