//! Common test utilities for integration tests
//!
//! Seeds an in-memory document store the way the mobile client would.

#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use fitplan_backend::config::AppConfig;
use fitplan_backend::repositories::{
    HydrationLogRepository, MacroPlanRepository, MealLogRepository, ProfileRepository,
    ProgramRepository, WeightEntryRepository, WeightGoalRepository, WorkoutLogRepository,
};
use fitplan_backend::state::AppState;
use fitplan_backend::store::memory::InMemoryStore;
use fitplan_shared::{
    ActiveProgram, EnvironmentMap, GoalType, HydrationLog, MacroPlan, MealEntry, ProgramDay,
    ProgramTemplate, SetEntry, WeekdayKey, WeightEntry, WeightGoal, WorkoutLog,
};
use std::sync::Arc;

pub const UID: &str = "user-1";

/// Test engine wrapper
pub struct TestEngine {
    /// Direct handle on the store, shared with `state`
    pub store: InMemoryStore,
    pub state: AppState,
}

impl TestEngine {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let state = AppState::new(Arc::new(store.clone()), AppConfig::default());
        Self { store, state }
    }

    pub async fn seed_goal(&self, target_weight: f64, weekly_goal: f64) {
        let goal = WeightGoal {
            current_weight: 190.0,
            target_weight,
            weekly_goal,
            start_date: utc(2024, 1, 1),
        };
        WeightGoalRepository::set(&self.store, UID, &goal)
            .await
            .expect("Failed to seed goal");
    }

    pub async fn seed_weight(&self, weight: f64, date: DateTime<Utc>) {
        let entry = WeightEntry {
            weight,
            date,
            notes: None,
        };
        WeightEntryRepository::create(&self.store, UID, &entry)
            .await
            .expect("Failed to seed weight entry");
    }

    pub async fn seed_plan(&self, calorie_target: i32, last_adjustment: Option<DateTime<Utc>>) {
        let plan = MacroPlan {
            calorie_target,
            protein_grams: 170,
            carb_grams: 230,
            fat_grams: 65,
            goal_type: GoalType::Fatloss,
            last_adjustment,
        };
        MacroPlanRepository::set(&self.store, UID, &plan)
            .await
            .expect("Failed to seed macro plan");
    }

    pub async fn plan(&self) -> MacroPlan {
        MacroPlanRepository::get(&self.store, UID)
            .await
            .expect("Failed to read macro plan")
            .expect("No macro plan")
            .plan
    }

    /// Mon/Wed/Fri gym, every other day off
    pub async fn seed_three_day_week(&self) {
        let map = EnvironmentMap::new()
            .with(WeekdayKey::Sun, "off")
            .with(WeekdayKey::Mon, "gym")
            .with(WeekdayKey::Tue, "off")
            .with(WeekdayKey::Wed, "gym")
            .with(WeekdayKey::Thu, "off")
            .with(WeekdayKey::Fri, "gym")
            .with(WeekdayKey::Sat, "off");
        ProfileRepository::set_environment_map(&self.store, UID, &map)
            .await
            .expect("Failed to seed environment map");
    }

    pub async fn seed_program(&self, titles: &[&str], days_per_week: u32, current_day: u32) {
        let program = ActiveProgram {
            template: ProgramTemplate {
                name: Some("Test program".to_string()),
                days_per_week,
                days: titles
                    .iter()
                    .map(|title| ProgramDay {
                        title: title.to_string(),
                        exercises: vec![],
                    })
                    .collect(),
            },
            current_day,
        };
        ProgramRepository::set_active(&self.store, UID, &program)
            .await
            .expect("Failed to seed program");
    }

    pub async fn seed_workout(&self, completed_at: DateTime<Utc>, prs: &[&str]) {
        let log = WorkoutLog {
            completed_at,
            program_day: None,
            title: None,
            sets: prs
                .iter()
                .map(|exercise| SetEntry {
                    exercise: exercise.to_string(),
                    weight: 200.0,
                    reps: 5,
                    is_pr: true,
                })
                .collect(),
        };
        WorkoutLogRepository::create(&self.store, UID, &log)
            .await
            .expect("Failed to seed workout");
    }

    pub async fn seed_meals(&self, date: NaiveDate, count: usize) {
        for i in 0..count {
            let meal = MealEntry {
                name: Some(format!("Meal {}", i + 1)),
                calories: Some(550.0),
                logged_at: None,
            };
            MealLogRepository::create(&self.store, UID, date, &meal)
                .await
                .expect("Failed to seed meal");
        }
    }

    pub async fn seed_hydration(&self, date: NaiveDate, current_oz: f64, goal_oz: f64) {
        HydrationLogRepository::set_for_date(
            &self.store,
            UID,
            date,
            &HydrationLog {
                current_oz,
                goal_oz,
            },
        )
        .await
        .expect("Failed to seed hydration");
    }
}

pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 8, 0, 0).unwrap()
}

/// A local time at the given UTC offset (hours)
pub fn local(year: i32, month: u32, day: u32, hour: u32, offset_hours: i32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .unwrap()
        .with_ymd_and_hms(year, month, day, hour, 0, 0)
        .unwrap()
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}
