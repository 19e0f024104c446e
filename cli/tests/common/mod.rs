//! Common fixtures for CLI integration tests
//!
//! Builds small CSV exports in memory so loaders and report builders can
//! run without touching the filesystem.

#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use lifelog_shared::models::{Habit, HabitLog, WeightLog};
use std::fmt::Write;
use uuid::Uuid;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Wednesday; its week runs 2024-01-08 to 2024-01-14
pub fn today() -> NaiveDate {
    date(2024, 1, 10)
}

/// `weights[i]` is logged `i` days after `start`
pub fn weight_csv(start: NaiveDate, weights: &[f64]) -> String {
    let mut csv = String::from("id,log_date,weight_kg\n");
    for (i, w) in weights.iter().enumerate() {
        let day = start.checked_add_days(Days::new(i as u64)).unwrap();
        writeln!(csv, "{},{},{}", Uuid::new_v4(), day, w).unwrap();
    }
    csv
}

pub struct HabitFixture {
    pub habits_csv: String,
    pub logs_csv: String,
    pub habit_id: Uuid,
}

/// One habit completed on each of `days`
pub fn habit_fixture(name: &str, days: &[NaiveDate]) -> HabitFixture {
    let habit_id = Uuid::new_v4();
    let habits_csv = format!("id,name\n{},{}\n", habit_id, name);
    let mut logs_csv = String::from("id,habit_id,log_date,completed\n");
    for day in days {
        writeln!(logs_csv, "{},{},{},true", Uuid::new_v4(), habit_id, day).unwrap();
    }
    HabitFixture {
        habits_csv,
        logs_csv,
        habit_id,
    }
}

pub fn load_weights(csv: &str) -> Vec<WeightLog> {
    lifelog_cli::loader::read_weight_logs(csv.as_bytes()).unwrap()
}

pub fn load_habits(fixture: &HabitFixture) -> (Vec<Habit>, Vec<HabitLog>) {
    let habits = lifelog_cli::loader::read_habits(fixture.habits_csv.as_bytes()).unwrap();
    let logs = lifelog_cli::loader::read_habit_logs(fixture.logs_csv.as_bytes()).unwrap();
    (habits, logs)
}
