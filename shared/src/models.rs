//! Data models for the Lifelog core
//!
//! Rows arrive from the persistence layer with loosely typed, mostly
//! optional columns. They are mapped to the explicit records below before
//! any calculation runs.

use crate::errors::CoreError;
use crate::validation::validate_profile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default age when the profile has none
pub const DEFAULT_AGE: i32 = 30;
/// Default height in centimetres when the profile has none
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
/// Default body weight in kilograms when the profile has none
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
/// Training frequency is sessions per week
pub const MAX_TRAINING_DAYS: u8 = 7;

// ============================================================================
// Profile Enums
// ============================================================================

/// Gender used for physiological formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Where a body-fat percentage came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BodyFatSource {
    #[serde(rename = "user")]
    User,
    #[default]
    #[serde(rename = "estimated")]
    Estimated,
    #[serde(rename = "AI")]
    Ai,
}

impl fmt::Display for BodyFatSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BodyFatSource::User => "user",
            BodyFatSource::Estimated => "estimated",
            BodyFatSource::Ai => "AI",
        };
        write!(f, "{}", s)
    }
}

/// Body-composition goal driving the calorie adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetGoal {
    Cut,
    #[default]
    Maintain,
    LeanBulk,
}

impl std::str::FromStr for TargetGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cut" => Ok(TargetGoal::Cut),
            "maintain" => Ok(TargetGoal::Maintain),
            "lean_bulk" | "bulk" => Ok(TargetGoal::LeanBulk),
            _ => Err(format!("Unknown goal: {}", s)),
        }
    }
}

// ============================================================================
// User Stats
// ============================================================================

/// User-profile row as stored: every biometric may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRow {
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub current_weight_kg: Option<f64>,
    #[serde(default)]
    pub body_fat_percentage: Option<f64>,
    #[serde(default)]
    pub body_fat_source: Option<BodyFatSource>,
    #[serde(default)]
    pub waist_cm: Option<f64>,
    #[serde(default)]
    pub training_frequency: Option<u8>,
    #[serde(default)]
    pub target_goal: Option<TargetGoal>,
}

/// Snapshot of the biometrics the macro engine needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub age: i32,
    pub gender: Gender,
    pub height_cm: f64,
    pub current_weight_kg: f64,
    pub body_fat_percentage: Option<f64>,
    pub body_fat_source: BodyFatSource,
    pub waist_cm: Option<f64>,
    pub training_frequency: u8,
    pub target_goal: TargetGoal,
}

impl Default for UserStats {
    fn default() -> Self {
        Self::from_profile(&ProfileRow::default())
    }
}

impl UserStats {
    /// Map a profile row to a complete snapshot, filling defaults
    ///
    /// Zero or negative numbers count as missing.
    pub fn from_profile(row: &ProfileRow) -> Self {
        Self {
            age: row.age.filter(|a| *a > 0).unwrap_or(DEFAULT_AGE),
            gender: row.gender.unwrap_or_default(),
            height_cm: positive(row.height_cm).unwrap_or(DEFAULT_HEIGHT_CM),
            current_weight_kg: positive(row.current_weight_kg).unwrap_or(DEFAULT_WEIGHT_KG),
            body_fat_percentage: positive(row.body_fat_percentage),
            body_fat_source: row.body_fat_source.unwrap_or_default(),
            waist_cm: positive(row.waist_cm),
            training_frequency: row.training_frequency.unwrap_or(0).min(MAX_TRAINING_DAYS),
            target_goal: row.target_goal.unwrap_or_default(),
        }
    }
}

impl UserStats {
    /// Validate the row's present fields, then map it like [`Self::from_profile`]
    pub fn try_from_profile(row: &ProfileRow) -> Result<Self, CoreError> {
        validate_profile(row)?;
        Ok(Self::from_profile(row))
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

// ============================================================================
// Log Rows
// ============================================================================

/// A tracked habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
}

/// One day's entry for a habit; at most one per (habit_id, log_date)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub log_date: NaiveDate,
    #[serde(default = "completed_default")]
    pub completed: bool,
}

fn completed_default() -> bool {
    true
}

/// One day's weigh-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLog {
    pub id: Uuid,
    pub log_date: NaiveDate,
    pub weight_kg: f64,
}
