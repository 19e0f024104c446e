//! Lifelog Shared Library
//!
//! The pure analytics core used by the CLI and WASM modules: profile
//! models, the macro engine, habit and weight analytics, meal aggregation
//! and AI ingredient-response parsing. Nothing here performs I/O or reads
//! the clock; "today" is always passed in.

pub mod errors;
pub mod habits;
pub mod ingredients;
pub mod meals;
pub mod models;
pub mod nutrition;
pub mod units;
pub mod validation;
pub mod weight;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use units::*;

pub use habits::{summarize_habits, DayStatus, HabitHistory, HabitSummary};
pub use ingredients::{parse_ingredient_response, validate_ingredient_text};
pub use meals::{
    calculate_daily_intake, calculate_ingredient_totals, calculate_meal_totals, Ingredient,
    MealTotals,
};
pub use nutrition::{calculate_nutrition_targets, NutritionPlan, NutritionTargets};
pub use validation::{validate_profile, ValidationError};
pub use weight::{
    calculate_rolling_average, calculate_weekly_summary, generate_chart_data, DayData, TrendStatus,
    WeekSummary,
};
