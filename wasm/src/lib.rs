//! Lifelog WASM Module
//!
//! WebAssembly bindings so the web UI runs the same analytics as the CLI.
//! Structured values cross the boundary as JSON strings; dates are ISO
//! `YYYY-MM-DD` strings and "today" is always supplied by the caller.

use chrono::NaiveDate;
use lifelog_shared::habits::summarize_habits;
use lifelog_shared::ingredients::parse_ingredient_response;
use lifelog_shared::meals::{
    calculate_daily_intake, calculate_meal_totals, macro_progress, overall_rating,
    performance_scores, Ingredient, MealTotals,
};
use lifelog_shared::models::{Gender, Habit, HabitLog, ProfileRow, UserStats, WeightLog};
use lifelog_shared::nutrition::{
    assess_body_composition, calculate_nutrition_targets, estimate_body_fat,
    format_protein_explanation, BodyCompositionInput, NutritionTargets,
};
use lifelog_shared::weight::{calculate_weekly_summary, generate_chart_data, DayData};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn parse_json<T: DeserializeOwned>(label: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {}: {}", label, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", value, e))
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ============================================================================
// Nutrition
// ============================================================================

fn nutrition_plan_json(profile_json: &str) -> Result<String, String> {
    let row: ProfileRow = parse_json("profile", profile_json)?;
    let plan = calculate_nutrition_targets(&UserStats::from_profile(&row));
    to_json(&serde_json::json!({
        "targets": plan.targets,
        "explanation": plan.explanation,
        "protein_text": format_protein_explanation(&plan.explanation.protein),
    }))
}

/// Nutrition targets and explanations for a profile row
#[wasm_bindgen]
pub fn nutrition_plan(profile_json: &str) -> Result<String, JsValue> {
    nutrition_plan_json(profile_json).map_err(js_error)
}

fn body_composition_json(input_json: &str) -> Result<String, String> {
    let input: BodyCompositionInput = parse_json("body composition input", input_json)?;
    to_json(&assess_body_composition(&input))
}

/// Onboarding body-composition assessment
#[wasm_bindgen]
pub fn body_composition(input_json: &str) -> Result<String, JsValue> {
    body_composition_json(input_json).map_err(js_error)
}

fn body_fat_estimate(
    gender: &str,
    weight_kg: f64,
    height_cm: f64,
    age: i32,
    waist_cm: Option<f64>,
) -> Result<f64, String> {
    let gender: Gender = gender.parse()?;
    Ok(estimate_body_fat(gender, weight_kg, height_cm, age, waist_cm))
}

/// Body fat estimate for live form feedback
///
/// `gender` is `"male"`, `"female"` or `"other"`.
#[wasm_bindgen]
pub fn estimate_body_fat_percent(
    gender: &str,
    weight_kg: f64,
    height_cm: f64,
    age: i32,
    waist_cm: Option<f64>,
) -> Result<f64, JsValue> {
    body_fat_estimate(gender, weight_kg, height_cm, age, waist_cm).map_err(js_error)
}

// ============================================================================
// Habits
// ============================================================================

fn habit_summaries_json(habits_json: &str, logs_json: &str, today: &str) -> Result<String, String> {
    let habits: Vec<Habit> = parse_json("habits", habits_json)?;
    let logs: Vec<HabitLog> = parse_json("habit logs", logs_json)?;
    to_json(&summarize_habits(&habits, &logs, parse_date(today)?))
}

/// Scorecard summaries for every habit
#[wasm_bindgen]
pub fn habit_summaries(habits_json: &str, logs_json: &str, today: &str) -> Result<String, JsValue> {
    habit_summaries_json(habits_json, logs_json, today).map_err(js_error)
}

// ============================================================================
// Weight
// ============================================================================

fn weekly_summary_json(logs_json: &str, current_weight: f64, today: &str) -> Result<String, String> {
    let logs: Vec<WeightLog> = parse_json("weight logs", logs_json)?;
    let summary = calculate_weekly_summary(&logs, current_weight, parse_date(today)?);
    to_json(&serde_json::json!({
        "summary": summary,
        "label": summary.status.label(),
        "description": summary.status.description(),
    }))
}

/// This week's average weight against last week's
#[wasm_bindgen]
pub fn weekly_summary(logs_json: &str, current_weight: f64, today: &str) -> Result<String, JsValue> {
    weekly_summary_json(logs_json, current_weight, today).map_err(js_error)
}

fn chart_data_json(logs_json: &str, days: u32, today: &str) -> Result<String, String> {
    let logs: Vec<WeightLog> = parse_json("weight logs", logs_json)?;
    let rows: Vec<DayData> = generate_chart_data(&logs, days, parse_date(today)?).collect();
    to_json(&rows)
}

/// Daily chart rows with the 7-day rolling average
#[wasm_bindgen]
pub fn chart_data(logs_json: &str, days: u32, today: &str) -> Result<String, JsValue> {
    chart_data_json(logs_json, days, today).map_err(js_error)
}

// ============================================================================
// Meals
// ============================================================================

fn meal_totals_json(ingredients_json: &str) -> Result<String, String> {
    let ingredients: Vec<Ingredient> = parse_json("ingredients", ingredients_json)?;
    to_json(&calculate_meal_totals(&ingredients))
}

/// Totals for one meal's ingredients
#[wasm_bindgen]
pub fn meal_totals(ingredients_json: &str) -> Result<String, JsValue> {
    meal_totals_json(ingredients_json).map_err(js_error)
}

fn parse_ai_ingredients_json(content: &str) -> Result<String, String> {
    let ingredients = parse_ingredient_response(content).map_err(|e| e.to_string())?;
    to_json(&ingredients)
}

/// Sanitise a model response into ingredient records
#[wasm_bindgen]
pub fn parse_ai_ingredients(content: &str) -> Result<String, JsValue> {
    parse_ai_ingredients_json(content).map_err(js_error)
}

fn daily_performance_json(meals_json: &str, targets_json: &str) -> Result<String, String> {
    let meals: Vec<MealTotals> = parse_json("meal totals", meals_json)?;
    let targets: NutritionTargets = parse_json("targets", targets_json)?;
    let intake = calculate_daily_intake(&meals);
    let scores = performance_scores(&intake, &targets);
    let rating = overall_rating(&scores);
    to_json(&serde_json::json!({
        "intake": intake,
        "progress": macro_progress(&intake, &targets),
        "scores": scores,
        "rating": rating.label(),
    }))
}

/// Day intake, progress bars and overall rating
#[wasm_bindgen]
pub fn daily_performance(meals_json: &str, targets_json: &str) -> Result<String, JsValue> {
    daily_performance_json(meals_json, targets_json).map_err(js_error)
}
