//! Meal macro aggregation and intake scoring
//!
//! Ingredients carry per-100 g macro densities; meals and days are weighted
//! sums of them. Scoring compares a day's intake with its targets.

use crate::nutrition::NutritionTargets;
use crate::units::{round_to, round_to_i32};
use serde::{Deserialize, Serialize};

/// One ingredient line of a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub ingredient_name: String,
    pub grams: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fats_per_100g: f64,
    pub fiber_per_100g: f64,
    #[serde(default)]
    pub is_ai_estimated: bool,
}

/// Macros contributed by one ingredient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IngredientTotals {
    pub protein_total: f64,
    pub carbs_total: f64,
    pub fats_total: f64,
    pub fiber_total: f64,
    pub calories_total: i32,
}

/// Grams are rounded to 0.1; calories come from the unrounded grams
pub fn calculate_ingredient_totals(ingredient: &Ingredient) -> IngredientTotals {
    let portion = |per_100g: f64| ingredient.grams * per_100g / 100.0;

    let protein = portion(ingredient.protein_per_100g);
    let carbs = portion(ingredient.carbs_per_100g);
    let fats = portion(ingredient.fats_per_100g);
    let fiber = portion(ingredient.fiber_per_100g);
    let calories = protein * 4.0 + carbs * 4.0 + fats * 9.0;

    IngredientTotals {
        protein_total: round_to(protein, 1),
        carbs_total: round_to(carbs, 1),
        fats_total: round_to(fats, 1),
        fiber_total: round_to(fiber, 1),
        calories_total: round_to_i32(calories),
    }
}

/// Summed macros of a meal or a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MealTotals {
    pub total_weight: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    pub total_fiber: f64,
    pub total_calories: i32,
}

impl MealTotals {
    fn add(self, other: MealTotals) -> MealTotals {
        MealTotals {
            total_weight: self.total_weight + other.total_weight,
            total_protein: self.total_protein + other.total_protein,
            total_carbs: self.total_carbs + other.total_carbs,
            total_fats: self.total_fats + other.total_fats,
            total_fiber: self.total_fiber + other.total_fiber,
            total_calories: self.total_calories + other.total_calories,
        }
    }
}

/// Sum the rounded per-ingredient totals
pub fn calculate_meal_totals(ingredients: &[Ingredient]) -> MealTotals {
    ingredients
        .iter()
        .map(|ing| {
            let totals = calculate_ingredient_totals(ing);
            MealTotals {
                total_weight: ing.grams,
                total_protein: totals.protein_total,
                total_carbs: totals.carbs_total,
                total_fats: totals.fats_total,
                total_fiber: totals.fiber_total,
                total_calories: totals.calories_total,
            }
        })
        .fold(MealTotals::default(), MealTotals::add)
}

/// Sum several meals into one day's intake
pub fn calculate_daily_intake(meals: &[MealTotals]) -> MealTotals {
    meals.iter().copied().fold(MealTotals::default(), MealTotals::add)
}

// ============================================================================
// Progress and Scoring
// ============================================================================

/// Tracked macro metrics, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Calories,
    Protein,
    Carbs,
    Fats,
    Fiber,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Calories,
        Metric::Protein,
        Metric::Carbs,
        Metric::Fats,
        Metric::Fiber,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Calories => "Calories",
            Metric::Protein => "Protein",
            Metric::Carbs => "Carbs",
            Metric::Fats => "Fats",
            Metric::Fiber => "Fiber",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Calories => "kcal",
            _ => "g",
        }
    }

    fn consumed(&self, intake: &MealTotals) -> f64 {
        match self {
            Metric::Calories => intake.total_calories as f64,
            Metric::Protein => intake.total_protein,
            Metric::Carbs => intake.total_carbs,
            Metric::Fats => intake.total_fats,
            Metric::Fiber => intake.total_fiber,
        }
    }

    fn target(&self, targets: &NutritionTargets) -> f64 {
        let value = match self {
            Metric::Calories => targets.calories,
            Metric::Protein => targets.protein,
            Metric::Carbs => targets.carbs,
            Metric::Fats => targets.fats,
            Metric::Fiber => targets.fiber,
        };
        value as f64
    }
}

/// Progress of one metric toward its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub metric: Metric,
    pub consumed: f64,
    pub target: f64,
    /// Capped at 100; 0 when the target is not positive
    pub percent: f64,
    pub remaining: f64,
}

pub fn macro_progress(intake: &MealTotals, targets: &NutritionTargets) -> Vec<MacroProgress> {
    Metric::ALL
        .iter()
        .map(|metric| {
            let consumed = metric.consumed(intake);
            let target = metric.target(targets);
            let percent = if target <= 0.0 {
                0.0
            } else {
                (consumed / target * 100.0).min(100.0)
            };
            MacroProgress {
                metric: *metric,
                consumed,
                target,
                percent,
                remaining: (target - consumed).max(0.0),
            }
        })
        .collect()
}

/// Score for one metric: whole percent of target, capped at 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricScore {
    pub metric: Metric,
    pub score: u32,
}

pub fn performance_scores(intake: &MealTotals, targets: &NutritionTargets) -> Vec<MetricScore> {
    Metric::ALL
        .iter()
        .map(|metric| {
            let target = metric.target(targets);
            let score = if target == 0.0 {
                0
            } else {
                round_to_i32(metric.consumed(intake) / target * 100.0).clamp(0, 100) as u32
            };
            MetricScore {
                metric: *metric,
                score,
            }
        })
        .collect()
}

/// Overall verdict on a day's intake balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rating", content = "metric", rename_all = "snake_case")]
pub enum OverallRating {
    /// A metric scored under 40
    Deficient(Metric),
    Optimal,
    Balanced,
    Imbalanced,
    Partial,
    Incomplete,
}

impl OverallRating {
    pub fn label(&self) -> String {
        match self {
            OverallRating::Deficient(metric) => format!("{}-deficient", metric.label()),
            OverallRating::Optimal => "Optimal".to_string(),
            OverallRating::Balanced => "Balanced".to_string(),
            OverallRating::Imbalanced => "Imbalanced".to_string(),
            OverallRating::Partial => "Partial".to_string(),
            OverallRating::Incomplete => "Incomplete".to_string(),
        }
    }
}

/// Rate a set of scores by their mean and spread
pub fn overall_rating(scores: &[MetricScore]) -> OverallRating {
    let Some(weakest) = scores.iter().min_by_key(|s| s.score) else {
        return OverallRating::Incomplete;
    };
    let max = scores.iter().map(|s| s.score).max().unwrap_or(0);
    let spread = max - weakest.score;
    let avg = scores.iter().map(|s| s.score as f64).sum::<f64>() / scores.len() as f64;

    if weakest.score < 40 {
        OverallRating::Deficient(weakest.metric)
    } else if avg >= 90.0 && spread < 20 {
        OverallRating::Optimal
    } else if avg >= 75.0 && spread < 30 {
        OverallRating::Balanced
    } else if spread > 50 {
        OverallRating::Imbalanced
    } else if avg >= 50.0 {
        OverallRating::Partial
    } else {
        OverallRating::Incomplete
    }
}
