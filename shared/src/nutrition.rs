//! Body-composition and macro engine
//!
//! Turns a [`UserStats`] snapshot into daily nutrition targets plus a
//! structured explanation of how each number was reached. Protein is dosed
//! against lean body mass once body fat is high, so heavier users with a
//! lot of fat mass are not prescribed protein for weight they do not need
//! to feed.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: Every calculation is a function of its arguments
//! 2. **Total**: Missing biometrics resolve to defaults, never to errors
//! 3. **Consistent**: Targets and their explanation come from one pass

use crate::models::{BodyFatSource, Gender, TargetGoal, UserStats};
use crate::units::{cm_to_inches, round_to_i32};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Body fat at or above this percentage switches protein to an LBM basis
pub const OVERFAT_THRESHOLD_PERCENT: f64 = 25.0;

/// Fixed daily fiber target in grams
pub const FIBER_TARGET_G: i32 = 30;

/// Carbohydrates never drop below this many grams
pub const MIN_CARBS_G: i32 = 50;

/// Water per kilogram of body weight
pub const WATER_ML_PER_KG: f64 = 35.0;

const KCAL_PER_G_PROTEIN: i32 = 4;
const KCAL_PER_G_CARB: i32 = 4;
const KCAL_PER_G_FAT: i32 = 9;

// ============================================================================
// Body Fat Estimation
// ============================================================================

/// Estimate body fat percentage
///
/// With a waist measurement (male/female only) this is a simplified US Navy
/// formula in inches, with neck estimated as a fraction of waist (0.37 male,
/// 0.35 female) and, for women, hip estimated as 1.15 × waist:
///
/// Men: BF% = 86.010 × log10(waist − neck) − 70.041 × log10(height) + 36.76
/// Women: BF% = 163.205 × log10(waist + hip − neck) − 97.684 × log10(height) − 78.387
///
/// Otherwise a Deurenberg BMI estimate is used:
///
/// BF% = 1.20 × BMI + 0.23 × age − C, C = 16.2 (male), 5.4 (female), 10.8 (other)
///
/// Results are clamped to [5, 50] for men and the BMI branch, [10, 55] for
/// the female Navy branch.
pub fn estimate_body_fat(
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
    age: i32,
    waist_cm: Option<f64>,
) -> f64 {
    let waist_cm = waist_cm.filter(|w| *w > 0.0);

    match (waist_cm, gender) {
        (Some(waist_cm), Gender::Male) => {
            let height_in = cm_to_inches(height_cm);
            let waist_in = cm_to_inches(waist_cm);
            let neck_in = waist_in * 0.37;
            let bf = 86.010 * (waist_in - neck_in).log10() - 70.041 * height_in.log10() + 36.76;
            clamp_percent(bf, 5.0, 50.0)
        }
        (Some(waist_cm), Gender::Female) => {
            let height_in = cm_to_inches(height_cm);
            let waist_in = cm_to_inches(waist_cm);
            let neck_in = waist_in * 0.35;
            let hip_in = waist_in * 1.15;
            let bf = 163.205 * (waist_in + hip_in - neck_in).log10()
                - 97.684 * height_in.log10()
                - 78.387;
            clamp_percent(bf, 10.0, 55.0)
        }
        _ => {
            let height_m = height_cm / 100.0;
            let bmi = weight_kg / (height_m * height_m);
            let offset = match gender {
                Gender::Male => 16.2,
                Gender::Female => 5.4,
                Gender::Other => 10.8,
            };
            let bf = 1.20 * bmi + 0.23 * age as f64 - offset;
            clamp_percent(bf, 5.0, 50.0)
        }
    }
}

/// Clamp that also pins NaN to the lower bound
fn clamp_percent(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Calculate lean body mass
///
/// LBM = weight × (1 − BF% / 100)
pub fn calculate_lbm(weight_kg: f64, body_fat_percent: f64) -> f64 {
    weight_kg * (1.0 - body_fat_percent / 100.0)
}

// ============================================================================
// BMR and Activity
// ============================================================================

/// BMR formula used for the maintenance estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmrMethod {
    /// 370 + 21.6 × LBM, used whenever lean mass is known
    #[serde(rename = "Katch-McArdle")]
    KatchMcArdle,
    /// Weight/height/age equation, used without lean mass
    #[serde(rename = "Mifflin-St Jeor")]
    MifflinStJeor,
}

impl fmt::Display for BmrMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmrMethod::KatchMcArdle => write!(f, "Katch-McArdle"),
            BmrMethod::MifflinStJeor => write!(f, "Mifflin-St Jeor"),
        }
    }
}

/// BMR value together with the formula that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrResult {
    pub bmr: f64,
    pub method: BmrMethod,
}

/// Calculate basal metabolic rate
///
/// Katch-McArdle when `lbm` is known and positive, otherwise Mifflin-St Jeor:
///
/// Men: 10 × weight + 6.25 × height − 5 × age + 5
/// Women: 10 × weight + 6.25 × height − 5 × age − 161
/// Other: 10 × weight + 6.25 × height − 5 × age − 78
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: i32,
    gender: Gender,
    lbm: Option<f64>,
) -> BmrResult {
    if let Some(lbm) = lbm.filter(|l| *l > 0.0) {
        return BmrResult {
            bmr: 370.0 + 21.6 * lbm,
            method: BmrMethod::KatchMcArdle,
        };
    }

    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    let bmr = match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
        Gender::Other => base - 78.0,
    };

    BmrResult {
        bmr,
        method: BmrMethod::MifflinStJeor,
    }
}

/// Activity multiplier for weekly training sessions
pub fn activity_multiplier(training_days_per_week: u8) -> f64 {
    match training_days_per_week {
        0 => 1.2,
        1..=2 => 1.375,
        3..=4 => 1.55,
        5..=6 => 1.725,
        _ => 1.9,
    }
}

// ============================================================================
// Protein
// ============================================================================

/// Reference weight protein is dosed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProteinBasis {
    #[serde(rename = "LBM")]
    LeanMass,
    #[serde(rename = "BW")]
    BodyWeight,
}

impl ProteinBasis {
    pub fn for_body_fat(body_fat_percent: f64) -> Self {
        if body_fat_percent >= OVERFAT_THRESHOLD_PERCENT {
            ProteinBasis::LeanMass
        } else {
            ProteinBasis::BodyWeight
        }
    }

    /// Allowed g/kg range for this basis
    pub fn multiplier_range(&self) -> (f64, f64) {
        match self {
            ProteinBasis::LeanMass => (2.0, 2.2),
            ProteinBasis::BodyWeight => (1.6, 2.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProteinBasis::LeanMass => "lean mass",
            ProteinBasis::BodyWeight => "body weight",
        }
    }
}

/// How the protein target was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinExplanation {
    pub target: i32,
    pub basis: ProteinBasis,
    pub multiplier: f64,
    pub lbm: f64,
    pub body_fat: f64,
    pub body_fat_source: BodyFatSource,
    pub reason: String,
}

/// Calculate the protein target
///
/// Cut takes the top of the basis range. Maintain and lean bulk both take
/// the midpoint.
///
/// The result is clamped to at least round(weight × 1.6) and at most
/// round(lbm × 2.6). When those bounds cross (very high body fat) the floor
/// wins.
pub fn calculate_protein(
    weight_kg: f64,
    lbm: f64,
    body_fat_percent: f64,
    goal: TargetGoal,
) -> ProteinExplanation {
    let basis = ProteinBasis::for_body_fat(body_fat_percent);
    let (min_multiplier, max_multiplier) = basis.multiplier_range();

    let mut reason = match basis {
        ProteinBasis::LeanMass => format!(
            "Body fat ~{}%, using lean mass to prevent overfeeding protein",
            round_to_i32(body_fat_percent)
        ),
        ProteinBasis::BodyWeight => format!(
            "Body fat ~{}%, using body weight for protein calculation",
            round_to_i32(body_fat_percent)
        ),
    };

    let multiplier = match goal {
        TargetGoal::Cut => {
            reason.push_str(", prioritizing muscle preservation during deficit");
            max_multiplier
        }
        TargetGoal::LeanBulk => {
            reason.push_str(", balanced for muscle growth");
            min_multiplier + (max_multiplier - min_multiplier) * 0.5
        }
        TargetGoal::Maintain => {
            reason.push_str(", maintenance level");
            (min_multiplier + max_multiplier) / 2.0
        }
    };

    let reference_weight = match basis {
        ProteinBasis::LeanMass => lbm,
        ProteinBasis::BodyWeight => weight_kg,
    };

    let floor = round_to_i32(weight_kg * 1.6);
    let ceiling = round_to_i32(lbm * 2.6);
    let target = round_to_i32(reference_weight * multiplier).min(ceiling).max(floor);

    ProteinExplanation {
        target,
        basis,
        multiplier,
        lbm,
        body_fat: body_fat_percent,
        body_fat_source: BodyFatSource::Estimated,
        reason,
    }
}

/// Render a protein explanation for display
pub fn format_protein_explanation(explanation: &ProteinExplanation) -> String {
    let source_label = match explanation.body_fat_source {
        BodyFatSource::User => "",
        _ => " (estimated)",
    };
    let reference_weight = match explanation.basis {
        ProteinBasis::LeanMass => explanation.lbm,
        ProteinBasis::BodyWeight => explanation.lbm / (1.0 - explanation.body_fat / 100.0),
    };

    format!(
        "Based on {}{}:\n{}kg × {:.1}g/kg\n\nReason: {}",
        explanation.basis.label(),
        source_label,
        round_to_i32(reference_weight),
        explanation.multiplier,
        explanation.reason
    )
}

// ============================================================================
// Targets
// ============================================================================

/// Daily nutrition targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
    pub fiber: i32,
    pub water_ml: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieExplanation {
    pub maintenance: i32,
    pub target: i32,
    pub method: BmrMethod,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatExplanation {
    pub target: i32,
    pub multiplier: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbExplanation {
    pub target: i32,
    pub reason: String,
}

/// Justification for every macro target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroExplanation {
    pub protein: ProteinExplanation,
    pub calories: CalorieExplanation,
    pub fats: FatExplanation,
    pub carbs: CarbExplanation,
}

/// Targets and their explanation, produced together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub targets: NutritionTargets,
    pub explanation: MacroExplanation,
}

/// Calculate all nutrition targets with explanations
///
/// Body fat is taken from the snapshot when positive and estimated
/// otherwise. Lean mass is therefore always known here, so the maintenance
/// estimate uses Katch-McArdle.
pub fn calculate_nutrition_targets(stats: &UserStats) -> NutritionPlan {
    let weight_kg = stats.current_weight_kg;

    let (body_fat, body_fat_source) = match stats.body_fat_percentage.filter(|bf| *bf > 0.0) {
        Some(bf) => (bf, stats.body_fat_source),
        None => {
            let bf = estimate_body_fat(
                stats.gender,
                weight_kg,
                stats.height_cm,
                stats.age,
                stats.waist_cm,
            );
            (bf, BodyFatSource::Estimated)
        }
    };

    let lbm = calculate_lbm(weight_kg, body_fat);
    let bmr = calculate_bmr(weight_kg, stats.height_cm, stats.age, stats.gender, Some(lbm));
    let multiplier = activity_multiplier(stats.training_frequency);
    let maintenance = round_to_i32(bmr.bmr * multiplier);

    debug!(
        body_fat,
        %body_fat_source,
        lbm,
        bmr = bmr.bmr,
        method = %bmr.method,
        maintenance,
        "resolved energy baseline"
    );

    let goal = stats.target_goal;
    let (target_calories, calorie_reason) = match goal {
        TargetGoal::Cut => (
            round_to_i32(maintenance as f64 * 0.8),
            "20% deficit for sustainable fat loss",
        ),
        TargetGoal::LeanBulk => (
            round_to_i32(maintenance as f64 * 1.1),
            "10% surplus for lean muscle gain",
        ),
        TargetGoal::Maintain => (maintenance, "Maintenance calories"),
    };

    let mut protein = calculate_protein(weight_kg, lbm, body_fat, goal);
    protein.body_fat_source = body_fat_source;

    let fat_multiplier = match goal {
        TargetGoal::Cut => 0.7,
        _ => 0.8,
    };
    let target_fats = round_to_i32(lbm * fat_multiplier);

    let remaining = target_calories
        - protein.target * KCAL_PER_G_PROTEIN
        - target_fats * KCAL_PER_G_FAT;
    let target_carbs = round_to_i32(remaining as f64 / KCAL_PER_G_CARB as f64).max(MIN_CARBS_G);

    let targets = NutritionTargets {
        calories: target_calories,
        protein: protein.target,
        carbs: target_carbs,
        fats: target_fats,
        fiber: FIBER_TARGET_G,
        water_ml: round_to_i32(weight_kg * WATER_ML_PER_KG),
    };

    debug!(?goal, ?targets, "calculated nutrition targets");

    NutritionPlan {
        targets,
        explanation: MacroExplanation {
            protein,
            calories: CalorieExplanation {
                maintenance,
                target: target_calories,
                method: bmr.method,
                reason: calorie_reason.to_string(),
            },
            fats: FatExplanation {
                target: target_fats,
                multiplier: fat_multiplier,
                reason: format!("{}g per kg lean mass for hormone health", fat_multiplier),
            },
            carbs: CarbExplanation {
                target: target_carbs,
                reason: "Remaining calories after protein and fat allocation".to_string(),
            },
        },
    }
}

// ============================================================================
// Onboarding Body Composition
// ============================================================================

/// How the user chose to supply body fat during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "value", rename_all = "snake_case")]
pub enum BodyFatMethod {
    /// Known percentage, e.g. from a DEXA scan
    Percentage(f64),
    /// Waist circumference in centimetres
    Waist(f64),
    /// Nothing measured; estimate from BMI
    Bmi,
}

/// Onboarding form values, already defaulted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyCompositionInput {
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i32,
    pub method: BodyFatMethod,
}

/// Body composition stored on the profile after onboarding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyComposition {
    pub body_fat: f64,
    pub body_fat_source: BodyFatSource,
    pub lbm: f64,
    pub waist_cm: Option<f64>,
    pub protein_basis: ProteinBasis,
    pub protein_multiplier: f64,
}

/// Resolve body fat and lean mass for a new profile
pub fn assess_body_composition(input: &BodyCompositionInput) -> BodyComposition {
    let estimate = |waist: Option<f64>| {
        estimate_body_fat(input.gender, input.weight_kg, input.height_cm, input.age, waist)
    };

    let (body_fat, body_fat_source, waist_cm) = match input.method {
        BodyFatMethod::Percentage(bf) if bf > 0.0 => (bf, BodyFatSource::User, None),
        BodyFatMethod::Waist(waist) if waist > 0.0 => {
            (estimate(Some(waist)), BodyFatSource::Estimated, Some(waist))
        }
        _ => (estimate(None), BodyFatSource::Estimated, None),
    };

    let protein_basis = ProteinBasis::for_body_fat(body_fat);
    let protein_multiplier = match protein_basis {
        ProteinBasis::LeanMass => 2.1,
        ProteinBasis::BodyWeight => 1.8,
    };

    BodyComposition {
        body_fat,
        body_fat_source,
        lbm: calculate_lbm(input.weight_kg, body_fat),
        waist_cm,
        protein_basis,
        protein_multiplier,
    }
}
