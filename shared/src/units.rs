//! Unit conversion and rounding helpers
//!
//! All core calculations run in SI units (kg, cm). Conversions happen at
//! the display boundary or, for the Navy body-fat formula, inside the
//! formula that is defined in inches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Centimetres per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit preference for displaying reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
        }
    }

    /// Convert from kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg / KG_PER_LB,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

// ============================================================================
// Length
// ============================================================================

/// Convert centimetres to inches
pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

// ============================================================================
// Rounding
// ============================================================================

/// Round half-up to the nearest integer
///
/// `-1.5` rounds to `-1`, not `-2`. Logged targets and trend figures are
/// compared against values produced this way, so `f64::round` (half away
/// from zero) is not interchangeable here.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round half-up to a fixed number of decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    round_half_up(value * factor) / factor
}

/// Round half-up and convert to a whole number
pub fn round_to_i32(value: f64) -> i32 {
    round_half_up(value) as i32
}
