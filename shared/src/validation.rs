//! Input validation functions
//!
//! Profile values are checked here before they reach the macro engine.
//! The engine itself never fails; it relies on these ranges holding.

use crate::models::{ProfileRow, MAX_TRAINING_DAYS};

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate body fat percentage (0-100)
pub fn validate_body_fat_percentage(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Body fat must be a valid number".to_string());
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Body fat must be between 0 and 100%".to_string());
    }
    Ok(())
}

/// Validate waist circumference (in cm)
pub fn validate_waist_cm(waist_cm: f64) -> Result<(), String> {
    if waist_cm.is_nan() || waist_cm.is_infinite() {
        return Err("Waist must be a valid number".to_string());
    }
    if waist_cm <= 0.0 {
        return Err("Waist must be positive".to_string());
    }
    if waist_cm > 300.0 {
        return Err("Waist must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in years
pub fn validate_age(age: i32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age > 150 {
        return Err("Age must be at most 150 years".to_string());
    }
    Ok(())
}

/// Validate training sessions per week
pub fn validate_training_frequency(days: u8) -> Result<(), String> {
    if days > MAX_TRAINING_DAYS {
        return Err(format!("Training frequency must be at most {} days", MAX_TRAINING_DAYS));
    }
    Ok(())
}

/// Validate every present field of a profile row
///
/// Missing fields are not errors; they fall back to defaults later.
pub fn validate_profile(row: &ProfileRow) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut check = |field: &str, result: Result<(), String>| {
        if let Err(message) = result {
            errors.push(ValidationError::new(field, &message));
        }
    };

    if let Some(weight) = row.current_weight_kg {
        check("current_weight_kg", validate_weight(weight));
    }
    if let Some(height) = row.height_cm {
        check("height_cm", validate_height_cm(height));
    }
    if let Some(body_fat) = row.body_fat_percentage {
        check("body_fat_percentage", validate_body_fat_percentage(body_fat));
    }
    if let Some(waist) = row.waist_cm {
        check("waist_cm", validate_waist_cm(waist));
    }
    if let Some(age) = row.age {
        check("age", validate_age(age));
    }
    if let Some(days) = row.training_frequency {
        check("training_frequency", validate_training_frequency(days));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "current_weight_kg" | "weight_kg" => "Current Weight",
        "height" | "height_cm" => "Height",
        "body_fat_percentage" => "Body Fat",
        "waist_cm" => "Waist",
        "age" => "Age",
        "gender" => "Gender",
        "training_frequency" => "Training Frequency",
        "target_goal" => "Goal",
        "ingredient_text" => "Ingredients",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(70.0).is_ok());
        assert!(validate_weight(20.0).is_ok());
        assert!(validate_weight(500.0).is_ok());
        assert!(validate_weight(10.0).is_err());
        assert!(validate_weight(600.0).is_err());
        assert!(validate_weight(f64::NAN).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_height_cm() {
        assert!(validate_height_cm(170.0).is_ok());
        assert!(validate_height_cm(50.0).is_ok());
        assert!(validate_height_cm(300.0).is_ok());
        assert!(validate_height_cm(49.9).is_err());
        assert!(validate_height_cm(300.1).is_err());
        assert!(validate_height_cm(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_body_fat_and_age() {
        assert!(validate_body_fat_percentage(0.0).is_ok());
        assert!(validate_body_fat_percentage(100.0).is_ok());
        assert!(validate_body_fat_percentage(-0.1).is_err());
        assert!(validate_body_fat_percentage(100.5).is_err());
        assert!(validate_age(1).is_ok());
        assert!(validate_age(150).is_ok());
        assert!(validate_age(0).is_err());
        assert!(validate_age(151).is_err());
        assert!(validate_training_frequency(7).is_ok());
        assert!(validate_training_frequency(8).is_err());
    }

    #[test]
    fn test_validate_profile_collects_all_errors() {
        let row = ProfileRow {
            current_weight_kg: Some(5.0),
            height_cm: Some(400.0),
            age: Some(35),
            ..Default::default()
        };
        let errors = validate_profile(&row).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "current_weight_kg");
        assert_eq!(errors[0].user_message(), "Current Weight: Weight must be at least 20 kg");
        assert_eq!(errors[1].display_label, "Height");
    }

    #[test]
    fn test_validate_empty_profile_is_ok() {
        assert!(validate_profile(&ProfileRow::default()).is_ok());
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("body_fat_percentage"), "Body Fat");
        assert_eq!(get_field_display_label("height_cm"), "Height");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_weight_range(weight in 20.0f64..=500.0) {
            prop_assert!(validate_weight(weight).is_ok());
        }

        #[test]
        fn prop_invalid_weight_below_min(weight in 0.0f64..20.0) {
            prop_assert!(validate_weight(weight).is_err());
        }

        #[test]
        fn prop_valid_height_range(height in 50.0f64..=300.0) {
            prop_assert!(validate_height_cm(height).is_ok());
        }

        #[test]
        fn prop_valid_age_range(age in 1i32..=150) {
            prop_assert!(validate_age(age).is_ok());
        }
    }
}
