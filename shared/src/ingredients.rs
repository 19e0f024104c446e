//! Ingredient text and AI response handling
//!
//! The model is asked for a JSON array of per-100 g macro estimates. Its
//! answer is untrusted: it may be fenced in markdown, omit fields, quote
//! numbers, or use negative values. Everything here normalises that text
//! into [`Ingredient`] records without touching the network.

use crate::errors::IngredientParseError;
use crate::meals::Ingredient;
use serde_json::Value;
use tracing::debug;

/// Portion assumed when the response gives none
pub const DEFAULT_GRAMS: f64 = 100.0;

/// Name used when the response gives none
pub const UNKNOWN_INGREDIENT: &str = "Unknown";

/// Reject blank ingredient text before any request is made
pub fn validate_ingredient_text(text: &str) -> Result<&str, IngredientParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(IngredientParseError::EmptyInput);
    }
    Ok(trimmed)
}

/// Remove markdown code fences around a JSON payload
pub fn strip_code_fences(content: &str) -> &str {
    let mut body = content.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parse a model response into ingredient records
///
/// Missing, non-numeric or zero portions become [`DEFAULT_GRAMS`]. Missing
/// or non-numeric densities become 0. Negative numbers are floored at 0.
pub fn parse_ingredient_response(content: &str) -> Result<Vec<Ingredient>, IngredientParseError> {
    let body = strip_code_fences(content);
    if body.is_empty() {
        return Err(IngredientParseError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(body)?;
    let Value::Array(items) = value else {
        return Err(IngredientParseError::NotAnArray);
    };

    let ingredients: Vec<Ingredient> = items.iter().map(ingredient_from_value).collect();
    debug!(count = ingredients.len(), "parsed ingredient response");
    Ok(ingredients)
}

fn ingredient_from_value(item: &Value) -> Ingredient {
    let name = item
        .get("ingredient_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_INGREDIENT);

    let grams = match number_field(item, "grams") {
        Some(g) if g != 0.0 => g.max(0.0),
        _ => DEFAULT_GRAMS,
    };

    let density = |key: &str| number_field(item, key).unwrap_or(0.0).max(0.0);

    Ingredient {
        ingredient_name: name.to_string(),
        grams,
        protein_per_100g: density("protein_per_100g"),
        carbs_per_100g: density("carbs_per_100g"),
        fats_per_100g: density("fats_per_100g"),
        fiber_per_100g: density("fiber_per_100g"),
        is_ai_estimated: true,
    }
}

/// A finite number, or a string holding one
fn number_field(item: &Value, key: &str) -> Option<f64> {
    let number = match item.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_validate_ingredient_text() {
        assert_eq!(validate_ingredient_text("  2 eggs ").unwrap(), "2 eggs");
        assert!(matches!(
            validate_ingredient_text(" \n\t"),
            Err(IngredientParseError::EmptyInput)
        ));
    }

    #[rstest]
    #[case("```json\n[]\n```", "[]")]
    #[case("```\n[1]\n```", "[1]")]
    #[case("  [2]  ", "[2]")]
    fn test_strip_code_fences(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_code_fences(input), expected);
    }

    #[test]
    fn test_parse_fenced_response() {
        let content = r#"```json
[
  {"ingredient_name": "oats", "grams": 80, "protein_per_100g": 13.2,
   "carbs_per_100g": 67.7, "fats_per_100g": 6.5, "fiber_per_100g": 10.1}
]
```"#;
        let parsed = parse_ingredient_response(content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].ingredient_name, "oats");
        assert_eq!(parsed[0].grams, 80.0);
        assert_eq!(parsed[0].protein_per_100g, 13.2);
        assert!(parsed[0].is_ai_estimated);
    }

    #[test]
    fn test_parse_fills_defaults_and_clamps() {
        let content = r#"[
            {"grams": 0, "protein_per_100g": -3},
            {"ingredient_name": "milk", "grams": "250", "carbs_per_100g": "4.8", "fats_per_100g": "lots"},
            {"ingredient_name": "salt", "grams": -5}
        ]"#;
        let parsed = parse_ingredient_response(content).unwrap();

        assert_eq!(parsed[0].ingredient_name, "Unknown");
        assert_eq!(parsed[0].grams, 100.0);
        assert_eq!(parsed[0].protein_per_100g, 0.0);

        assert_eq!(parsed[1].grams, 250.0);
        assert_eq!(parsed[1].carbs_per_100g, 4.8);
        assert_eq!(parsed[1].fats_per_100g, 0.0);
        assert_eq!(parsed[1].fiber_per_100g, 0.0);

        assert_eq!(parsed[2].grams, 0.0);
    }

    #[test]
    fn test_parse_rejects_bad_content() {
        assert!(matches!(
            parse_ingredient_response("```json\n```"),
            Err(IngredientParseError::EmptyResponse)
        ));
        assert!(matches!(
            parse_ingredient_response("not json"),
            Err(IngredientParseError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_ingredient_response(r#"{"ingredient_name": "egg"}"#),
            Err(IngredientParseError::NotAnArray)
        ));
    }

    #[test]
    fn test_parsed_ingredients_feed_meal_totals() {
        let parsed = parse_ingredient_response(
            r#"[{"ingredient_name": "egg", "grams": 100, "protein_per_100g": 13, "fats_per_100g": 10}]"#,
        )
        .unwrap();
        let totals = crate::meals::calculate_meal_totals(&parsed);
        assert_eq!(totals.total_protein, 13.0);
        assert_eq!(totals.total_calories, 13 * 4 + 10 * 9);
    }
}
