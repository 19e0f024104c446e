//! Error types for the Lifelog core

use crate::validation::ValidationError;
use thiserror::Error;

/// Core error types
///
/// The analytics themselves are total; these surface only at the edges
/// where untrusted rows or text enter the core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid profile: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    IngredientParse(#[from] IngredientParseError),
}

impl From<Vec<ValidationError>> for CoreError {
    fn from(errors: Vec<ValidationError>) -> Self {
        CoreError::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::user_message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures while turning an AI text response into ingredient records
#[derive(Error, Debug)]
pub enum IngredientParseError {
    #[error("Ingredient text is required")]
    EmptyInput,

    #[error("No response from AI")]
    EmptyResponse,

    #[error("Failed to parse AI response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Failed to parse AI response: expected a JSON array of ingredients")]
    NotAnArray,
}
