//! CLI error handling
//!
//! Loader and report failures carry enough context to tell the user which
//! file or table is at fault. `main` wraps them in `anyhow` for display.

use lifelog_shared::errors::{CoreError, IngredientParseError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {table} row: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<IngredientParseError> for CliError {
    fn from(err: IngredientParseError) -> Self {
        CliError::Core(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_names_path() {
        let err = CliError::io("data/habits.csv", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.to_string(), "Failed to read data/habits.csv: denied");
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err = CliError::from(IngredientParseError::NotAnArray);
        assert!(matches!(err, CliError::Core(CoreError::IngredientParse(_))));
        assert!(err.to_string().contains("expected a JSON array"));
    }
}
