//! CSV and response-file loading
//!
//! Each log table is exported as a headed CSV file whose columns match the
//! shared row types. Readers take any `io::Read` so tests can feed them
//! in-memory data.

use crate::error::CliError;
use lifelog_shared::ingredients::parse_ingredient_response;
use lifelog_shared::meals::Ingredient;
use lifelog_shared::models::{Habit, HabitLog, WeightLog};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, warn};

fn read_rows<T: DeserializeOwned, R: Read>(reader: R, table: &'static str) -> Result<Vec<T>, CliError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| CliError::Csv { table, source })?;
    debug!(table, count = rows.len(), "loaded rows");
    Ok(rows)
}

/// Read `id,log_date,weight_kg` rows
pub fn read_weight_logs<R: Read>(reader: R) -> Result<Vec<WeightLog>, CliError> {
    read_rows(reader, "weight_logs")
}

/// Read `id,habit_id,log_date,completed` rows; `completed` may be omitted
pub fn read_habit_logs<R: Read>(reader: R) -> Result<Vec<HabitLog>, CliError> {
    read_rows(reader, "habit_logs")
}

/// Read `id,name` rows
pub fn read_habits<R: Read>(reader: R) -> Result<Vec<Habit>, CliError> {
    read_rows(reader, "habits")
}

/// Open a table file; a missing file is an empty table
fn open_table<T>(
    path: &Path,
    read: impl FnOnce(File) -> Result<Vec<T>, CliError>,
) -> Result<Vec<T>, CliError> {
    match File::open(path) {
        Ok(file) => read(file),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "data file not found, treating as empty");
            Ok(Vec::new())
        }
        Err(e) => Err(CliError::io(path, e)),
    }
}

pub fn load_weight_logs(path: &Path) -> Result<Vec<WeightLog>, CliError> {
    open_table(path, read_weight_logs)
}

pub fn load_habit_logs(path: &Path) -> Result<Vec<HabitLog>, CliError> {
    open_table(path, read_habit_logs)
}

pub fn load_habits(path: &Path) -> Result<Vec<Habit>, CliError> {
    open_table(path, read_habits)
}

/// Read a saved model response and sanitise it into ingredients
pub fn load_meal_response(path: &Path) -> Result<Vec<Ingredient>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    Ok(parse_ingredient_response(&content)?)
}
