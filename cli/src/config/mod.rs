//! Configuration management for the Lifelog CLI
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. An explicit `--config` file, when given
//! 4. Environment variables (prefix: LIFELOG__)

use anyhow::Result;
use chrono::NaiveDate;
use lifelog_shared::models::ProfileRow;
use lifelog_shared::units::WeightUnit;
use lifelog_shared::weight::DEFAULT_CHART_DAYS;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub profile: ProfileRow,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Locations of the exported log tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub weight_logs: PathBuf,
    pub habit_logs: PathBuf,
    pub habits: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            weight_logs: PathBuf::from("data/weight_logs.csv"),
            habit_logs: PathBuf::from("data/habit_logs.csv"),
            habits: PathBuf::from("data/habits.csv"),
        }
    }
}

/// Report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Fixed "today"; the local date is used when unset
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    pub chart_days: u32,
    pub weight_unit: WeightUnit,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reference_date: None,
            chart_days: DEFAULT_CHART_DAYS,
            weight_unit: WeightUnit::Kg,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: bool,
    /// Default filter directive; `RUST_LOG` takes precedence
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            filter: "lifelog_cli=info,lifelog_shared=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on LIFELOG_ENV (development.toml or production.toml)
    /// 3. The explicit file, if any
    /// 4. Environment variables with LIFELOG__ prefix
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_file = format!("config/{}.toml", Self::environment());

        let mut builder = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            // e.g., LIFELOG__REPORT__CHART_DAYS=14 sets report.chart_days
            .add_source(config::Environment::with_prefix("LIFELOG").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Deployment environment name, `development` unless LIFELOG_ENV is set
    pub fn environment() -> String {
        env::var("LIFELOG_ENV").unwrap_or_else(|_| "development".to_string())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        Self::environment() == "production"
    }

    /// The date reports are computed for
    pub fn today(&self) -> NaiveDate {
        self.report
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
