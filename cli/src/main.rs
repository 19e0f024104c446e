//! Lifelog CLI
//!
//! Prints nutrition targets, habit scorecards and weight trends from CSV
//! exports of the log tables. Reports go to stdout; logs go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use lifelog_cli::config::AppConfig;
use lifelog_cli::{loader, report};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "lifelog", version, about = "Personal health and habit reports")]
struct Cli {
    /// Extra config file layered over config/{env}.toml
    #[arg(long, global = true, env = "LIFELOG_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Daily nutrition targets with explanations
    Targets,
    /// Scorecard for every habit
    Habits,
    /// Weekly weight trend
    Weight,
    /// Daily weights with the 7-day rolling average
    Chart {
        /// Days to show, ending today
        #[arg(long)]
        days: Option<u32>,
    },
    /// Totals and scores for a saved AI ingredient response
    Meal {
        /// File holding the model's JSON answer
        file: PathBuf,
    },
    /// Targets, habits and weight together
    Report,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    init_tracing(&config);

    let today = config.today();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %AppConfig::environment(),
        %today,
        "Starting lifelog"
    );

    match cli.command {
        Command::Targets => emit(cli.format, &report::build_targets(&config.profile)?),
        Command::Habits => {
            let habits = loader::load_habits(&config.data.habits)?;
            let logs = loader::load_habit_logs(&config.data.habit_logs)?;
            emit(cli.format, &report::build_habits(&habits, &logs, today))
        }
        Command::Weight => {
            let logs = loader::load_weight_logs(&config.data.weight_logs)?;
            emit(
                cli.format,
                &report::build_weight(&logs, &config.profile, config.report.weight_unit, today),
            )
        }
        Command::Chart { days } => {
            let logs = loader::load_weight_logs(&config.data.weight_logs)?;
            let days = days.unwrap_or(config.report.chart_days);
            debug!(days, "building chart");
            emit(cli.format, &report::build_chart(&logs, days, today))
        }
        Command::Meal { file } => {
            let ingredients = loader::load_meal_response(&file)?;
            emit(cli.format, &report::build_meal(ingredients, &config.profile)?)
        }
        Command::Report => {
            let habits = loader::load_habits(&config.data.habits)?;
            let habit_logs = loader::load_habit_logs(&config.data.habit_logs)?;
            let weight_logs = loader::load_weight_logs(&config.data.weight_logs)?;
            let full = report::FullReport {
                today,
                targets: report::build_targets(&config.profile)?,
                habits: report::build_habits(&habits, &habit_logs, today),
                weight: report::build_weight(
                    &weight_logs,
                    &config.profile,
                    config.report.weight_unit,
                    today,
                ),
            };
            emit(cli.format, &full)
        }
    }
}

/// Print a report in the requested format
fn emit<T: Serialize + Display>(format: OutputFormat, value: &T) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", value),
    }
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter.as_str().into());

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() || config.logging.json {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
