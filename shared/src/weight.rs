//! Weight trend analytics
//!
//! Daily weigh-ins are noisy, so every progress signal here is built from
//! averages: a trailing rolling average per day and Monday-to-Sunday weekly
//! means. Averages with fewer than [`MIN_DATA_POINTS`] samples are
//! suppressed rather than reported with false precision.

use crate::models::WeightLog;
use crate::units::round_to;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Samples required before an average is reported
pub const MIN_DATA_POINTS: usize = 3;

/// Default rolling-average window
pub const DEFAULT_ROLLING_WINDOW_DAYS: u32 = 7;

/// Default number of days in chart output
pub const DEFAULT_CHART_DAYS: u32 = 30;

// ============================================================================
// Averages
// ============================================================================

/// Mean of the samples, rounded to 2 decimals, or `None` below the minimum
fn suppressed_mean<'a>(samples: impl Iterator<Item = &'a WeightLog>) -> Option<f64> {
    let (count, sum) = samples.fold((0usize, 0.0), |(n, s), log| (n + 1, s + log.weight_kg));
    if count < MIN_DATA_POINTS {
        debug!(count, "suppressing average: insufficient data points");
        return None;
    }
    Some(round_to(sum / count as f64, 2))
}

/// Average of logs dated within `[target_date − (window − 1), target_date]`
///
/// A window of 0 days is empty and yields `None`.
pub fn calculate_rolling_average(
    logs: &[WeightLog],
    target_date: NaiveDate,
    window_days: u32,
) -> Option<f64> {
    if window_days == 0 {
        return None;
    }
    let span = u64::from(window_days - 1);
    let window_start = target_date
        .checked_sub_days(Days::new(span))
        .unwrap_or(NaiveDate::MIN);

    suppressed_mean(
        logs.iter()
            .filter(|log| log.log_date >= window_start && log.log_date <= target_date),
    )
}

/// Monday and Sunday of the week containing `date`, both inclusive
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from_monday = u64::from(date.weekday().num_days_from_monday());
    let start = date.checked_sub_days(Days::new(from_monday)).unwrap_or(date);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Average of logs dated within `[start, end]`
pub fn calculate_weekly_average(
    logs: &[WeightLog],
    start: NaiveDate,
    end: NaiveDate,
) -> Option<f64> {
    suppressed_mean(
        logs.iter()
            .filter(|log| log.log_date >= start && log.log_date <= end),
    )
}

// ============================================================================
// Weekly Summary
// ============================================================================

/// Weekly trend classification, assuming a weight-loss goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    OnTrack,
    TooSlow,
    TooFast,
    Stall,
    InsufficientData,
}

impl TrendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TrendStatus::OnTrack => "On Track",
            TrendStatus::TooSlow => "Too Slow",
            TrendStatus::TooFast => "Too Fast",
            TrendStatus::Stall => "Stall",
            TrendStatus::InsufficientData => "Collecting Data",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TrendStatus::OnTrack => {
                "0.5-1.0% weekly loss - optimal for fat loss with muscle retention"
            }
            TrendStatus::TooSlow => "<0.3% weekly change - review calorie tracking accuracy",
            TrendStatus::TooFast => {
                ">1.2% weekly loss - muscle loss risk, consider increasing calories"
            }
            TrendStatus::Stall => "No meaningful change detected",
            TrendStatus::InsufficientData => "Need more weigh-ins for accurate trend analysis",
        }
    }
}

/// Classify a week-over-week change
///
/// Losses between 1.0% and 1.2% (and between 0.3% and 0.5%) fall through
/// to `OnTrack`; only losses strictly above 1.2% are `TooFast`.
pub fn classify_trend(change: f64, change_percent: f64) -> TrendStatus {
    let abs_percent = change_percent.abs();

    if change < 0.0 {
        if (0.5..=1.0).contains(&abs_percent) {
            TrendStatus::OnTrack
        } else if abs_percent < 0.3 {
            TrendStatus::TooSlow
        } else if abs_percent > 1.2 {
            TrendStatus::TooFast
        } else {
            TrendStatus::OnTrack
        }
    } else if change > 0.0 {
        if abs_percent < 0.3 {
            TrendStatus::Stall
        } else {
            TrendStatus::TooSlow
        }
    } else {
        TrendStatus::Stall
    }
}

/// This week's average compared with last week's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub average: Option<f64>,
    pub previous_average: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub status: TrendStatus,
    pub current_weight: f64,
}

/// Compare the current Monday–Sunday week against the previous one
pub fn calculate_weekly_summary(
    logs: &[WeightLog],
    current_weight: f64,
    today: NaiveDate,
) -> WeekSummary {
    let (week_start, week_end) = week_bounds(today);
    let last_week_start = week_start.checked_sub_days(Days::new(7)).unwrap_or(week_start);
    let last_week_end = week_end.checked_sub_days(Days::new(7)).unwrap_or(week_end);

    let average = calculate_weekly_average(logs, week_start, week_end);
    let previous_average = calculate_weekly_average(logs, last_week_start, last_week_end);

    let (change, change_percent, status) = match (average, previous_average) {
        (Some(current), Some(previous)) => {
            let change = round_to(current - previous, 2);
            let change_percent = round_to(change / previous * 100.0, 2);
            (
                Some(change),
                Some(change_percent),
                classify_trend(change, change_percent),
            )
        }
        _ => (None, None, TrendStatus::InsufficientData),
    };

    debug!(?average, ?previous_average, ?status, "weekly weight summary");

    WeekSummary {
        week_start,
        week_end,
        average,
        previous_average,
        change,
        change_percent,
        status,
        current_weight,
    }
}

// ============================================================================
// Chart Data
// ============================================================================

/// One chart row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayData {
    pub date: NaiveDate,
    /// Logged weight for the day, if any
    pub weight: Option<f64>,
    pub rolling_average: Option<f64>,
}

/// Lazy sequence of chart rows, oldest first
///
/// Cloning yields an independent iterator starting from the clone's
/// position; clone before consuming to replay the series.
#[derive(Debug, Clone)]
pub struct ChartDays<'a> {
    logs: &'a [WeightLog],
    daily: BTreeMap<NaiveDate, f64>,
    next: Option<NaiveDate>,
    remaining: usize,
}

impl Iterator for ChartDays<'_> {
    type Item = DayData;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let date = self.next?;
        self.remaining -= 1;
        self.next = date.succ_opt();

        Some(DayData {
            date,
            weight: self.daily.get(&date).copied(),
            rolling_average: calculate_rolling_average(
                self.logs,
                date,
                DEFAULT_ROLLING_WINDOW_DAYS,
            ),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ChartDays<'_> {}

/// One row per calendar day for the `days_to_show` days ending `today`
///
/// Days without a log carry `weight: None`; nothing is interpolated. When a
/// date has several rows, the first one supplies the daily weight. The range
/// is cut short at the earliest representable date.
pub fn generate_chart_data(logs: &[WeightLog], days_to_show: u32, today: NaiveDate) -> ChartDays<'_> {
    let mut daily = BTreeMap::new();
    for log in logs {
        daily.entry(log.log_date).or_insert(log.weight_kg);
    }

    let available = today.signed_duration_since(NaiveDate::MIN).num_days() + 1;
    let remaining = i64::from(days_to_show).min(available).max(0) as usize;
    let span = remaining.saturating_sub(1) as u64;

    ChartDays {
        logs,
        daily,
        next: today.checked_sub_days(Days::new(span)),
        remaining,
    }
}

// ============================================================================
// Lookups
// ============================================================================

/// Whether any log is dated `date`
pub fn has_entry_on(logs: &[WeightLog], date: NaiveDate) -> bool {
    logs.iter().any(|log| log.log_date == date)
}

/// Weight of the most recently dated log
pub fn latest_weight(logs: &[WeightLog]) -> Option<f64> {
    logs.iter()
        .reduce(|best, log| if log.log_date > best.log_date { log } else { best })
        .map(|log| log.weight_kg)
}
