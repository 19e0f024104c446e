//! Report assembly and text rendering
//!
//! Every report is a plain serializable struct built from loaded rows and
//! an explicit `today`. JSON output serializes the struct; text output uses
//! its `Display` impl.

use crate::error::CliError;
use chrono::NaiveDate;
use lifelog_shared::habits::{
    trailing_days, week_days, DayStatus, HabitHistory, HabitSummary, EXTENDED_TRACK_DAYS,
};
use lifelog_shared::meals::{
    calculate_meal_totals, macro_progress, overall_rating, performance_scores, Ingredient,
    MacroProgress, MealTotals, MetricScore,
};
use lifelog_shared::models::{Habit, HabitLog, ProfileRow, UserStats, WeightLog};
use lifelog_shared::nutrition::{calculate_nutrition_targets, format_protein_explanation, NutritionPlan};
use lifelog_shared::units::{round_to, WeightUnit};
use lifelog_shared::weight::{
    calculate_weekly_summary, generate_chart_data, has_entry_on, latest_weight, DayData,
    WeekSummary,
};
use serde::Serialize;
use std::fmt;
use tracing::info;

// ============================================================================
// Targets
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TargetsReport {
    pub stats: UserStats,
    pub plan: NutritionPlan,
    pub protein_text: String,
}

/// Validate the profile row, then compute targets from its snapshot
pub fn build_targets(profile: &ProfileRow) -> Result<TargetsReport, CliError> {
    let stats = UserStats::try_from_profile(profile)?;
    let plan = calculate_nutrition_targets(&stats);
    info!(calories = plan.targets.calories, protein = plan.targets.protein, "computed targets");

    Ok(TargetsReport {
        protein_text: format_protein_explanation(&plan.explanation.protein),
        stats,
        plan,
    })
}

impl fmt::Display for TargetsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.plan.targets;
        let e = &self.plan.explanation;
        writeln!(f, "Daily targets")?;
        writeln!(f, "  Calories  {:>5} kcal  ({}, maintenance {})", t.calories, e.calories.reason, e.calories.maintenance)?;
        writeln!(f, "  Protein   {:>5} g", t.protein)?;
        writeln!(f, "  Fats      {:>5} g     ({})", t.fats, e.fats.reason)?;
        writeln!(f, "  Carbs     {:>5} g     ({})", t.carbs, e.carbs.reason)?;
        writeln!(f, "  Fiber     {:>5} g", t.fiber)?;
        writeln!(f, "  Water     {:>5} ml", t.water_ml)?;
        writeln!(f)?;
        writeln!(f, "{}", self.protein_text)
    }
}

// ============================================================================
// Habits
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HabitRow {
    #[serde(flatten)]
    pub summary: HabitSummary,
    /// Monday to Sunday of the current week
    pub week: Vec<DayStatus>,
    /// Trailing three weeks, oldest first
    pub track: Vec<DayStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitsReport {
    pub today: NaiveDate,
    pub habits: Vec<HabitRow>,
}

pub fn build_habits(habits: &[Habit], logs: &[HabitLog], today: NaiveDate) -> HabitsReport {
    let week = week_days(today);
    let track = trailing_days(today, EXTENDED_TRACK_DAYS);

    let habits = habits
        .iter()
        .map(|habit| {
            let history = HabitHistory::from_logs(habit.id, logs, today);
            HabitRow {
                summary: history.summarize(&habit.name),
                week: history.track(&week),
                track: history.track(&track),
            }
        })
        .collect();

    HabitsReport { today, habits }
}

fn status_glyph(status: DayStatus) -> char {
    match status {
        DayStatus::Completed => '#',
        DayStatus::Missed => 'x',
        DayStatus::Pending => '?',
        DayStatus::Future => '.',
    }
}

impl fmt::Display for HabitsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Habits as of {}", self.today)?;
        if self.habits.is_empty() {
            return writeln!(f, "  (no habits)");
        }
        for row in &self.habits {
            let s = &row.summary;
            let week: String = row.week.iter().map(|d| status_glyph(*d)).collect();
            write!(
                f,
                "  {:<20} [{}] {}/7 this week, streak {} (best {}), {}% this month",
                s.name, week, s.completed_this_week, s.streak, s.longest_streak, s.completion_rate
            )?;
            match s.last_break {
                Some(date) => writeln!(f, ", last break {}", date)?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Weight
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct WeightReport {
    pub summary: WeekSummary,
    pub status_label: &'static str,
    pub status_description: &'static str,
    pub latest_weight: Option<f64>,
    pub logged_today: bool,
    pub unit: WeightUnit,
}

/// Weekly summary; current weight is the latest log, else the profile weight
pub fn build_weight(
    logs: &[WeightLog],
    profile: &ProfileRow,
    unit: WeightUnit,
    today: NaiveDate,
) -> WeightReport {
    let latest = latest_weight(logs);
    let current = latest.unwrap_or_else(|| UserStats::from_profile(profile).current_weight_kg);
    let summary = calculate_weekly_summary(logs, current, today);

    WeightReport {
        status_label: summary.status.label(),
        status_description: summary.status.description(),
        latest_weight: latest,
        logged_today: has_entry_on(logs, today),
        unit,
        summary,
    }
}

impl WeightReport {
    fn show(&self, kg: Option<f64>) -> String {
        match kg {
            Some(kg) => format!("{:.2} {}", round_to(self.unit.from_kg(kg), 2), self.unit),
            None => "-".to_string(),
        }
    }
}

impl fmt::Display for WeightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "Week {} to {}", s.week_start, s.week_end)?;
        writeln!(f, "  Current weight   {}", self.show(Some(s.current_weight)))?;
        writeln!(f, "  This week avg    {}", self.show(s.average))?;
        writeln!(f, "  Last week avg    {}", self.show(s.previous_average))?;
        if let (Some(change), Some(percent)) = (s.change, s.change_percent) {
            writeln!(
                f,
                "  Change           {:+.2} {} ({:+.2}%)",
                self.unit.from_kg(change),
                self.unit,
                percent
            )?;
        }
        writeln!(f, "  Status           {}: {}", self.status_label, self.status_description)?;
        if !self.logged_today {
            writeln!(f, "  No weigh-in logged today")?;
        }
        Ok(())
    }
}

// ============================================================================
// Chart
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ChartReport {
    pub days: Vec<DayData>,
}

pub fn build_chart(logs: &[WeightLog], days: u32, today: NaiveDate) -> ChartReport {
    ChartReport {
        days: generate_chart_data(logs, days, today).collect(),
    }
}

impl fmt::Display for ChartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12} {:>8} {:>8}", "date", "weight", "7d avg")?;
        for day in &self.days {
            let cell = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".into());
            writeln!(f, "{:<12} {:>8} {:>8}", day.date, cell(day.weight), cell(day.rolling_average))?;
        }
        Ok(())
    }
}

// ============================================================================
// Meal
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MealReport {
    pub ingredients: Vec<Ingredient>,
    pub totals: MealTotals,
    pub progress: Vec<MacroProgress>,
    pub scores: Vec<MetricScore>,
    pub rating: String,
}

/// Score a meal against the profile's daily targets
pub fn build_meal(ingredients: Vec<Ingredient>, profile: &ProfileRow) -> Result<MealReport, CliError> {
    let targets = build_targets(profile)?.plan.targets;
    let totals = calculate_meal_totals(&ingredients);
    let scores = performance_scores(&totals, &targets);

    Ok(MealReport {
        progress: macro_progress(&totals, &targets),
        rating: overall_rating(&scores).label(),
        scores,
        totals,
        ingredients,
    })
}

impl fmt::Display for MealReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ing in &self.ingredients {
            writeln!(f, "  {:<24} {:>6.0} g", ing.ingredient_name, ing.grams)?;
        }
        let t = &self.totals;
        writeln!(
            f,
            "Total {:.0} g: {} kcal, P {:.1} g, C {:.1} g, F {:.1} g, fiber {:.1} g",
            t.total_weight, t.total_calories, t.total_protein, t.total_carbs, t.total_fats, t.total_fiber
        )?;
        for p in &self.progress {
            writeln!(
                f,
                "  {:<9} {:>5.0}% of daily target, {:.0} {} left",
                p.metric.label(),
                p.percent,
                p.remaining,
                p.metric.unit()
            )?;
        }
        writeln!(f, "Rating: {}", self.rating)
    }
}

// ============================================================================
// Combined
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FullReport {
    pub today: NaiveDate,
    pub targets: TargetsReport,
    pub habits: HabitsReport,
    pub weight: WeightReport,
}

impl fmt::Display for FullReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lifelog report for {}\n", self.today)?;
        writeln!(f, "{}", self.targets)?;
        writeln!(f, "{}", self.habits)?;
        write!(f, "{}", self.weight)
    }
}
