//! Integration tests for CSV loading and report assembly

mod common;

use lifelog_cli::loader;
use lifelog_cli::report::{build_chart, build_habits, build_meal, build_targets, build_weight};
use lifelog_shared::habits::DayStatus;
use lifelog_shared::models::{BodyFatSource, Gender, ProfileRow, TargetGoal};
use lifelog_shared::units::WeightUnit;
use lifelog_shared::weight::TrendStatus;
use rstest::rstest;

fn cutting_profile() -> ProfileRow {
    ProfileRow {
        age: Some(30),
        gender: Some(Gender::Male),
        height_cm: Some(175.0),
        current_weight_kg: Some(90.0),
        body_fat_percentage: Some(30.0),
        body_fat_source: Some(BodyFatSource::User),
        waist_cm: None,
        training_frequency: Some(4),
        target_goal: Some(TargetGoal::Cut),
    }
}

#[test]
fn test_targets_report_json() {
    let report = build_targets(&cutting_profile()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["plan"]["targets"]["calories"], 2146);
    assert_eq!(json["plan"]["targets"]["protein"], 144);
    assert_eq!(json["plan"]["targets"]["fats"], 44);
    assert_eq!(json["plan"]["targets"]["carbs"], 294);
    assert_eq!(json["plan"]["explanation"]["protein"]["basis"], "LBM");
    assert_eq!(json["stats"]["body_fat_source"], "user");
}

#[test]
fn test_weight_report_from_csv() {
    // Last week 81 kg, this week 80 kg
    let mut csv = common::weight_csv(common::date(2024, 1, 1), &[81.0, 81.0, 81.0, 81.0]);
    csv.push_str(
        common::weight_csv(common::date(2024, 1, 8), &[80.0, 80.0, 80.0])
            .trim_start_matches("id,log_date,weight_kg\n"),
    );
    let logs = common::load_weights(&csv);

    let report = build_weight(&logs, &cutting_profile(), WeightUnit::Kg, common::today());
    assert_eq!(report.summary.status, TrendStatus::TooFast);
    assert_eq!(report.summary.change_percent, Some(-1.23));
    assert_eq!(report.latest_weight, Some(80.0));
    assert!(report.logged_today);
    assert_eq!(report.status_label, "Too Fast");
}

#[rstest]
#[case(7)]
#[case(30)]
fn test_chart_report_length(#[case] days: u32) {
    let logs = common::load_weights(&common::weight_csv(common::date(2024, 1, 1), &[80.0; 10]));
    let chart = build_chart(&logs, days, common::today());
    assert_eq!(chart.days.len(), days as usize);
    assert_eq!(chart.days.last().unwrap().date, common::today());
    assert_eq!(chart.days.last().unwrap().rolling_average, Some(80.0));
}

#[test]
fn test_habit_report_from_csv() {
    let fixture = common::habit_fixture(
        "Meditate",
        &[
            common::date(2024, 1, 6),
            common::date(2024, 1, 7),
            common::date(2024, 1, 8),
            common::date(2024, 1, 9),
        ],
    );
    let (habits, logs) = common::load_habits(&fixture);
    let report = build_habits(&habits, &logs, common::today());

    let row = &report.habits[0];
    assert_eq!(row.summary.habit_id, fixture.habit_id);
    assert_eq!(row.summary.streak, 4);
    assert_eq!(row.summary.completed_this_week, 2);
    assert_eq!(row.week[2], DayStatus::Pending);
    assert_eq!(row.track.len(), 21);
}

#[test]
fn test_habit_logs_completed_column_optional() {
    let csv = format!(
        "id,habit_id,log_date\n{},{},2024-01-10\n",
        uuid::Uuid::new_v4(),
        uuid::Uuid::new_v4()
    );
    let logs = loader::read_habit_logs(csv.as_bytes()).unwrap();
    assert!(logs[0].completed);
}

#[test]
fn test_meal_report_scores_against_targets() {
    let ingredients = lifelog_shared::ingredients::parse_ingredient_response(
        r#"```json
[{"ingredient_name": "chicken breast", "grams": 200, "protein_per_100g": 31, "fats_per_100g": 3.6}]
```"#,
    )
    .unwrap();
    let report = build_meal(ingredients, &cutting_profile()).unwrap();

    assert_eq!(report.totals.total_protein, 62.0);
    assert_eq!(report.totals.total_calories, 313);
    assert!(report.rating.ends_with("-deficient"));
    assert!(report.ingredients[0].is_ai_estimated);
}

#[test]
fn test_invalid_profile_blocks_targets() {
    let profile = ProfileRow {
        current_weight_kg: Some(900.0),
        body_fat_percentage: Some(120.0),
        ..cutting_profile()
    };
    let err = build_targets(&profile).unwrap_err().to_string();
    assert!(err.contains("Current Weight"));
    assert!(err.contains("Body Fat"));
}
