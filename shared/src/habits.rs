//! Habit streak and completion analytics
//!
//! A [`HabitHistory`] is built once per habit from the log snapshot and a
//! caller-supplied "today". Dates after today are dropped on construction,
//! so no metric ever counts a future day as done or missed.

use crate::models::{Habit, HabitLog};
use crate::units::round_half_up;
use crate::weight::week_bounds;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// How far back [`HabitHistory::last_break_date`] looks
pub const LAST_BREAK_LOOKBACK_DAYS: u64 = 30;

/// Length of the expanded scorecard track
pub const EXTENDED_TRACK_DAYS: u64 = 21;

/// Rendering state of one day cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Completed,
    /// Past day with no completion
    Missed,
    /// Today, not yet completed; not a miss until the day ends
    Pending,
    Future,
}

/// Per-habit scorecard figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub habit_id: Uuid,
    pub name: String,
    pub completed_this_week: usize,
    pub streak: u32,
    pub longest_streak: u32,
    pub last_break: Option<NaiveDate>,
    /// Month-to-date completion percentage
    pub completion_rate: u32,
}

/// Completed days of one habit as of `today`
#[derive(Debug, Clone)]
pub struct HabitHistory {
    habit_id: Uuid,
    today: NaiveDate,
    completed: BTreeSet<NaiveDate>,
}

impl HabitHistory {
    /// Collect the completed, non-future dates logged for `habit_id`
    pub fn from_logs(habit_id: Uuid, logs: &[HabitLog], today: NaiveDate) -> Self {
        let completed = logs
            .iter()
            .filter(|log| log.habit_id == habit_id && log.completed && log.log_date <= today)
            .map(|log| log.log_date)
            .collect();

        Self {
            habit_id,
            today,
            completed,
        }
    }

    pub fn habit_id(&self) -> Uuid {
        self.habit_id
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed.contains(&date)
    }

    /// Consecutive completed days ending today, or ending yesterday when
    /// today is still open
    pub fn current_streak(&self) -> u32 {
        let start = if self.is_completed_on(self.today) {
            Some(self.today)
        } else {
            self.today.pred_opt()
        };

        let mut streak = 0;
        let mut cursor = start;
        while let Some(date) = cursor.filter(|d| self.is_completed_on(*d)) {
            streak += 1;
            cursor = date.pred_opt();
        }
        streak
    }

    /// Longest run of calendar-consecutive completed days
    pub fn longest_streak(&self) -> u32 {
        let mut longest = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;

        for &date in &self.completed {
            run = match previous.and_then(|p| p.succ_opt()) {
                Some(next) if next == date => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            previous = Some(date);
        }

        longest
    }

    /// Most recent missed day, searching back from yesterday
    ///
    /// A habit that was never completed has no break.
    pub fn last_break_date(&self) -> Option<NaiveDate> {
        if self.completed.is_empty() {
            return None;
        }
        (1..=LAST_BREAK_LOOKBACK_DAYS)
            .filter_map(|offset| self.today.checked_sub_days(Days::new(offset)))
            .find(|date| !self.is_completed_on(*date))
    }

    /// Completed days among `days`, ignoring any after today
    pub fn completed_count(&self, days: &[NaiveDate]) -> usize {
        days.iter()
            .filter(|d| **d <= self.today && self.is_completed_on(**d))
            .count()
    }

    /// Month-to-date completion rate in whole percent
    pub fn completion_rate(&self) -> u32 {
        let Some(month_start) = self.today.with_day(1) else {
            return 0;
        };

        let completed = self.completed.range(month_start..=self.today).count();
        let days_elapsed = self.today.day();
        round_half_up(completed as f64 / days_elapsed as f64 * 100.0) as u32
    }

    pub fn day_status(&self, date: NaiveDate) -> DayStatus {
        if date > self.today {
            DayStatus::Future
        } else if self.is_completed_on(date) {
            DayStatus::Completed
        } else if date == self.today {
            DayStatus::Pending
        } else {
            DayStatus::Missed
        }
    }

    /// Status for each of `days`, in order
    pub fn track(&self, days: &[NaiveDate]) -> Vec<DayStatus> {
        days.iter().map(|d| self.day_status(*d)).collect()
    }

    pub fn summarize(&self, name: &str) -> HabitSummary {
        HabitSummary {
            habit_id: self.habit_id,
            name: name.to_string(),
            completed_this_week: self.completed_count(&week_days(self.today)),
            streak: self.current_streak(),
            longest_streak: self.longest_streak(),
            last_break: self.last_break_date(),
            completion_rate: self.completion_rate(),
        }
    }
}

/// Monday through Sunday of the week containing `today`
pub fn week_days(today: NaiveDate) -> Vec<NaiveDate> {
    let (start, end) = week_bounds(today);
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// The `n` days ending with `today`, oldest first
pub fn trailing_days(today: NaiveDate, n: u64) -> Vec<NaiveDate> {
    (0..n)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect()
}

/// Scorecard summary for every habit
pub fn summarize_habits(habits: &[Habit], logs: &[HabitLog], today: NaiveDate) -> Vec<HabitSummary> {
    habits
        .iter()
        .map(|habit| HabitHistory::from_logs(habit.id, logs, today).summarize(&habit.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn logs_for(habit_id: Uuid, dates: &[NaiveDate]) -> Vec<HabitLog> {
        dates
            .iter()
            .map(|d| HabitLog {
                id: Uuid::new_v4(),
                habit_id,
                log_date: *d,
                completed: true,
            })
            .collect()
    }

    fn january(days: &[u32]) -> Vec<NaiveDate> {
        days.iter().map(|d| date(2024, 1, *d)).collect()
    }

    #[test]
    fn test_empty_history() {
        let history = HabitHistory::from_logs(Uuid::new_v4(), &[], date(2024, 1, 5));
        assert_eq!(history.current_streak(), 0);
        assert_eq!(history.longest_streak(), 0);
        assert_eq!(history.last_break_date(), None);
        assert_eq!(history.completion_rate(), 0);
    }

    #[test]
    fn test_single_old_completion_has_break() {
        let id = Uuid::new_v4();
        let logs = logs_for(id, &january(&[2]));
        let history = HabitHistory::from_logs(id, &logs, date(2024, 1, 20));
        assert_eq!(history.current_streak(), 0);
        assert_eq!(history.longest_streak(), 1);
        assert_eq!(history.last_break_date(), Some(date(2024, 1, 19)));
    }

    #[test]
    fn test_streak_through_today() {
        let id = Uuid::new_v4();
        let logs = logs_for(id, &january(&[1, 2, 3, 4, 5]));
        let history = HabitHistory::from_logs(id, &logs, date(2024, 1, 5));
        assert_eq!(history.current_streak(), 5);
        assert_eq!(history.longest_streak(), 5);
    }

    #[test]
    fn test_streak_counts_from_yesterday_when_today_open() {
        let id = Uuid::new_v4();
        let logs = logs_for(id, &january(&[1, 2, 3, 4]));
        let history = HabitHistory::from_logs(id, &logs, date(2024, 1, 5));
        assert_eq!(history.current_streak(), 4);
        assert_eq!(history.day_status(date(2024, 1, 5)), DayStatus::Pending);

        let history = HabitHistory::from_logs(id, &logs, date(2024, 1, 6));
        assert_eq!(history.current_streak(), 0);
    }

    #[test]
    fn test_longest_streak_with_gap() {
        let id = Uuid::new_v4();
        let logs = logs_for(id, &january(&[1, 2, 4, 5]));
        let history = HabitHistory::from_logs(id, &logs, date(2024, 1, 5));
        assert_eq!(history.longest_streak(), 2);
        assert_eq!(history.current_streak(), 2);
        assert_eq!(history.last_break_date(), Some(date(2024, 1, 3)));
    }

    #[test]
    fn test_last_break_before_run() {
        let id = Uuid::new_v4();
        let logs = logs_for(id, &january(&[1, 2, 3, 4, 5]));
        let history = HabitHistory::from_logs(id, &logs, date(2024, 1, 5));
        assert_eq!(history.last_break_date(), Some(date(2023, 12, 31)));
    }

    #[test]
    fn test_last_break_none_within_window() {
        let id = Uuid::new_v4();
        let today = date(2024, 3, 15);
        let logs = logs_for(id, &trailing_days(today, 40));
        let history = HabitHistory::from_logs(id, &logs, today);
        assert_eq!(history.last_break_date(), None);
        assert_eq!(history.current_streak(), 40);
    }

    #[test]
    fn test_future_logs_are_ignored() {
        let id = Uuid::new_v4();
        let logs = logs_for(id, &january(&[3, 4, 5, 6, 7]));
        let history = HabitHistory::from_logs(id, &logs, date(2024, 1, 5));
        assert_eq!(history.longest_streak(), 3);
        assert!(!history.is_completed_on(date(2024, 1, 6)));
        assert_eq!(history.day_status(date(2024, 1, 6)), DayStatus::Future);
        assert_eq!(history.completed_count(&week_days(date(2024, 1, 5))), 3);
    }

    #[test]
    fn test_other_habits_and_incomplete_rows_ignored() {
        let id = Uuid::new_v4();
        let mut logs = logs_for(id, &january(&[4, 5]));
        logs.extend(logs_for(Uuid::new_v4(), &january(&[1, 2, 3])));
        logs.push(HabitLog {
            id: Uuid::new_v4(),
            habit_id: id,
            log_date: date(2024, 1, 3),
            completed: false,
        });
        let history = HabitHistory::from_logs(id, &logs, date(2024, 1, 5));
        assert_eq!(history.current_streak(), 2);
        assert_eq!(history.day_status(date(2024, 1, 3)), DayStatus::Missed);
    }

    #[test]
    fn test_completion_rate_month_to_date() {
        let id = Uuid::new_v4();
        let mut dates = january(&[1, 2, 3, 4, 5]);
        dates.push(date(2023, 12, 31));
        let logs = logs_for(id, &dates);
        let history = HabitHistory::from_logs(id, &logs, date(2024, 1, 10));
        assert_eq!(history.completion_rate(), 50);

        // 1 of 3 days -> 33.3%
        let logs = logs_for(id, &[date(2024, 2, 2)]);
        let history = HabitHistory::from_logs(id, &logs, date(2024, 2, 3));
        assert_eq!(history.completion_rate(), 33);
    }

    #[test]
    fn test_week_days_monday_start() {
        let days = week_days(date(2024, 1, 3));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2024, 1, 1));
        assert_eq!(days[6], date(2024, 1, 7));

        // Sunday belongs to the week that started the previous Monday
        let days = week_days(date(2024, 1, 7));
        assert_eq!(days[0], date(2024, 1, 1));
    }

    #[test]
    fn test_trailing_days_oldest_first() {
        let days = trailing_days(date(2024, 3, 1), EXTENDED_TRACK_DAYS);
        assert_eq!(days.len(), 21);
        assert_eq!(days[0], date(2024, 2, 10));
        assert_eq!(days[20], date(2024, 3, 1));
    }

    #[test]
    fn test_track_statuses() {
        let id = Uuid::new_v4();
        let logs = logs_for(id, &january(&[1, 3]));
        let history = HabitHistory::from_logs(id, &logs, date(2024, 1, 4));
        let track = history.track(&january(&[1, 2, 3, 4, 5]));
        assert_eq!(
            track,
            vec![
                DayStatus::Completed,
                DayStatus::Missed,
                DayStatus::Completed,
                DayStatus::Pending,
                DayStatus::Future,
            ]
        );
    }

    #[test]
    fn test_summarize_habits() {
        let gym = Habit {
            id: Uuid::new_v4(),
            name: "Gym".to_string(),
        };
        let water = Habit {
            id: Uuid::new_v4(),
            name: "Water Intake".to_string(),
        };
        let mut logs = logs_for(gym.id, &january(&[1, 2, 3]));
        logs.extend(logs_for(water.id, &january(&[3])));

        let summaries = summarize_habits(&[gym.clone(), water], &logs, date(2024, 1, 3));
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "Gym");
        assert_eq!(summaries[0].streak, 3);
        assert_eq!(summaries[0].completed_this_week, 3);
        assert_eq!(summaries[0].completion_rate, 100);
        assert_eq!(summaries[1].streak, 1);
        assert_eq!(summaries[1].last_break, Some(date(2024, 1, 2)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: the current streak never exceeds the longest streak
        #[test]
        fn prop_current_streak_bounded_by_longest(
            offsets in prop::collection::btree_set(0u64..60, 0..40)
        ) {
            let id = Uuid::new_v4();
            let today = date(2024, 6, 30);
            let dates: Vec<NaiveDate> = offsets
                .iter()
                .map(|o| today.checked_sub_days(Days::new(*o)).unwrap())
                .collect();
            let history = HabitHistory::from_logs(id, &logs_for(id, &dates), today);
            prop_assert!(history.current_streak() <= history.longest_streak());
            prop_assert!(history.completion_rate() <= 100);
        }
    }
}
