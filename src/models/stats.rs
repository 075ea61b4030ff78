use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Sprint;
use crate::utils::dates::{days_between, inclusive_days};
use crate::utils::format::format_percent;

pub const WEEKS_PER_YEAR: u32 = 52;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Neutral => "neutral",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Neutral => "→",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Progress snapshot of a sprint relative to `today`. Recomputed on
/// every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintStatistics {
    pub total_days: u32,
    pub elapsed_days: u32,
    pub remaining_days: u32,
    pub total_weeks: u32,
    pub elapsed_weeks: u32,
    pub remaining_weeks: u32,
    pub percent_complete: f64,
    pub days_label: String,
    pub percent_label: String,
    pub remaining_label: String,
}

impl SprintStatistics {
    pub fn compute(sprint: &Sprint, today: NaiveDate) -> Self {
        let total_days = inclusive_days(sprint.start_date, sprint.end_date) as u32;
        // today counts as elapsed once the sprint has started
        let elapsed_days = if today < sprint.start_date {
            0
        } else {
            (days_between(sprint.start_date, today) + 1).min(i64::from(total_days)) as u32
        };
        let remaining_days = total_days - elapsed_days;

        let total_weeks = total_days.div_ceil(7);
        let elapsed_weeks = elapsed_days / 7;
        let remaining_weeks = total_weeks - elapsed_weeks;

        let percent_complete = if total_days == 0 {
            0.0
        } else {
            f64::from(elapsed_days) / f64::from(total_days)
        };

        let remaining_label = if today < sprint.start_date {
            let until = days_between(today, sprint.start_date);
            format!("Starts in {} {}", until, plural(until, "day", "days"))
        } else if remaining_days == 0 {
            "Finished".to_string()
        } else {
            format!(
                "{} {} left",
                remaining_days,
                plural(i64::from(remaining_days), "day", "days")
            )
        };

        Self {
            total_days,
            elapsed_days,
            remaining_days,
            total_weeks,
            elapsed_weeks,
            remaining_weeks,
            percent_complete,
            days_label: format!("{} of {} days", elapsed_days, total_days),
            percent_label: format_percent(percent_complete),
            remaining_label,
        }
    }
}

/// Weeks of a life lived against a target age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeStatistics {
    pub total_weeks: u32,
    pub weeks_lived: u32,
    pub weeks_remaining: u32,
    pub percent_lived: f64,
    pub weeks_label: String,
    pub percent_label: String,
}

impl LifeStatistics {
    pub fn compute(current_age: u32, target_age: u32) -> Self {
        let total_weeks = target_age.saturating_mul(WEEKS_PER_YEAR);
        let weeks_lived = current_age.saturating_mul(WEEKS_PER_YEAR).min(total_weeks);
        let weeks_remaining = total_weeks - weeks_lived;
        let percent_lived = if total_weeks == 0 {
            0.0
        } else {
            f64::from(weeks_lived) / f64::from(total_weeks)
        };

        Self {
            total_weeks,
            weeks_lived,
            weeks_remaining,
            percent_lived,
            weeks_label: format!("{} of {} weeks", weeks_lived, total_weeks),
            percent_label: format_percent(percent_lived),
        }
    }
}

/// Hours logged on one goal across its sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub goal_id: Uuid,
    pub title: String,
    pub hours_logged: f64,
    pub hours_targeted: f64,
    pub completion: f64,
}

fn plural(n: i64, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn thirty_day_sprint() -> Sprint {
        Sprint::new("Focus", d(2026, 1, 1), d(2026, 1, 30), vec![])
    }

    #[test]
    fn sprint_statistics_mid_sprint() {
        let stats = SprintStatistics::compute(&thirty_day_sprint(), d(2026, 1, 12));
        assert_eq!(stats.total_days, 30);
        assert_eq!(stats.elapsed_days, 12);
        assert_eq!(stats.remaining_days, 18);
        assert_eq!(stats.total_weeks, 5);
        assert_eq!(stats.elapsed_weeks, 1);
        assert_eq!(stats.remaining_weeks, 4);
        assert_eq!(stats.days_label, "12 of 30 days");
        assert_eq!(stats.percent_label, "40%");
        assert_eq!(stats.remaining_label, "18 days left");
    }

    #[test]
    fn sprint_statistics_before_and_after() {
        let before = SprintStatistics::compute(&thirty_day_sprint(), d(2025, 12, 31));
        assert_eq!(before.elapsed_days, 0);
        assert_eq!(before.percent_complete, 0.0);
        assert_eq!(before.remaining_label, "Starts in 1 day");

        let after = SprintStatistics::compute(&thirty_day_sprint(), d(2026, 3, 1));
        assert_eq!(after.elapsed_days, 30);
        assert_eq!(after.remaining_days, 0);
        assert_eq!(after.percent_complete, 1.0);
        assert_eq!(after.remaining_label, "Finished");
    }

    #[test]
    fn life_statistics_counts_weeks() {
        let life = LifeStatistics::compute(20, 80);
        assert_eq!(life.total_weeks, 4160);
        assert_eq!(life.weeks_lived, 1040);
        assert_eq!(life.weeks_remaining, 3120);
        assert_eq!(life.weeks_label, "1040 of 4160 weeks");
        assert_eq!(life.percent_label, "25%");
    }

    #[test]
    fn life_statistics_past_target_age() {
        let life = LifeStatistics::compute(90, 80);
        assert_eq!(life.weeks_remaining, 0);
        assert_eq!(life.percent_lived, 1.0);

        let empty = LifeStatistics::compute(0, 0);
        assert_eq!(empty.percent_lived, 0.0);
    }
}
