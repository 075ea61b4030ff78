//! Day scores of a sprint.
//!
//! Every consumer of a day score goes through [`daily_scores`] (or
//! [`day_data`], which wraps it), so clamping happens in exactly one place:
//!
//! * hours are summed per goal per day before progress is taken, which caps
//!   a goal's share of a day at its `weight` no matter how many efforts
//!   were logged;
//! * the day total is clamped to `[0, 1]`, which only matters for sprints
//!   whose goal weights add up to more than 1.

use log::debug;

use crate::models::{DayData, Effort, Sprint};
use crate::utils::dates::days_between;

struct DayLedger {
    /// hours[day][goal index]
    hours: Vec<Vec<f64>>,
    logged: Vec<bool>,
}

fn ledger<'a, I>(sprint: &Sprint, efforts: I) -> DayLedger
where
    I: IntoIterator<Item = &'a Effort>,
{
    let days_count = sprint.days_count();
    let mut ledger = DayLedger {
        hours: vec![vec![0.0; sprint.goals.len()]; days_count],
        logged: vec![false; days_count],
    };

    for effort in efforts {
        let offset = days_between(sprint.start_date, effort.day());
        if offset < 0 || offset as usize >= days_count {
            continue;
        }
        let Some(goal_index) = sprint.goals.iter().position(|g| g.id == effort.goal_id) else {
            debug!(
                "Effort {} references goal {} outside sprint {}",
                effort.id, effort.goal_id, sprint.id
            );
            continue;
        };
        let day = offset as usize;
        if effort.hours.is_finite() && effort.hours > 0.0 {
            ledger.hours[day][goal_index] += effort.hours;
        }
        ledger.logged[day] = true;
    }
    ledger
}

fn score(sprint: &Sprint, hours: &[f64]) -> f64 {
    let total: f64 = sprint
        .goals
        .iter()
        .zip(hours)
        .map(|(goal, h)| goal.progress(*h) * goal.weight.max(0.0))
        .sum();
    total.clamp(0.0, 1.0)
}

/// One score in `[0, 1]` per sprint day, index 0 being `start_date`.
///
/// Efforts outside the sprint, or for goals the sprint doesn't have, are
/// skipped. Days without efforts score 0.
pub fn daily_scores<'a, I>(sprint: &Sprint, efforts: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Effort>,
{
    ledger(sprint, efforts)
        .hours
        .iter()
        .map(|day| score(sprint, day))
        .collect()
}

/// Like [`daily_scores`] but dated, and with `score: None` on days where
/// nothing was logged for any of the sprint's goals.
pub fn day_data<'a, I>(sprint: &Sprint, efforts: I) -> Vec<DayData>
where
    I: IntoIterator<Item = &'a Effort>,
{
    let ledger = ledger(sprint, efforts);
    sprint
        .days()
        .zip(ledger.hours.iter().zip(&ledger.logged))
        .map(|(date, (hours, logged))| {
            DayData::new(date, logged.then(|| score(sprint, hours)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goal;
    use chrono::{Local, NaiveDate, TimeZone};
    use uuid::Uuid;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn effort(goal_id: Uuid, day: u32, hours: f64) -> Effort {
        let at = Local.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap();
        Effort::new(goal_id, at, hours)
    }

    fn sprint_with(goals: Vec<Goal>, start: u32, end: u32) -> Sprint {
        Sprint::new("Test", d(start), d(end), goals)
    }

    #[test]
    fn one_score_per_day() {
        let sprint = sprint_with(vec![Goal::new("A", 1.0, 1.0)], 1, 10);
        assert_eq!(daily_scores(&sprint, &Vec::<Effort>::new()).len(), 10);
    }

    #[test]
    fn single_day_sprint() {
        let goal = Goal::new("A", 1.0, 1.0);
        let sprint = sprint_with(vec![goal.clone()], 5, 5);
        let scores = daily_scores(&sprint, &[effort(goal.id, 5, 1.0)]);
        assert_eq!(scores, vec![1.0]);
    }

    #[test]
    fn reversed_sprint_has_no_days() {
        let sprint = sprint_with(vec![Goal::new("A", 1.0, 1.0)], 10, 1);
        assert!(daily_scores(&sprint, &Vec::<Effort>::new()).is_empty());
        assert!(day_data(&sprint, &Vec::<Effort>::new()).is_empty());
    }

    #[test]
    fn partial_progress_is_weighted() {
        let goal = Goal::new("Read", 2.0, 0.5);
        let sprint = sprint_with(vec![goal.clone()], 1, 3);
        let scores = daily_scores(&sprint, &[effort(goal.id, 1, 1.0)]);
        assert_eq!(scores[0], 0.25);
    }

    #[test]
    fn over_target_effort_earns_at_most_weight() {
        let goal = Goal::new("Read", 2.0, 0.5);
        let sprint = sprint_with(vec![goal.clone()], 1, 3);
        let scores = daily_scores(&sprint, &[effort(goal.id, 1, 5.0)]);
        assert_eq!(scores[0], 0.5);
    }

    #[test]
    fn repeated_efforts_share_one_goal_cap() {
        let goal = Goal::new("Read", 2.0, 0.5);
        let sprint = sprint_with(vec![goal.clone()], 1, 3);
        let efforts = vec![
            effort(goal.id, 1, 1.0),
            effort(goal.id, 1, 0.5),
            effort(goal.id, 2, 2.0),
            effort(goal.id, 2, 2.0),
        ];
        let scores = daily_scores(&sprint, &efforts);
        assert_eq!(scores[0], 0.375);
        assert_eq!(scores[1], 0.5);
    }

    #[test]
    fn overweight_sprint_clamps_day_total() {
        let a = Goal::new("A", 1.0, 0.8);
        let b = Goal::new("B", 1.0, 0.8);
        let sprint = sprint_with(vec![a.clone(), b.clone()], 1, 1);
        let scores = daily_scores(&sprint, &[effort(a.id, 1, 1.0), effort(b.id, 1, 1.0)]);
        assert_eq!(scores, vec![1.0]);
    }

    #[test]
    fn efforts_outside_span_or_unknown_goal_ignored() {
        let goal = Goal::new("A", 1.0, 1.0);
        let sprint = sprint_with(vec![goal.clone()], 5, 7);
        let efforts = vec![
            effort(goal.id, 4, 1.0),
            effort(goal.id, 8, 1.0),
            effort(Uuid::new_v4(), 6, 1.0),
        ];
        assert_eq!(daily_scores(&sprint, &efforts), vec![0.0, 0.0, 0.0]);
        assert!(day_data(&sprint, &efforts).iter().all(|d| d.score.is_none()));
    }

    #[test]
    fn zero_target_goal_contributes_nothing() {
        let goal = Goal::new("A", 0.0, 1.0);
        let sprint = sprint_with(vec![goal.clone()], 1, 1);
        let scores = daily_scores(&sprint, &[effort(goal.id, 1, 3.0)]);
        assert_eq!(scores, vec![0.0]);
        assert!(scores[0].is_finite());
    }

    #[test]
    fn no_goals_scores_zero() {
        let sprint = sprint_with(vec![], 1, 3);
        assert_eq!(daily_scores(&sprint, &Vec::<Effort>::new()), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn week_scenario() {
        let goal = Goal::new("Ship", 1.0, 1.0);
        let sprint = sprint_with(vec![goal.clone()], 1, 7);
        let efforts: Vec<_> = (1..=3).map(|day| effort(goal.id, day, 1.0)).collect();

        let scores = sprint.daily_scores(&efforts);
        assert_eq!(scores, vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

        let days = day_data(&sprint, &efforts);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, d(1));
        assert_eq!(days[2].score, Some(1.0));
        assert_eq!(days[3].score, None);
    }

    #[test]
    fn zero_hour_effort_is_data_not_absence() {
        let goal = Goal::new("A", 1.0, 1.0);
        let sprint = sprint_with(vec![goal.clone()], 1, 2);
        let days = day_data(&sprint, &[effort(goal.id, 2, 0.0)]);
        assert_eq!(days[0].score, None);
        assert_eq!(days[1].score, Some(0.0));
    }
}
