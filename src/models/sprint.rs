use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::scoring;
use crate::models::{Effort, Goal};
use crate::utils::dates::{date_range, inclusive_days, DateRange};

/// Goal weights may add up to a little over 1.0 through float noise
/// before a sprint counts as overweight.
const WEIGHT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Sprint {
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        goals: Vec<Goal>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            end_date,
            goals,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn days_count(&self) -> usize {
        inclusive_days(self.start_date, self.end_date) as usize
    }

    pub fn days(&self) -> DateRange {
        date_range(self.start_date, self.end_date)
    }

    pub fn goal(&self, id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn goal_by_title(&self, title: &str) -> Option<&Goal> {
        self.goals
            .iter()
            .find(|g| g.title.to_lowercase() == title.to_lowercase())
    }

    pub fn has_goal(&self, id: Uuid) -> bool {
        self.goal(id).is_some()
    }

    pub fn total_weight(&self) -> f64 {
        self.goals.iter().map(|g| g.weight).sum()
    }

    pub fn is_overweight(&self) -> bool {
        self.total_weight() > 1.0 + WEIGHT_EPSILON
    }

    /// One score per day of the sprint, see [`scoring::daily_scores`].
    pub fn daily_scores<'a, I>(&self, efforts: I) -> Vec<f64>
    where
        I: IntoIterator<Item = &'a Effort>,
    {
        scoring::daily_scores(self, efforts)
    }
}
