use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::dates::start_of_day;

/// Hours logged against one goal at one point in time. `goal_id` is a
/// lookup key only; resolve it through the owning sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effort {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub date: DateTime<Local>,
    pub hours: f64,
}

impl Effort {
    pub fn new(goal_id: Uuid, date: DateTime<Local>, hours: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            goal_id,
            date,
            hours,
        }
    }

    pub fn day(&self) -> NaiveDate {
        start_of_day(self.date)
    }
}
