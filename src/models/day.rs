use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Score of one calendar day. `None` means no sprint covered the day or
/// nothing was logged on it, which is not the same as a logged zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayData {
    pub date: NaiveDate,
    pub score: Option<f64>,
}

impl DayData {
    pub fn new(date: NaiveDate, score: Option<f64>) -> Self {
        Self { date, score }
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self { date, score: None }
    }

    pub fn has_data(&self) -> bool {
        self.score.is_some()
    }
}
