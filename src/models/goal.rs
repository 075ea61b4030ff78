use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring daily target. `weight` is the share of a day's score the
/// goal can earn when its `target_hours` are met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub target_hours: f64,
    pub weight: f64,
}

impl Goal {
    pub fn new(title: impl Into<String>, target_hours: f64, weight: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            target_hours,
            weight,
        }
    }

    /// Fraction of the daily target met by `hours`, capped at 1.
    /// A goal without a positive target never makes progress.
    pub fn progress(&self, hours: f64) -> f64 {
        if self.target_hours <= 0.0 || !hours.is_finite() {
            return 0.0;
        }
        (hours / self.target_hours).clamp(0.0, 1.0)
    }
}

/// `Title:hours:weight`, as typed on the command line. Weight may be
/// given as a fraction (`0.5`) or a percentage (`50%`).
#[derive(Debug, Clone, PartialEq)]
pub struct GoalSpec {
    pub title: String,
    pub target_hours: f64,
    pub weight: f64,
}

impl GoalSpec {
    pub fn into_goal(self) -> Goal {
        Goal::new(self.title, self.target_hours, self.weight)
    }
}

pub fn parse_weight(s: &str) -> anyhow::Result<f64> {
    let s = s.trim();
    let weight = match s.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>()? / 100.0,
        None => s.parse::<f64>()?,
    };
    if !(0.0..=1.0).contains(&weight) {
        anyhow::bail!("Weight must be between 0 and 1 (or 0% and 100%), got {}", s);
    }
    Ok(weight)
}

pub fn parse_hours(s: &str) -> anyhow::Result<f64> {
    let hours: f64 = s.trim().parse()?;
    if !hours.is_finite() || hours < 0.0 {
        anyhow::bail!("Hours must be a non-negative number, got {}", s);
    }
    Ok(hours)
}

impl std::str::FromStr for GoalSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ':');
        let (weight, hours, title) = match (parts.next(), parts.next(), parts.next()) {
            (Some(w), Some(h), Some(t)) if !t.trim().is_empty() => (w, h, t),
            _ => return Err(anyhow::anyhow!("Expected Title:hours:weight, got '{}'", s)),
        };
        Ok(GoalSpec {
            title: title.trim().to_string(),
            target_hours: parse_hours(hours)?,
            weight: parse_weight(weight)?,
        })
    }
}
