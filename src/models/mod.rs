pub mod day;
pub mod effort;
pub mod goal;
pub mod sprint;
pub mod stats;

pub use day::DayData;
pub use effort::Effort;
pub use goal::{Goal, GoalSpec};
pub use sprint::Sprint;
pub use stats::{GoalSummary, LifeStatistics, Regression, SprintStatistics, Streak, Trend};
