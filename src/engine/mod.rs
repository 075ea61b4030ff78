pub mod aggregate;
pub mod scoring;

pub use aggregate::{
    average_score, best_streak, completion_rate, current_streak, linear_regression,
    regression_over, trend, DEFAULT_STREAK_THRESHOLD, DEFAULT_TREND_PERIOD_DAYS,
};
pub use scoring::{day_data, daily_scores};
