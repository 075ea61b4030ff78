//! Statistics over day-level scores.
//!
//! Everything here is total: empty or sparse input yields 0, `None` or
//! `Trend::Neutral`, never NaN or a panic.

use crate::models::{DayData, Regression, Trend};

pub const DEFAULT_STREAK_THRESHOLD: f64 = 0.3;
pub const DEFAULT_TREND_PERIOD_DAYS: u32 = 7;

/// Relative change between two periods needed before a trend is reported.
const TREND_BAND: f64 = 0.05;

fn qualifies(score: Option<f64>, threshold: f64) -> bool {
    matches!(score, Some(s) if s > threshold)
}

/// Mean of the days that have a score; 0 when none do.
pub fn average_score(days: &[DayData]) -> f64 {
    average(days.iter().map(|d| d.score))
}

fn average<I>(scores: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = scores
        .into_iter()
        .flatten()
        .fold((0.0, 0u32), |(sum, n), s| (sum + s, n + 1));
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

/// Consecutive qualifying days at the head of `scores`, which must be
/// ordered newest (today) first. A missing score ends the streak.
pub fn current_streak(scores: &[Option<f64>], threshold: f64) -> u32 {
    scores
        .iter()
        .take_while(|s| qualifies(**s, threshold))
        .count() as u32
}

/// Longest run of qualifying days anywhere in `scores` (oldest first).
pub fn best_streak(scores: &[Option<f64>], threshold: f64) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    for score in scores {
        if qualifies(*score, threshold) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

/// Compare the last `period_days` against the `period_days` before them.
/// `scores` is oldest first; only the trailing `2 * period_days` entries
/// are looked at.
pub fn trend(scores: &[Option<f64>], period_days: u32) -> Trend {
    let period = period_days as usize;
    if period == 0 || scores.len() < 2 {
        return Trend::Neutral;
    }
    let window = &scores[scores.len().saturating_sub(period * 2)..];
    let (first, second) = window.split_at(window.len() / 2);
    classify(average(first.iter().copied()), average(second.iter().copied()))
}

/// `second` against `first` with a ±5% band around no change.
pub fn classify(first: f64, second: f64) -> Trend {
    if second > first * (1.0 + TREND_BAND) {
        Trend::Up
    } else if second < first * (1.0 - TREND_BAND) {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

/// Share of `days` that have a score.
pub fn completion_rate(days: &[DayData]) -> f64 {
    if days.is_empty() {
        return 0.0;
    }
    let scored = days.iter().filter(|d| d.has_data()).count();
    scored as f64 / days.len() as f64
}

/// Ordinary least squares over `(x, y)` points. `None` for fewer than two
/// points or when every `x` is the same.
pub fn linear_regression(points: &[(f64, f64)]) -> Option<Regression> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), (x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
    );
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }
    Some(Regression { slope, intercept })
}

/// Regression of score against day offset, over the days that have one.
pub fn regression_over(days: &[DayData]) -> Option<Regression> {
    let points: Vec<(f64, f64)> = days
        .iter()
        .enumerate()
        .filter_map(|(i, d)| d.score.map(|s| (i as f64, s)))
        .collect();
    linear_regression(&points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn days(scores: &[Option<f64>]) -> Vec<DayData> {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| DayData::new(start + Duration::days(i as i64), *s))
            .collect()
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average_score(&[]), 0.0);
        assert_eq!(average_score(&days(&[None, None])), 0.0);
    }

    #[test]
    fn average_skips_missing_days() {
        let d = days(&[Some(1.0), None, Some(0.5), Some(0.0)]);
        assert_eq!(average_score(&d), 0.5);
    }

    #[test]
    fn current_streak_stops_at_low_day() {
        let scores = [Some(0.5), Some(0.5), Some(0.2), Some(0.5)];
        assert_eq!(current_streak(&scores, 0.3), 2);
    }

    #[test]
    fn current_streak_stops_at_missing_day() {
        let scores = [Some(0.9), None, Some(0.9)];
        assert_eq!(current_streak(&scores, 0.3), 1);
        assert_eq!(current_streak(&[], 0.3), 0);
    }

    #[test]
    fn threshold_must_be_exceeded() {
        assert_eq!(current_streak(&[Some(0.3)], 0.3), 0);
    }

    #[test]
    fn best_streak_finds_longest_run() {
        let scores = [
            Some(0.5),
            Some(0.5),
            None,
            Some(0.4),
            Some(0.4),
            Some(0.4),
            Some(0.1),
        ];
        assert_eq!(best_streak(&scores, 0.3), 3);
        assert_eq!(best_streak(&[], 0.3), 0);
    }

    #[test]
    fn trend_inside_band_is_neutral() {
        let scores = [Some(0.50), Some(0.50), Some(0.51), Some(0.52)];
        assert_eq!(trend(&scores, 2), Trend::Neutral);
    }

    #[test]
    fn trend_up_and_down() {
        assert_eq!(trend(&[Some(0.4), Some(0.4), Some(0.6), Some(0.6)], 2), Trend::Up);
        assert_eq!(trend(&[Some(0.6), Some(0.6), Some(0.4), Some(0.4)], 2), Trend::Down);
    }

    #[test]
    fn trend_band_edges() {
        assert_eq!(classify(1.0, 1.06), Trend::Up);
        assert_eq!(classify(1.0, 1.04), Trend::Neutral);
        assert_eq!(classify(1.0, 0.96), Trend::Neutral);
        assert_eq!(classify(1.0, 0.94), Trend::Down);
        assert_eq!(classify(0.0, 0.0), Trend::Neutral);
        assert_eq!(classify(0.0, 0.1), Trend::Up);
    }

    #[test]
    fn trend_uses_trailing_window() {
        // the leading 0.0 is older than the 2 * 2 day window
        let scores = [Some(0.0), Some(0.5), Some(0.5), Some(0.5), Some(0.5)];
        assert_eq!(trend(&scores, 2), Trend::Neutral);
    }

    #[test]
    fn trend_on_sparse_data_is_neutral() {
        assert_eq!(trend(&[], 7), Trend::Neutral);
        assert_eq!(trend(&[Some(1.0)], 7), Trend::Neutral);
        assert_eq!(trend(&[Some(1.0), Some(0.0)], 0), Trend::Neutral);
    }

    #[test]
    fn completion_rate_counts_scored_days() {
        let d = days(&[
            Some(1.0),
            Some(1.0),
            Some(1.0),
            None,
            None,
            None,
            None,
        ]);
        assert_eq!(completion_rate(&d), 3.0 / 7.0);
        assert_eq!(completion_rate(&[]), 0.0);
    }

    #[test]
    fn regression_on_a_line() {
        let fit = linear_regression(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.at(3.0) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn regression_guards_degenerate_input() {
        assert_eq!(linear_regression(&[]), None);
        assert_eq!(linear_regression(&[(1.0, 1.0)]), None);
        assert_eq!(linear_regression(&[(2.0, 1.0), (2.0, 3.0)]), None);
    }

    #[test]
    fn regression_over_skips_missing_days() {
        let d = days(&[Some(0.0), None, Some(0.5), None, Some(1.0)]);
        let fit = regression_over(&d).unwrap();
        assert!((fit.slope - 0.25).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
    }
}
