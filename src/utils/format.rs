/// Format hours as a decimal string, trimming trailing zeros
pub fn format_hours(hours: f64) -> String {
    if hours == hours.floor() {
        format!("{}h", hours as i64)
    } else {
        format!("{:.1}h", hours)
    }
}

/// Format a ratio in `[0,1]` as a whole percentage
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", (ratio * 100.0).clamp(0.0, 100.0))
}

/// Create a simple ASCII progress bar
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Heatmap cell for a day score. `None` is "no data", distinct from zero.
pub fn score_glyph(score: Option<f64>) -> &'static str {
    match score {
        None => "·",
        Some(s) if s >= 0.75 => "●",
        Some(s) if s >= 0.5 => "◕",
        Some(s) if s > 0.0 => "◑",
        Some(_) => "○",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_trim_whole_numbers() {
        assert_eq!(format_hours(2.0), "2h");
        assert_eq!(format_hours(1.5), "1.5h");
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(format_percent(0.4), "40%");
        assert_eq!(format_percent(1.7), "100%");
    }

    #[test]
    fn progress_bar_handles_bad_ratio() {
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(f64::NAN, 3), "░░░");
    }

    #[test]
    fn glyph_separates_zero_from_missing() {
        assert_ne!(score_glyph(None), score_glyph(Some(0.0)));
        assert_eq!(score_glyph(Some(1.0)), "●");
    }
}
