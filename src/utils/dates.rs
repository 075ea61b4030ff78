use chrono::{DateTime, Days, Local, NaiveDate};

/// Local calendar day of a timestamp. This is the key every day-level
/// comparison and grouping goes through.
pub fn start_of_day(t: DateTime<Local>) -> NaiveDate {
    t.date_naive()
}

/// Whole calendar days from `a` to `b`. Zero for the same day, negative
/// when `b` is before `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// Number of days in the inclusive span `start..=end` (never negative).
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (days_between(start, end) + 1).max(0)
}

/// Whole weeks from `a` to `b`.
pub fn weeks_between(a: NaiveDate, b: NaiveDate) -> i64 {
    days_between(a, b) / 7
}

/// Every calendar day from `start` to `end`, both included.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange {
        next: Some(start),
        end,
    }
}

#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|d| *d <= self.end)?;
        self.next = current.succ_opt();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map(|d| inclusive_days(d, self.end) as usize)
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

/// The `days`-long window ending at `today`, oldest first. Windows
/// reaching past the earliest representable date start there.
pub fn trailing_window(today: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let span = u64::from(days.max(1)) - 1;
    let start = today
        .checked_sub_days(Days::new(span))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}
