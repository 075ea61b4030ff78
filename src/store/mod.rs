//! In-memory owner of sprints and efforts.
//!
//! Every query recomputes from the current collections. Every mutation
//! overwrites the affected collection in the [`Repository`]; failures are
//! logged and the in-memory state is kept.

pub mod repository;

use std::collections::HashMap;

use chrono::NaiveDate;
use log::{debug, error, warn};
use uuid::Uuid;

use crate::engine::{aggregate, scoring};
use crate::models::{
    DayData, Effort, Goal, GoalSummary, Sprint, SprintStatistics, Streak, Trend,
};
use crate::utils::dates::{date_range, days_between, inclusive_days, trailing_window};

pub use repository::{MemoryRepository, Repository};

pub const UNKNOWN_GOAL: &str = "Unknown goal";

/// Shortest id prefix accepted when looking records up by id.
const MIN_ID_PREFIX: usize = 4;

pub struct Store<R: Repository> {
    repo: R,
    sprints: Vec<Sprint>,
    efforts: Vec<Effort>,
}

impl<R: Repository> Store<R> {
    /// Load both collections. A collection that fails to load starts empty.
    pub fn open(repo: R) -> Self {
        let sprints = repo.load_sprints().unwrap_or_else(|e| {
            warn!("Could not load sprints, starting empty: {}", e);
            Vec::new()
        });
        let efforts = repo.load_efforts().unwrap_or_else(|e| {
            warn!("Could not load efforts, starting empty: {}", e);
            Vec::new()
        });
        debug!("Loaded {} sprints and {} efforts", sprints.len(), efforts.len());
        Self {
            repo,
            sprints,
            efforts,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    // ─── Queries ─────────────────────────────────────────────────────────────

    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    pub fn efforts(&self) -> &[Effort] {
        &self.efforts
    }

    pub fn sprint(&self, id: Uuid) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == id)
    }

    /// By full id, case-insensitive name, or unambiguous id prefix.
    pub fn find_sprint(&self, query: &str) -> Option<&Sprint> {
        let query = query.trim();
        if let Ok(id) = Uuid::parse_str(query) {
            return self.sprint(id);
        }
        let lowered = query.to_lowercase();
        if let Some(sprint) = self.sprints.iter().find(|s| s.name.to_lowercase() == lowered) {
            return Some(sprint);
        }
        unique_by_prefix(&self.sprints, &lowered, |s| s.id)
    }

    pub fn effort(&self, id: Uuid) -> Option<&Effort> {
        self.efforts.iter().find(|e| e.id == id)
    }

    /// By full id or unambiguous id prefix.
    pub fn find_effort(&self, query: &str) -> Option<&Effort> {
        let query = query.trim();
        if let Ok(id) = Uuid::parse_str(query) {
            return self.effort(id);
        }
        unique_by_prefix(&self.efforts, &query.to_lowercase(), |e| e.id)
    }

    pub fn efforts_for_date(&self, day: NaiveDate) -> Vec<&Effort> {
        self.efforts.iter().filter(|e| e.day() == day).collect()
    }

    /// Efforts inside the sprint's span that belong to one of its goals.
    pub fn efforts_for_sprint(&self, sprint: &Sprint) -> Vec<&Effort> {
        self.efforts
            .iter()
            .filter(|e| sprint.contains(e.day()) && sprint.has_goal(e.goal_id))
            .collect()
    }

    /// First sprint, in collection order, whose span contains `day`.
    pub fn sprint_for_date(&self, day: NaiveDate) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.contains(day))
    }

    pub fn goal_for_effort(&self, effort: &Effort) -> Option<(&Sprint, &Goal)> {
        self.sprints
            .iter()
            .find_map(|s| s.goal(effort.goal_id).map(|g| (s, g)))
    }

    pub fn goal_title(&self, goal_id: Uuid) -> &str {
        self.sprints
            .iter()
            .find_map(|s| s.goal(goal_id))
            .map(|g| g.title.as_str())
            .unwrap_or(UNKNOWN_GOAL)
    }

    /// One entry per day from `start` to `end`, scored by the first sprint
    /// covering the day.
    pub fn generate_day_data_for_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<DayData> {
        let mut per_sprint: HashMap<Uuid, Vec<DayData>> = HashMap::new();
        date_range(start, end)
            .map(|day| {
                let Some(sprint) = self.sprint_for_date(day) else {
                    return DayData::empty(day);
                };
                let days = per_sprint
                    .entry(sprint.id)
                    .or_insert_with(|| scoring::day_data(sprint, &self.efforts));
                let offset = days_between(sprint.start_date, day) as usize;
                days.get(offset).copied().unwrap_or_else(|| DayData::empty(day))
            })
            .collect()
    }

    /// First day of `start..=end` that any sprint could cover. Days before
    /// the earliest sprint never carry a score, so windows start no earlier.
    /// Without sprints the window shrinks to `end` alone.
    pub fn history_start(&self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        match self.sprints.iter().map(|s| s.start_date).min() {
            Some(earliest) => start.max(earliest).min(end),
            None => end,
        }
    }

    /// Day data of `start..=end`, skipping the scoreless days before the
    /// earliest sprint.
    fn covered_day_data(&self, start: NaiveDate, end: NaiveDate) -> Vec<DayData> {
        if end < start {
            return Vec::new();
        }
        self.generate_day_data_for_range(self.history_start(start, end), end)
    }

    /// Current streak counted back from `today`, and the best streak since
    /// the earliest sprint began.
    pub fn streak(&self, today: NaiveDate, threshold: f64) -> Streak {
        let Some(earliest) = self.sprints.iter().map(|s| s.start_date).min() else {
            return Streak::default();
        };
        let mut scores: Vec<Option<f64>> = self
            .generate_day_data_for_range(earliest, today)
            .into_iter()
            .map(|d| d.score)
            .collect();
        let best = aggregate::best_streak(&scores, threshold);
        scores.reverse();
        Streak {
            current: aggregate::current_streak(&scores, threshold),
            best,
        }
    }

    /// Last `period_days` against the `period_days` before them.
    pub fn trend(&self, today: NaiveDate, period_days: u32) -> Trend {
        if period_days == 0 {
            return Trend::Neutral;
        }
        let (second_start, _) = trailing_window(today, period_days);
        let Some(first_end) = second_start.pred_opt() else {
            return Trend::Neutral;
        };
        let (first_start, _) = trailing_window(first_end, period_days);
        aggregate::classify(
            aggregate::average_score(&self.covered_day_data(first_start, first_end)),
            aggregate::average_score(&self.covered_day_data(second_start, today)),
        )
    }

    pub fn average_for_period(&self, today: NaiveDate, days: u32) -> f64 {
        let (start, end) = trailing_window(today, days);
        aggregate::average_score(&self.covered_day_data(start, end))
    }

    /// Share of the `days`-long window ending at `today` that has a score.
    pub fn completion_rate(&self, today: NaiveDate, days: u32) -> f64 {
        let (start, end) = trailing_window(today, days);
        let scored = self
            .covered_day_data(start, end)
            .iter()
            .filter(|d| d.has_data())
            .count();
        scored as f64 / inclusive_days(start, end) as f64
    }

    pub fn sprint_statistics(&self, sprint: &Sprint, today: NaiveDate) -> SprintStatistics {
        SprintStatistics::compute(sprint, today)
    }

    pub fn goal_summaries(&self, sprint: &Sprint) -> Vec<GoalSummary> {
        let efforts = self.efforts_for_sprint(sprint);
        let days = sprint.days_count() as f64;
        sprint
            .goals
            .iter()
            .map(|goal| {
                let hours_logged: f64 = efforts
                    .iter()
                    .filter(|e| e.goal_id == goal.id)
                    .map(|e| e.hours)
                    .sum();
                let hours_targeted = goal.target_hours.max(0.0) * days;
                let completion = if hours_targeted > 0.0 {
                    (hours_logged / hours_targeted).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                GoalSummary {
                    goal_id: goal.id,
                    title: goal.title.clone(),
                    hours_logged,
                    hours_targeted,
                    completion,
                }
            })
            .collect()
    }

    // ─── Mutations ───────────────────────────────────────────────────────────

    pub fn add_sprint(&mut self, sprint: Sprint) -> Uuid {
        warn_if_overweight(&sprint);
        let id = sprint.id;
        self.sprints.push(sprint);
        self.persist_sprints();
        id
    }

    /// Replace the sprint with the same id. Efforts for goals the new
    /// version no longer has are deleted with them.
    pub fn update_sprint(&mut self, sprint: Sprint) -> bool {
        let Some(slot) = self.sprints.iter_mut().find(|s| s.id == sprint.id) else {
            return false;
        };
        warn_if_overweight(&sprint);
        let removed: Vec<Uuid> = slot
            .goals
            .iter()
            .filter(|g| !sprint.has_goal(g.id))
            .map(|g| g.id)
            .collect();
        *slot = sprint;
        self.persist_sprints();
        self.cascade_goals(&removed);
        true
    }

    /// Remove a sprint and every effort logged against its goals.
    pub fn delete_sprint(&mut self, id: Uuid) -> bool {
        let Some(index) = self.sprints.iter().position(|s| s.id == id) else {
            return false;
        };
        let sprint = self.sprints.remove(index);
        self.persist_sprints();
        let goal_ids: Vec<Uuid> = sprint.goals.iter().map(|g| g.id).collect();
        self.cascade_goals(&goal_ids);
        true
    }

    /// Efforts must reference a goal of some sprint; others are rejected.
    pub fn add_effort(&mut self, effort: Effort) -> bool {
        if self.goal_for_effort(&effort).is_none() {
            warn!("Rejecting effort {} for unknown goal {}", effort.id, effort.goal_id);
            return false;
        }
        self.efforts.push(effort);
        self.persist_efforts();
        true
    }

    pub fn update_effort(&mut self, effort: Effort) -> bool {
        if self.goal_for_effort(&effort).is_none() {
            warn!("Rejecting update of effort {} to unknown goal {}", effort.id, effort.goal_id);
            return false;
        }
        let Some(slot) = self.efforts.iter_mut().find(|e| e.id == effort.id) else {
            return false;
        };
        *slot = effort;
        self.persist_efforts();
        true
    }

    pub fn delete_effort(&mut self, id: Uuid) -> bool {
        let before = self.efforts.len();
        self.efforts.retain(|e| e.id != id);
        if self.efforts.len() == before {
            return false;
        }
        self.persist_efforts();
        true
    }

    fn cascade_goals(&mut self, goal_ids: &[Uuid]) {
        if goal_ids.is_empty() {
            return;
        }
        let before = self.efforts.len();
        self.efforts.retain(|e| !goal_ids.contains(&e.goal_id));
        let removed = before - self.efforts.len();
        if removed > 0 {
            debug!("Removed {} efforts for deleted goals", removed);
            self.persist_efforts();
        }
    }

    fn persist_sprints(&mut self) {
        match self.repo.save_sprints(&self.sprints) {
            Ok(()) => debug!("Saved {} sprints", self.sprints.len()),
            Err(e) => error!("Saving sprints failed: {}", e),
        }
    }

    fn persist_efforts(&mut self) {
        match self.repo.save_efforts(&self.efforts) {
            Ok(()) => debug!("Saved {} efforts", self.efforts.len()),
            Err(e) => error!("Saving efforts failed: {}", e),
        }
    }
}

fn warn_if_overweight(sprint: &Sprint) {
    if sprint.is_overweight() {
        warn!(
            "Goal weights of sprint '{}' add up to {:.0}%",
            sprint.name,
            sprint.total_weight() * 100.0
        );
    }
}

fn unique_by_prefix<'a, T>(items: &'a [T], prefix: &str, id: impl Fn(&T) -> Uuid) -> Option<&'a T> {
    if prefix.len() < MIN_ID_PREFIX {
        return None;
    }
    let mut matches = items.iter().filter(|item| id(*item).to_string().starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(item), None) => Some(item),
        _ => None,
    }
}
