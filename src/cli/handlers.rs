use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate};

use crate::cli::args::{EffortCommands, SprintCommands};
use crate::config::AppConfig;
use crate::engine::aggregate;
use crate::models::{Effort, Goal, GoalSpec, LifeStatistics, Sprint, Trend};
use crate::store::{Repository, Store};
use crate::utils::dates::trailing_window;
use crate::utils::format::{format_hours, format_percent, progress_bar, score_glyph};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const TEAL: &str = "\x1b[38;2;64;176;166m";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Timestamp for an effort: now for today, midday for any other day.
fn effort_timestamp(date: Option<NaiveDate>) -> Result<DateTime<Local>> {
    match date {
        None => Ok(Local::now()),
        Some(day) if day == today() => Ok(Local::now()),
        Some(day) => day
            .and_hms_opt(12, 0, 0)
            .and_then(|t| t.and_local_timezone(Local).earliest())
            .ok_or_else(|| anyhow!("No local time for {}", day)),
    }
}

fn find_sprint<'a, R: Repository>(store: &'a Store<R>, query: &str) -> Result<&'a Sprint> {
    store
        .find_sprint(query)
        .ok_or_else(|| anyhow!("Sprint '{}' not found", query))
}

fn warn_weights(sprint: &Sprint) {
    if sprint.is_overweight() {
        println_colored!(
            AMBER,
            "  ! Goal weights add up to {:.0}%, day scores are capped at 100%",
            sprint.total_weight() * 100.0
        );
    }
}

// ─── Sprints ─────────────────────────────────────────────────────────────────

pub fn handle_sprint<R: Repository>(store: &mut Store<R>, action: &SprintCommands) -> Result<()> {
    match action {
        SprintCommands::New {
            name,
            start,
            end,
            goals,
        } => {
            if end < start {
                return Err(anyhow!("End date {} is before start date {}", end, start));
            }
            let goals: Vec<Goal> = goals.iter().cloned().map(GoalSpec::into_goal).collect();
            let sprint = Sprint::new(name.clone(), *start, *end, goals);
            warn_weights(&sprint);
            let days = sprint.days_count();
            store.add_sprint(sprint);
            println_colored!(GREEN, "  ✓ Created sprint {} ({} days)", name, days);
        }
        SprintCommands::List => {
            let today = today();
            println!();
            if store.sprints().is_empty() {
                println_colored!(DIM, "  No sprints yet. Create one with `lifegrid sprint new`.");
            }
            for sprint in store.sprints() {
                let stats = store.sprint_statistics(sprint, today);
                let color = if sprint.contains(today) { BOLD } else { DIM };
                println_colored!(
                    color,
                    "  {:<24} {} → {}  {}  {}",
                    sprint.name,
                    sprint.start_date,
                    sprint.end_date,
                    progress_bar(stats.percent_complete, 10),
                    stats.remaining_label
                );
            }
            println!();
        }
        SprintCommands::Show { sprint } => {
            let today = today();
            let sprint = match sprint {
                Some(query) => find_sprint(store, query)?,
                None => store
                    .sprint_for_date(today)
                    .ok_or_else(|| anyhow!("No sprint covers today"))?,
            };
            show_sprint(store, sprint, today);
        }
        SprintCommands::Edit {
            sprint,
            name,
            start,
            end,
        } => {
            let mut updated = find_sprint(store, sprint)?.clone();
            if let Some(name) = name {
                updated.name = name.clone();
            }
            if let Some(start) = start {
                updated.start_date = *start;
            }
            if let Some(end) = end {
                updated.end_date = *end;
            }
            if updated.end_date < updated.start_date {
                return Err(anyhow!(
                    "End date {} is before start date {}",
                    updated.end_date,
                    updated.start_date
                ));
            }
            let label = updated.name.clone();
            store.update_sprint(updated);
            println_colored!(GREEN, "  ✓ Updated sprint {}", label);
        }
        SprintCommands::Delete { sprint } => {
            let target = find_sprint(store, sprint)?;
            let (id, label) = (target.id, target.name.clone());
            store.delete_sprint(id);
            println_colored!(RED, "  ✗ Deleted sprint {} and its efforts", label);
        }
        SprintCommands::AddGoal {
            sprint,
            title,
            hours,
            weight,
        } => {
            let mut updated = find_sprint(store, sprint)?.clone();
            if updated.goal_by_title(title).is_some() {
                return Err(anyhow!("Sprint {} already has a goal '{}'", updated.name, title));
            }
            updated.goals.push(Goal::new(title.clone(), *hours, *weight));
            warn_weights(&updated);
            store.update_sprint(updated);
            println_colored!(GREEN, "  ✓ Added goal {}", title);
        }
        SprintCommands::RemoveGoal { sprint, title } => {
            let mut updated = find_sprint(store, sprint)?.clone();
            let goal_id = updated
                .goal_by_title(title)
                .map(|g| g.id)
                .ok_or_else(|| anyhow!("Goal '{}' not found in {}", title, updated.name))?;
            updated.goals.retain(|g| g.id != goal_id);
            store.update_sprint(updated);
            println_colored!(RED, "  ✗ Removed goal {} and its efforts", title);
        }
    }
    Ok(())
}

fn show_sprint<R: Repository>(store: &Store<R>, sprint: &Sprint, today: NaiveDate) {
    let stats = store.sprint_statistics(sprint, today);
    println!();
    println_colored!(TEAL, "  {} ({} → {})", sprint.name, sprint.start_date, sprint.end_date);
    println!();
    println_colored!(
        BOLD,
        "  {}  {}  {}",
        progress_bar(stats.percent_complete, 20),
        stats.percent_label,
        stats.days_label
    );
    println_colored!(
        DIM,
        "  Week {} of {}  ·  {}",
        (stats.elapsed_weeks + 1).min(stats.total_weeks.max(1)),
        stats.total_weeks,
        stats.remaining_label
    );
    println!();

    if sprint.goals.is_empty() {
        println_colored!(DIM, "  No goals. Add one with `lifegrid sprint add-goal`.");
    }
    for summary in store.goal_summaries(sprint) {
        let weight = sprint.goal(summary.goal_id).map(|g| g.weight).unwrap_or(0.0);
        println!(
            "  {:<24} {:>5}  {} / {}  {}",
            summary.title,
            format_percent(weight),
            format_hours(summary.hours_logged),
            format_hours(summary.hours_targeted),
            progress_bar(summary.completion, 10)
        );
    }

    let (start, end) = (sprint.start_date, sprint.end_date.min(today));
    if start <= end {
        let days = store.generate_day_data_for_range(start, end);
        println!();
        println!(
            "  Average: {}  ·  Logged on {} of days",
            format_percent(aggregate::average_score(&days)),
            format_percent(aggregate::completion_rate(&days))
        );
    }
    println!();
}

// ─── Efforts ─────────────────────────────────────────────────────────────────

pub fn handle_log<R: Repository>(
    store: &mut Store<R>,
    sprint_query: &str,
    goal_title: &str,
    hours: f64,
    date: Option<NaiveDate>,
) -> Result<()> {
    let sprint = find_sprint(store, sprint_query)?;
    let goal = sprint
        .goal_by_title(goal_title)
        .ok_or_else(|| anyhow!("Goal '{}' not found in {}", goal_title, sprint.name))?;
    let at = effort_timestamp(date)?;
    let day = at.date_naive();
    if !sprint.contains(day) {
        println_colored!(
            AMBER,
            "  ! {} is outside {} ({} → {}); it won't count towards its score",
            day,
            sprint.name,
            sprint.start_date,
            sprint.end_date
        );
    }
    let (goal_id, label) = (goal.id, goal.title.clone());
    store.add_effort(Effort::new(goal_id, at, hours));

    let logged: f64 = store
        .efforts_for_date(day)
        .iter()
        .filter(|e| e.goal_id == goal_id)
        .map(|e| e.hours)
        .sum();
    let score = store
        .generate_day_data_for_range(day, day)
        .first()
        .and_then(|d| d.score)
        .unwrap_or(0.0);
    println_colored!(GREEN, "{}", log_summary(hours, &label, day, logged, score));
    Ok(())
}

fn log_summary(hours: f64, goal: &str, day: NaiveDate, logged: f64, score: f64) -> String {
    format!(
        "  ✓ Logged {} on {} for {} — {} that day, day score {}",
        format_hours(hours),
        goal,
        day,
        format_hours(logged),
        format_percent(score)
    )
}

pub fn handle_effort<R: Repository>(store: &mut Store<R>, action: &EffortCommands) -> Result<()> {
    match action {
        EffortCommands::List { date } => {
            let day = (*date).unwrap_or_else(today);
            let efforts = store.efforts_for_date(day);
            println!();
            println_colored!(TEAL, "  Efforts on {}", day);
            println!();
            if efforts.is_empty() {
                println_colored!(DIM, "  Nothing logged");
            }
            for effort in &efforts {
                let id = effort.id.to_string();
                println!(
                    "  {}  {:<24} {:>6}  {}",
                    &id[..8],
                    store.goal_title(effort.goal_id),
                    format_hours(effort.hours),
                    effort.date.format("%H:%M")
                );
            }
            println!();
        }
        EffortCommands::Edit { id, hours, date } => {
            let mut effort = store
                .find_effort(id)
                .cloned()
                .ok_or_else(|| anyhow!("Effort '{}' not found", id))?;
            if let Some(hours) = hours {
                effort.hours = *hours;
            }
            if date.is_some() {
                effort.date = effort_timestamp(*date)?;
            }
            if !store.update_effort(effort) {
                return Err(anyhow!("Effort '{}' could not be updated", id));
            }
            println_colored!(GREEN, "  ✓ Updated effort {}", id);
        }
        EffortCommands::Delete { id } => {
            let target = store
                .find_effort(id)
                .map(|e| e.id)
                .ok_or_else(|| anyhow!("Effort '{}' not found", id))?;
            store.delete_effort(target);
            println_colored!(RED, "  ✗ Deleted effort {}", id);
        }
    }
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats<R: Repository>(
    store: &Store<R>,
    config: &AppConfig,
    days: Option<u32>,
) -> Result<()> {
    let today = today();
    let period = days.unwrap_or(config.scoring.trend_period_days).max(1);
    let threshold = config.scoring.streak_threshold;

    let streak = store.streak(today, threshold);
    let average = store.average_for_period(today, period);
    let completion = store.completion_rate(today, period);
    let trend = store.trend(today, period);
    let (start, end) = trailing_window(today, period);
    let start = store.history_start(start, end);
    let fit = aggregate::regression_over(&store.generate_day_data_for_range(start, end));

    println!();
    println_colored!(TEAL, "  Statistics (last {} days)", period);
    println!();
    println_colored!(
        BOLD,
        "  Streak:      {} days current  |  {} days best",
        streak.current,
        streak.best
    );
    println!("  Average:     {}", format_percent(average));
    println!("  Logged:      {} of days", format_percent(completion));
    let trend_color = match trend {
        Trend::Up => GREEN,
        Trend::Down => RED,
        Trend::Neutral => DIM,
    };
    println_colored!(
        trend_color,
        "  Trend:       {} {} (vs previous {} days)",
        trend.arrow(),
        trend,
        period
    );
    match fit {
        Some(fit) => println!("  Slope:       {:+.1} points/day", fit.slope * 100.0),
        None => println_colored!(DIM, "  Slope:       not enough data"),
    }

    if let Some(sprint) = store.sprint_for_date(today) {
        let stats = store.sprint_statistics(sprint, today);
        println!(
            "  Sprint:      {} — {} ({})",
            sprint.name, stats.days_label, stats.remaining_label
        );
    }
    println!();
    Ok(())
}

pub fn handle_grid<R: Repository>(
    store: &Store<R>,
    config: &AppConfig,
    days: Option<u32>,
) -> Result<()> {
    let today = today();
    let profile = &config.profile;
    let days = days
        .unwrap_or_else(|| profile.default_grid_view.default_days(profile.years_to_view))
        .max(1);
    let (start, end) = trailing_window(today, days);
    let start = store.history_start(start, end);
    let data = store.generate_day_data_for_range(start, end);

    println!();
    println_colored!(DIM, "  {} → {}  (● ≥75%, ◕ ≥50%, ◑ >0, ○ 0, · no data)", start, end);
    println!();
    // one row per week, oldest first
    for chunk in data.chunks(7) {
        let cells: Vec<&str> = chunk.iter().map(|d| score_glyph(d.score)).collect();
        let label = chunk.first().map(|d| d.date).unwrap_or(start);
        println!("  {}  {}", label.format("%b %d"), cells.join(" "));
    }
    println!();
    Ok(())
}

pub fn handle_life(config: &AppConfig) -> Result<()> {
    let profile = &config.profile;
    let life = LifeStatistics::compute(profile.current_age, profile.target_age);
    println!();
    if profile.name.is_empty() {
        println_colored!(TEAL, "  Life in weeks");
    } else {
        println_colored!(TEAL, "  {}'s life in weeks", profile.name);
    }
    println!();
    println_colored!(
        BOLD,
        "  {}  {}",
        progress_bar(life.percent_lived, 30),
        life.percent_label
    );
    println!("  {}  ·  {} weeks to go", life.weeks_label, life.weeks_remaining);
    println!();
    Ok(())
}

// ─── Profile / export ────────────────────────────────────────────────────────

pub fn handle_profile(
    config: &mut AppConfig,
    name: Option<String>,
    email: Option<String>,
    current_age: Option<u32>,
    target_age: Option<u32>,
) -> Result<()> {
    let profile = &mut config.profile;
    let changed = name.is_some() || email.is_some() || current_age.is_some() || target_age.is_some();
    if let Some(name) = name {
        profile.name = name;
    }
    if let Some(email) = email {
        profile.email = email;
    }
    if let Some(age) = current_age {
        profile.current_age = age;
    }
    if let Some(age) = target_age {
        profile.target_age = age;
    }
    if profile.target_age < profile.current_age {
        println_colored!(AMBER, "  ! Target age is below current age");
    }
    if changed {
        config.save().context("Saving profile")?;
        println_colored!(GREEN, "  ✓ Profile saved");
    }
    let profile = &config.profile;
    println!();
    println!("  Name:        {}", profile.name);
    println!("  Email:       {}", profile.email);
    println!("  Age:         {} → {}", profile.current_age, profile.target_age);
    println!();
    Ok(())
}

pub fn handle_export<R: Repository>(store: &Store<R>) -> Result<()> {
    let dump = serde_json::json!({
        "sprints": store.sprints(),
        "efforts": store.efforts(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&dump).context("Serializing export")?
    );
    Ok(())
}
