use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::models::goal::{parse_hours, parse_weight, GoalSpec};
use crate::utils::dates::parse_date;

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn hours_arg(s: &str) -> Result<f64, String> {
    parse_hours(s).map_err(|e| e.to_string())
}

fn weight_arg(s: &str) -> Result<f64, String> {
    parse_weight(s).map_err(|e| e.to_string())
}

fn goal_arg(s: &str) -> Result<GoalSpec, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "lifegrid", version, author, about = "Sprints of weighted daily goals, scored day by day")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sprint management
    Sprint {
        #[command(subcommand)]
        action: SprintCommands,
    },
    /// Log hours against a sprint goal
    Log {
        /// Sprint name or id
        sprint: String,
        /// Goal title
        goal: String,
        /// Hours spent
        #[arg(value_parser = hours_arg)]
        hours: f64,
        /// Day the work happened (default: today)
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    /// Logged effort management
    Effort {
        #[command(subcommand)]
        action: EffortCommands,
    },
    /// Show streak, averages, completion and trend
    Stats {
        /// Window size in days (default: trend period from config)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Print a heatmap of recent day scores
    Grid {
        /// Number of days to show, ending today
        #[arg(long)]
        days: Option<u32>,
    },
    /// Show weeks lived against the target age
    Life,
    /// Update profile preferences
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        current_age: Option<u32>,
        #[arg(long)]
        target_age: Option<u32>,
    },
    /// Dump sprints and efforts as JSON to stdout
    Export,
}

#[derive(Subcommand, Debug)]
pub enum SprintCommands {
    /// Create a sprint
    New {
        name: String,
        /// First day (YYYY-MM-DD)
        #[arg(long, value_parser = date_arg)]
        start: NaiveDate,
        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = date_arg)]
        end: NaiveDate,
        /// Goal as Title:hours:weight, repeatable
        #[arg(long = "goal", value_parser = goal_arg)]
        goals: Vec<GoalSpec>,
    },
    /// List all sprints
    List,
    /// Show a sprint's progress and goals
    Show {
        /// Sprint name or id (default: the sprint covering today)
        sprint: Option<String>,
    },
    /// Rename a sprint or move its dates
    Edit {
        sprint: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = date_arg)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = date_arg)]
        end: Option<NaiveDate>,
    },
    /// Delete a sprint and its logged efforts
    Delete { sprint: String },
    /// Add a goal to a sprint
    AddGoal {
        sprint: String,
        title: String,
        /// Daily target in hours
        #[arg(long, value_parser = hours_arg)]
        hours: f64,
        /// Share of the day's score, 0-1 or a percentage
        #[arg(long, value_parser = weight_arg)]
        weight: f64,
    },
    /// Remove a goal and the efforts logged against it
    RemoveGoal { sprint: String, title: String },
}

#[derive(Subcommand, Debug)]
pub enum EffortCommands {
    /// List efforts for a day
    List {
        /// Day (default: today)
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    /// Change the hours or day of an effort
    Edit {
        /// Effort id or id prefix
        id: String,
        #[arg(long, value_parser = hours_arg)]
        hours: Option<f64>,
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    /// Delete an effort
    Delete {
        /// Effort id or id prefix
        id: String,
    },
}
