//! Sprint scoring and aggregation.
//!
//! A sprint is a fixed date range with weighted daily goals. Logged efforts
//! turn into one score per day ([`engine::scoring`]); scores feed streaks,
//! averages, completion and trends ([`engine::aggregate`]). [`store::Store`]
//! owns the records and persists them through a [`store::Repository`].

pub mod cli;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod utils;

pub use error::PersistenceError;
pub use models::{DayData, Effort, Goal, Sprint, Streak, Trend};
pub use store::{MemoryRepository, Repository, Store};
