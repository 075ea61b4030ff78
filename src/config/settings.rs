use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::{DEFAULT_STREAK_THRESHOLD, DEFAULT_TREND_PERIOD_DAYS};

fn default_current_age() -> u32 {
    30
}
fn default_target_age() -> u32 {
    80
}
fn default_years_to_view() -> u32 {
    1
}
fn default_streak_threshold() -> f64 {
    DEFAULT_STREAK_THRESHOLD
}
fn default_trend_period_days() -> u32 {
    DEFAULT_TREND_PERIOD_DAYS
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridView {
    #[default]
    Weeks,
    Months,
    Years,
}

impl GridView {
    /// Days shown by `grid` when no explicit range is given.
    pub fn default_days(&self, years_to_view: u32) -> u32 {
        match self {
            GridView::Weeks => 7 * 4,
            GridView::Months => 7 * 13,
            GridView::Years => 364u32.saturating_mul(years_to_view.max(1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_current_age")]
    pub current_age: u32,
    #[serde(default = "default_target_age")]
    pub target_age: u32,
    #[serde(default = "default_years_to_view")]
    pub years_to_view: u32,
    #[serde(default)]
    pub default_grid_view: GridView,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            current_age: default_current_age(),
            target_age: default_target_age(),
            years_to_view: default_years_to_view(),
            default_grid_view: GridView::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// A day extends a streak when its score is above this.
    #[serde(default = "default_streak_threshold")]
    pub streak_threshold: f64,
    #[serde(default = "default_trend_period_days")]
    pub trend_period_days: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            streak_threshold: default_streak_threshold(),
            trend_period_days: default_trend_period_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "lifegrid")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("lifegrid.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
