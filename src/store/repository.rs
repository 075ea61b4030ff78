use crate::error::{PersistenceError, PersistenceResult};
use crate::models::{Effort, Sprint};

pub const SPRINTS_KEY: &str = "user_sprints";
pub const EFFORTS_KEY: &str = "user_efforts";

/// Load/save seam between the [`Store`](super::Store) and whatever keeps
/// the data. Saves overwrite the whole collection.
pub trait Repository {
    fn load_sprints(&self) -> PersistenceResult<Vec<Sprint>>;
    fn save_sprints(&mut self, sprints: &[Sprint]) -> PersistenceResult<()>;
    fn load_efforts(&self) -> PersistenceResult<Vec<Effort>>;
    fn save_efforts(&mut self, efforts: &[Effort]) -> PersistenceResult<()>;
}

/// Keeps everything in memory. `fail_saves` / `fail_loads` make every
/// corresponding call return an error.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    pub sprints: Vec<Sprint>,
    pub efforts: Vec<Effort>,
    pub fail_saves: bool,
    pub fail_loads: bool,
    pub save_count: usize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(sprints: Vec<Sprint>, efforts: Vec<Effort>) -> Self {
        Self {
            sprints,
            efforts,
            ..Self::default()
        }
    }

    fn check(&self, failing: bool, what: &str) -> PersistenceResult<()> {
        if failing {
            Err(PersistenceError::Unavailable(format!("{} disabled", what)))
        } else {
            Ok(())
        }
    }
}

impl Repository for MemoryRepository {
    fn load_sprints(&self) -> PersistenceResult<Vec<Sprint>> {
        self.check(self.fail_loads, "loads")?;
        Ok(self.sprints.clone())
    }

    fn save_sprints(&mut self, sprints: &[Sprint]) -> PersistenceResult<()> {
        self.check(self.fail_saves, "saves")?;
        self.sprints = sprints.to_vec();
        self.save_count += 1;
        Ok(())
    }

    fn load_efforts(&self) -> PersistenceResult<Vec<Effort>> {
        self.check(self.fail_loads, "loads")?;
        Ok(self.efforts.clone())
    }

    fn save_efforts(&mut self, efforts: &[Effort]) -> PersistenceResult<()> {
        self.check(self.fail_saves, "saves")?;
        self.efforts = efforts.to_vec();
        self.save_count += 1;
        Ok(())
    }
}
