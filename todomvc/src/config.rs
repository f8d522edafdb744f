//! Application configuration.

use crate::error::TodoError;
use crate::types::{AppState, FilterMode, Task, TaskId, TaskList};
use todomvc_runtime::StoreConfig;

/// Title of the task every fresh session starts with
pub const SEED_TITLE: &str = "My first task";

/// Startup configuration for [`TodoApp`](crate::TodoApp)
///
/// # Example
///
/// ```
/// use todomvc::{AppConfig, FilterMode};
///
/// let config = AppConfig::empty().with_filter(FilterMode::Active);
/// let state = config.initial_state().unwrap();
/// assert!(state.tasks.is_empty());
/// assert_eq!(config.next_id, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Tasks present at startup, in display order
    pub seed: Vec<Task>,
    /// First id handed out to an added task
    pub next_id: u64,
    /// Filter selected at startup
    pub filter: FilterMode,
    /// Store settings
    pub store: StoreConfig,
}

impl AppConfig {
    /// No seeded tasks; ids start at 1
    #[must_use]
    pub fn empty() -> Self {
        Self {
            seed: Vec::new(),
            next_id: 1,
            filter: FilterMode::All,
            store: StoreConfig::default(),
        }
    }

    /// Replace the seeded tasks
    ///
    /// Moves the id counter past the largest seeded id if it was not already.
    /// A seeded id of `u64::MAX` leaves no id to hand out, and
    /// [`AppConfig::initial_state`] reports it.
    #[must_use]
    pub fn with_seed(mut self, seed: Vec<Task>) -> Self {
        if let Some(max) = seed.iter().map(|task| task.id.get()).max() {
            self.next_id = self.next_id.max(max.saturating_add(1));
        }
        self.seed = seed;
        self
    }

    /// Set the first id handed out
    #[must_use]
    pub const fn with_next_id(mut self, next_id: u64) -> Self {
        self.next_id = next_id;
        self
    }

    /// Set the startup filter
    #[must_use]
    pub const fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Set the store settings
    #[must_use]
    pub fn with_store_config(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Builds the startup snapshot
    ///
    /// # Errors
    ///
    /// - [`TodoError::DuplicateId`] if two seeded tasks share an id
    /// - [`TodoError::IdCounterBehindSeed`] if `next_id` could collide with a seeded id
    pub fn initial_state(&self) -> Result<AppState, TodoError> {
        let tasks = TaskList::from_tasks(self.seed.iter().cloned())?;

        if let Some(max_seeded) = tasks.max_id() {
            if self.next_id <= max_seeded.get() {
                return Err(TodoError::IdCounterBehindSeed {
                    next_id: self.next_id,
                    max_seeded,
                });
            }
        }

        Ok(AppState {
            filter: self.filter,
            ..AppState::with_tasks(tasks)
        })
    }
}

impl Default for AppConfig {
    /// One active task, id 1, titled [`SEED_TITLE`]; the counter starts at 2
    fn default() -> Self {
        Self::empty().with_seed(vec![Task::new(TaskId::new(1), SEED_TITLE)])
    }
}
