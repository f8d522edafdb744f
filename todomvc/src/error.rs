//! Error types for the task list.

use crate::types::TaskId;
use thiserror::Error;
use todomvc_runtime::StoreError;

/// Errors surfaced by the task list, router, and application root
///
/// None of these are fatal. The reducer turns list errors into logged
/// no-ops, so dispatching an action never fails because of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No task in the list carries this id
    #[error("Task {0} not found")]
    TaskNotFound(TaskId),

    /// A task with this id is already in the list
    #[error("Task {0} already exists")]
    DuplicateId(TaskId),

    /// New tasks need a non-empty title
    #[error("Task title cannot be empty")]
    EmptyTitle,

    /// The fragment is not one of `/`, `/active`, `/completed`
    #[error("Unknown route: {0:?}")]
    UnknownRoute(String),

    /// The id counter would hand out an id already used by a seeded task
    #[error("Next id {next_id} must be greater than seeded id {max_seeded}")]
    IdCounterBehindSeed {
        /// First id the counter would allocate
        next_id: u64,
        /// Largest id among the seeded tasks
        max_seeded: TaskId,
    },

    /// The store refused the action
    #[error(transparent)]
    Store(#[from] StoreError),
}
