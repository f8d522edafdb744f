//! Domain types for the task list.
//!
//! The reducer-owned data (`TaskList`, `FilterMode`) is kept apart from the
//! presentation-only `UiState`, which the view may write without going
//! through an action.

use crate::error::TodoError;
use crate::router::Route;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use todomvc_runtime::TransientState;

/// Unique identifier for a task
///
/// Allocated once from a monotonic counter; never renumbered or reused,
/// even after the task is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from a raw value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Title of the task
    pub title: String,
    /// Whether the task is completed
    pub completed: bool,
}

impl Task {
    /// Creates a new, not yet completed task
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Ordered list of tasks
///
/// Insertion order is display order. Ids are unique at all times; every
/// mutator that could break that refuses with [`TodoError::DuplicateId`].
/// Lookups are a linear scan, which is plenty at the sizes a person types in.
/// Deserialization goes through [`TaskList::from_tasks`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Task>", into = "Vec<Task>")]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Builds a list from tasks in display order
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::DuplicateId`] for the first repeated id.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Result<Self, TodoError> {
        let mut list = Self::new();
        for task in tasks {
            list.push(task)?;
        }
        Ok(list)
    }

    /// Number of tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list has no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Index of the task with this id
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Returns a task by id
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    /// Largest id in the list
    #[must_use]
    pub fn max_id(&self) -> Option<TaskId> {
        self.tasks.iter().map(|task| task.id).max()
    }

    /// Appends a task to the end of the list
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::DuplicateId`] if the id is already present.
    pub fn push(&mut self, task: Task) -> Result<(), TodoError> {
        if self.contains(task.id) {
            return Err(TodoError::DuplicateId(task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Replaces a task's title; empty titles are accepted
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::TaskNotFound`] if no task has this id.
    pub fn set_title(&mut self, id: TaskId, title: String) -> Result<(), TodoError> {
        self.get_mut(id)?.title = title;
        Ok(())
    }

    /// Sets a task's completion flag
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::TaskNotFound`] if no task has this id.
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> Result<(), TodoError> {
        self.get_mut(id)?.completed = completed;
        Ok(())
    }

    /// Removes a task, keeping the order of the rest
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::TaskNotFound`] if no task has this id.
    pub fn remove(&mut self, id: TaskId) -> Result<Task, TodoError> {
        let index = self.position(id).ok_or(TodoError::TaskNotFound(id))?;
        Ok(self.tasks.remove(index))
    }

    /// Sets the completion flag on every task
    pub fn set_all_completed(&mut self, completed: bool) {
        for task in &mut self.tasks {
            task.completed = completed;
        }
    }

    /// Removes every completed task and returns their ids
    pub fn clear_completed(&mut self) -> Vec<TaskId> {
        let mut removed = Vec::new();
        self.tasks.retain(|task| {
            if task.completed {
                removed.push(task.id);
            }
            !task.completed
        });
        removed
    }

    /// Number of tasks still to do
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    /// Number of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Whether no task is left to do (true for an empty list)
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.tasks.iter().all(|task| task.completed)
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task, TodoError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TodoError::TaskNotFound(id))
    }
}

impl TryFrom<Vec<Task>> for TaskList {
    type Error = TodoError;

    fn try_from(tasks: Vec<Task>) -> Result<Self, Self::Error> {
        Self::from_tasks(tasks)
    }
}

impl From<TaskList> for Vec<Task> {
    fn from(list: TaskList) -> Self {
        list.tasks
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Which tasks the list shows
///
/// A pure projection; it never changes stored tasks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every task
    #[default]
    All,
    /// Tasks not yet completed
    Active,
    /// Completed tasks
    Completed,
}

impl FilterMode {
    /// Whether a task is shown under this filter
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Label shown in the filter bar
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

/// Presentation-only state
///
/// Written by the view directly through the store's transient write; no
/// action is ever dispatched for it. The reducer only prunes entries for
/// tasks it removes and clears the flag when an edit is committed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    /// Tasks whose row is currently in edit mode
    pub editing: BTreeSet<TaskId>,
}

impl UiState {
    /// Whether the task's row is in edit mode
    #[must_use]
    pub fn is_editing(&self, id: TaskId) -> bool {
        self.editing.contains(&id)
    }

    /// Sets the edit-mode flag; returns whether it changed
    pub fn set_editing(&mut self, id: TaskId, editing: bool) -> bool {
        if editing {
            self.editing.insert(id)
        } else {
            self.editing.remove(&id)
        }
    }
}

/// Complete application state
///
/// A value of this type is a snapshot: the store publishes a fresh clone of
/// it after every change. Edit flags for tasks that are not in the list are
/// dropped on deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAppState")]
pub struct AppState {
    /// The tasks, in display order
    pub tasks: TaskList,
    /// Current filter
    pub filter: FilterMode,
    /// Presentation-only fields
    pub ui: UiState,
}

impl AppState {
    /// Creates a state holding `tasks` with the `All` filter
    #[must_use]
    pub fn with_tasks(tasks: TaskList) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// Drops edit flags for ids that are not in the task list
    pub fn prune_editing(&mut self) {
        let tasks = &self.tasks;
        self.ui.editing.retain(|id| tasks.contains(*id));
    }
}

impl TransientState for AppState {
    type Transient = UiState;

    fn transient_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    fn settle_transient(&mut self) {
        self.prune_editing();
    }
}

#[derive(Deserialize)]
struct StoredAppState {
    tasks: TaskList,
    #[serde(default)]
    filter: FilterMode,
    #[serde(default)]
    ui: UiState,
}

impl From<StoredAppState> for AppState {
    fn from(stored: StoredAppState) -> Self {
        let mut state = Self {
            tasks: stored.tasks,
            filter: stored.filter,
            ui: stored.ui,
        };
        state.prune_editing();
        state
    }
}

/// The six task-list actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TodoAction {
    /// Append a new task
    Add {
        /// Title of the task; must be non-empty
        title: String,
    },

    /// Replace a task's title and leave edit mode
    Edit {
        /// Task to edit
        id: TaskId,
        /// New title; may be empty
        title: String,
    },

    /// Delete a task
    Remove {
        /// Task to delete
        id: TaskId,
    },

    /// Set one task's completion flag
    Toggle {
        /// Task to update
        id: TaskId,
        /// New completion flag
        checked: bool,
    },

    /// Set every task's completion flag
    ToggleAll {
        /// New completion flag
        checked: bool,
    },

    /// Delete every completed task
    ClearCompleted,
}

/// Everything the store accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppAction {
    /// A task-list action
    Todo(TodoAction),
    /// The URL fragment changed
    Navigate(Route),
}

impl From<TodoAction> for AppAction {
    fn from(action: TodoAction) -> Self {
        Self::Todo(action)
    }
}

impl From<Route> for AppAction {
    fn from(route: Route) -> Self {
        Self::Navigate(route)
    }
}
