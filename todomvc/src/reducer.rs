//! Reducer logic for the task list.
//!
//! `TaskReducer` owns the six task actions; `FilterReducer` owns the
//! filter and only reacts to navigation. [`app_reducer`] combines them.
//!
//! Actions naming a missing task leave the state untouched and are logged.

use crate::error::TodoError;
use crate::types::{AppAction, AppState, FilterMode, Task, TaskId, TodoAction};
use std::sync::Arc;
use todomvc_core::{
    composition::{combine_reducers, scope_reducer, CombinedReducer},
    effect::Effect,
    environment::IdGenerator,
    reducer::Reducer,
    SmallVec,
};

/// Environment dependencies for the task reducers
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Allocates ids for new tasks
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the task list
#[derive(Clone, Debug)]
pub struct TaskReducer;

impl TaskReducer {
    /// Creates a new `TaskReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn add(state: &mut AppState, title: String, env: &TodoEnvironment) {
        // Checked before the id is drawn so rejected adds do not burn ids
        if title.is_empty() {
            tracing::warn!(error = %TodoError::EmptyTitle, "Ignoring add");
            return;
        }

        let id = TaskId::new(env.ids.next_id());
        match state.tasks.push(Task::new(id, title)) {
            Ok(()) => tracing::debug!(%id, "Task added"),
            Err(error) => tracing::warn!(%error, "Ignoring add"),
        }
    }

    fn edit(state: &mut AppState, id: TaskId, title: String) {
        match state.tasks.set_title(id, title) {
            Ok(()) => {
                state.ui.set_editing(id, false);
                tracing::debug!(%id, "Task edited");
            }
            Err(error) => tracing::warn!(%error, "Ignoring edit"),
        }
    }

    fn remove(state: &mut AppState, id: TaskId) {
        match state.tasks.remove(id) {
            Ok(_) => {
                state.ui.set_editing(id, false);
                tracing::debug!(%id, "Task removed");
            }
            Err(error) => tracing::warn!(%error, "Ignoring remove"),
        }
    }

    fn toggle(state: &mut AppState, id: TaskId, checked: bool) {
        match state.tasks.set_completed(id, checked) {
            Ok(()) => tracing::debug!(%id, checked, "Task toggled"),
            Err(error) => tracing::warn!(%error, "Ignoring toggle"),
        }
    }

    fn clear_completed(state: &mut AppState) {
        let removed = state.tasks.clear_completed();
        for id in &removed {
            state.ui.set_editing(*id, false);
        }
        tracing::debug!(removed = removed.len(), "Cleared completed tasks");
    }
}

impl Default for TaskReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TaskReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let AppAction::Todo(action) = action else {
            return SmallVec::new();
        };

        match action {
            TodoAction::Add { title } => Self::add(state, title, env),
            TodoAction::Edit { id, title } => Self::edit(state, id, title),
            TodoAction::Remove { id } => Self::remove(state, id),
            TodoAction::Toggle { id, checked } => Self::toggle(state, id, checked),
            TodoAction::ToggleAll { checked } => {
                state.tasks.set_all_completed(checked);
                tracing::debug!(checked, "All tasks toggled");
            }
            TodoAction::ClearCompleted => Self::clear_completed(state),
        }

        SmallVec::new()
    }
}

/// Reducer for the current filter
///
/// Navigation unconditionally overwrites the filter.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilterReducer;

impl Reducer for FilterReducer {
    type State = FilterMode;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        filter: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if let AppAction::Navigate(route) = action {
            *filter = route.filter();
            tracing::debug!(%route, "Filter changed");
        }
        SmallVec::new()
    }
}

/// The reducer the application store runs
pub type AppReducer = CombinedReducer<AppState, AppAction, TodoEnvironment>;

fn filter_of(state: &mut AppState) -> &mut FilterMode {
    &mut state.filter
}

/// Builds the application reducer: tasks first, then the filter
#[must_use]
pub fn app_reducer() -> AppReducer {
    combine_reducers(vec![
        Box::new(TaskReducer::new()),
        Box::new(scope_reducer(FilterReducer, filter_of)),
    ])
}
