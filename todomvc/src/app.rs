//! The application's composition root.
//!
//! `TodoApp` builds the store from an [`AppConfig`] and exposes what the
//! view layer needs: one method per user intent, snapshot reads, and the
//! change subscriptions.

use crate::config::AppConfig;
use crate::error::TodoError;
use crate::reducer::{app_reducer, AppReducer, TodoEnvironment};
use crate::router::Route;
use crate::types::{AppAction, AppState, TaskId, TodoAction};
use std::sync::Arc;
use todomvc_core::environment::SequentialIdGenerator;
use todomvc_runtime::Store;
use tokio::sync::{broadcast, watch};

/// The store type the application runs on
pub type TodoStore = Store<AppState, AppAction, TodoEnvironment, AppReducer>;

/// A running task list
///
/// Cloning is cheap and every clone drives the same store.
#[derive(Clone, Debug)]
pub struct TodoApp {
    store: TodoStore,
}

impl TodoApp {
    /// Builds the app from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured seed is inconsistent; see
    /// [`AppConfig::initial_state`].
    pub fn new(config: AppConfig) -> Result<Self, TodoError> {
        let initial = config.initial_state()?;
        let env = TodoEnvironment::new(Arc::new(SequentialIdGenerator::starting_at(config.next_id)));

        tracing::debug!(tasks = initial.tasks.len(), next_id = config.next_id, "Starting task list");
        let store = Store::with_config(initial, app_reducer(), env, config.store);

        Ok(Self { store })
    }

    /// Adds a task from the new-task input
    ///
    /// Empty input is refused here and never reaches the store.
    ///
    /// # Errors
    ///
    /// - [`TodoError::EmptyTitle`] for empty input
    /// - [`TodoError::Store`] if the store is shutting down
    pub async fn submit_new_task(&self, title: impl Into<String>) -> Result<(), TodoError> {
        let title = title.into();
        if title.is_empty() {
            return Err(TodoError::EmptyTitle);
        }
        self.dispatch(TodoAction::Add { title }).await
    }

    /// Commits an edit; the title may be empty
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the store is shutting down.
    pub async fn commit_edit(&self, id: TaskId, title: impl Into<String>) -> Result<(), TodoError> {
        self.dispatch(TodoAction::Edit {
            id,
            title: title.into(),
        })
        .await
    }

    /// Deletes a task
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the store is shutting down.
    pub async fn remove(&self, id: TaskId) -> Result<(), TodoError> {
        self.dispatch(TodoAction::Remove { id }).await
    }

    /// Checks or unchecks one task
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the store is shutting down.
    pub async fn toggle(&self, id: TaskId, checked: bool) -> Result<(), TodoError> {
        self.dispatch(TodoAction::Toggle { id, checked }).await
    }

    /// Checks or unchecks every task
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the store is shutting down.
    pub async fn toggle_all(&self, checked: bool) -> Result<(), TodoError> {
        self.dispatch(TodoAction::ToggleAll { checked }).await
    }

    /// Deletes every completed task
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the store is shutting down.
    pub async fn clear_completed(&self) -> Result<(), TodoError> {
        self.dispatch(TodoAction::ClearCompleted).await
    }

    /// Follows a URL fragment change
    ///
    /// # Errors
    ///
    /// - [`TodoError::UnknownRoute`] if the fragment is not a known route; the filter is unchanged
    /// - [`TodoError::Store`] if the store is shutting down
    pub async fn navigate(&self, fragment: &str) -> Result<Route, TodoError> {
        let route = Route::parse(fragment)?;
        self.store.send(AppAction::Navigate(route)).await?;
        Ok(route)
    }

    /// Puts a task's row into or out of edit mode
    ///
    /// This is a presentation-only write and is not dispatched as an
    /// action. It can reach [`AppState::ui`] and nothing else. Returns
    /// whether the flag changed; ids not in the list are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the store is shutting down.
    pub async fn set_editing(&self, id: TaskId, editing: bool) -> Result<bool, TodoError> {
        let changed = self
            .store
            .mutate_transient(|ui| {
                ui.set_editing(id, editing);
            })
            .await?;
        Ok(changed)
    }

    /// A copy of the current state
    pub async fn snapshot(&self) -> AppState {
        self.store.state(Clone::clone).await
    }

    /// Change notifications carrying the latest snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.store.subscribe()
    }

    /// Every dispatched action
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<AppAction> {
        self.store.subscribe_actions()
    }

    /// Ends the session; later calls fail with [`TodoError::Store`]
    pub fn shutdown(&self) {
        self.store.shutdown();
    }

    async fn dispatch(&self, action: TodoAction) -> Result<(), TodoError> {
        self.store.send(action.into()).await?;
        Ok(())
    }
}
