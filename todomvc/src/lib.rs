//! TodoMVC task list built on a reducer store.
//!
//! A list of tasks with add, edit, remove, toggle, toggle-all, and
//! clear-completed, plus three routes that pick which tasks are shown.
//! It demonstrates:
//!
//! - Reducer-owned state with one handler per action
//! - Id allocation injected through the environment
//! - Reducer composition (task list + filter)
//! - Snapshot subscriptions for re-rendering
//! - A presentation-only field written outside the action flow
//! - Testing with `ReducerTest`
//!
//! # Quick Start
//!
//! ```no_run
//! use todomvc::{AppConfig, TaskId, TodoApp, view};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = TodoApp::new(AppConfig::default())?;
//! let mut changes = app.subscribe();
//!
//! app.submit_new_task("Buy milk").await?;
//! app.toggle(TaskId::new(1), true).await?;
//! app.navigate("#/active").await?;
//!
//! changes.changed().await?;
//! println!("{}", view::render(&changes.borrow_and_update()));
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod reducer;
pub mod router;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use app::{TodoApp, TodoStore};
pub use config::AppConfig;
pub use error::TodoError;
pub use reducer::{app_reducer, AppReducer, FilterReducer, TaskReducer, TodoEnvironment};
pub use router::Route;
pub use types::{AppAction, AppState, FilterMode, Task, TaskId, TaskList, TodoAction, UiState};
