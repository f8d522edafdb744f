//! Read-only projections of a snapshot for rendering.
//!
//! Everything here is recomputed from the snapshot on every call.

use crate::types::{AppState, FilterMode, Task};
use std::fmt::Write as _;

/// Tasks shown under the current filter, in list order
#[must_use]
pub fn visible_tasks(state: &AppState) -> Vec<&Task> {
    state
        .tasks
        .iter()
        .filter(|task| state.filter.matches(task))
        .collect()
}

/// State of the "mark all as complete" checkbox
///
/// `None` when the list is empty and the checkbox is not shown.
#[must_use]
pub fn toggle_all_checked(state: &AppState) -> Option<bool> {
    (!state.tasks.is_empty()).then(|| state.tasks.all_completed())
}

/// Counts and labels shown under the list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footer {
    /// Tasks still to do
    pub items_left: usize,
    /// Completed tasks
    pub completed: usize,
    /// Highlighted filter
    pub selected: FilterMode,
}

impl Footer {
    /// Computes the footer for a snapshot
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        let completed = state.tasks.completed_count();
        Self {
            items_left: state.tasks.len() - completed,
            completed,
            selected: state.filter,
        }
    }

    /// The remaining-items counter
    #[must_use]
    pub fn items_left_label(&self) -> String {
        format!("{} items left", self.items_left)
    }

    /// Whether the clear-completed button is shown
    #[must_use]
    pub const fn show_clear_completed(&self) -> bool {
        self.completed > 0
    }

    /// Text of the clear-completed button
    #[must_use]
    pub fn clear_completed_label(&self) -> String {
        format!("Clear completed ({})", self.completed)
    }
}

/// Renders a snapshot as plain text
///
/// ```text
/// todos
/// [ ] Mark all as complete
///   [ ] #1 My first task
///   [x] #2 Buy milk (editing)
/// 1 items left | *All* Active Completed | Clear completed (1)
/// ```
#[must_use]
pub fn render(state: &AppState) -> String {
    let mut out = String::from("todos\n");

    if let Some(checked) = toggle_all_checked(state) {
        let _ = writeln!(out, "{} Mark all as complete", checkbox(checked));
    }

    for task in visible_tasks(state) {
        let editing = if state.ui.is_editing(task.id) { " (editing)" } else { "" };
        let _ = writeln!(out, "  {} #{} {}{editing}", checkbox(task.completed), task.id, task.title);
    }

    let footer = Footer::from_state(state);
    let filters: Vec<String> = [FilterMode::All, FilterMode::Active, FilterMode::Completed]
        .into_iter()
        .map(|mode| {
            if mode == footer.selected {
                format!("*{}*", mode.label())
            } else {
                mode.label().to_string()
            }
        })
        .collect();

    let _ = write!(out, "{} | {}", footer.items_left_label(), filters.join(" "));
    if footer.show_clear_completed() {
        let _ = write!(out, " | {}", footer.clear_completed_label());
    }
    out.push('\n');

    out
}

const fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use crate::types::{TaskId, TaskList};

    fn sample(filter: FilterMode) -> AppState {
        let tasks = TaskList::from_tasks([
            Task {
                id: TaskId::new(1),
                title: "A".to_string(),
                completed: false,
            },
            Task {
                id: TaskId::new(2),
                title: "B".to_string(),
                completed: true,
            },
        ])
        .unwrap();
        AppState {
            filter,
            ..AppState::with_tasks(tasks)
        }
    }

    fn visible_ids(state: &AppState) -> Vec<u64> {
        visible_tasks(state).iter().map(|t| t.id.get()).collect()
    }

    #[test]
    fn filters_project_in_order() {
        assert_eq!(visible_ids(&sample(FilterMode::All)), vec![1, 2]);
        assert_eq!(visible_ids(&sample(FilterMode::Active)), vec![1]);
        assert_eq!(visible_ids(&sample(FilterMode::Completed)), vec![2]);
    }

    #[test]
    fn projection_does_not_touch_state() {
        let state = sample(FilterMode::Completed);
        let before = state.clone();
        let _ = visible_tasks(&state);
        assert_eq!(state, before);
    }

    #[test]
    fn footer_counts() {
        let footer = Footer::from_state(&sample(FilterMode::Active));
        assert_eq!(footer.items_left, 1);
        assert_eq!(footer.completed, 1);
        assert_eq!(footer.selected, FilterMode::Active);
        assert_eq!(footer.items_left_label(), "1 items left");
        assert!(footer.show_clear_completed());
        assert_eq!(footer.clear_completed_label(), "Clear completed (1)");
    }

    #[test]
    fn toggle_all_reflects_completion() {
        assert_eq!(toggle_all_checked(&AppState::default()), None);
        assert_eq!(toggle_all_checked(&sample(FilterMode::All)), Some(false));

        let mut state = sample(FilterMode::All);
        state.tasks.set_all_completed(true);
        assert_eq!(toggle_all_checked(&state), Some(true));
    }

    #[test]
    fn render_marks_filter_and_editing() {
        let mut state = sample(FilterMode::All);
        state.ui.set_editing(TaskId::new(2), true);

        assert_eq!(
            render(&state),
            "todos\n\
             [ ] Mark all as complete\n  \
             [ ] #1 A\n  \
             [x] #2 B (editing)\n\
             1 items left | *All* Active Completed | Clear completed (1)\n"
        );
    }

    #[test]
    fn render_empty_list_hides_toggle_and_clear() {
        assert_eq!(render(&AppState::default()), "todos\n0 items left | *All* Active Completed\n");
    }
}
