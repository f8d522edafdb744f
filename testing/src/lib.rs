//! # TodoMVC Testing
//!
//! Testing utilities and helpers for the TodoMVC reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todomvc_testing::{ReducerTest, ScriptedIdGenerator};
//!
//! ReducerTest::new(TaskReducer::new())
//!     .with_env(TodoEnvironment::new(ScriptedIdGenerator::new([2])))
//!     .given_state(AppState::default())
//!     .when_action(TodoAction::Add { title: "Buy milk".into() }.into())
//!     .then_state(|state| assert_eq!(state.tasks.len(), 1))
//!     .run();
//! ```

use todomvc_core::environment::IdGenerator;

/// Given-When-Then harness for reducers
pub mod reducer_test;

pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::IdGenerator;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Id generator that hands out a predetermined script of ids
    ///
    /// Once the script is exhausted it continues counting upward from one
    /// past the largest scripted id, so it never repeats a value it has not
    /// been told to repeat. Scripts may contain duplicates or decreasing ids,
    /// which lets tests drive a reducer into its uniqueness checks.
    ///
    /// Such a script breaks the [`IdGenerator`] contract on purpose. Only
    /// use one against code whose reaction to a repeated id is under test.
    ///
    /// # Example
    ///
    /// ```
    /// use todomvc_core::environment::IdGenerator;
    /// use todomvc_testing::mocks::ScriptedIdGenerator;
    ///
    /// let ids = ScriptedIdGenerator::new([5, 5]);
    /// assert_eq!(ids.next_id(), 5);
    /// assert_eq!(ids.next_id(), 5);
    /// assert_eq!(ids.next_id(), 6);
    /// ```
    #[derive(Debug)]
    pub struct ScriptedIdGenerator {
        script: Mutex<VecDeque<u64>>,
        fallback: AtomicU64,
        issued: AtomicU64,
    }

    impl ScriptedIdGenerator {
        /// Create a generator that replays `script` first
        #[must_use]
        pub fn new(script: impl IntoIterator<Item = u64>) -> Self {
            let script: VecDeque<u64> = script.into_iter().collect();
            let fallback = script.iter().max().map_or(1, |max| max.saturating_add(1));
            Self {
                script: Mutex::new(script),
                fallback: AtomicU64::new(fallback),
                issued: AtomicU64::new(0),
            }
        }

        /// How many ids have been handed out so far
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.issued.load(Ordering::Acquire)
        }
    }

    impl IdGenerator for ScriptedIdGenerator {
        fn next_id(&self) -> u64 {
            self.issued.fetch_add(1, Ordering::AcqRel);

            // A poisoned script only means another test thread panicked
            let scripted = match self.script.lock() {
                Ok(mut script) => script.pop_front(),
                Err(poisoned) => poisoned.into_inner().pop_front(),
            };

            scripted.unwrap_or_else(|| self.fallback.fetch_add(1, Ordering::AcqRel))
        }
    }
}

// Re-export commonly used items
pub use mocks::ScriptedIdGenerator;
