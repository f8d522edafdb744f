//! # TodoMVC Runtime
//!
//! Runtime implementation for the TodoMVC reducer architecture.
//!
//! This crate provides the Store runtime that owns application state,
//! dispatches actions to the reducer, and tells observers about changes.
//!
//! ## Core Components
//!
//! - **Store**: Single writer of state; runs the reducer for each action
//! - **Snapshots**: Every change publishes the full new state to subscribers
//! - **Action audit**: Every dispatched action is broadcast to observers
//! - **Effect Executor**: Executes effect descriptions and feeds actions back
//!
//! ## Example
//!
//! ```ignore
//! use todomvc_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//! let mut snapshots = store.subscribe();
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Observe the change
//! snapshots.changed().await?;
//! let latest = snapshots.borrow().clone();
//! ```

use futures::future::BoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use todomvc_core::{effect::Effect, reducer::Reducer};
use tokio::sync::RwLock;

pub use error::StoreError;
pub use store::Store;

/// State that carries a presentation-only substructure
///
/// [`Store::mutate_transient`] hands out `&mut Self::Transient` and nothing
/// else, so reducer-owned fields can only change through dispatched actions.
pub trait TransientState {
    /// The unaudited, presentation-only part of the state
    type Transient;

    /// Borrow the transient part mutably
    fn transient_mut(&mut self) -> &mut Self::Transient;

    /// Bring the transient part back in line with the rest of the state
    ///
    /// Runs after every transient write, before the snapshot is compared
    /// and published. The default does nothing.
    fn settle_transient(&mut self) {}
}

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

/// Store configuration
///
/// # Example
///
/// ```
/// use todomvc_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_action_broadcast_capacity(64);
/// assert_eq!(config.action_broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of actions buffered for audit subscribers before slow ones lag
    pub action_broadcast_capacity: usize,
}

impl StoreConfig {
    /// Set the action broadcast capacity (clamped to at least 1)
    #[must_use]
    pub fn with_action_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.action_broadcast_capacity = capacity.max(1);
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            action_broadcast_capacity: 16,
        }
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, BoxFuture, Effect, Ordering, Reducer, RwLock, StoreConfig, StoreError,
        TransientState,
    };
    use tokio::sync::{broadcast, watch};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the reducer is its only audited writer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Snapshot publication (`watch`: one writer, many readers)
    /// 5. Action audit stream (`broadcast`)
    /// 6. Effect execution (with feedback loop)
    ///
    /// Cloning a store is cheap; every clone shares the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        shutdown: Arc<AtomicBool>,
        /// Latest published snapshot. Only written while the state write lock is held.
        snapshots: Arc<watch::Sender<S>>,
        /// Every dispatched action, in dispatch order.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Clone + Send + Sync + 'static,
        S: Clone + PartialEq + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.action_broadcast_capacity.max(1));
            let (snapshots, _) = watch::channel(initial_state.clone());

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                shutdown: Arc::new(AtomicBool::new(false)),
                snapshots: Arc::new(snapshots),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// The action is broadcast to audit subscribers, then reduced while the
        /// write lock is held. If the reducer changed the state, the new
        /// snapshot is published before the lock is released, so subscribers
        /// observe snapshots in dispatch order. Returned effects are then
        /// executed to completion; actions they produce are sent back through
        /// this method.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic will propagate and halt the store.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.is_shutting_down() {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let effects = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                // No audit subscribers is not an error
                let _ = self.action_broadcast.send(action.clone());

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &*self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                self.publish(&*state);
                effects
            };

            tracing::trace!("Executing {} effects", effects.len());
            for effect in effects {
                self.execute_effect(effect).await;
            }

            Ok(())
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let task_count = store.state(|s| s.tasks.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to state snapshots
        ///
        /// The receiver starts out holding the current snapshot (marked as
        /// seen) and is woken each time a dispatch or transient write changes
        /// the state. Intermediate snapshots may be skipped by slow readers;
        /// the latest one is always available.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<S> {
            self.snapshots.subscribe()
        }

        /// Subscribe to all actions dispatched to this store
        ///
        /// Actions appear in dispatch order, including actions fed back by
        /// effects. Transient writes never appear here. If the receiver lags,
        /// it skips old actions and receives `RecvError::Lagged`.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Stop accepting actions and transient writes
        ///
        /// In-flight dispatches finish normally. Snapshot subscribers keep
        /// the last published state.
        pub fn shutdown(&self) {
            if !self.shutdown.swap(true, Ordering::AcqRel) {
                tracing::info!("Store shutting down");
            }
        }

        /// Whether [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Publish `state` if it differs from the last published snapshot
        ///
        /// Must be called with the state write lock held. Returns whether a
        /// snapshot was published.
        fn publish(&self, state: &S) -> bool {
            let changed = self.snapshots.send_if_modified(|snapshot| {
                if *snapshot == *state {
                    false
                } else {
                    snapshot.clone_from(state);
                    true
                }
            });

            if changed {
                tracing::trace!("Published new snapshot");
                metrics::counter!("store.snapshots.published").increment(1);
            } else {
                tracing::trace!("State unchanged, no snapshot published");
            }
            changed
        }

        /// Execute an effect to completion
        ///
        /// # Effect Types
        ///
        /// - `None`: No-op
        /// - `Future`: Awaits the computation, sends the resulting action if `Some`
        /// - `Parallel`: Executes effects concurrently
        /// - `Sequential`: Executes effects in order, waiting for each to complete
        ///
        /// Feedback actions rejected by a shutting-down store are logged and dropped.
        fn execute_effect(&self, effect: Effect<A>) -> BoxFuture<'_, ()> {
            Box::pin(async move {
                match effect {
                    Effect::None => {
                        tracing::trace!("Executing Effect::None (no-op)");
                    },
                    Effect::Future(fut) => {
                        tracing::trace!("Executing Effect::Future");
                        metrics::counter!("store.effects.executed", "type" => "future").increment(1);

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, sending to store");
                            if let Err(error) = self.send(action).await {
                                tracing::warn!(%error, "Dropped feedback action");
                            }
                        }
                    },
                    Effect::Parallel(effects) => {
                        tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                        metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);

                        futures::future::join_all(
                            effects.into_iter().map(|effect| self.execute_effect(effect)),
                        )
                        .await;
                    },
                    Effect::Sequential(effects) => {
                        tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                        metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);

                        for effect in effects {
                            self.execute_effect(effect).await;
                        }
                    },
                }
            })
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Clone + Send + Sync + 'static,
        S: TransientState + Clone + PartialEq + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Apply an unaudited, direct write to the transient part of state
        ///
        /// This bypasses the reducer and the action broadcast. The closure
        /// only sees [`TransientState::Transient`]; afterwards
        /// [`TransientState::settle_transient`] runs and a snapshot is
        /// published if the state changed. Returns whether it did.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        pub async fn mutate_transient<F>(&self, f: F) -> Result<bool, StoreError>
        where
            F: FnOnce(&mut S::Transient),
        {
            if self.is_shutting_down() {
                return Err(StoreError::ShutdownInProgress);
            }

            let mut state = self.state.write().await;
            f(state.transient_mut());
            state.settle_transient();
            Ok(self.publish(&*state))
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                shutdown: Arc::clone(&self.shutdown),
                snapshots: Arc::clone(&self.snapshots),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("shutdown", &self.shutdown.load(Ordering::Acquire))
                .field("snapshot_subscribers", &self.snapshots.receiver_count())
                .field("action_subscribers", &self.action_broadcast.receiver_count())
                .finish_non_exhaustive()
        }
    }
}
