//! Integration tests for Store snapshot and action subscriptions
//!
//! Exercises the publish side of the store: many readers, one writer,
//! ordering of snapshots and of audited actions.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::time::Duration;
use todomvc_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use todomvc_runtime::{Store, StoreConfig};
use tokio::sync::broadcast::error::TryRecvError;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum ListAction {
    Push(u32),
    Clear,
    /// Pushes 1, 2, 3 through the feedback loop
    PushThree,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ListState {
    items: Vec<u32>,
}

struct ListReducer;

impl Reducer for ListReducer {
    type State = ListState;
    type Action = ListAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ListAction::Push(value) => {
                state.items.push(value);
                SmallVec::new()
            }
            ListAction::Clear => {
                state.items.clear();
                SmallVec::new()
            }
            ListAction::PushThree => smallvec![Effect::chain(
                (1..=3)
                    .map(|value| Effect::Future(Box::pin(async move { Some(ListAction::Push(value)) })))
                    .collect()
            )],
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("todomvc_runtime=trace")
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn every_subscriber_sees_the_latest_snapshot() {
    init_tracing();
    let store = Store::new(ListState::default(), ListReducer, ());
    let mut first = store.subscribe();
    let mut second = store.subscribe();

    store.send(ListAction::Push(7)).await.unwrap();

    for rx in [&mut first, &mut second] {
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().items, vec![7]);
    }
}

#[tokio::test]
async fn waiting_subscriber_is_woken_by_dispatch() {
    init_tracing();
    let store = Store::new(ListState::default(), ListReducer, ());
    let mut rx = store.subscribe();

    let observer = tokio::spawn(async move {
        rx.changed().await.unwrap();
        rx.borrow_and_update().items.clone()
    });

    store.send(ListAction::Push(1)).await.unwrap();

    let seen = tokio::time::timeout(Duration::from_secs(1), observer)
        .await
        .expect("observer should be woken")
        .unwrap();
    assert_eq!(seen, vec![1]);
}

#[tokio::test]
async fn clearing_an_empty_list_publishes_nothing() {
    init_tracing();
    let store = Store::new(ListState::default(), ListReducer, ());
    let rx = store.subscribe();

    store.send(ListAction::Clear).await.unwrap();

    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn feedback_actions_are_audited_after_their_trigger() {
    init_tracing();
    let store = Store::new(ListState::default(), ListReducer, ());
    let mut actions = store.subscribe_actions();

    store.send(ListAction::PushThree).await.unwrap();

    let mut seen = Vec::new();
    while let Ok(action) = actions.try_recv() {
        seen.push(action);
    }
    assert_eq!(
        seen,
        vec![
            ListAction::PushThree,
            ListAction::Push(1),
            ListAction::Push(2),
            ListAction::Push(3),
        ]
    );

    let items = store.state(|s| s.items.clone()).await;
    assert_eq!(items, vec![1, 2, 3]);
}

#[tokio::test]
async fn slow_audit_subscriber_lags() {
    init_tracing();
    let config = StoreConfig::default().with_action_broadcast_capacity(2);
    let store = Store::with_config(ListState::default(), ListReducer, (), config);
    let mut actions = store.subscribe_actions();

    for value in 0..5 {
        store.send(ListAction::Push(value)).await.unwrap();
    }

    assert!(matches!(actions.try_recv(), Err(TryRecvError::Lagged(3))));
    assert_eq!(actions.try_recv().unwrap(), ListAction::Push(3));
    assert_eq!(actions.try_recv().unwrap(), ListAction::Push(4));
}

#[tokio::test]
async fn snapshots_survive_shutdown() {
    init_tracing();
    let store = Store::new(ListState::default(), ListReducer, ());
    let rx = store.subscribe();

    store.send(ListAction::Push(9)).await.unwrap();
    store.shutdown();
    assert!(store.send(ListAction::Push(10)).await.is_err());

    assert_eq!(rx.borrow().items, vec![9]);
}
