//! Integration tests for StateManager with state change events
//!
//! These tests verify that the StateManager correctly:
//! - Emits state change events on mutations
//! - Supports multiple subscribers
//! - Handles concurrent access from multiple threads
//! - Tracks a rename run from start to finish

use layer_namer::models::{DocumentNode, NodeRef, RenameOptions, RunSummary};
use layer_namer::{StateChange, StateManager};
use std::sync::Arc;
use tokio::time::{Duration, timeout};

fn selection(ids: &[&str]) -> Vec<NodeRef> {
    ids.iter()
        .map(|id| DocumentNode::new(*id, "FRAME", "Frame").into_ref() as NodeRef)
        .collect()
}

#[tokio::test]
async fn test_state_change_events_emitted() {
    let state = Arc::new(StateManager::new());
    let mut rx = state.subscribe();

    state.set_selection(selection(&["1:1", "1:2"]));
    state.start_renaming();

    let event = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("Timeout waiting for event")
        .expect("Channel closed");
    assert_eq!(event, StateChange::SelectionChanged { has_selection: true });

    let event = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("Timeout waiting for event")
        .expect("Channel closed");
    assert!(
        matches!(event, StateChange::RenameStarted { roots: 2 }),
        "Expected RenameStarted event, got: {:?}",
        event
    );
}

#[tokio::test]
async fn test_multiple_subscribers_receive_events() {
    let state = Arc::new(StateManager::new());
    let mut receivers = vec![state.subscribe(), state.subscribe(), state.subscribe()];

    state.set_settings_open(true);

    for (i, rx) in receivers.iter_mut().enumerate() {
        let event = timeout(Duration::from_millis(100), rx.recv())
            .await
            .unwrap_or_else(|_| panic!("Timeout on rx{}", i))
            .unwrap_or_else(|_| panic!("rx{} closed", i));
        assert_eq!(event, StateChange::SettingsPanelToggled { open: true });
    }
}

#[tokio::test]
async fn test_no_event_without_change() {
    let state = StateManager::new();
    let mut rx = state.subscribe();

    // Same ids in the same order count as the same selection
    state.set_selection(selection(&["2:1"]));
    let changes = state.set_selection(selection(&["2:1"]));
    assert!(changes.is_empty());

    let changes = state.set_options(RenameOptions::default());
    assert!(changes.is_empty());

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_rename_run_lifecycle() {
    let state = StateManager::new();
    state.set_selection(selection(&["3:1"]));
    let mut rx = state.subscribe();

    state.start_renaming();
    assert!(state.read(|s| s.is_renaming));

    let summary = RunSummary {
        renamed: 3,
        skipped: 1,
        failed: 0,
    };
    let changes = state.finish_renaming(summary.clone());

    assert_eq!(
        changes,
        vec![StateChange::RenameFinished {
            renamed: 3,
            skipped: 1,
            failed: 0,
        }]
    );

    let snapshot = state.snapshot();
    assert!(!snapshot.is_renaming);
    assert_eq!(snapshot.runs_completed, 1);
    assert_eq!(snapshot.last_run, Some(summary));

    let started = rx.recv().await.unwrap();
    assert_eq!(started, StateChange::RenameStarted { roots: 1 });
}

#[test]
fn test_concurrent_updates() {
    let state = Arc::new(StateManager::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    state.set_settings_open(i % 2 == 0);
                    state.read(|s| s.settings_open);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // No lost writers, no poisoned lock
    let _ = state.snapshot();
}

#[test]
fn test_clones_share_state() {
    let state = StateManager::new();
    let clone = state.clone();

    clone.set_settings_open(true);

    assert!(state.read(|s| s.settings_open));
}
