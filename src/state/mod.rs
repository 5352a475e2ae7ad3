// State management module
//
// This module provides the StateManager which wraps AppState with thread-safe access
// using Arc<RwLock<T>> and emits change events for panel updates.

use crate::models::{AppState, NodeRef, RenameOptions, RunSummary};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when state is modified
///
/// These events let the controller forward updates to the panel without
/// polling the state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// The host selection changed
    SelectionChanged { has_selection: bool },

    /// The settings section of the panel was opened or closed
    SettingsPanelToggled { open: bool },

    /// The rename options were replaced
    OptionsChanged,

    /// A rename run started
    RenameStarted { roots: usize },

    /// A rename run finished
    RenameFinished {
        renamed: usize,
        skipped: usize,
        failed: usize,
    },
}

/// Thread-safe state manager with event emission
///
/// - Provides thread-safe access to [`AppState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Supports subscribing to state changes via tokio broadcast channels
///
/// # Related Types
///
/// - [`crate::config::ConfigManager`]: Loads the persisted options into state
/// - [`crate::ui::CommandController`]: Primary consumer of state events
pub struct StateManager {
    state: Arc<RwLock<AppState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state
    ///
    /// # Returns
    /// A new StateManager with a broadcast channel buffer of 100 events
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            state_tx,
        }
    }

    /// Get a snapshot of the current state
    pub fn snapshot(&self) -> AppState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let has_selection = state_manager.read(|state| state.has_selection());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Emits appropriate events
    ///
    /// # Returns
    /// A vector of StateChange events that were emitted
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut AppState),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let old_state = state.clone();

        update_fn(&mut state);

        let changes = self.detect_changes(&old_state, &state);

        for change in &changes {
            // Ignore send errors - it's OK if no one is listening
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    fn detect_changes(&self, old: &AppState, new: &AppState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        let same_selection = old.selection.len() == new.selection.len()
            && old
                .selection
                .iter()
                .zip(&new.selection)
                .all(|(a, b)| a.id() == b.id());
        if !same_selection {
            changes.push(StateChange::SelectionChanged {
                has_selection: new.has_selection(),
            });
        }

        if old.settings_open != new.settings_open {
            changes.push(StateChange::SettingsPanelToggled {
                open: new.settings_open,
            });
        }

        if old.options != new.options {
            changes.push(StateChange::OptionsChanged);
        }

        if old.is_renaming != new.is_renaming {
            if new.is_renaming {
                changes.push(StateChange::RenameStarted {
                    roots: new.selection.len(),
                });
            } else {
                let summary = new.last_run.clone().unwrap_or_default();
                changes.push(StateChange::RenameFinished {
                    renamed: summary.renamed,
                    skipped: summary.skipped,
                    failed: summary.failed,
                });
            }
        }

        changes
    }

    // Convenience methods for common state updates

    /// Replace the host selection
    pub fn set_selection(&self, selection: Vec<NodeRef>) -> Vec<StateChange> {
        self.update(|state| {
            state.selection = selection;
        })
    }

    pub fn set_settings_open(&self, open: bool) -> Vec<StateChange> {
        self.update(|state| {
            state.settings_open = open;
        })
    }

    pub fn set_options(&self, options: RenameOptions) -> Vec<StateChange> {
        self.update(|state| {
            state.options = options;
        })
    }

    /// Mark a rename run as started
    pub fn start_renaming(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.is_renaming = true;
            state.last_run = None;
        })
    }

    /// Mark the current rename run as finished
    pub fn finish_renaming(&self, summary: RunSummary) -> Vec<StateChange> {
        self.update(|state| {
            state.finish_run(summary);
        })
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentNode;

    fn node(id: &str) -> NodeRef {
        DocumentNode::new(id, "FRAME", "Frame").into_ref()
    }

    #[test]
    fn test_new_state_manager() {
        let manager = StateManager::new();
        let state = manager.snapshot();

        assert!(!state.is_renaming);
        assert!(!state.has_selection());
        assert_eq!(state.runs_completed, 0);
    }

    #[test]
    fn test_selection_change_detection() {
        let manager = StateManager::new();

        let changes = manager.set_selection(vec![node("1:1")]);
        assert_eq!(
            changes,
            vec![StateChange::SelectionChanged { has_selection: true }]
        );

        // Same ids, no event
        let changes = manager.set_selection(vec![node("1:1")]);
        assert!(changes.is_empty());

        let changes = manager.set_selection(Vec::new());
        assert_eq!(
            changes,
            vec![StateChange::SelectionChanged { has_selection: false }]
        );
    }

    #[test]
    fn test_settings_panel_toggle() {
        let manager = StateManager::new();

        let changes = manager.set_settings_open(true);
        assert_eq!(changes, vec![StateChange::SettingsPanelToggled { open: true }]);

        assert!(manager.set_settings_open(true).is_empty());
    }

    #[test]
    fn test_options_change() {
        let manager = StateManager::new();

        let changes = manager.set_options(RenameOptions::permissive());
        assert_eq!(changes, vec![StateChange::OptionsChanged]);
        assert_eq!(manager.snapshot().options, RenameOptions::permissive());
    }

    #[test]
    fn test_rename_lifecycle() {
        let manager = StateManager::new();
        manager.set_selection(vec![node("1:1"), node("1:2")]);

        let changes = manager.start_renaming();
        assert_eq!(changes, vec![StateChange::RenameStarted { roots: 2 }]);

        let changes = manager.finish_renaming(RunSummary {
            renamed: 2,
            skipped: 1,
            failed: 0,
        });
        assert_eq!(
            changes,
            vec![StateChange::RenameFinished {
                renamed: 2,
                skipped: 1,
                failed: 0
            }]
        );

        let state = manager.snapshot();
        assert!(!state.is_renaming);
        assert_eq!(state.runs_completed, 1);
    }

    #[test]
    fn test_subscribe_to_changes() {
        let manager = StateManager::new();
        let mut rx = manager.subscribe();

        manager.set_settings_open(true);

        let event = rx.try_recv().unwrap();
        assert_eq!(event, StateChange::SettingsPanelToggled { open: true });
    }

    #[test]
    fn test_clone_state_manager() {
        let manager1 = StateManager::new();
        let manager2 = manager1.clone();

        manager1.set_settings_open(true);

        assert!(manager2.read(|s| s.settings_open));
    }
}
