// Command Controller - Bridges the host panel with the renamer
//
// This module contains the CommandController which coordinates between:
// - Host selection changes
// - Panel commands (SETTING_OPEN, RENAME)
// - StateManager (session state)
// - ConfigManager (persisted options)
// - RenameOrchestrator (business logic)
// - PluginBridge (events back to the panel)

use crate::config::ConfigManager;
use crate::models::{NodeRef, RenameOptionsUpdate, RunSummary};
use crate::services::naming::NamingStrategyManager;
use crate::services::renamer::RenameOrchestrator;
use crate::state::{StateChange, StateManager};
use crate::ui::bridge::PluginBridge;
use crate::ui::messages::{
    MSG_EMPTY_SELECTION, MSG_NOTHING_TO_RENAME, MSG_RENAMED, Notification, PluginEvent, UiCommand,
};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Controller wiring host events and panel commands to the renamer
///
/// - Forwards selection and panel-state changes to the panel as [`PluginEvent`]s
/// - Runs one orchestrator pass per RENAME command
/// - Catches every run-level failure and turns it into a single error toast
/// - Delivers the outcome toast of every RENAME even when per-node error
///   toasts have filled the channel
///
/// # Example
/// ```ignore
/// let (bridge, events) = PluginBridge::new();
/// let controller = CommandController::new(state, config, naming, bridge)?;
///
/// controller.on_selection_changed(selection);
/// controller.handle_message(r#"{"type":"RENAME","payload":{"hidden":true}}"#).await;
/// ```
pub struct CommandController {
    state_manager: Arc<StateManager>,
    config_manager: Arc<ConfigManager>,
    orchestrator: Arc<RenameOrchestrator>,
    bridge: PluginBridge,
}

impl CommandController {
    /// Create a new controller and announce the persisted options to the panel
    ///
    /// # Errors
    /// Fails when the persisted options cannot be read
    pub fn new(
        state_manager: Arc<StateManager>,
        config_manager: Arc<ConfigManager>,
        naming: Arc<NamingStrategyManager>,
        bridge: PluginBridge,
    ) -> Result<Self> {
        let options = config_manager
            .load_options()
            .context("Failed to load persisted options")?;
        state_manager.set_options(options);

        let orchestrator = RenameOrchestrator::new(naming)
            .with_notifier(Arc::new(bridge.clone()))
            .with_metrics(Arc::clone(bridge.metrics()));

        bridge.post(PluginEvent::Settings(options));
        bridge.post(PluginEvent::resize_for(state_manager.read(|s| s.settings_open)));

        tracing::info!("Command controller initialized");

        Ok(Self {
            state_manager,
            config_manager,
            orchestrator: Arc::new(orchestrator),
            bridge,
        })
    }

    /// Host callback: the selection changed
    pub fn on_selection_changed(&self, selection: Vec<NodeRef>) {
        tracing::debug!("Selection changed: {} layers", selection.len());
        let changes = self.state_manager.set_selection(selection);
        self.forward_changes(&changes);
    }

    /// Parse and handle a raw panel message
    ///
    /// Malformed messages are reported as an error toast.
    pub async fn handle_message(&self, raw: &str) {
        match serde_json::from_str::<UiCommand>(raw) {
            Ok(command) => self.handle_command(command).await,
            Err(e) => {
                tracing::error!("Invalid panel message {:?}: {}", raw, e);
                self.report(Notification::error(format!("Invalid command: {}", e)))
                    .await;
            }
        }
    }

    /// Handle a panel command
    pub async fn handle_command(&self, command: UiCommand) {
        match command {
            UiCommand::SettingOpen(open) => {
                tracing::debug!("Settings panel toggled: {}", open);
                let changes = self.state_manager.set_settings_open(open);
                self.forward_changes(&changes);
            }
            UiCommand::Rename(update) => {
                tracing::info!("Rename requested");
                let outcome = match self.run_rename(update).await {
                    Ok(Some(summary)) if summary.any_renamed() => Notification::info(MSG_RENAMED),
                    Ok(Some(_)) => Notification::info(MSG_NOTHING_TO_RENAME),
                    Ok(None) => Notification::info(MSG_EMPTY_SELECTION),
                    Err(e) => {
                        tracing::error!("Rename failed: {:#}", e);
                        if self.state_manager.read(|s| s.is_renaming) {
                            self.state_manager.finish_renaming(RunSummary::default());
                        }
                        Notification::error(format!("Rename failed: {:#}", e))
                    }
                };
                self.report(outcome).await;
            }
        }
    }

    /// One RENAME invocation.
    ///
    /// # Returns
    /// `None` when there is nothing selected, otherwise the run's summary
    async fn run_rename(&self, update: RenameOptionsUpdate) -> Result<Option<RunSummary>> {
        let selection = self.state_manager.read(|s| s.selection.clone());
        if selection.is_empty() {
            tracing::warn!("Rename requested with an empty selection");
            return Ok(None);
        }

        let persisted = self
            .config_manager
            .load_options()
            .context("Failed to load persisted options")?;
        let options = update.apply_to(persisted);

        self.config_manager
            .save_options(&options)
            .context("Failed to save options")?;
        self.state_manager.set_options(options);

        self.state_manager.start_renaming();
        let summary = self
            .orchestrator
            .rename_selection_with_report(&selection, &options)
            .await;
        self.state_manager.finish_renaming(summary.clone());

        Ok(Some(summary))
    }

    /// Send a command's outcome toast, waiting for room in the channel
    async fn report(&self, notification: Notification) {
        self.bridge.deliver(PluginEvent::Notify(notification)).await;
    }

    /// Translate state changes into panel events
    fn forward_changes(&self, changes: &[StateChange]) {
        for change in changes {
            match change {
                StateChange::SelectionChanged { has_selection } => {
                    self.bridge.post(PluginEvent::SelectionChanged(*has_selection));
                }
                StateChange::SettingsPanelToggled { open } => {
                    self.bridge.post(PluginEvent::resize_for(*open));
                }
                other => {
                    tracing::trace!("State change not forwarded: {:?}", other);
                }
            }
        }
    }
}
