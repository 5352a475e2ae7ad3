//! Layer Namer - headless host
//!
//! Runs the plugin over a scene document stored as JSON, the same way the
//! editor host would drive it:
//!
//! 1. Initialize logging → `<log_dir>/layer-namer.<date>`
//! 2. Create a current-thread tokio runtime
//! 3. Create StateManager, ConfigManager and the PluginBridge
//! 4. Create CommandController (announces persisted options)
//! 5. Report the document's roots as the selection
//! 6. Issue one RENAME command with the flags given on the command line
//! 7. Print every panel event as a JSON line on stdout while the run proceeds
//! 8. Write the renamed document back
//!
//! # Example
//!
//! ```text
//! layer-namer scene.json --hidden --pascal-case
//! ```

mod cli;

use anyhow::{Context, Result};
use cli::Cli;
use layer_namer::logging::{ConsoleFormat, DEFAULT_LOG_PREFIX};
use layer_namer::models::SceneDocument;
use layer_namer::ui::{PluginEvent, UiCommand};
use layer_namer::{
    APP_NAME, CommandController, ConfigManager, NamingStrategyManager, PluginBridge, StateManager,
    VERSION,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let console = if cli.json_logs {
        ConsoleFormat::Json
    } else {
        ConsoleFormat::Pretty
    };
    let _log_guard = layer_namer::logging::setup_logging_with_console(
        &cli.log_dir,
        DEFAULT_LOG_PREFIX,
        cli.debug,
        console,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let result = runtime.block_on(run(&cli));

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    tracing::info!("Shutdown complete");

    result
}

async fn run(cli: &Cli) -> Result<()> {
    let document = SceneDocument::load(&cli.document)?;

    let state_manager = Arc::new(StateManager::new());
    let config_manager = Arc::new(ConfigManager::with_slot(&cli.settings_dir, &cli.slot)?);
    tracing::info!("Settings file: {}", config_manager.settings_path());

    let (bridge, mut events) = PluginBridge::new();
    let metrics = Arc::clone(bridge.metrics());

    let controller = CommandController::new(
        state_manager,
        config_manager,
        Arc::new(NamingStrategyManager::default()),
        bridge,
    )?;

    let selection = document.selection();
    let update = cli.options_update();
    let command = async move {
        controller.on_selection_changed(selection);
        controller.handle_command(UiCommand::Rename(update)).await;
        // Every sender lives in the controller; dropping it ends the stream
        drop(controller);
    };

    // Print while the run is in progress so per-node toasts never fill the channel
    let printer = async move {
        let mut failed = false;
        while let Some(event) = events.recv().await {
            if let PluginEvent::Notify(notification) = &event {
                failed |= notification.error;
            }
            println!(
                "{}",
                serde_json::to_string(&event).context("Failed to serialize panel event")?
            );
        }
        Ok::<_, anyhow::Error>(failed)
    };

    let ((), printed) = tokio::join!(command, printer);
    let failed = printed? || metrics.nodes_failed.load(Ordering::Relaxed) > 0;

    match cli.output_path() {
        Some(path) => document.save(path)?,
        None => tracing::info!("Dry run - document not written"),
    }

    metrics.log_summary();

    if failed {
        tracing::warn!("Some layers could not be renamed");
    }

    Ok(())
}
