// Layer Namer - Automatic layer names for design-tool scene nodes
//
// This is the library crate containing the renamer, its options and the
// panel command surface. The binary crate (main.rs) is a headless host that
// runs the plugin over a scene document stored as JSON.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{AppState, DocumentNode, NodeKind, NodeRef, RenameOptions, SceneNode};
pub use services::{GeneratedNameClassifier, NamingStrategyManager, RenameOrchestrator};
pub use state::{StateChange, StateManager};
pub use ui::{CommandController, PluginBridge};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
