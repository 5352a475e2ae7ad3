//! Services module - Pure business logic for renaming scene layers.
//!
//! The services know nothing about the panel or the wire format; they operate on
//! [`NodeRef`](crate::models::NodeRef) handles and a
//! [`RenameOptions`](crate::models::RenameOptions) snapshot.
//!
//! # Components
//!
//! - [`GeneratedNameClassifier`]: decides whether a layer still carries a name the host
//!   editor or this plugin assigned. Patterns are compiled once per process.
//!
//! - [`NamingStrategyManager`]: maps a node to its proposed name. Strategies implement
//!   [`NamingStrategy`] and can be overridden per [`NodeKind`](crate::models::NodeKind);
//!   [`KindLabelStrategy`] is the default.
//!
//! - [`RenameOrchestrator`]: walks the selection in batches of
//!   [`RENAME_BATCH_SIZE`](crate::models::RENAME_BATCH_SIZE) roots, applies the option
//!   gates, and renames every eligible node. Failures are isolated per node and reported
//!   through a [`FailureNotifier`].
//!
//! # Usage Example
//!
//! ```ignore
//! use layer_namer::services::{NamingStrategyManager, RenameOrchestrator};
//!
//! let orchestrator = RenameOrchestrator::new(Arc::new(NamingStrategyManager::default()));
//! let any_renamed = orchestrator.rename_selection(&selection, &options).await;
//! ```

pub mod classifier;
pub mod naming;
pub mod renamer;

pub use classifier::{GeneratedNameClassifier, is_host_generated_name, is_plugin_generated_name};
pub use naming::{KindLabelStrategy, NamingStrategy, NamingStrategyManager};
pub use renamer::{FailureNotifier, RenameError, RenameOrchestrator};
