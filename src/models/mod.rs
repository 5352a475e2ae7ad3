//! Data models for the layer namer.
//!
//! - [`NodeKind`]: the closed set of scene node kinds, plus [`is_valid_node_kind`]
//! - [`SceneNode`] / [`NodeRef`]: handles to host-owned nodes; [`DocumentNode`] is the in-memory host
//! - [`SceneDocument`]: a JSON scene document (bare array of roots, or `{ "selection": [...] }`)
//! - [`RenameOptions`]: the per-invocation option snapshot, also the persisted settings record
//! - [`AppState`]: plugin session state (selection, panel, last run)
//! - [`RENAME_BATCH_SIZE`]: how many selection roots are processed between yields

pub mod app_state;
pub mod config;
pub mod document;
pub mod node_kind;
pub mod scene;

pub use app_state::{AppState, RENAME_BATCH_SIZE, RunSummary};
pub use config::{RenameOptions, RenameOptionsUpdate};
pub use document::SceneDocument;
pub use node_kind::{NodeKind, UnknownNodeKind, is_valid_node_kind};
pub use scene::{DocumentNode, NodeError, NodeRef, SceneNode, SceneNodeRecord};
