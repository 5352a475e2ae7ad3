use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Shared handle to a host-owned scene node.
pub type NodeRef = Arc<dyn SceneNode>;

/// Errors raised by the host when a node is mutated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("Node {0} is no longer part of the document")]
    Detached(String),

    #[error("Node {0} is read-only")]
    ReadOnly(String),
}

/// A scene node as seen through the host editor's API.
///
/// The host document owns every node. Implementations hand out cheap shared
/// handles and only ever let this crate change the `name`, through
/// [`set_name`](Self::set_name).
pub trait SceneNode: Send + Sync + fmt::Debug {
    /// Opaque, stable identifier
    fn id(&self) -> &str;

    /// Raw type tag reported by the host. May be outside [`NodeKind`](crate::models::NodeKind).
    fn kind(&self) -> &str;

    fn name(&self) -> String;

    fn set_name(&self, name: &str) -> Result<(), NodeError>;

    fn locked(&self) -> bool;

    fn visible(&self) -> bool;

    /// Whether the host keeps a text node's name in sync with its content.
    /// Always `false` for non-text nodes.
    fn auto_rename(&self) -> bool {
        false
    }

    /// Child nodes in z-order, or `None` for leaf kinds.
    fn children(&self) -> Option<Vec<NodeRef>>;
}

/// Serialized form of a node in a scene document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNodeRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_rename: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SceneNodeRecord>>,
}

fn default_visible() -> bool {
    true
}

/// In-memory scene node backing the headless host and the test suites.
#[derive(Debug)]
pub struct DocumentNode {
    id: String,
    kind: String,
    name: RwLock<String>,
    locked: bool,
    visible: bool,
    auto_rename: Option<bool>,
    children: Option<Vec<Arc<DocumentNode>>>,
    detached: AtomicBool,
}

impl DocumentNode {
    /// Create a leaf node
    pub fn new(id: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: RwLock::new(name.into()),
            locked: false,
            visible: true,
            auto_rename: None,
            children: None,
            detached: AtomicBool::new(false),
        }
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_auto_rename(mut self, auto_rename: bool) -> Self {
        self.auto_rename = Some(auto_rename);
        self
    }

    pub fn with_children(mut self, children: Vec<Arc<DocumentNode>>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn into_ref(self) -> Arc<DocumentNode> {
        Arc::new(self)
    }

    /// Remove the node from the document; later renames fail.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn document_children(&self) -> &[Arc<DocumentNode>] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Build a node tree from its serialized record
    pub fn from_record(record: SceneNodeRecord) -> Arc<DocumentNode> {
        let children = record
            .children
            .map(|children| children.into_iter().map(DocumentNode::from_record).collect());

        Arc::new(Self {
            id: record.id,
            kind: record.kind,
            name: RwLock::new(record.name),
            locked: record.locked,
            visible: record.visible,
            auto_rename: record.auto_rename,
            children,
            detached: AtomicBool::new(false),
        })
    }

    /// Snapshot the node tree back into its serialized record
    pub fn to_record(&self) -> SceneNodeRecord {
        SceneNodeRecord {
            id: self.id.clone(),
            name: self.name(),
            kind: self.kind.clone(),
            locked: self.locked,
            visible: self.visible,
            auto_rename: self.auto_rename,
            children: self
                .children
                .as_ref()
                .map(|children| children.iter().map(|child| child.to_record()).collect()),
        }
    }
}

impl SceneNode for DocumentNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn name(&self) -> String {
        match self.name.read() {
            Ok(name) => name.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_name(&self, name: &str) -> Result<(), NodeError> {
        if self.detached.load(Ordering::SeqCst) {
            return Err(NodeError::Detached(self.id.clone()));
        }

        let mut current = self
            .name
            .write()
            .map_err(|_| NodeError::ReadOnly(self.id.clone()))?;
        *current = name.to_string();
        Ok(())
    }

    fn locked(&self) -> bool {
        self.locked
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn auto_rename(&self) -> bool {
        self.auto_rename.unwrap_or(false)
    }

    fn children(&self) -> Option<Vec<NodeRef>> {
        self.children.as_ref().map(|children| {
            children
                .iter()
                .map(|child| Arc::clone(child) as NodeRef)
                .collect()
        })
    }
}
