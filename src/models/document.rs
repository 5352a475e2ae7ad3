use crate::models::scene::{DocumentNode, NodeRef, SceneNodeRecord};
use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::Arc;

/// On-disk layout: a bare array of roots, or `{ "selection": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DocumentFile {
    Roots(Vec<SceneNodeRecord>),
    Selection { selection: Vec<SceneNodeRecord> },
}

/// A scene document loaded into memory.
///
/// Holds the selection roots in order. Saving writes the same layout that was read.
#[derive(Debug)]
pub struct SceneDocument {
    roots: Vec<Arc<DocumentNode>>,
    wrapped: bool,
}

impl SceneDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DocumentFile =
            serde_json::from_str(json).context("Failed to parse scene document")?;

        let (records, wrapped) = match file {
            DocumentFile::Roots(records) => (records, false),
            DocumentFile::Selection { selection } => (selection, true),
        };

        Ok(Self {
            roots: records.into_iter().map(DocumentNode::from_record).collect(),
            wrapped,
        })
    }

    pub fn load<P: AsRef<Utf8Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene document: {}", path))?;

        let document =
            Self::from_json(&content).with_context(|| format!("Invalid scene document: {}", path))?;
        tracing::debug!("Loaded {} root(s) from {}", document.roots.len(), path);
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String> {
        let records = self.roots.iter().map(|node| node.to_record()).collect();
        let file = if self.wrapped {
            DocumentFile::Selection { selection: records }
        } else {
            DocumentFile::Roots(records)
        };
        serde_json::to_string_pretty(&file).context("Failed to serialize scene document")
    }

    pub fn save<P: AsRef<Utf8Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write scene document: {}", path))?;
        tracing::info!("Saved scene document to {}", path);
        Ok(())
    }

    pub fn roots(&self) -> &[Arc<DocumentNode>] {
        &self.roots
    }

    /// Roots as host handles, in document order
    pub fn selection(&self) -> Vec<NodeRef> {
        self.roots
            .iter()
            .map(|node| Arc::clone(node) as NodeRef)
            .collect()
    }
}
