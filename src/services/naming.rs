use crate::models::{NodeKind, NodeRef, RenameOptions};
use crate::services::renamer::RenameError;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;

/// Computes a proposed name for a node.
///
/// Strategies may suspend (for example to look something up asynchronously)
/// but must never mutate the node; they only return a string.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NamingStrategy: Send + Sync {
    async fn generate_name(&self, node: &NodeRef, options: &RenameOptions) -> Result<String>;
}

/// Dispatches name generation to the strategy registered for a node's kind,
/// falling back to a default strategy.
pub struct NamingStrategyManager {
    default_strategy: Arc<dyn NamingStrategy>,
    overrides: IndexMap<NodeKind, Arc<dyn NamingStrategy>>,
}

impl NamingStrategyManager {
    pub fn new(default_strategy: Arc<dyn NamingStrategy>) -> Self {
        Self {
            default_strategy,
            overrides: IndexMap::new(),
        }
    }

    /// Use `strategy` for every node of `kind`
    pub fn with_override(mut self, kind: NodeKind, strategy: Arc<dyn NamingStrategy>) -> Self {
        self.overrides.insert(kind, strategy);
        self
    }

    fn strategy_for(&self, kind_tag: &str) -> &Arc<dyn NamingStrategy> {
        kind_tag
            .parse::<NodeKind>()
            .ok()
            .and_then(|kind| self.overrides.get(&kind))
            .unwrap_or(&self.default_strategy)
    }

    /// Ask the matching strategy for a new name for `node`
    pub async fn generate_name(
        &self,
        node: &NodeRef,
        options: &RenameOptions,
    ) -> Result<String, RenameError> {
        let strategy = self.strategy_for(node.kind());

        strategy
            .generate_name(node, options)
            .await
            .map_err(|source| RenameError::Strategy {
                node_id: node.id().to_string(),
                source,
            })
    }
}

impl Default for NamingStrategyManager {
    fn default() -> Self {
        Self::new(Arc::new(KindLabelStrategy))
    }
}

/// Minimal strategy naming each layer after its kind, using the same tokens the
/// classifier recognizes as plugin-generated (`frame`, `group`, `video`, ...).
///
/// Text layers keep their current name. Output follows the formatting flags:
///
/// | Kind | default | `use_pascal_case` | `show_spacing` | both |
/// |------|---------|-------------------|----------------|------|
/// | `SHAPE_WITH_TEXT` | `shape-with-text` | `ShapeWithText` | `shape - with - text` | `Shape With Text` |
#[derive(Debug, Clone, Copy, Default)]
pub struct KindLabelStrategy;

impl KindLabelStrategy {
    fn words(kind: NodeKind) -> Vec<String> {
        match kind {
            NodeKind::BooleanOperation => vec!["boolean".to_string()],
            NodeKind::Media => vec!["video".to_string()],
            other => other
                .as_str()
                .split('_')
                .map(|word| word.to_lowercase())
                .collect(),
        }
    }

    fn format(words: &[String], options: &RenameOptions) -> String {
        if options.use_pascal_case {
            let capitalized: Vec<String> = words
                .iter()
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                })
                .collect();
            let separator = if options.show_spacing { " " } else { "" };
            capitalized.join(separator)
        } else {
            let separator = if options.show_spacing { " - " } else { "-" };
            words.join(separator)
        }
    }
}

#[async_trait]
impl NamingStrategy for KindLabelStrategy {
    async fn generate_name(&self, node: &NodeRef, options: &RenameOptions) -> Result<String> {
        let kind = node.kind().parse::<NodeKind>()?;

        if kind == NodeKind::Text {
            let name = node.name();
            if name.trim().is_empty() {
                return Err(anyhow!("Text node {} has no name to keep", node.id()));
            }
            return Ok(name);
        }

        Ok(Self::format(&Self::words(kind), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentNode;

    fn node(kind: &str, name: &str) -> NodeRef {
        DocumentNode::new("7:1", kind, name).into_ref()
    }

    #[tokio::test]
    async fn test_kind_label_default_format() {
        let strategy = KindLabelStrategy;
        let options = RenameOptions::default();

        assert_eq!(
            strategy.generate_name(&node("FRAME", "Frame 1"), &options).await.unwrap(),
            "frame"
        );
        assert_eq!(
            strategy
                .generate_name(&node("SHAPE_WITH_TEXT", "x"), &options)
                .await
                .unwrap(),
            "shape-with-text"
        );
        assert_eq!(
            strategy.generate_name(&node("MEDIA", "x"), &options).await.unwrap(),
            "video"
        );
    }

    #[tokio::test]
    async fn test_kind_label_formatting_flags() {
        let strategy = KindLabelStrategy;
        let shape = node("SHAPE_WITH_TEXT", "x");

        let pascal = RenameOptions {
            use_pascal_case: true,
            ..Default::default()
        };
        assert_eq!(strategy.generate_name(&shape, &pascal).await.unwrap(), "ShapeWithText");

        let spaced = RenameOptions {
            show_spacing: true,
            ..Default::default()
        };
        assert_eq!(
            strategy.generate_name(&shape, &spaced).await.unwrap(),
            "shape - with - text"
        );

        let both = RenameOptions {
            show_spacing: true,
            use_pascal_case: true,
            ..Default::default()
        };
        assert_eq!(strategy.generate_name(&shape, &both).await.unwrap(), "Shape With Text");
    }

    #[tokio::test]
    async fn test_kind_label_keeps_text_names() {
        let strategy = KindLabelStrategy;
        let options = RenameOptions::default();

        assert_eq!(
            strategy.generate_name(&node("TEXT", "Headline"), &options).await.unwrap(),
            "Headline"
        );
        assert!(strategy.generate_name(&node("TEXT", "  "), &options).await.is_err());
    }

    #[test]
    fn test_kind_label_rejects_unknown_kind() {
        let page = node("PAGE", "Page 1");
        let result = tokio_test::block_on(
            KindLabelStrategy.generate_name(&page, &RenameOptions::default()),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_manager_dispatches_overrides() {
        let mut frame_strategy = MockNamingStrategy::new();
        frame_strategy
            .expect_generate_name()
            .times(1)
            .returning(|node, _| Ok(format!("custom-{}", node.id())));

        let manager = NamingStrategyManager::default()
            .with_override(NodeKind::Frame, Arc::new(frame_strategy));
        let options = RenameOptions::default();

        assert_eq!(
            manager.generate_name(&node("FRAME", "Frame"), &options).await.unwrap(),
            "custom-7:1"
        );
        assert_eq!(
            manager.generate_name(&node("GROUP", "Group"), &options).await.unwrap(),
            "group"
        );
    }

    #[tokio::test]
    async fn test_manager_wraps_strategy_errors() {
        let mut failing = MockNamingStrategy::new();
        failing
            .expect_generate_name()
            .returning(|_, _| Err(anyhow!("lookup failed")));

        let manager = NamingStrategyManager::new(Arc::new(failing));
        let err = manager
            .generate_name(&node("FRAME", "Frame"), &RenameOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, RenameError::Strategy { ref node_id, .. } if node_id == "7:1"));
        assert!(err.to_string().contains("7:1"));
    }
}
