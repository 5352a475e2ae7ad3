use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Closed set of scene node kinds the host editor can put in a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Slice,
    Frame,
    Group,
    ComponentSet,
    Component,
    Instance,
    BooleanOperation,
    Vector,
    Star,
    Line,
    Ellipse,
    Polygon,
    Rectangle,
    Text,
    Sticky,
    Connector,
    ShapeWithText,
    CodeBlock,
    Stamp,
    Widget,
    Embed,
    LinkUnfurl,
    Media,
    Section,
    Highlight,
    WashiTape,
    Table,
}

impl NodeKind {
    /// Every kind, in the order the host documents them.
    pub const ALL: [NodeKind; 27] = [
        NodeKind::Slice,
        NodeKind::Frame,
        NodeKind::Group,
        NodeKind::ComponentSet,
        NodeKind::Component,
        NodeKind::Instance,
        NodeKind::BooleanOperation,
        NodeKind::Vector,
        NodeKind::Star,
        NodeKind::Line,
        NodeKind::Ellipse,
        NodeKind::Polygon,
        NodeKind::Rectangle,
        NodeKind::Text,
        NodeKind::Sticky,
        NodeKind::Connector,
        NodeKind::ShapeWithText,
        NodeKind::CodeBlock,
        NodeKind::Stamp,
        NodeKind::Widget,
        NodeKind::Embed,
        NodeKind::LinkUnfurl,
        NodeKind::Media,
        NodeKind::Section,
        NodeKind::Highlight,
        NodeKind::WashiTape,
        NodeKind::Table,
    ];

    /// The host's type tag for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Slice => "SLICE",
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Component => "COMPONENT",
            NodeKind::Instance => "INSTANCE",
            NodeKind::BooleanOperation => "BOOLEAN_OPERATION",
            NodeKind::Vector => "VECTOR",
            NodeKind::Star => "STAR",
            NodeKind::Line => "LINE",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Polygon => "POLYGON",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Text => "TEXT",
            NodeKind::Sticky => "STICKY",
            NodeKind::Connector => "CONNECTOR",
            NodeKind::ShapeWithText => "SHAPE_WITH_TEXT",
            NodeKind::CodeBlock => "CODE_BLOCK",
            NodeKind::Stamp => "STAMP",
            NodeKind::Widget => "WIDGET",
            NodeKind::Embed => "EMBED",
            NodeKind::LinkUnfurl => "LINK_UNFURL",
            NodeKind::Media => "MEDIA",
            NodeKind::Section => "SECTION",
            NodeKind::Highlight => "HIGHLIGHT",
            NodeKind::WashiTape => "WASHI_TAPE",
            NodeKind::Table => "TABLE",
        }
    }

    /// Component-like kinds whose names are user labels plus a counter.
    pub fn is_component(self) -> bool {
        matches!(self, NodeKind::Component | NodeKind::ComponentSet)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type tag outside the closed [`NodeKind`] set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown node kind: {0}")]
pub struct UnknownNodeKind(pub String);

impl FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| UnknownNodeKind(tag.to_string()))
    }
}

static NODE_KIND_TAGS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NodeKind::ALL.iter().map(|kind| kind.as_str()).collect());

/// Check whether `tag` is exactly (case-sensitive) one of the known kind tags.
///
/// Unknown tags yield `false` so a tree walk can log and skip the node.
pub fn is_valid_node_kind(tag: &str) -> bool {
    NODE_KIND_TAGS.contains(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tags_are_valid() {
        assert_eq!(NodeKind::ALL.len(), 27);
        for kind in NodeKind::ALL {
            assert!(is_valid_node_kind(kind.as_str()), "{} rejected", kind);
        }
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        assert!(is_valid_node_kind("FRAME"));
        assert!(!is_valid_node_kind("Frame"));
        assert!(!is_valid_node_kind("frame"));
        assert!(!is_valid_node_kind(""));
        assert!(!is_valid_node_kind("DOCUMENT"));
        assert!(!is_valid_node_kind("TABLE_CELL"));
    }

    #[test]
    fn test_from_str_round_trips_tags() {
        assert_eq!("SHAPE_WITH_TEXT".parse::<NodeKind>(), Ok(NodeKind::ShapeWithText));
        assert_eq!(
            "PAGE".parse::<NodeKind>(),
            Err(UnknownNodeKind("PAGE".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_host_tags() {
        let json = serde_json::to_string(&NodeKind::BooleanOperation).unwrap();
        assert_eq!(json, "\"BOOLEAN_OPERATION\"");

        let kind: NodeKind = serde_json::from_str("\"LINK_UNFURL\"").unwrap();
        assert_eq!(kind, NodeKind::LinkUnfurl);
    }

    #[test]
    fn test_component_kinds() {
        assert!(NodeKind::Component.is_component());
        assert!(NodeKind::ComponentSet.is_component());
        assert!(!NodeKind::Instance.is_component());
    }
}
