use crate::models::{NodeKind, SceneNode};
use regex::Regex;
use std::sync::LazyLock;

/// Labels the host gives boolean operation layers
pub const BOOLEAN_OPERATION_LABELS: [&str; 4] = ["Union", "Intersect", "Subtract", "Exclude"];

/// Tokens this plugin's own strategies produce
pub const PLUGIN_NAME_TOKENS: [&str; 11] = [
    "group",
    "frame",
    "grid",
    "row",
    "col",
    "video",
    "image",
    "boolean-union",
    "boolean-subtract",
    "boolean-intersect",
    "boolean-exclude",
];

/// `<word> <number>`, the host's numbering of duplicates ("Rectangle 2", "Component 12").
/// Numbers are ASCII digits only.
const WORD_NUMBER: &str = r"\S+ [0-9]+";

/// Any kind literal or boolean label, case-insensitively, or a word+number name.
static HOST_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let literals = NodeKind::ALL
        .iter()
        .map(|kind| kind.as_str())
        .chain(BOOLEAN_OPERATION_LABELS)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"^(?i:{literals})$|^{WORD_NUMBER}$")).expect("Invalid host name regex")
});

static COMPONENT_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{WORD_NUMBER}$")).expect("Invalid component name regex")
});

/// A plugin token, optionally indexed as `-[N]` or `-[N, N]`.
static PLUGIN_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let tokens = PLUGIN_NAME_TOKENS
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"^(?:{tokens})(?:-\[[0-9]+(?:, [0-9]+)?\])?$"))
        .expect("Invalid plugin name regex")
});

/// Decides whether a node still carries a name assigned by the host editor or
/// by this plugin, which makes it safe to overwrite.
///
/// All patterns are compiled once per process and shared by every call, since
/// a single selection can hold thousands of nodes.
///
/// | Kind | Generated when |
/// |------|----------------|
/// | unknown tag | never (a warning is logged) |
/// | `TEXT` | `autoRename` is set, or the name is exactly `text` |
/// | `COMPONENT`, `COMPONENT_SET` | `<word> <number>`, or a plugin name |
/// | everything else | a kind literal or boolean label (any case), `<word> <number>`, or a plugin name |
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratedNameClassifier;

impl GeneratedNameClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Check whether the node's current name was generated by the host or by this plugin
    pub fn is_host_or_plugin_generated_name(&self, node: &dyn SceneNode) -> bool {
        let kind = match node.kind().parse::<NodeKind>() {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!("Skipping node {}: {}", node.id(), e);
                return false;
            }
        };

        let name = node.name();

        if kind == NodeKind::Text {
            return node.auto_rename() || name == "text";
        }

        let host_generated = if kind.is_component() {
            COMPONENT_NAME_PATTERN.is_match(&name)
        } else {
            is_host_generated_name(&name)
        };

        host_generated || is_plugin_generated_name(&name)
    }
}

/// Generic host check, applied to every kind except text and components
pub fn is_host_generated_name(name: &str) -> bool {
    HOST_NAME_PATTERN.is_match(name)
}

pub fn is_plugin_generated_name(name: &str) -> bool {
    PLUGIN_NAME_PATTERN.is_match(name)
}
