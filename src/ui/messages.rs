// Messages exchanged between the plugin and its panel
//
// Both directions serialize as `{"type": "...", "payload": ...}` so the panel
// can switch on the tag.

use crate::models::{RenameOptions, RenameOptionsUpdate};
use serde::{Deserialize, Serialize};

pub const PANEL_WIDTH: u32 = 240;
pub const PANEL_HEIGHT_COLLAPSED: u32 = 132;
pub const PANEL_HEIGHT_EXPANDED: u32 = 332;

pub const MSG_RENAMED: &str = "Layers renamed";
pub const MSG_NOTHING_TO_RENAME: &str = "Nothing to rename";
pub const MSG_EMPTY_SELECTION: &str = "Select at least one layer";

/// Commands sent by the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UiCommand {
    /// The settings section was opened (`true`) or closed
    SettingOpen(bool),

    /// Run the renamer over the current selection
    Rename(RenameOptionsUpdate),
}

/// Events sent to the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PluginEvent {
    /// Whether the host selection is non-empty
    SelectionChanged(bool),

    /// Resize the panel
    Resize { width: u32, height: u32 },

    /// Persisted options, sent once the plugin starts
    Settings(RenameOptions),

    /// User-visible toast
    Notify(Notification),
}

impl PluginEvent {
    /// Panel size for the given settings-section state
    pub fn resize_for(settings_open: bool) -> Self {
        let height = if settings_open {
            PANEL_HEIGHT_EXPANDED
        } else {
            PANEL_HEIGHT_COLLAPSED
        };
        PluginEvent::Resize {
            width: PANEL_WIDTH,
            height,
        }
    }
}

/// A non-blocking toast shown by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    #[serde(default)]
    pub error: bool,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: true,
        }
    }
}
