// UI module - host command surface
//
// This module contains:
// - messages: panel commands and plugin events (JSON wire format)
// - PluginBridge: non-blocking channel from the plugin to the panel
// - CommandController: wires selection changes and panel commands to the renamer

pub mod bridge;
pub mod controller;
pub mod messages;

pub use bridge::PluginBridge;
pub use controller::CommandController;
pub use messages::{Notification, PluginEvent, UiCommand};
