//! Core library for the weather widget.
//!
//! This crate defines:
//! - Tolerant payload access over the dual-cased weather JSON
//! - Condition-to-pictogram classification
//! - Tool-result content parsing
//! - The rendering pipeline and the host-event router
//!
//! It is used by `widget-cli`, but can be embedded by any host that can
//! implement the [`HostChannel`] boundary.

pub mod app;
pub mod content;
pub mod icon;
pub mod payload;
pub mod render;

pub use app::{Connection, HostChannel, HostContext, HostEvent, LogLevel, WidgetApp};
pub use content::{ContentBlock, ParseError, parse_tool_result};
pub use icon::{ICON_RULES, Icon, classify};
pub use payload::RawPayload;
pub use render::{DisplayState, PLACEHOLDER, Regions, render};
