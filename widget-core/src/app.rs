//! Event router: wires host-channel events to rendering and theme handling.
//!
//! The host pushes events over a channel whose receiver exists before
//! `connect` is awaited, so events fired during connection setup are buffered
//! rather than lost. Every handler body is synchronous; the widget state can
//! never be mutated concurrently.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::content::{ContentBlock, ParseError, parse_tool_result};
use crate::render::{DisplayState, render};

/// Shown in the condition region when a tool result cannot be parsed. The
/// other regions keep whatever they held before.
pub const PARSE_FAILURE_MESSAGE: &str = "Error parsing weather data";

/// Context the host exposes; only the theme is read.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct HostContext {
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

/// Events the host delivers to the widget.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Arguments the user's tool call carried; arbitrary shape.
    ToolInput { arguments: Value },
    /// A tool finished; its result arrives as content blocks.
    ToolResult { content: Vec<ContentBlock> },
    /// The host's presentation context changed.
    HostContextChanged(HostContext),
}

/// Boundary to the host application. The transport behind `connect` is the
/// host's concern; the widget only awaits readiness once at startup.
#[async_trait]
pub trait HostChannel: Send + Sync {
    async fn connect(&self) -> Result<()>;

    /// Current host context, if the host exposes one.
    fn host_context(&self) -> Option<HostContext>;

    /// One-way structured log towards the host.
    fn send_log(&self, level: LogLevel, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Disconnected,
    Connected,
}

/// The widget application: owns the display state and dispatches host events.
pub struct WidgetApp<C: HostChannel> {
    channel: C,
    events: UnboundedReceiver<HostEvent>,
    state: DisplayState,
    connection: Connection,
}

impl<C: HostChannel> WidgetApp<C> {
    /// The receiver must be obtained before the host starts emitting events;
    /// anything sent before [`connect`](Self::connect) resolves is buffered.
    pub fn new(channel: C, events: UnboundedReceiver<HostEvent>) -> Self {
        Self { channel, events, state: DisplayState::default(), connection: Connection::Disconnected }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn connection(&self) -> Connection {
        self.connection
    }

    /// Await channel readiness, then apply the host's initial theme and show
    /// a transient "Connected" footer. The next tool result overwrites it.
    pub async fn connect(&mut self) -> Result<()> {
        self.channel.connect().await.context("Failed to connect to host channel")?;
        self.connection = Connection::Connected;

        let theme = self.channel.host_context().and_then(|ctx| ctx.theme);
        self.state.set_theme(theme.as_deref());
        self.state.regions.footer = "Connected".to_string();

        Ok(())
    }

    /// Dispatch one host event. Synchronous; never fails.
    pub fn handle(&mut self, event: HostEvent) {
        match event {
            HostEvent::ToolInput { arguments } => {
                log::info!("tool input: {arguments}");
                self.channel
                    .send_log(LogLevel::Info, &format!("Received tool input: {arguments}"));
            }
            HostEvent::ToolResult { content } => match parse_tool_result(&content) {
                Ok(payload) => self.state.apply(render(&payload)),
                Err(err) => {
                    if let ParseError::MalformedJson { text, .. } = &err {
                        log::debug!("offending tool result text: {text}");
                    }
                    log::error!("failed to parse tool result: {err}");
                    self.state.regions.condition = PARSE_FAILURE_MESSAGE.to_string();
                }
            },
            HostEvent::HostContextChanged(ctx) => {
                if let Some(theme) = ctx.theme {
                    self.state.set_theme(Some(&theme));
                }
            }
        }
    }

    /// Connect, then dispatch events until the host closes the channel.
    /// Returns the final display state.
    pub async fn run(mut self) -> Result<DisplayState> {
        self.connect().await?;

        while let Some(event) = self.events.recv().await {
            self.handle(event);
        }

        Ok(self.state)
    }
}
