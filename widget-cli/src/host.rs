use async_trait::async_trait;
use widget_core::{HostChannel, HostContext, LogLevel};

/// In-process stand-in for a real host application. Connecting is immediate,
/// and structured logs forwarded by the widget land in the local logger.
#[derive(Debug, Clone, Default)]
pub struct LocalChannel {
    context: HostContext,
}

impl LocalChannel {
    pub fn new(theme: Option<String>) -> Self {
        Self { context: HostContext { theme } }
    }
}

#[async_trait]
impl HostChannel for LocalChannel {
    async fn connect(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn host_context(&self) -> Option<HostContext> {
        Some(self.context.clone())
    }

    fn send_log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => log::info!("host log: {message}"),
            LogLevel::Warning => log::warn!("host log: {message}"),
            LogLevel::Error => log::error!("host log: {message}"),
        }
    }
}
