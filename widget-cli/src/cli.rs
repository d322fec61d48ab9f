use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tokio::sync::mpsc;
use widget_core::{ContentBlock, DisplayState, HostEvent, WidgetApp};

use crate::host::LocalChannel;
use crate::open_meteo::OpenMeteoService;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Render the weather widget for a location")]
pub struct Cli {
    /// City name, address, or zip code. Blank falls back to Seattle, WA.
    #[arg(default_value = "")]
    pub location: String,

    /// Presentation theme handed to the widget as initial host context.
    #[arg(long)]
    pub theme: Option<String>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let service = OpenMeteoService::new();
        let report = service.current_weather(&self.location).await;
        let report_json =
            serde_json::to_string(&report).context("Failed to serialize weather report")?;

        // Feed the widget the same event sequence a real host would: the tool
        // input first, then the result as a text content block.
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(HostEvent::ToolInput { arguments: json!({ "location": self.location }) })?;
        tx.send(HostEvent::ToolResult { content: vec![ContentBlock::text(report_json)] })?;
        drop(tx);

        let app = WidgetApp::new(LocalChannel::new(self.theme), rx);
        let state = app.run().await?;

        print_widget(&state);
        Ok(())
    }
}

fn print_widget(state: &DisplayState) {
    let regions = &state.regions;

    println!("{}  {}", regions.icon, regions.location);
    println!("{}", regions.condition);
    println!("Temperature  {}", regions.temperature);
    println!("Humidity     {}", regions.humidity);
    println!("Wind         {}", regions.wind);
    println!("{}", regions.footer);
}
