mod app;
mod config;
mod error;
mod upload;
mod utils;

use anyhow::{anyhow, Context, Result};
use app::ReflowableApp;
use config::ConverterConfig;
use eframe::CreationContext;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reflowable=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = ConverterConfig::from_env().context("Invalid conversion service address")?;
    info!(base_url = %config.base_url, "Using conversion service");

    let transport =
        upload::HttpTransport::new(&config).context("Could not set up the HTTP client")?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 420.0])
            .with_min_inner_size([400.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Reflowable",
        options,
        Box::new(move |cc: &CreationContext| {
            Box::new(ReflowableApp::new(cc, config, transport)) as Box<dyn eframe::App>
        }),
    )
    .map_err(|e| anyhow!("Failed to open the window: {e}"))
}
