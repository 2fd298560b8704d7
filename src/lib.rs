pub mod config;

use crate::client::DashboardClient;
use crate::config::AppConfig;
use crate::dashboard::Dashboard;
use crate::panel::TracePanel;
use anyhow::Context;
use log::{debug, error, info};

pub mod client;
pub mod controls;
pub mod dashboard;
pub mod models;
pub mod panel;
pub mod protocol;
pub mod renderer;
pub mod selector;
pub mod store;

pub async fn run() -> anyhow::Result<()> {
    info!("Starting application");

    tokio::select! {
        result = main_loop() => {
            match result {
                Ok(_) => info!("Application completed successfully"),
                Err(e) => {
                    error!("Application error: {e:#}");
                    // Print chain of error causes
                    for cause in e.chain().skip(1) {
                        error!("Caused by: {cause}");
                    }
                    return Err(e).context("Application failed to run");
                }
            }
        }
    }

    Ok(())
}

async fn main_loop() -> anyhow::Result<()> {
    debug!("Loading configuration");
    let config = AppConfig::new().context("Failed to load configuration")?;

    let dashboard = Dashboard::new(&config);
    let mut client = DashboardClient::new(config.server.clone(), dashboard, Box::new(TracePanel));

    client.run().await
}
