//! Zenoh bridge for Growatt solar inverters and smart meters.
//!
//! Polls Growatt devices over Modbus (RTU or TCP) and publishes decoded
//! telemetry and settings to Zenoh.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use sunsight_common::{Format, LoggingConfig, status_key};
use zenoh_bridge_growatt::config::GrowattBridgeConfig;
use zenoh_bridge_growatt::registry::Registry;
use zenoh_bridge_growatt::scheduler::{Device, Scheduler};
use zenoh_bridge_growatt::sink::ZenohSink;
use zenoh_bridge_growatt::transport::ModbusTransport;

/// Zenoh bridge for Growatt inverters and meters (Modbus TCP/RTU).
#[derive(Parser, Debug)]
#[command(name = "zenoh-bridge-growatt")]
#[command(about = "Polls Growatt devices and publishes to Zenoh")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format)
    #[arg(short, long, default_value = "growatt.json5")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = GrowattBridgeConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    // Initialize logging
    let log_config = LoggingConfig {
        level: args
            .log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone()),
        format: config.logging.format,
    };
    sunsight_common::init_tracing(&log_config)
        .map_err(|e| anyhow::anyhow!("Failed to init tracing: {}", e))?;

    info!("Starting zenoh-bridge-growatt");
    info!("Loaded configuration from {:?}", args.config);

    // Build the model registry; an inconsistent register table is a bug,
    // not a runtime condition
    let registry = Registry::with_builtin_models().context("Invalid register tables")?;

    // Resolve each configured device against the catalogue. Unknown
    // models are logged once and left out; the rest of the site keeps
    // working
    let timing = config.growatt.timing.to_timing();
    let mut devices = Vec::new();
    for device in &config.growatt.devices {
        match registry.plan(&device.model) {
            Some(plan) => {
                devices.push(Device::new(
                    device.name.clone(),
                    device.unit_id,
                    device.measurement(),
                    &config.growatt.key_prefix,
                    plan,
                    &timing,
                ));
            }
            None => {
                warn!(
                    device = %device.name,
                    model = %device.model,
                    known = ?registry.models(),
                    "Unknown model, device will not be polled"
                );
            }
        }
    }

    // Connect to the bus
    info!(bus = ?config.bus.connection, "Connecting to Modbus");
    let transport = ModbusTransport::connect(&config.bus)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Modbus: {}", e))?;

    // Connect to Zenoh
    let session = sunsight_common::connect(&config.zenoh)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Zenoh: {}", e))?;
    let session = Arc::new(session);

    let sink = ZenohSink::new(session.clone());
    let device_names: Vec<String> = devices.iter().map(|d| d.name().to_string()).collect();
    let scheduler = Scheduler::new(transport, sink, devices, timing, Format::Json);

    let poll_task = tokio::spawn(scheduler.run());

    info!(
        "Growatt bridge running with {} device(s)",
        device_names.len()
    );

    // Publish bridge status
    let status_key = status_key(&config.growatt.key_prefix);
    let status = serde_json::json!({
        "bridge": "growatt",
        "version": env!("CARGO_PKG_VERSION"),
        "devices": device_names,
        "status": "running"
    });

    if let Err(e) = session.put(&status_key, status.to_string()).await {
        error!("Failed to publish bridge status: {}", e);
    }

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal");

    poll_task.abort();

    // Publish offline status
    let status = serde_json::json!({
        "bridge": "growatt",
        "status": "offline"
    });
    let _ = session.put(&status_key, status.to_string()).await;

    session
        .close()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to close Zenoh session: {}", e))?;
    info!("Growatt bridge stopped");

    Ok(())
}
