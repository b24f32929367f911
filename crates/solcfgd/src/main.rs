//! Serial-over-LAN Configuration Daemon Entry Point

use anyhow::Result;
use ipmi_transport_common::{ChannelInfo, ChannelRegistry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .init();

    info!("Starting solcfgd");

    let ifname = std::env::var("IPMI_SOL_INTERFACE").unwrap_or_else(|_| "eth0".to_string());
    let _registry = ChannelRegistry::new().with_channel(1, ChannelInfo::lan(&ifname));

    info!(interface = %ifname, "Bound SOL channel");

    // The engine is driven by the command dispatch layer once a broker
    // implementation for the platform bus is connected.
    info!("solcfgd initialized successfully");

    tokio::time::sleep(tokio::time::Duration::from_secs(u64::MAX)).await;
    Ok(())
}
