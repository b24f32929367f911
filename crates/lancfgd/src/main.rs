//! LAN Configuration Parameter Daemon Entry Point

use anyhow::{Context, Result};
use ipmi_transport_common::{ChannelInfo, ChannelRegistry};
use tracing::info;

/// Parses a channel map of the form "1:eth0,2:eth1".
fn parse_channel_map(spec: &str) -> Result<ChannelRegistry> {
    let mut registry = ChannelRegistry::new();
    for entry in spec.split(',').filter(|e| !e.is_empty()) {
        let (id, ifname) = entry
            .split_once(':')
            .with_context(|| format!("malformed channel entry {entry:?}"))?;
        let id: u8 = id
            .parse()
            .with_context(|| format!("malformed channel id {id:?}"))?;
        registry = registry.with_channel(id, ChannelInfo::lan(ifname));
    }
    Ok(registry)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .init();

    info!("Starting lancfgd");

    let spec = std::env::var("IPMI_LAN_CHANNELS").unwrap_or_else(|_| "1:eth0".to_string());
    let _registry = parse_channel_map(&spec)?;

    info!(channels = %spec, "Loaded channel map");

    // The engine is driven by the command dispatch layer once a broker
    // implementation for the platform bus is connected.
    info!("lancfgd initialized successfully");

    tokio::time::sleep(tokio::time::Duration::from_secs(u64::MAX)).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_map() {
        let registry = parse_channel_map("1:eth0,2:eth1").unwrap();
        assert!(registry.is_valid(1));
        assert!(registry.is_valid(2));
        assert!(!registry.is_valid(3));
        assert_eq!(registry.name(2), Some("eth1"));
    }

    #[test]
    fn test_parse_channel_map_rejects_garbage() {
        assert!(parse_channel_map("1eth0").is_err());
        assert!(parse_channel_map("x:eth0").is_err());
    }
}
