//! Channel id to interface mapping.
//!
//! Stands in for the platform channel configuration: each management
//! channel maps to a network interface name, a medium type and a session
//! support level. The registry is built once at daemon startup.

use std::collections::HashMap;

/// Channel selector meaning "the channel this request arrived on".
pub const CURRENT_CHANNEL: u8 = 0x0E;

/// Highest addressable channel id (0xF is reserved by the protocol).
pub const MAX_CHANNEL: u8 = 0x0D;

/// Physical medium of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMedium {
    /// 802.3 LAN.
    Lan8032,
    /// Serial/modem.
    Serial,
    /// Anything else.
    Other,
}

/// Session support level of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSupport {
    None,
    Single,
    Multi,
}

/// Static configuration of one channel.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    /// Network interface name (e.g., "eth0").
    pub name: String,
    pub medium: ChannelMedium,
    pub session_support: SessionSupport,
}

impl ChannelInfo {
    /// A multi-session LAN channel, the common case.
    pub fn lan(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            medium: ChannelMedium::Lan8032,
            session_support: SessionSupport::Multi,
        }
    }
}

/// Channel id lookup table.
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    channels: HashMap<u8, ChannelInfo>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style channel registration.
    pub fn with_channel(mut self, id: u8, info: ChannelInfo) -> Self {
        self.channels.insert(id, info);
        self
    }

    /// Replaces the channel selector 0xE with the caller's own channel.
    pub fn resolve_current(&self, bits: u8, ctx_channel: u8) -> u8 {
        if bits == CURRENT_CHANNEL {
            ctx_channel
        } else {
            bits
        }
    }

    /// A channel is valid when it is in range and has a configured name.
    pub fn is_valid(&self, channel: u8) -> bool {
        channel <= MAX_CHANNEL && self.channels.contains_key(&channel)
    }

    /// Interface name for the channel, if configured.
    pub fn name(&self, channel: u8) -> Option<&str> {
        self.channels.get(&channel).map(|c| c.name.as_str())
    }

    pub fn medium(&self, channel: u8) -> ChannelMedium {
        self.channels
            .get(&channel)
            .map(|c| c.medium)
            .unwrap_or(ChannelMedium::Other)
    }

    pub fn session_support(&self, channel: u8) -> SessionSupport {
        self.channels
            .get(&channel)
            .map(|c| c.session_support)
            .unwrap_or(SessionSupport::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ChannelRegistry {
        ChannelRegistry::new().with_channel(1, ChannelInfo::lan("eth0"))
    }

    #[test]
    fn test_resolve_current() {
        let reg = registry();
        assert_eq!(reg.resolve_current(CURRENT_CHANNEL, 1), 1);
        assert_eq!(reg.resolve_current(2, 1), 2);
    }

    #[test]
    fn test_is_valid() {
        let reg = registry();
        assert!(reg.is_valid(1));
        assert!(!reg.is_valid(2));
        assert!(!reg.is_valid(0x0F));
    }

    #[test]
    fn test_lookups() {
        let reg = registry();
        assert_eq!(reg.name(1), Some("eth0"));
        assert_eq!(reg.name(9), None);
        assert_eq!(reg.medium(1), ChannelMedium::Lan8032);
        assert_eq!(reg.medium(9), ChannelMedium::Other);
        assert_eq!(reg.session_support(1), SessionSupport::Multi);
        assert_eq!(reg.session_support(9), SessionSupport::None);
    }
}
