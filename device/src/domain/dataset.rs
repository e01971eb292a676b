//! Operational dataset: the credentials needed to join or form a Thread network.
//!
//! Every component is optional. A component that is `None` is not part of the
//! dataset, mirroring the per-component "present" flags of the stack's own
//! representation.
use core::fmt::{Debug, Formatter};
use serde::{Deserialize, Serialize};

pub const NETWORK_NAME_MAX_LEN: usize = 16;

pub type NetworkName = heapless::String<NETWORK_NAME_MAX_LEN>;

pub const DEFAULT_NETWORK_NAME: &str = "OpenThread";
pub const DEFAULT_PAN_ID: u16 = 0x676b;
pub const DEFAULT_EXTENDED_PAN_ID: ExtendedPanId =
    ExtendedPanId([0xde, 0xad, 0x00, 0xbe, 0xef, 0x00, 0xca, 0xfe]);
pub const DEFAULT_NETWORK_KEY: NetworkKey = NetworkKey([
    0xc7, 0x16, 0xd0, 0x75, 0x30, 0x43, 0xae, 0x2f, 0x5b, 0x63, 0xc7, 0x1e, 0x3e, 0x51, 0xd7, 0xd0,
]);
pub const DEFAULT_CHANNEL: u16 = 11;
/// Channels 11 through 26.
pub const DEFAULT_CHANNEL_MASK: ChannelMask = ChannelMask(0x07ff_f800);
pub const DEFAULT_ACTIVE_TIMESTAMP: Timestamp = Timestamp {
    seconds: 1,
    ticks: 0,
    authoritative: false,
};
pub const DEFAULT_SECURITY_POLICY: SecurityPolicy = SecurityPolicy {
    rotation_hours: 672,
    obtain_network_key: true,
    native_commissioning: true,
    routers: true,
    external_commissioning: true,
};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: u64,
    pub ticks: u16,
    pub authoritative: bool,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedPanId(pub [u8; 8]);

/// Network master key. `Debug` does not print the key material.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkKey(pub [u8; 16]);

impl NetworkKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for NetworkKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "NetworkKey(..)")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for NetworkKey {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "NetworkKey(..)");
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMask(pub u32);

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityPolicy {
    /// Key rotation interval in hours.
    pub rotation_hours: u16,
    pub obtain_network_key: bool,
    pub native_commissioning: bool,
    pub routers: bool,
    pub external_commissioning: bool,
}

/// Dataset components, in the order they are checked for presence.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    ActiveTimestamp,
    NetworkName,
    PanId,
    ExtendedPanId,
    NetworkKey,
    Channel,
    ChannelMask,
    SecurityPolicy,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub active_timestamp: Option<Timestamp>,
    pub network_name: Option<NetworkName>,
    pub pan_id: Option<u16>,
    pub extended_pan_id: Option<ExtendedPanId>,
    pub network_key: Option<NetworkKey>,
    pub channel: Option<u16>,
    pub channel_mask: Option<ChannelMask>,
    pub security_policy: Option<SecurityPolicy>,
}

impl Dataset {
    /// The fixed network every node provisions when it creates rather than joins.
    ///
    /// Paired nodes expect these exact values.
    pub fn default_network() -> Self {
        Self {
            active_timestamp: Some(DEFAULT_ACTIVE_TIMESTAMP),
            network_name: NetworkName::try_from(DEFAULT_NETWORK_NAME).ok(),
            pan_id: Some(DEFAULT_PAN_ID),
            extended_pan_id: Some(DEFAULT_EXTENDED_PAN_ID),
            network_key: Some(DEFAULT_NETWORK_KEY),
            channel: Some(DEFAULT_CHANNEL),
            channel_mask: Some(DEFAULT_CHANNEL_MASK),
            security_policy: Some(DEFAULT_SECURITY_POLICY),
        }
    }

    /// First component that is not present, if any.
    pub fn missing(&self) -> Option<Component> {
        if self.active_timestamp.is_none() {
            Some(Component::ActiveTimestamp)
        } else if self.network_name.is_none() {
            Some(Component::NetworkName)
        } else if self.pan_id.is_none() {
            Some(Component::PanId)
        } else if self.extended_pan_id.is_none() {
            Some(Component::ExtendedPanId)
        } else if self.network_key.is_none() {
            Some(Component::NetworkKey)
        } else if self.channel.is_none() {
            Some(Component::Channel)
        } else if self.channel_mask.is_none() {
            Some(Component::ChannelMask)
        } else if self.security_policy.is_none() {
            Some(Component::SecurityPolicy)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_none()
    }

    pub fn network_name(&self) -> Option<&str> {
        self.network_name.as_ref().map(|n| n.as_str())
    }
}
