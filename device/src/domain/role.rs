use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// Position of a node in the mesh topology, as reported by the network stack.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum NetworkRole {
    Disabled = 0,
    Detached = 1,
    Child = 2,
    Router = 3,
    Leader = 4,
}

impl NetworkRole {
    /// Numeric code used by the stack's role telemetry.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            NetworkRole::Disabled => "disabled",
            NetworkRole::Detached => "detached",
            NetworkRole::Child => "child",
            NetworkRole::Router => "router",
            NetworkRole::Leader => "leader",
        }
    }

    /// Router and leader both forward traffic for other nodes.
    pub const fn is_routing(self) -> bool {
        matches!(self, NetworkRole::Router | NetworkRole::Leader)
    }
}

impl From<u8> for NetworkRole {
    fn from(code: u8) -> Self {
        match code {
            1 => NetworkRole::Detached,
            2 => NetworkRole::Child,
            3 => NetworkRole::Router,
            4 => NetworkRole::Leader,
            _ => NetworkRole::Disabled,
        }
    }
}

impl Display for NetworkRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}
