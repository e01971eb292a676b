use crate::domain::{Dataset, DeviceMode, NetworkRole};
use core::fmt::Debug;

/// Command and query surface of the Thread network stack.
///
/// Calls are synchronous and must be made while holding the lock over the
/// shared stack handle, see [`crate::shared::Handle`].
pub trait ThreadStack {
    type Error: Debug;

    /// Current role of this node.
    fn role(&self) -> NetworkRole;

    fn set_link_mode(&mut self, mode: DeviceMode) -> Result<(), Self::Error>;

    /// Seconds a parent waits without hearing from this child before dropping it.
    fn set_child_timeout(&mut self, timeout_secs: u32) -> Result<(), Self::Error>;

    /// Whether the stack was built with full thread device support.
    fn is_router_capable(&self) -> bool;

    fn set_router_eligible(&mut self, eligible: bool) -> Result<(), Self::Error>;

    /// The persisted active dataset, if one is stored.
    fn active_dataset(&self) -> Option<Dataset>;

    /// Commit and persist a new active dataset.
    fn set_active_dataset(&mut self, dataset: &Dataset) -> Result<(), Self::Error>;

    fn set_ip6_enabled(&mut self, enabled: bool) -> Result<(), Self::Error>;

    fn set_thread_enabled(&mut self, enabled: bool) -> Result<(), Self::Error>;

    /// Wipe all persisted network information.
    fn erase_persistent_info(&mut self) -> Result<(), Self::Error>;

    /// Ask the stack to take the leader role right away.
    fn become_leader(&mut self) -> Result<(), Self::Error>;
}
