/// Link mode of this node.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceMode {
    /// Keep the receiver on while idle instead of polling a parent.
    pub rx_on_when_idle: bool,
    /// Full thread device, able to take the router role.
    pub full_thread_device: bool,
    /// Request the full network data instead of the stable subset.
    pub full_network_data: bool,
}

impl DeviceMode {
    /// Non-sleepy end device, so the indicator keeps running.
    pub const END_DEVICE: DeviceMode = DeviceMode {
        rx_on_when_idle: true,
        full_thread_device: false,
        full_network_data: false,
    };

    pub const ROUTER: DeviceMode = DeviceMode {
        rx_on_when_idle: true,
        full_thread_device: true,
        full_network_data: true,
    };
}
