use crate::config::PlatformConfig;
use crate::traits::thread::ThreadStack;
use core::fmt::Debug;

/// One-time subsystem bring-up performed before the network stack is usable.
///
/// Any error returned here is fatal to the node.
pub trait Platform {
    type Error: Debug;
    type Stack: ThreadStack;

    /// Non-volatile storage backing the stack's settings.
    fn init_storage(&mut self) -> Result<(), Self::Error>;

    fn init_event_loop(&mut self) -> Result<(), Self::Error>;

    fn init_netif(&mut self) -> Result<(), Self::Error>;

    /// Reserve event notification descriptors for the netif, the stack task queue and the radio.
    fn register_eventfds(&mut self, max_fds: usize) -> Result<(), Self::Error>;

    fn init_cli(&mut self) -> Result<(), Self::Error>;

    /// Start the stack with its radio, host and port configuration.
    fn start_stack(&mut self, config: &PlatformConfig) -> Result<Self::Stack, Self::Error>;

    fn register_cli_extension(&mut self) -> Result<(), Self::Error>;

    /// Hook for bringing the network up automatically after startup.
    fn auto_start(&mut self) -> Result<(), Self::Error>;
}
