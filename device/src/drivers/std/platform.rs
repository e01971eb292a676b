use super::stack::{SimConfig, SimulatedStack};
use crate::config::{HostConnection, PlatformConfig};
use crate::fmt::Debug2Format;
use crate::traits::platform::Platform;
use core::convert::Infallible;

/// Host platform whose bring-up steps only log.
pub struct SimPlatform {
    config: SimConfig,
}

impl SimPlatform {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }
}

impl Platform for SimPlatform {
    type Error = Infallible;
    type Stack = SimulatedStack;

    fn init_storage(&mut self) -> Result<(), Self::Error> {
        debug!("Settings store ready");
        Ok(())
    }

    fn init_event_loop(&mut self) -> Result<(), Self::Error> {
        debug!("Event loop ready");
        Ok(())
    }

    fn init_netif(&mut self) -> Result<(), Self::Error> {
        debug!("Netif ready");
        Ok(())
    }

    fn register_eventfds(&mut self, max_fds: usize) -> Result<(), Self::Error> {
        debug!("Registered {} event descriptors", max_fds);
        Ok(())
    }

    fn init_cli(&mut self) -> Result<(), Self::Error> {
        debug!("CLI ready");
        Ok(())
    }

    fn start_stack(&mut self, config: &PlatformConfig) -> Result<SimulatedStack, Self::Error> {
        debug!(
            "Starting simulated stack, radio {:?}",
            Debug2Format(&config.radio)
        );
        if let HostConnection::CliUart { port, baud_rate } = config.host {
            debug!("CLI on UART{} at {} baud", port, baud_rate);
        }
        Ok(SimulatedStack::new(self.config))
    }

    fn register_cli_extension(&mut self) -> Result<(), Self::Error> {
        debug!("CLI extension commands registered");
        Ok(())
    }

    fn auto_start(&mut self) -> Result<(), Self::Error> {
        debug!("Network auto start requested");
        Ok(())
    }
}
