//! Host implementations of the node's collaborators, for simulation and tests.
mod led;
mod platform;
mod serial;
mod stack;

pub use led::ConsoleLed;
pub use platform::SimPlatform;
pub use serial::PipeSerial;
pub use stack::{SettingsStore, SimConfig, SimError, SimulatedStack};
