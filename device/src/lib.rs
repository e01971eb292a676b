#![macro_use]
#![cfg_attr(not(feature = "std"), no_std)]
//! Startup and status logic for a Thread mesh node.
//!
//! A node is built either as a network forming router or as an end device
//! (cargo feature `end-device`). After the platform is brought up
//! ([`node::bring_up`]), the [`bootstrap`] controller decides whether to join
//! with stored credentials or provision the default network, the
//! [`indicator`] loop mirrors the mesh role on an RGB LED, and forming nodes
//! additionally run a [`echo`] loop on their diagnostic UART.
//!
//! The Thread stack, LED and UART are reached through the traits in
//! [`traits`]. Host implementations live in `drivers::std` and back the
//! simulation app and the tests.
//!
//! # Example
//!
//! ```ignore
//! let stack = STACK.init(Shared::new(node::bring_up(&mut platform, &config)?));
//! let handle = stack.handle();
//! let outcome = bootstrap(&handle, config.role, &mut Delay).await;
//! node::finish(&mut platform, &config)?;
//!
//! let mut indicator = Indicator::new(handle, led, Delay, config.role_log());
//! indicator.run().await
//! ```

pub(crate) mod fmt;

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod echo;
pub mod indicator;
pub mod node;
pub mod shared;
pub mod traits;

#[cfg(feature = "std")]
pub mod drivers;

#[cfg(feature = "std")]
pub mod testutil;

pub use bootstrap::{bootstrap, BootstrapOutcome, JoinPath, RoleKind};
pub use config::NodeConfig;
pub use domain::{Dataset, DeviceMode, NetworkRole, Rgb8};
pub use echo::SerialEcho;
pub use indicator::{Indicator, IndicatorPattern};
pub use shared::{Handle, Shared};
