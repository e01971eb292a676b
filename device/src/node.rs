//! Fixed-order subsystem bring-up around the bootstrap.
//!
//! Run [`bring_up`], share the returned stack, run
//! [`crate::bootstrap::bootstrap`], then [`finish`]. A failure in either
//! function is a broken precondition and the node should not continue.
use crate::config::{NodeConfig, EVENTFD_COUNT};
use crate::fmt::Debug2Format;
use crate::traits::platform::Platform;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpStep {
    Storage,
    EventLoop,
    Netif,
    EventFds,
    Cli,
    Stack,
    CliExtension,
    AutoStart,
}

#[derive(Debug)]
pub struct NodeError<E> {
    pub step: BringUpStep,
    pub error: E,
}

fn check<T, E>(step: BringUpStep, result: Result<T, E>) -> Result<T, NodeError<E>>
where
    E: core::fmt::Debug,
{
    result.map_err(|error| {
        error!(
            "Bring-up step {:?} failed: {:?}",
            Debug2Format(&step),
            Debug2Format(&error)
        );
        NodeError { step, error }
    })
}

/// Everything up to and including starting the stack.
pub fn bring_up<P>(platform: &mut P, config: &NodeConfig) -> Result<P::Stack, NodeError<P::Error>>
where
    P: Platform,
{
    check(BringUpStep::Storage, platform.init_storage())?;
    check(BringUpStep::EventLoop, platform.init_event_loop())?;
    check(BringUpStep::Netif, platform.init_netif())?;
    check(BringUpStep::EventFds, platform.register_eventfds(EVENTFD_COUNT))?;
    if config.cli {
        check(BringUpStep::Cli, platform.init_cli())?;
    }
    let stack = check(BringUpStep::Stack, platform.start_stack(&config.platform))?;
    info!("Thread platform started");
    Ok(stack)
}

/// Steps that follow the bootstrap.
pub fn finish<P>(platform: &mut P, config: &NodeConfig) -> Result<(), NodeError<P::Error>>
where
    P: Platform,
{
    if config.cli_extension {
        check(BringUpStep::CliExtension, platform.register_cli_extension())?;
    }
    if config.auto_start {
        check(BringUpStep::AutoStart, platform.auto_start())?;
    }
    Ok(())
}
