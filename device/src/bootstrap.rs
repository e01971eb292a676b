//! Startup decision between joining a stored network and provisioning the default one.
//!
//! Every command issued against the stack here is advisory. A failing step is
//! logged and recorded in the [`BootstrapOutcome`] and the sequence carries on.
use crate::domain::{Component, Dataset, DeviceMode};
use crate::fmt::{Debug2Format, Hex};
use crate::shared::Handle;
use crate::traits::thread::ThreadStack;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

/// Pause between enabling the interface and asking for leadership.
pub const LEADER_SETTLE_DELAY: Duration = Duration::from_millis(500);
/// Pause before reading back the credentials handed out to children.
pub const CREDENTIALS_REPORT_DELAY: Duration = Duration::from_millis(2000);
pub const CHILD_TIMEOUT_SECS: u32 = 15;

const MAX_FAILURES: usize = 8;

/// What kind of node to bring up.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    /// Always provisions a fresh network and pushes itself to leader.
    Forming,
    /// Joins with stored credentials, falling back to the default network.
    EndDevice(DeviceMode),
}

impl RoleKind {
    pub const END_DEVICE: RoleKind = RoleKind::EndDevice(DeviceMode::END_DEVICE);

    pub const fn is_forming(&self) -> bool {
        matches!(self, RoleKind::Forming)
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStep {
    LinkMode,
    ChildTimeout,
    RouterEligible,
    DisableThread,
    DisableIp6,
    ErasePersistentInfo,
    CommitDataset,
    EnableIp6,
    EnableThread,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError<E> {
    Stack(E),
    /// The dataset was not committed because a component is absent.
    Incomplete(Component),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure<E> {
    pub step: BootstrapStep,
    pub error: StepError<E>,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinPath {
    /// Stored credentials were used as they are.
    Joined,
    /// The default network was committed.
    Created,
}

#[derive(Debug)]
pub struct BootstrapOutcome<E> {
    pub path: JoinPath,
    pub failures: Vec<Failure<E>, MAX_FAILURES>,
    /// Result of the single leader promotion request, forming nodes only.
    pub promotion: Option<Result<(), E>>,
    /// Credentials read back after forming, for distribution to children.
    pub credentials: Option<Dataset>,
}

impl<E> BootstrapOutcome<E> {
    fn new(path: JoinPath) -> Self {
        Self {
            path,
            failures: Vec::new(),
            promotion: None,
            credentials: None,
        }
    }

    pub fn failed(&self, step: BootstrapStep) -> bool {
        self.failures.iter().any(|f| f.step == step)
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Configure the stack for `kind` and leave the interface enabled.
///
/// The stack lock is held for the whole sequence, delays included. Nothing
/// else touches the stack while the node is starting.
pub async fn bootstrap<M, S, D>(
    stack: &Handle<'_, M, S>,
    kind: RoleKind,
    delay: &mut D,
) -> BootstrapOutcome<S::Error>
where
    M: RawMutex,
    S: ThreadStack,
    D: DelayNs,
{
    let mut guard = stack.lock().await;
    let mut controller = Controller {
        stack: &mut *guard,
        outcome: BootstrapOutcome::new(JoinPath::Created),
    };
    match kind {
        RoleKind::EndDevice(mode) => controller.end_device(mode),
        RoleKind::Forming => controller.forming(delay).await,
    }
    controller.outcome
}

struct Controller<'s, S>
where
    S: ThreadStack,
{
    stack: &'s mut S,
    outcome: BootstrapOutcome<S::Error>,
}

impl<'s, S> Controller<'s, S>
where
    S: ThreadStack,
{
    fn end_device(&mut self, mode: DeviceMode) {
        let result = self.stack.set_link_mode(mode);
        self.advise(BootstrapStep::LinkMode, result);
        info!(
            "Configured as end device (rx on when idle: {})",
            mode.rx_on_when_idle
        );

        let result = self.stack.set_child_timeout(CHILD_TIMEOUT_SECS);
        self.advise(BootstrapStep::ChildTimeout, result);

        match self.stack.active_dataset() {
            Some(stored) => {
                if let Some(component) = stored.missing() {
                    warn!(
                        "Stored credentials lack {:?}, joining with them anyway",
                        Debug2Format(&component)
                    );
                }
                info!(
                    "Found stored credentials, joining network {}",
                    stored.network_name().unwrap_or("")
                );
                self.outcome.path = JoinPath::Joined;
                self.enable();
                info!("Thread interface started with stored credentials");
            }
            None => {
                info!("No stored credentials found, using default credentials");
                self.commit(&Dataset::default_network());
                self.enable();
                info!("Thread interface started, joining network");
            }
        }
    }

    async fn forming<D: DelayNs>(&mut self, delay: &mut D) {
        if self.stack.is_router_capable() {
            let result = self.stack.set_router_eligible(true);
            self.advise(BootstrapStep::RouterEligible, result);
        } else {
            debug!("Stack is not router capable, skipping router eligibility");
        }

        info!("Configuring router with default network credentials");
        let result = self.stack.set_thread_enabled(false);
        self.advise(BootstrapStep::DisableThread, result);
        let result = self.stack.set_ip6_enabled(false);
        self.advise(BootstrapStep::DisableIp6, result);
        let result = self.stack.erase_persistent_info();
        self.advise(BootstrapStep::ErasePersistentInfo, result);
        info!("Cleared stored network data");

        self.commit(&Dataset::default_network());
        self.enable();

        delay.delay_ms(LEADER_SETTLE_DELAY.as_millis() as u32).await;
        let promotion = self.stack.become_leader();
        match &promotion {
            Ok(_) => info!("Forced device to become leader"),
            Err(e) => info!(
                "Leader promotion result: {:?} (will become leader after attach attempts)",
                Debug2Format(e)
            ),
        }
        self.outcome.promotion = Some(promotion);
        info!("Configured as router, Thread interface started");

        delay
            .delay_ms(CREDENTIALS_REPORT_DELAY.as_millis() as u32)
            .await;
        self.outcome.credentials = self.stack.active_dataset();
        match &self.outcome.credentials {
            Some(dataset) => report_credentials(dataset),
            None => warn!("No active dataset to report"),
        }
    }

    fn commit(&mut self, dataset: &Dataset) {
        if let Some(component) = dataset.missing() {
            error!(
                "Refusing to commit dataset without {:?}",
                Debug2Format(&component)
            );
            self.record(BootstrapStep::CommitDataset, StepError::Incomplete(component));
            return;
        }
        match self.stack.set_active_dataset(dataset) {
            Ok(_) => info!("Default credentials configured and saved"),
            Err(e) => {
                error!("Failed to set dataset: {:?}", Debug2Format(&e));
                self.record(BootstrapStep::CommitDataset, StepError::Stack(e));
            }
        }
    }

    /// IPv6 first, the protocol needs it.
    fn enable(&mut self) {
        let result = self.stack.set_ip6_enabled(true);
        self.advise(BootstrapStep::EnableIp6, result);
        let result = self.stack.set_thread_enabled(true);
        self.advise(BootstrapStep::EnableThread, result);
    }

    fn advise(&mut self, step: BootstrapStep, result: Result<(), S::Error>) {
        if let Err(e) = result {
            warn!(
                "{:?} failed: {:?}",
                Debug2Format(&step),
                Debug2Format(&e)
            );
            self.record(step, StepError::Stack(e));
        }
    }

    fn record(&mut self, step: BootstrapStep, error: StepError<S::Error>) {
        if self.outcome.failures.push(Failure { step, error }).is_err() {
            warn!("Too many bootstrap failures, dropping record");
        }
    }
}

fn report_credentials(dataset: &Dataset) {
    info!("=== Network credentials for child devices ===");
    if let Some(name) = dataset.network_name() {
        info!("Network name: {}", name);
    }
    if let Some(pan_id) = dataset.pan_id {
        info!("PAN ID: 0x{}", Hex::packed(&pan_id.to_be_bytes()));
    }
    if let Some(ext) = &dataset.extended_pan_id {
        info!("Extended PAN ID: {}", Hex::packed(&ext.0));
    }
    if let Some(key) = &dataset.network_key {
        info!("Network key (use on child): {}", Hex::packed(key.as_bytes()));
    }
    if let Some(channel) = dataset.channel {
        info!("Channel: {}", channel);
    }
    info!("=============================================");
}
