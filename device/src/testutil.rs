//! Scriptable stand-ins for the node's collaborators, used by the tests.
use crate::config::PlatformConfig;
use crate::domain::{Dataset, DeviceMode, NetworkRole, Rgb8};
use crate::node::BringUpStep;
use crate::traits::led::RgbLed;
use crate::traits::platform::Platform;
use crate::traits::serial::TimedSerial;
use crate::traits::thread::ThreadStack;
use core::cell::{Cell, RefCell};
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{ErrorKind, ErrorType};
use std::boxed::Box;
use std::collections::VecDeque;
use std::vec::Vec;

/// A call made on a [`MockStack`], in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Role,
    SetLinkMode(DeviceMode),
    SetChildTimeout(u32),
    IsRouterCapable,
    SetRouterEligible(bool),
    ActiveDataset,
    SetActiveDataset(Dataset),
    SetIp6Enabled(bool),
    SetThreadEnabled(bool),
    ErasePersistentInfo,
    BecomeLeader,
}

impl Call {
    pub fn is_query(&self) -> bool {
        matches!(self, Call::Role | Call::IsRouterCapable | Call::ActiveDataset)
    }
}

/// Stack operations that can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    LinkMode,
    ChildTimeout,
    RouterEligible,
    SetDataset,
    Ip6,
    Thread,
    Erase,
    BecomeLeader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub Op);

#[derive(Debug)]
pub struct MockStack {
    calls: RefCell<Vec<Call>>,
    roles: RefCell<VecDeque<NetworkRole>>,
    last_role: Cell<NetworkRole>,
    dataset: Option<Dataset>,
    failing: Vec<Op>,
    router_capable: bool,
}

impl Default for MockStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStack {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            roles: RefCell::new(VecDeque::new()),
            last_role: Cell::new(NetworkRole::Disabled),
            dataset: None,
            failing: Vec::new(),
            router_capable: true,
        }
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = Some(dataset);
        self
    }

    pub fn router_capable(mut self, capable: bool) -> Self {
        self.router_capable = capable;
        self
    }

    pub fn failing(mut self, op: Op) -> Self {
        self.failing.push(op);
        self
    }

    /// Roles reported by successive `role()` calls. The last one sticks.
    pub fn with_roles<I: IntoIterator<Item = NetworkRole>>(self, roles: I) -> Self {
        self.roles.borrow_mut().extend(roles);
        self
    }

    /// Calls that change stack state, without the queries.
    pub fn commands(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| !c.is_query())
            .cloned()
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn result(&self, op: Op) -> Result<(), MockError> {
        if self.failing.contains(&op) {
            Err(MockError(op))
        } else {
            Ok(())
        }
    }
}

impl ThreadStack for MockStack {
    type Error = MockError;

    fn role(&self) -> NetworkRole {
        self.record(Call::Role);
        if let Some(role) = self.roles.borrow_mut().pop_front() {
            self.last_role.set(role);
        }
        self.last_role.get()
    }

    fn set_link_mode(&mut self, mode: DeviceMode) -> Result<(), MockError> {
        self.record(Call::SetLinkMode(mode));
        self.result(Op::LinkMode)
    }

    fn set_child_timeout(&mut self, timeout_secs: u32) -> Result<(), MockError> {
        self.record(Call::SetChildTimeout(timeout_secs));
        self.result(Op::ChildTimeout)
    }

    fn is_router_capable(&self) -> bool {
        self.record(Call::IsRouterCapable);
        self.router_capable
    }

    fn set_router_eligible(&mut self, eligible: bool) -> Result<(), MockError> {
        self.record(Call::SetRouterEligible(eligible));
        self.result(Op::RouterEligible)
    }

    fn active_dataset(&self) -> Option<Dataset> {
        self.record(Call::ActiveDataset);
        self.dataset.clone()
    }

    fn set_active_dataset(&mut self, dataset: &Dataset) -> Result<(), MockError> {
        self.record(Call::SetActiveDataset(dataset.clone()));
        self.result(Op::SetDataset)?;
        self.dataset = Some(dataset.clone());
        Ok(())
    }

    fn set_ip6_enabled(&mut self, enabled: bool) -> Result<(), MockError> {
        self.record(Call::SetIp6Enabled(enabled));
        self.result(Op::Ip6)
    }

    fn set_thread_enabled(&mut self, enabled: bool) -> Result<(), MockError> {
        self.record(Call::SetThreadEnabled(enabled));
        self.result(Op::Thread)
    }

    fn erase_persistent_info(&mut self) -> Result<(), MockError> {
        self.record(Call::ErasePersistentInfo);
        self.result(Op::Erase)?;
        self.dataset = None;
        Ok(())
    }

    fn become_leader(&mut self) -> Result<(), MockError> {
        self.record(Call::BecomeLeader);
        self.result(Op::BecomeLeader)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedOp {
    Set(Rgb8),
    Clear,
    Refresh,
}

/// LED recording every operation. An optional probe runs on each operation,
/// its answers are kept alongside.
pub struct MockLed<'a> {
    ops: Vec<LedOp>,
    probe: Option<Box<dyn Fn() -> bool + 'a>>,
    probed: Vec<bool>,
}

impl<'a> Default for MockLed<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> MockLed<'a> {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            probe: None,
            probed: Vec::new(),
        }
    }

    pub fn with_probe<F: Fn() -> bool + 'a>(mut self, probe: F) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    pub fn ops(&self) -> &[LedOp] {
        &self.ops
    }

    /// Colours that were actually shown, i.e. followed by a refresh.
    pub fn shown(&self) -> Vec<Option<Rgb8>> {
        let mut pending = None;
        let mut shown = Vec::new();
        for op in &self.ops {
            match op {
                LedOp::Set(c) => pending = Some(*c),
                LedOp::Clear => pending = None,
                LedOp::Refresh => shown.push(pending),
            }
        }
        shown
    }

    pub fn probed(&self) -> &[bool] {
        &self.probed
    }

    fn push(&mut self, op: LedOp) {
        if let Some(probe) = &self.probe {
            self.probed.push(probe());
        }
        self.ops.push(op);
    }
}

impl<'a> RgbLed for MockLed<'a> {
    type Error = core::convert::Infallible;

    fn set(&mut self, color: Rgb8) -> Result<(), Self::Error> {
        self.push(LedOp::Set(color));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.push(LedOp::Clear);
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), Self::Error> {
        self.push(LedOp::Refresh);
        Ok(())
    }
}

/// Delay that returns at once and remembers what it was asked for.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    nanos: Vec<u64>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn millis(&self) -> Vec<u64> {
        self.nanos.iter().map(|ns| ns / 1_000_000).collect()
    }
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.nanos.push(ns as u64);
    }

    async fn delay_us(&mut self, us: u32) {
        self.nanos.push(us as u64 * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.nanos.push(ms as u64 * 1_000_000);
    }
}

/// Serial port serving scripted reads. An exhausted script reads as a timeout.
#[derive(Debug, Default)]
pub struct MockSerial {
    reads: VecDeque<Result<Vec<u8>, ErrorKind>>,
    written: Vec<Vec<u8>>,
    timeouts: Vec<Duration>,
    fail_writes: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read(mut self, data: &[u8]) -> Self {
        self.reads.push_back(Ok(data.to_vec()));
        self
    }

    pub fn with_read_error(mut self, kind: ErrorKind) -> Self {
        self.reads.push_back(Err(kind));
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn written(&self) -> &[Vec<u8>] {
        &self.written
    }

    pub fn timeouts(&self) -> &[Duration] {
        &self.timeouts
    }
}

impl ErrorType for MockSerial {
    type Error = ErrorKind;
}

impl TimedSerial for MockSerial {
    async fn read_timeout(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, ErrorKind> {
        self.timeouts.push(timeout);
        match self.reads.pop_front() {
            Some(Ok(data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(n)
            }
            Some(Err(kind)) => Err(kind),
            None => Ok(0),
        }
    }

    async fn write_all(&mut self, buf: &[u8]) -> Result<(), ErrorKind> {
        if self.fail_writes {
            return Err(ErrorKind::BrokenPipe);
        }
        self.written.push(buf.to_vec());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformError(pub BringUpStep);

/// Platform journaling its bring-up steps and handing out a [`MockStack`].
#[derive(Debug, Default)]
pub struct MockPlatform {
    steps: Vec<BringUpStep>,
    failing: Option<BringUpStep>,
    started_with: Option<PlatformConfig>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, step: BringUpStep) -> Self {
        self.failing = Some(step);
        self
    }

    pub fn steps(&self) -> &[BringUpStep] {
        &self.steps
    }

    pub fn started_with(&self) -> Option<&PlatformConfig> {
        self.started_with.as_ref()
    }

    fn step(&mut self, step: BringUpStep) -> Result<(), PlatformError> {
        self.steps.push(step);
        if self.failing == Some(step) {
            Err(PlatformError(step))
        } else {
            Ok(())
        }
    }
}

impl Platform for MockPlatform {
    type Error = PlatformError;
    type Stack = MockStack;

    fn init_storage(&mut self) -> Result<(), PlatformError> {
        self.step(BringUpStep::Storage)
    }

    fn init_event_loop(&mut self) -> Result<(), PlatformError> {
        self.step(BringUpStep::EventLoop)
    }

    fn init_netif(&mut self) -> Result<(), PlatformError> {
        self.step(BringUpStep::Netif)
    }

    fn register_eventfds(&mut self, _max_fds: usize) -> Result<(), PlatformError> {
        self.step(BringUpStep::EventFds)
    }

    fn init_cli(&mut self) -> Result<(), PlatformError> {
        self.step(BringUpStep::Cli)
    }

    fn start_stack(&mut self, config: &PlatformConfig) -> Result<MockStack, PlatformError> {
        self.step(BringUpStep::Stack)?;
        self.started_with = Some(*config);
        Ok(MockStack::new())
    }

    fn register_cli_extension(&mut self) -> Result<(), PlatformError> {
        self.step(BringUpStep::CliExtension)
    }

    fn auto_start(&mut self) -> Result<(), PlatformError> {
        self.step(BringUpStep::AutoStart)
    }
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
pub use self::capture::{capture_logs, logs};

#[cfg(all(feature = "log", not(feature = "defmt")))]
mod capture {
    use std::string::{String, ToString};
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};
    use std::vec::Vec;

    static RECORDS: Mutex<Vec<(ThreadId, log::Level, String)>> = Mutex::new(Vec::new());

    struct Capture;

    static LOGGER: Capture = Capture;

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut records) = RECORDS.lock() {
                records.push((
                    thread::current().id(),
                    record.level(),
                    record.args().to_string(),
                ));
            }
        }

        fn flush(&self) {}
    }

    /// Route log output into memory. Safe to call from every test.
    pub fn capture_logs() {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    }

    /// Messages logged so far by the calling thread.
    pub fn logs() -> Vec<(log::Level, String)> {
        let id = thread::current().id();
        match RECORDS.lock() {
            Ok(records) => records
                .iter()
                .filter(|(t, _, _)| *t == id)
                .map(|(_, level, msg)| (*level, msg.clone()))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
