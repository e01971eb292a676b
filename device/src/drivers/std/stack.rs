use crate::domain::{Dataset, DeviceMode, NetworkRole};
use crate::traits::thread::ThreadStack;
use std::collections::HashMap;
use embassy_time::{Duration, Instant};
use std::vec::Vec;

const ACTIVE_DATASET_KEY: u16 = 0x0001;

/// Key-value settings store standing in for the flash backed one.
#[derive(Debug, Default, Clone)]
pub struct SettingsStore {
    entries: HashMap<u16, Vec<u8>>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: u16) -> Option<&[u8]> {
        self.entries.get(&key).map(|v| v.as_slice())
    }

    pub fn set(&mut self, key: u16, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    pub fn remove(&mut self, key: u16) {
        self.entries.remove(&key);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub router_capable: bool,
    /// Time spent detached before the node settles on a role by itself.
    pub attach_timeout: Duration,
    /// Answer leader promotion requests with an error.
    pub refuse_promotion: bool,
    /// Whether a parent router is in range for an end device.
    pub parent_reachable: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            router_capable: true,
            attach_timeout: Duration::from_secs(3),
            refuse_promotion: false,
            parent_reachable: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    InvalidState,
    NotCapable,
    Codec,
}

/// A single simulated Thread node.
///
/// Once enabled with a dataset the node is detached. A router eligible node
/// becomes leader when promoted or after the attach timeout; an end device
/// becomes a child after the attach timeout if a parent is reachable.
pub struct SimulatedStack {
    config: SimConfig,
    settings: SettingsStore,
    mode: DeviceMode,
    router_eligible: bool,
    child_timeout: u32,
    ip6: bool,
    thread: bool,
    attach_started: Option<Instant>,
    leader: bool,
}

impl SimulatedStack {
    pub fn new(config: SimConfig) -> Self {
        Self::with_settings(config, SettingsStore::new())
    }

    /// Start from settings persisted by an earlier run.
    pub fn with_settings(config: SimConfig, settings: SettingsStore) -> Self {
        Self {
            config,
            settings,
            mode: DeviceMode::ROUTER,
            router_eligible: config.router_capable,
            child_timeout: 240,
            ip6: false,
            thread: false,
            attach_started: None,
            leader: false,
        }
    }

    pub fn into_settings(self) -> SettingsStore {
        self.settings
    }

    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    pub fn child_timeout(&self) -> u32 {
        self.child_timeout
    }

    pub fn is_ip6_enabled(&self) -> bool {
        self.ip6
    }

    pub fn is_thread_enabled(&self) -> bool {
        self.thread
    }

    fn can_lead(&self) -> bool {
        self.config.router_capable && self.mode.full_thread_device && self.router_eligible
    }
}

impl ThreadStack for SimulatedStack {
    type Error = SimError;

    fn role(&self) -> NetworkRole {
        if !self.thread {
            return NetworkRole::Disabled;
        }
        if self.leader {
            return NetworkRole::Leader;
        }
        match self.attach_started {
            Some(started) if started.elapsed() >= self.config.attach_timeout => {
                if self.can_lead() {
                    NetworkRole::Leader
                } else if self.config.parent_reachable {
                    NetworkRole::Child
                } else {
                    NetworkRole::Detached
                }
            }
            _ => NetworkRole::Detached,
        }
    }

    fn set_link_mode(&mut self, mode: DeviceMode) -> Result<(), SimError> {
        if mode.full_thread_device && !self.config.router_capable {
            return Err(SimError::NotCapable);
        }
        self.mode = mode;
        Ok(())
    }

    fn set_child_timeout(&mut self, timeout_secs: u32) -> Result<(), SimError> {
        self.child_timeout = timeout_secs;
        Ok(())
    }

    fn is_router_capable(&self) -> bool {
        self.config.router_capable
    }

    fn set_router_eligible(&mut self, eligible: bool) -> Result<(), SimError> {
        if !self.config.router_capable {
            return Err(SimError::NotCapable);
        }
        self.router_eligible = eligible;
        Ok(())
    }

    fn active_dataset(&self) -> Option<Dataset> {
        self.settings
            .get(ACTIVE_DATASET_KEY)
            .and_then(|bytes| serde_cbor::from_slice(bytes).ok())
    }

    fn set_active_dataset(&mut self, dataset: &Dataset) -> Result<(), SimError> {
        let bytes = serde_cbor::to_vec(dataset).map_err(|_| SimError::Codec)?;
        self.settings.set(ACTIVE_DATASET_KEY, bytes);
        Ok(())
    }

    fn set_ip6_enabled(&mut self, enabled: bool) -> Result<(), SimError> {
        if !enabled && self.thread {
            return Err(SimError::InvalidState);
        }
        self.ip6 = enabled;
        Ok(())
    }

    fn set_thread_enabled(&mut self, enabled: bool) -> Result<(), SimError> {
        if enabled {
            if !self.ip6 {
                return Err(SimError::InvalidState);
            }
            if !self.thread {
                self.thread = true;
                self.attach_started = self.active_dataset().map(|_| Instant::now());
            }
        } else {
            self.thread = false;
            self.leader = false;
            self.attach_started = None;
        }
        Ok(())
    }

    fn erase_persistent_info(&mut self) -> Result<(), SimError> {
        if self.thread {
            return Err(SimError::InvalidState);
        }
        self.settings.remove(ACTIVE_DATASET_KEY);
        Ok(())
    }

    fn become_leader(&mut self) -> Result<(), SimError> {
        if !self.thread || self.attach_started.is_none() {
            return Err(SimError::InvalidState);
        }
        if !self.can_lead() {
            return Err(SimError::NotCapable);
        }
        if self.config.refuse_promotion {
            return Err(SimError::InvalidState);
        }
        self.leader = true;
        Ok(())
    }
}
