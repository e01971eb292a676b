//! Mirrors the node's mesh role on the status LED.
//!
//! Each cycle samples the role under the stack lock, releases the lock and then
//! blinks once with the pattern for that role. A cycle lasts the pattern's on
//! plus off time, so the blink rate itself carries the signal.
use crate::bootstrap::RoleKind;
use crate::domain::color::{BLUE, GREEN, RED};
use crate::domain::{NetworkRole, Rgb8};
use crate::fmt::Debug2Format;
use crate::shared::Handle;
use crate::traits::led::RgbLed;
use crate::traits::thread::ThreadStack;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

/// Non-leader roles are logged once every this many cycles.
pub const ROLE_LOG_INTERVAL: u32 = 50;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorPattern {
    pub color: Rgb8,
    pub on: Duration,
    pub off: Duration,
}

impl IndicatorPattern {
    /// Leader or router: fast green blink.
    pub const ROUTING: IndicatorPattern =
        IndicatorPattern::new(GREEN, Duration::from_millis(100), Duration::from_millis(100));
    /// Attached child: medium blue blink.
    pub const CHILD: IndicatorPattern =
        IndicatorPattern::new(BLUE, Duration::from_millis(200), Duration::from_millis(200));
    /// Not attached: slow red blink.
    pub const DETACHED: IndicatorPattern =
        IndicatorPattern::new(RED, Duration::from_millis(500), Duration::from_millis(500));

    pub const fn new(color: Rgb8, on: Duration, off: Duration) -> Self {
        Self { color, on, off }
    }

    /// The only place mapping roles to colours and timings.
    pub const fn for_role(role: NetworkRole) -> Self {
        match role {
            role if role.is_routing() => Self::ROUTING,
            NetworkRole::Child => Self::CHILD,
            _ => Self::DETACHED,
        }
    }
}

/// How the loop reports the role it observes.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleLog {
    /// Diagnostic policy, not selected by any node configuration.
    EveryCycle,
    /// Every [`ROLE_LOG_INTERVAL`] cycles.
    Throttled,
    /// Announce leadership once, other roles every [`ROLE_LOG_INTERVAL`] cycles.
    LeaderOnce,
}

impl RoleLog {
    pub const fn for_role(kind: RoleKind) -> Self {
        if kind.is_forming() {
            RoleLog::LeaderOnce
        } else {
            RoleLog::Throttled
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleNotice {
    Role(NetworkRole),
    BecameLeader,
}

/// Cycle counter and leader latch deciding which observations get logged.
pub struct RoleLogger {
    policy: RoleLog,
    cycles: u32,
    leader_announced: bool,
}

impl RoleLogger {
    pub const fn new(policy: RoleLog) -> Self {
        Self {
            policy,
            cycles: 0,
            leader_announced: false,
        }
    }

    pub fn observe(&mut self, role: NetworkRole) -> Option<RoleNotice> {
        let cycle = self.cycles;
        self.cycles = self.cycles.wrapping_add(1);
        let due = cycle % ROLE_LOG_INTERVAL == 0;
        match self.policy {
            RoleLog::EveryCycle => Some(RoleNotice::Role(role)),
            RoleLog::Throttled => due.then_some(RoleNotice::Role(role)),
            RoleLog::LeaderOnce => {
                if role == NetworkRole::Leader {
                    if self.leader_announced {
                        None
                    } else {
                        self.leader_announced = true;
                        Some(RoleNotice::BecameLeader)
                    }
                } else {
                    due.then_some(RoleNotice::Role(role))
                }
            }
        }
    }
}

pub struct Indicator<'a, M, S, L, D>
where
    M: RawMutex,
{
    stack: Handle<'a, M, S>,
    led: L,
    delay: D,
    log: RoleLogger,
}

impl<'a, M, S, L, D> Indicator<'a, M, S, L, D>
where
    M: RawMutex,
    S: ThreadStack,
    L: RgbLed,
    D: DelayNs,
{
    pub fn new(stack: Handle<'a, M, S>, led: L, delay: D, policy: RoleLog) -> Self {
        Self {
            stack,
            led,
            delay,
            log: RoleLogger::new(policy),
        }
    }

    pub async fn run(&mut self) -> ! {
        info!("Role indicator running");
        loop {
            self.cycle().await;
        }
    }

    /// One sample and one blink. Returns the pattern that was shown.
    pub async fn cycle(&mut self) -> IndicatorPattern {
        let role = self.stack.with(|stack| stack.role()).await;

        match self.log.observe(role) {
            Some(RoleNotice::Role(role)) => info!("Device role: {}", role),
            Some(RoleNotice::BecameLeader) => {
                info!("Device role: {} (became leader)", role.code())
            }
            None => {}
        }

        let pattern = IndicatorPattern::for_role(role);
        self.show(Some(pattern.color));
        self.delay.delay_ms(pattern.on.as_millis() as u32).await;
        self.show(None);
        self.delay.delay_ms(pattern.off.as_millis() as u32).await;
        pattern
    }

    fn show(&mut self, color: Option<Rgb8>) {
        let result = match color {
            Some(color) => self.led.set(color),
            None => self.led.clear(),
        }
        .and_then(|_| self.led.refresh());
        if let Err(e) = result {
            warn!("Indicator LED error: {:?}", Debug2Format(&e));
        }
    }

    pub fn into_inner(self) -> (L, D) {
        (self.led, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [NetworkRole; 5] = [
        NetworkRole::Disabled,
        NetworkRole::Detached,
        NetworkRole::Child,
        NetworkRole::Router,
        NetworkRole::Leader,
    ];

    #[test]
    fn test_pattern_table() {
        let expected = [
            (RED, 500, 500),
            (RED, 500, 500),
            (BLUE, 200, 200),
            (GREEN, 100, 100),
            (GREEN, 100, 100),
        ];
        for (role, (color, on, off)) in ALL.iter().zip(expected.iter()) {
            let pattern = IndicatorPattern::for_role(*role);
            assert_eq!(*color, pattern.color);
            assert_eq!(*on, pattern.on.as_millis());
            assert_eq!(*off, pattern.off.as_millis());
        }
    }

    #[test]
    fn test_every_cycle() {
        let mut log = RoleLogger::new(RoleLog::EveryCycle);
        for role in ALL {
            assert_eq!(Some(RoleNotice::Role(role)), log.observe(role));
        }
    }

    #[test]
    fn test_throttled() {
        let mut log = RoleLogger::new(RoleLog::Throttled);
        let mut logged = 0;
        for cycle in 0..101 {
            if let Some(notice) = log.observe(NetworkRole::Child) {
                assert_eq!(0, cycle % 50);
                assert_eq!(RoleNotice::Role(NetworkRole::Child), notice);
                logged += 1;
            }
        }
        assert_eq!(3, logged);
    }

    #[test]
    fn test_leader_once() {
        let mut log = RoleLogger::new(RoleLog::LeaderOnce);
        assert_eq!(
            Some(RoleNotice::Role(NetworkRole::Detached)),
            log.observe(NetworkRole::Detached)
        );
        assert_eq!(None, log.observe(NetworkRole::Detached));
        assert_eq!(
            Some(RoleNotice::BecameLeader),
            log.observe(NetworkRole::Leader)
        );
        for _ in 0..200 {
            assert_eq!(None, log.observe(NetworkRole::Leader));
        }
    }

    #[test]
    fn test_leader_once_throttles_other_roles() {
        let mut log = RoleLogger::new(RoleLog::LeaderOnce);
        let notices = (0..100)
            .filter_map(|_| log.observe(NetworkRole::Detached))
            .count();
        assert_eq!(2, notices);
    }

    #[test]
    fn test_policy_for_role() {
        assert_eq!(RoleLog::LeaderOnce, RoleLog::for_role(RoleKind::Forming));
        assert_eq!(RoleLog::Throttled, RoleLog::for_role(RoleKind::END_DEVICE));
    }
}
