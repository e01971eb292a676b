#[cfg(feature = "std")]
mod tests {
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use futures::executor::block_on;
    use thread_node::domain::color::{BLUE, GREEN, RED};
    use thread_node::indicator::RoleLog;
    use thread_node::testutil::*;
    use thread_node::*;

    const SEQUENCE: [NetworkRole; 5] = [
        NetworkRole::Disabled,
        NetworkRole::Detached,
        NetworkRole::Child,
        NetworkRole::Router,
        NetworkRole::Leader,
    ];

    #[test]
    fn test_role_changes_drive_pattern() {
        let shared: Shared<NoopRawMutex, _> = Shared::new(MockStack::new().with_roles(SEQUENCE));
        let mut indicator = Indicator::new(
            shared.handle(),
            MockLed::new(),
            RecordingDelay::new(),
            RoleLog::EveryCycle,
        );

        let patterns: Vec<IndicatorPattern> = SEQUENCE
            .iter()
            .map(|_| block_on(indicator.cycle()))
            .collect();
        assert_eq!(
            vec![
                IndicatorPattern::DETACHED,
                IndicatorPattern::DETACHED,
                IndicatorPattern::CHILD,
                IndicatorPattern::ROUTING,
                IndicatorPattern::ROUTING,
            ],
            patterns
        );

        let (led, delay) = indicator.into_inner();
        assert_eq!(
            vec![
                Some(RED),
                None,
                Some(RED),
                None,
                Some(BLUE),
                None,
                Some(GREEN),
                None,
                Some(GREEN),
                None,
            ],
            led.shown()
        );
        assert_eq!(
            vec![500, 500, 500, 500, 200, 200, 100, 100, 100, 100],
            delay.millis()
        );

        let stack = block_on(shared.handle().lock());
        assert_eq!(SEQUENCE.len(), stack.count(&Call::Role));
        assert!(stack.commands().is_empty());
    }

    #[test]
    fn test_last_role_holds() {
        let shared: Shared<NoopRawMutex, _> =
            Shared::new(MockStack::new().with_roles([NetworkRole::Child]));
        let mut indicator = Indicator::new(
            shared.handle(),
            MockLed::new(),
            RecordingDelay::new(),
            RoleLog::Throttled,
        );
        for _ in 0..3 {
            assert_eq!(IndicatorPattern::CHILD, block_on(indicator.cycle()));
        }
    }

    #[test]
    fn test_lock_released_while_blinking() {
        let shared: Shared<NoopRawMutex, _> =
            Shared::new(MockStack::new().with_roles([NetworkRole::Leader]));
        let handle = shared.handle();
        let led = MockLed::new().with_probe(move || handle.is_locked());
        let mut indicator = Indicator::new(handle, led, RecordingDelay::new(), RoleLog::LeaderOnce);

        block_on(indicator.cycle());
        block_on(indicator.cycle());

        let (led, _) = indicator.into_inner();
        assert_eq!(8, led.probed().len());
        assert!(led.probed().iter().all(|held| !held));
    }

    #[cfg(all(feature = "log", not(feature = "defmt")))]
    #[test]
    fn test_leader_announced_once() {
        capture_logs();
        let shared: Shared<NoopRawMutex, _> = Shared::new(MockStack::new().with_roles([
            NetworkRole::Detached,
            NetworkRole::Leader,
            NetworkRole::Leader,
            NetworkRole::Leader,
        ]));
        let mut indicator = Indicator::new(
            shared.handle(),
            MockLed::new(),
            RecordingDelay::new(),
            RoleLog::LeaderOnce,
        );
        for _ in 0..4 {
            block_on(indicator.cycle());
        }

        let roles: Vec<String> = logs()
            .into_iter()
            .map(|(_, msg)| msg)
            .filter(|msg| msg.starts_with("Device role:"))
            .collect();
        assert_eq!(2, roles.len());
        assert_eq!("Device role: 1 (detached)", roles[0]);
        assert_eq!("Device role: 4 (became leader)", roles[1]);
    }
}
