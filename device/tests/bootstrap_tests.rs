#[cfg(feature = "std")]
mod tests {
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embedded_hal_async::delay::DelayNs;
    use futures::executor::block_on;
    use thread_node::bootstrap::{BootstrapStep, StepError};
    use thread_node::testutil::*;
    use thread_node::*;

    type Stack = Shared<NoopRawMutex, MockStack>;

    fn run(shared: &Stack, kind: RoleKind) -> (BootstrapOutcome<MockError>, RecordingDelay) {
        let mut delay = RecordingDelay::new();
        let outcome = block_on(bootstrap(&shared.handle(), kind, &mut delay));
        (outcome, delay)
    }

    fn forming_commands() -> Vec<Call> {
        vec![
            Call::SetRouterEligible(true),
            Call::SetThreadEnabled(false),
            Call::SetIp6Enabled(false),
            Call::ErasePersistentInfo,
            Call::SetActiveDataset(Dataset::default_network()),
            Call::SetIp6Enabled(true),
            Call::SetThreadEnabled(true),
            Call::BecomeLeader,
        ]
    }

    #[test]
    fn test_end_device_without_credentials_creates() {
        let shared = Stack::new(MockStack::new());
        let (outcome, delay) = run(&shared, RoleKind::END_DEVICE);

        assert_eq!(JoinPath::Created, outcome.path);
        assert!(outcome.is_clean());
        assert!(outcome.promotion.is_none());
        assert!(outcome.credentials.is_none());
        assert!(delay.millis().is_empty());

        let stack = block_on(shared.handle().lock());
        assert_eq!(
            vec![
                Call::SetLinkMode(DeviceMode::END_DEVICE),
                Call::SetChildTimeout(15),
                Call::SetActiveDataset(Dataset::default_network()),
                Call::SetIp6Enabled(true),
                Call::SetThreadEnabled(true),
            ],
            stack.commands()
        );
        assert_eq!(Some(&Dataset::default_network()), stack.dataset());
    }

    #[test]
    fn test_end_device_with_credentials_joins() {
        let mut stored = Dataset::default_network();
        stored.pan_id = Some(0x1234);
        let shared = Stack::new(MockStack::new().with_dataset(stored.clone()));
        let (outcome, _) = run(&shared, RoleKind::END_DEVICE);

        assert_eq!(JoinPath::Joined, outcome.path);
        let stack = block_on(shared.handle().lock());
        assert_eq!(
            vec![
                Call::SetLinkMode(DeviceMode::END_DEVICE),
                Call::SetChildTimeout(15),
                Call::SetIp6Enabled(true),
                Call::SetThreadEnabled(true),
            ],
            stack.commands()
        );
        assert_eq!(0, stack.count(&Call::BecomeLeader));
        assert_eq!(0, stack.count(&Call::ErasePersistentInfo));
        assert_eq!(Some(&stored), stack.dataset());
    }

    #[test]
    fn test_end_device_keeps_partial_credentials() {
        let mut stored = Dataset::default_network();
        stored.security_policy = None;
        stored.pan_id = Some(0x1234);
        let shared = Stack::new(MockStack::new().with_dataset(stored.clone()));
        let (outcome, _) = run(&shared, RoleKind::END_DEVICE);

        assert_eq!(JoinPath::Joined, outcome.path);
        assert!(outcome.is_clean());
        let stack = block_on(shared.handle().lock());
        assert_eq!(
            0,
            stack
                .commands()
                .iter()
                .filter(|c| matches!(c, Call::SetActiveDataset(_)))
                .count()
        );
        assert_eq!(1, stack.count(&Call::SetThreadEnabled(true)));
        assert_eq!(Some(&stored), stack.dataset());
    }

    #[test]
    fn test_end_device_continues_after_link_mode_failure() {
        let shared = Stack::new(MockStack::new().failing(Op::LinkMode));
        let (outcome, _) = run(&shared, RoleKind::END_DEVICE);

        assert!(outcome.failed(BootstrapStep::LinkMode));
        assert_eq!(1, outcome.failures.len());
        let stack = block_on(shared.handle().lock());
        assert_eq!(1, stack.count(&Call::SetThreadEnabled(true)));
    }

    #[test]
    fn test_forming_sequence() {
        let shared = Stack::new(MockStack::new().with_dataset(Dataset::default()));
        let (outcome, delay) = run(&shared, RoleKind::Forming);

        assert_eq!(JoinPath::Created, outcome.path);
        assert!(outcome.is_clean());
        assert_eq!(Some(Ok(())), outcome.promotion);
        assert_eq!(Some(Dataset::default_network()), outcome.credentials);
        assert_eq!(vec![500, 2000], delay.millis());

        let stack = block_on(shared.handle().lock());
        assert_eq!(forming_commands(), stack.commands());
    }

    #[test]
    fn test_forming_without_router_support() {
        let shared = Stack::new(MockStack::new().router_capable(false));
        let (outcome, _) = run(&shared, RoleKind::Forming);

        assert!(outcome.is_clean());
        let stack = block_on(shared.handle().lock());
        assert_eq!(0, stack.count(&Call::SetRouterEligible(true)));
        assert_eq!(&forming_commands()[1..], &stack.commands()[..]);
    }

    #[test]
    fn test_forming_is_idempotent() {
        let shared = Stack::new(MockStack::new());
        run(&shared, RoleKind::Forming);
        let first = block_on(shared.handle().lock()).commands();
        run(&shared, RoleKind::Forming);

        let stack = block_on(shared.handle().lock());
        let all = stack.commands();
        assert_eq!(first.len() * 2, all.len());
        assert_eq!(&first[..], &all[first.len()..]);
        assert_eq!(Some(&Dataset::default_network()), stack.dataset());
    }

    #[test]
    fn test_forming_enables_after_commit_failure() {
        let shared = Stack::new(
            MockStack::new()
                .failing(Op::Erase)
                .failing(Op::SetDataset),
        );
        let (outcome, _) = run(&shared, RoleKind::Forming);

        assert!(outcome.failed(BootstrapStep::ErasePersistentInfo));
        assert!(outcome.failed(BootstrapStep::CommitDataset));
        assert!(outcome.failures.iter().any(|f| f.error
            == StepError::Stack(MockError(Op::SetDataset))));

        let stack = block_on(shared.handle().lock());
        assert_eq!(forming_commands(), stack.commands());
    }

    #[test]
    fn test_refused_promotion_is_not_retried() {
        let shared = Stack::new(MockStack::new().failing(Op::BecomeLeader));
        let (outcome, delay) = run(&shared, RoleKind::Forming);

        assert_eq!(Some(Err(MockError(Op::BecomeLeader))), outcome.promotion);
        assert!(outcome.is_clean());
        assert_eq!(Some(Dataset::default_network()), outcome.credentials);
        assert_eq!(vec![500, 2000], delay.millis());

        let stack = block_on(shared.handle().lock());
        assert_eq!(1, stack.count(&Call::BecomeLeader));
    }

    struct LockProbe<'a> {
        handle: Handle<'a, NoopRawMutex, MockStack>,
        held: Vec<bool>,
    }

    impl<'a> DelayNs for LockProbe<'a> {
        async fn delay_ns(&mut self, _ns: u32) {
            self.held.push(self.handle.is_locked());
        }
    }

    #[test]
    fn test_lock_held_for_whole_sequence() {
        let shared = Stack::new(MockStack::new());
        let handle = shared.handle();
        let mut probe = LockProbe {
            handle,
            held: Vec::new(),
        };
        block_on(bootstrap(&handle, RoleKind::Forming, &mut probe));

        assert_eq!(vec![true, true], probe.held);
        assert!(!handle.is_locked());
    }

    #[cfg(all(feature = "log", not(feature = "defmt")))]
    #[test]
    fn test_credentials_reported() {
        capture_logs();
        let shared = Stack::new(MockStack::new());
        run(&shared, RoleKind::Forming);

        let lines: Vec<String> = logs().into_iter().map(|(_, msg)| msg).collect();
        assert!(lines.iter().any(|l| l == "Network name: OpenThread"));
        assert!(lines.iter().any(|l| l == "PAN ID: 0x676b"));
        assert!(lines.iter().any(|l| l == "Extended PAN ID: dead00beef00cafe"));
        assert!(lines
            .iter()
            .any(|l| l == "Network key (use on child): c716d0753043ae2f5b63c71e3e51d7d0"));
        assert!(lines.iter().any(|l| l == "Channel: 11"));
    }
}
