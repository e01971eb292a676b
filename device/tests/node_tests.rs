#[cfg(feature = "std")]
mod tests {
    use thread_node::config::{HostConnection, NodeConfig};
    use thread_node::node::{bring_up, finish, BringUpStep};
    use thread_node::testutil::*;
    use thread_node::RoleKind;

    #[test]
    fn test_bring_up_order() {
        let config = NodeConfig::new(RoleKind::Forming, true, true, true);
        let mut platform = MockPlatform::new();
        bring_up(&mut platform, &config).unwrap();
        finish(&mut platform, &config).unwrap();

        assert_eq!(
            &[
                BringUpStep::Storage,
                BringUpStep::EventLoop,
                BringUpStep::Netif,
                BringUpStep::EventFds,
                BringUpStep::Cli,
                BringUpStep::Stack,
                BringUpStep::CliExtension,
                BringUpStep::AutoStart,
            ],
            platform.steps()
        );
        assert!(matches!(
            platform.started_with().unwrap().host,
            HostConnection::CliUart { port: 0, .. }
        ));
    }

    #[test]
    fn test_optional_steps_skipped() {
        let config = NodeConfig::new(RoleKind::END_DEVICE, false, false, false);
        let mut platform = MockPlatform::new();
        bring_up(&mut platform, &config).unwrap();
        finish(&mut platform, &config).unwrap();

        assert_eq!(
            &[
                BringUpStep::Storage,
                BringUpStep::EventLoop,
                BringUpStep::Netif,
                BringUpStep::EventFds,
                BringUpStep::Stack,
            ],
            platform.steps()
        );
        assert_eq!(HostConnection::None, platform.started_with().unwrap().host);
    }

    #[test]
    fn test_failure_stops_bring_up() {
        let config = NodeConfig::new(RoleKind::Forming, true, false, false);
        let mut platform = MockPlatform::new().failing(BringUpStep::Netif);
        let err = bring_up(&mut platform, &config).unwrap_err();

        assert_eq!(BringUpStep::Netif, err.step);
        assert_eq!(PlatformError(BringUpStep::Netif), err.error);
        assert_eq!(
            &[
                BringUpStep::Storage,
                BringUpStep::EventLoop,
                BringUpStep::Netif,
            ],
            platform.steps()
        );
        assert!(platform.started_with().is_none());
    }

    #[test]
    fn test_stack_failure_is_fatal() {
        let config = NodeConfig::new(RoleKind::Forming, false, false, false);
        let mut platform = MockPlatform::new().failing(BringUpStep::Stack);
        let err = bring_up(&mut platform, &config).unwrap_err();
        assert_eq!(BringUpStep::Stack, err.step);
    }
}
