//! Node configuration selected at build time through cargo features.
use crate::bootstrap::RoleKind;
use crate::echo::ECHO_BUFFER_SIZE;
use crate::indicator::RoleLog;

/// Built-in RGB LED of the ESP32-C6 boards (WS2812).
pub const LED_GPIO: u8 = 8;
pub const LED_COUNT: usize = 1;
pub const LED_RESOLUTION_HZ: u32 = 10_000_000;

pub const UART_PORT: u8 = 1;
pub const UART_TX_PIN: u8 = 5;
pub const UART_RX_PIN: u8 = 4;
pub const UART_BAUD_RATE: u32 = 115_200;

/// Event descriptors used by the netif, the stack task queue and the radio driver.
pub const EVENTFD_COUNT: usize = 3;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedConfig {
    pub gpio: u8,
    pub count: usize,
    pub resolution_hz: u32,
}

impl LedConfig {
    pub const DEFAULT: LedConfig = LedConfig {
        gpio: LED_GPIO,
        count: LED_COUNT,
        resolution_hz: LED_RESOLUTION_HZ,
    };
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    None,
    RtsCts,
}

/// Diagnostic UART of a forming node.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    pub port: u8,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
    pub tx_pin: u8,
    pub rx_pin: u8,
    /// Size of a single read.
    pub read_buffer_size: usize,
    /// Size of the driver's receive ring.
    pub rx_ring_size: usize,
}

impl SerialConfig {
    pub const DEFAULT: SerialConfig = SerialConfig {
        port: UART_PORT,
        baud_rate: UART_BAUD_RATE,
        data_bits: DataBits::Eight,
        parity: Parity::None,
        stop_bits: StopBits::One,
        flow_control: FlowControl::None,
        tx_pin: UART_TX_PIN,
        rx_pin: UART_RX_PIN,
        read_buffer_size: ECHO_BUFFER_SIZE,
        rx_ring_size: ECHO_BUFFER_SIZE * 2,
    };
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioMode {
    /// The radio is on the same chip as the stack.
    Native,
    /// Radio co-processor reached over a UART.
    UartRcp { port: u8, baud_rate: u32 },
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostConnection {
    None,
    CliUart { port: u8, baud_rate: u32 },
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfig {
    pub storage_partition: &'static str,
    pub netif_queue_size: usize,
    pub task_queue_size: usize,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConfig {
    pub radio: RadioMode,
    pub host: HostConnection,
    pub port: PortConfig,
}

impl PlatformConfig {
    pub const fn new(cli: bool) -> Self {
        Self {
            radio: RadioMode::Native,
            host: if cli {
                HostConnection::CliUart {
                    port: 0,
                    baud_rate: UART_BAUD_RATE,
                }
            } else {
                HostConnection::None
            },
            port: PortConfig {
                storage_partition: "nvs",
                netif_queue_size: 10,
                task_queue_size: 10,
            },
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeConfig {
    pub role: RoleKind,
    pub cli: bool,
    pub cli_extension: bool,
    pub auto_start: bool,
    pub led: LedConfig,
    /// Present for forming nodes only.
    pub serial: Option<SerialConfig>,
    pub platform: PlatformConfig,
}

impl NodeConfig {
    pub const fn new(role: RoleKind, cli: bool, cli_extension: bool, auto_start: bool) -> Self {
        Self {
            role,
            cli,
            cli_extension,
            auto_start,
            led: LedConfig::DEFAULT,
            serial: if role.is_forming() {
                Some(SerialConfig::DEFAULT)
            } else {
                None
            },
            platform: PlatformConfig::new(cli),
        }
    }

    pub const fn from_features() -> Self {
        let role = if cfg!(feature = "end-device") {
            RoleKind::END_DEVICE
        } else {
            RoleKind::Forming
        };
        Self::new(
            role,
            cfg!(feature = "cli"),
            cfg!(feature = "cli-extension"),
            cfg!(feature = "auto-start"),
        )
    }

    pub const fn role_log(&self) -> RoleLog {
        RoleLog::for_role(self.role)
    }
}
