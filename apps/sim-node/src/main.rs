use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use embassy_time::{Delay, Duration, Timer};
use static_cell::StaticCell;
use thread_node::drivers::std::*;
use thread_node::node::{bring_up, finish};
use thread_node::traits::serial::Timeout;
use thread_node::*;

const PIPE_SIZE: usize = 256;

type NodeStack = Shared<CriticalSectionRawMutex, SimulatedStack>;
type StackHandle = Handle<'static, CriticalSectionRawMutex, SimulatedStack>;
type Uart = Timeout<PipeSerial<'static, CriticalSectionRawMutex, PIPE_SIZE>>;

static STACK: StaticCell<NodeStack> = StaticCell::new();

// Host side of the diagnostic UART: frames go out on UART_RX, echoes come back on UART_TX.
static UART_RX: Pipe<CriticalSectionRawMutex, PIPE_SIZE> = Pipe::new();
static UART_TX: Pipe<CriticalSectionRawMutex, PIPE_SIZE> = Pipe::new();

#[embassy_executor::task]
async fn indicator_task(
    mut indicator: Indicator<'static, CriticalSectionRawMutex, SimulatedStack, ConsoleLed, Delay>,
) {
    indicator.run().await
}

#[embassy_executor::task]
async fn echo_task(mut echo: SerialEcho<Uart>) {
    echo.run().await
}

#[embassy_executor::task]
async fn host_task() {
    let mut counter: u8 = 0;
    let mut buf = [0; PIPE_SIZE];
    loop {
        Timer::after(Duration::from_secs(5)).await;
        let frame = [0x01, 0x02, 0x03, counter];
        UART_RX.write(&frame).await;
        let n = UART_TX.read(&mut buf).await;
        log::info!("Host got {} echoed bytes back", n);
        counter = counter.wrapping_add(1);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_nanos()
        .init();

    let config = NodeConfig::from_features();
    let mut platform = SimPlatform::new(SimConfig::default());

    let stack = match bring_up(&mut platform, &config) {
        Ok(stack) => stack,
        Err(e) => panic!("Bring-up failed at {:?}: {:?}", e.step, e.error),
    };
    let stack: &'static NodeStack = STACK.init(Shared::new(stack));
    let handle: StackHandle = stack.handle();

    let outcome = bootstrap(&handle, config.role, &mut Delay).await;
    if !outcome.is_clean() {
        log::warn!("Bootstrap finished with {} failed steps", outcome.failures.len());
    }

    if let Err(e) = finish(&mut platform, &config) {
        panic!("Bring-up failed at {:?}: {:?}", e.step, e.error);
    }

    log::info!("RGB LED task running on GPIO {}", config.led.gpio);
    let indicator = Indicator::new(
        handle,
        ConsoleLed::new(config.led),
        Delay,
        config.role_log(),
    );
    spawner.must_spawn(indicator_task(indicator));

    if let Some(serial) = config.serial {
        log::info!(
            "UART{} echo on TX GPIO{} RX GPIO{} at {} baud",
            serial.port,
            serial.tx_pin,
            serial.rx_pin,
            serial.baud_rate
        );
        let uart = Timeout::new(PipeSerial::new(&UART_RX, &UART_TX));
        spawner.must_spawn(echo_task(SerialEcho::new(uart, serial.rx_pin)));
        spawner.must_spawn(host_task());
    }
}
