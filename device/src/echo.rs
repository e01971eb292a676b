//! Serial loopback used as a wiring diagnostic on forming nodes.
use crate::fmt::{Debug2Format, Hex};
use crate::traits::serial::TimedSerial;
use embassy_time::Duration;

pub const ECHO_BUFFER_SIZE: usize = 1024;
pub const READ_TIMEOUT: Duration = Duration::from_millis(2000);

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoEvent {
    /// This many bytes were received and written back.
    Echoed(usize),
    /// Nothing arrived before the timeout.
    Idle,
}

pub struct SerialEcho<S> {
    serial: S,
    rx_pin: u8,
    buf: [u8; ECHO_BUFFER_SIZE],
}

impl<S> SerialEcho<S>
where
    S: TimedSerial,
{
    pub fn new(serial: S, rx_pin: u8) -> Self {
        Self {
            serial,
            rx_pin,
            buf: [0; ECHO_BUFFER_SIZE],
        }
    }

    pub async fn run(&mut self) -> ! {
        loop {
            self.poll().await;
        }
    }

    pub async fn poll(&mut self) -> EchoEvent {
        let n = match self.serial.read_timeout(&mut self.buf, READ_TIMEOUT).await {
            Ok(n) => n.min(ECHO_BUFFER_SIZE),
            Err(e) => {
                warn!("UART read failed: {:?}", Debug2Format(&e));
                0
            }
        };

        if n == 0 {
            info!("UART: Waiting for data on GPIO{}...", self.rx_pin);
            return EchoEvent::Idle;
        }

        let data = &self.buf[..n];
        info!("UART received {} bytes:", n);
        info!("{}", Hex::spaced(data));
        if let Err(e) = self.serial.write_all(data).await {
            warn!("UART echo failed: {:?}", Debug2Format(&e));
        }
        EchoEvent::Echoed(n)
    }

    pub fn into_inner(self) -> S {
        self.serial
    }
}
