use embassy_time::{with_timeout, Duration};
use embedded_io_async::{ErrorType, Read, Write};

/// Byte oriented serial port with a bounded read.
#[allow(async_fn_in_trait)]
pub trait TimedSerial: ErrorType {
    /// Read into `buf`, waiting at most `timeout`. Returns `Ok(0)` when nothing arrived in time.
    async fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration)
        -> Result<usize, Self::Error>;

    async fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

/// Gives any async `Read + Write` port a timed read.
pub struct Timeout<S> {
    port: S,
}

impl<S> Timeout<S>
where
    S: Read + Write,
{
    pub fn new(port: S) -> Self {
        Self { port }
    }

    pub fn into_inner(self) -> S {
        self.port
    }
}

impl<S> ErrorType for Timeout<S>
where
    S: Read + Write,
{
    type Error = S::Error;
}

impl<S> TimedSerial for Timeout<S>
where
    S: Read + Write,
{
    async fn read_timeout(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, Self::Error> {
        match with_timeout(timeout, self.port.read(buf)).await {
            Ok(result) => result,
            Err(_) => Ok(0),
        }
    }

    async fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        Write::write_all(&mut self.port, buf).await?;
        self.port.flush().await
    }
}
