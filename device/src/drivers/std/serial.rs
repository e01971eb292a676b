use core::convert::Infallible;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::pipe::Pipe;
use embedded_io_async::{ErrorType, Read, Write};

/// UART made of two in-memory pipes: bytes arrive on `rx` and leave on `tx`.
pub struct PipeSerial<'a, M, const N: usize>
where
    M: RawMutex,
{
    rx: &'a Pipe<M, N>,
    tx: &'a Pipe<M, N>,
}

impl<'a, M, const N: usize> PipeSerial<'a, M, N>
where
    M: RawMutex,
{
    pub fn new(rx: &'a Pipe<M, N>, tx: &'a Pipe<M, N>) -> Self {
        Self { rx, tx }
    }
}

impl<'a, M, const N: usize> ErrorType for PipeSerial<'a, M, N>
where
    M: RawMutex,
{
    type Error = Infallible;
}

impl<'a, M, const N: usize> Read for PipeSerial<'a, M, N>
where
    M: RawMutex,
{
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        Ok(self.rx.read(buf).await)
    }
}

impl<'a, M, const N: usize> Write for PipeSerial<'a, M, N>
where
    M: RawMutex,
{
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        Ok(self.tx.write(buf).await)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
