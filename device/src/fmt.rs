#![macro_use]
#![allow(unused_macros)]

use core::fmt::{Debug, Display, Formatter};

// `defmt` wins when both logging backends are enabled.

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::trace!($s $(, $x)*);
            #[cfg(all(feature = "log", not(feature = "defmt")))]
            ::log::trace!($s $(, $x)*);
            #[cfg(not(any(feature = "log", feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(all(feature = "log", not(feature = "defmt")))]
            ::log::debug!($s $(, $x)*);
            #[cfg(not(any(feature = "log", feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::info!($s $(, $x)*);
            #[cfg(all(feature = "log", not(feature = "defmt")))]
            ::log::info!($s $(, $x)*);
            #[cfg(not(any(feature = "log", feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(all(feature = "log", not(feature = "defmt")))]
            ::log::warn!($s $(, $x)*);
            #[cfg(not(any(feature = "log", feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::error!($s $(, $x)*);
            #[cfg(all(feature = "log", not(feature = "defmt")))]
            ::log::error!($s $(, $x)*);
            #[cfg(not(any(feature = "log", feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}

#[cfg(feature = "defmt")]
pub(crate) use defmt::Debug2Format;

/// Formats any `Debug` value, mirroring `defmt::Debug2Format` for the `log` backend.
#[cfg(not(feature = "defmt"))]
pub(crate) struct Debug2Format<'a, T: Debug + ?Sized>(pub &'a T);

#[cfg(not(feature = "defmt"))]
impl<'a, T: Debug + ?Sized> Debug for Debug2Format<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

/// Lowercase hex rendering of a byte slice for log lines.
pub(crate) struct Hex<'a> {
    bytes: &'a [u8],
    spaced: bool,
}

impl<'a> Hex<'a> {
    /// `01 02 03`
    pub(crate) fn spaced(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            spaced: true,
        }
    }

    /// `010203`
    pub(crate) fn packed(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            spaced: false,
        }
    }
}

impl<'a> Display for Hex<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for (i, b) in self.bytes.iter().enumerate() {
            if self.spaced && i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl<'a> defmt::Format for Hex<'a> {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{=[u8]:x}", self.bytes);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::Hex;
    use std::format;

    #[test]
    fn test_hex() {
        assert_eq!("01 02 ff", format!("{}", Hex::spaced(&[0x01, 0x02, 0xff])));
        assert_eq!("676b", format!("{}", Hex::packed(&0x676bu16.to_be_bytes())));
        assert_eq!("", format!("{}", Hex::spaced(&[])));
    }
}
