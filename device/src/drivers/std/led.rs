use crate::config::LedConfig;
use crate::domain::color::BLACK;
use crate::domain::Rgb8;
use crate::fmt::Hex;
use crate::traits::led::RgbLed;
use core::convert::Infallible;

/// Logs what a physical pixel would show.
pub struct ConsoleLed {
    config: LedConfig,
    pending: Rgb8,
    shown: Rgb8,
}

impl ConsoleLed {
    pub fn new(config: LedConfig) -> Self {
        Self {
            config,
            pending: BLACK,
            shown: BLACK,
        }
    }

    pub fn shown(&self) -> Rgb8 {
        self.shown
    }
}

impl RgbLed for ConsoleLed {
    type Error = Infallible;

    fn set(&mut self, color: Rgb8) -> Result<(), Self::Error> {
        self.pending = color;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.pending = BLACK;
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), Self::Error> {
        if self.pending != self.shown {
            trace!(
                "LED on GPIO{}: {} (grb {})",
                self.config.gpio,
                self.pending.name(),
                Hex::packed(&self.pending.grb())
            );
        }
        self.shown = self.pending;
        Ok(())
    }
}
