use crate::domain::Rgb8;
use core::fmt::Debug;

/// A single RGB pixel. Changes are latched by `set`/`clear` and become visible on `refresh`.
pub trait RgbLed {
    type Error: Debug;
    fn set(&mut self, color: Rgb8) -> Result<(), Self::Error>;
    fn clear(&mut self) -> Result<(), Self::Error>;
    fn refresh(&mut self) -> Result<(), Self::Error>;
}
