/// Brightness used for the status indicator, out of 255.
pub const INDICATOR_LEVEL: u8 = 50;

pub const BLACK: Rgb8 = Rgb8::new(0x00, 0x00, 0x00);
pub const RED: Rgb8 = Rgb8::new(INDICATOR_LEVEL, 0x00, 0x00);
pub const GREEN: Rgb8 = Rgb8::new(0x00, INDICATOR_LEVEL, 0x00);
pub const BLUE: Rgb8 = Rgb8::new(0x00, 0x00, INDICATOR_LEVEL);

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb8 {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel order expected on the wire by WS2812 style pixels.
    pub const fn grb(&self) -> [u8; 3] {
        [self.g, self.r, self.b]
    }

    pub fn name(&self) -> &'static str {
        match *self {
            RED => "red",
            GREEN => "green",
            BLUE => "blue",
            BLACK => "off",
            _ => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_colors() {
        assert_eq!([0, 50, 0], RED.grb());
        assert_eq!([50, 0, 0], GREEN.grb());
        assert_eq!([0, 0, 50], BLUE.grb());
        assert_eq!("green", GREEN.name());
        assert_eq!("custom", Rgb8::new(1, 2, 3).name());
    }
}
