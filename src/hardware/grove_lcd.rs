use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use grove_rgb_lcd::RgbLcd;

use super::{CharacterDisplay, HardwareError, HardwareResult};

/// Grove RGB LCD を使った `CharacterDisplay` 実装
pub struct GroveLcd<I2C, D> {
    lcd: RgbLcd<I2C, D>,
}

impl<I2C: I2c, D: DelayNs> GroveLcd<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            lcd: RgbLcd::new(i2c, delay),
        }
    }
}

impl<I2C: I2c, D: DelayNs> CharacterDisplay for GroveLcd<I2C, D> {
    fn set_backlight_color(&mut self, r: u8, g: u8, b: u8) -> HardwareResult<()> {
        self.lcd
            .set_rgb(r, g, b)
            .map_err(|e| HardwareError::Io(e.to_string()))
    }

    fn set_text(&mut self, text: &str) -> HardwareResult<()> {
        self.lcd
            .set_text(text)
            .map_err(|e| HardwareError::Io(e.to_string()))
    }

    fn set_text_no_refresh(&mut self, text: &str) -> HardwareResult<()> {
        self.lcd
            .set_text_no_refresh(text)
            .map_err(|e| HardwareError::Io(e.to_string()))
    }
}
