use std::collections::HashMap;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use grovepi::{DhtType, GroveError, GrovePi, PinMode};
use log::debug;

use super::{HardwareError, HardwareResult, Level, SensorBoard};

/// GrovePi ボードを使った `SensorBoard` 実装
///
/// 設定済みのピンモードを記録し、入力として設定されていない
/// チャンネルの読み取りを配線ミスとして拒否します。
pub struct GroveSensorBoard<I2C, D> {
    grove: GrovePi<I2C, D>,
    modes: HashMap<u8, PinMode>,
}

impl<I2C: I2c, D: DelayNs> GroveSensorBoard<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            grove: GrovePi::new(i2c, delay),
            modes: HashMap::new(),
        }
    }

    fn require_mode(&self, channel: u8, expected: PinMode) -> HardwareResult<()> {
        match self.modes.get(&channel) {
            Some(mode) if *mode == expected => Ok(()),
            Some(mode) => Err(HardwareError::Fatal(format!(
                "チャンネル{}は{:?}として設定されています ({:?}が必要)",
                channel, mode, expected
            ))),
            None => Err(HardwareError::Fatal(format!(
                "チャンネル{}は未設定です ({:?}が必要)",
                channel, expected
            ))),
        }
    }
}

fn io_error<E: std::fmt::Debug>(e: GroveError<E>) -> HardwareError {
    HardwareError::Io(e.to_string())
}

impl<I2C: I2c, D: DelayNs> SensorBoard for GroveSensorBoard<I2C, D> {
    fn configure(&mut self, channel: u8, mode: PinMode) -> HardwareResult<()> {
        self.grove.pin_mode(channel, mode).map_err(io_error)?;
        self.modes.insert(channel, mode);
        debug!("チャンネル{}を{:?}に設定しました", channel, mode);
        Ok(())
    }

    fn read_analog(&mut self, channel: u8) -> HardwareResult<u16> {
        self.require_mode(channel, PinMode::Input)?;
        self.grove.analog_read(channel).map_err(io_error)
    }

    fn digital_write(&mut self, channel: u8, level: Level) -> HardwareResult<()> {
        self.require_mode(channel, PinMode::Output)?;
        self.grove
            .digital_write(channel, level == Level::High)
            .map_err(io_error)
    }

    fn read_temperature_humidity(&mut self, port: u8, sensor: DhtType) -> HardwareResult<(f32, f32)> {
        self.grove.dht(port, sensor).map_err(io_error)
    }
}
