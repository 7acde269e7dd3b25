//! GrovePi コプロセッサ用の最小 I2C クライアント
//!
//! GrovePi ボードは I2C スレーブ (0x04) として動作し、4バイトのコマンド
//! フレーム `[cmd, pin, value, 0]` を受け取ります。応答は先頭にコマンド
//! エコーを含むブロックとして読み出します。

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// GrovePi の既定 I2C アドレス
pub const DEFAULT_ADDRESS: u8 = 0x04;

const CMD_DIGITAL_WRITE: u8 = 2;
const CMD_ANALOG_READ: u8 = 3;
const CMD_PIN_MODE: u8 = 5;
const CMD_DHT_READ: u8 = 40;
const UNUSED: u8 = 0;

/// コマンド書き込み後の待機時間
const COMMAND_SETTLE_MS: u32 = 2;
/// DHT 測定完了までの待機時間
const DHT_MEASURE_MS: u32 = 600;

/// GrovePi 通信エラー
#[derive(Debug, thiserror::Error)]
pub enum GroveError<E> {
    #[error("I2C通信エラー: {0:?}")]
    I2c(E),
}

/// ピンモード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// DHT センサーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhtType {
    /// 青色モジュール (DHT11)
    Blue = 0,
    /// 白色モジュール (DHT22)
    White = 1,
}

/// GrovePi クライアント
pub struct GrovePi<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> GrovePi<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self { i2c, delay, address }
    }

    /// ピンモードを設定
    pub fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), GroveError<I2C::Error>> {
        let value = match mode {
            PinMode::Output => 1,
            PinMode::Input => 0,
        };
        self.command(CMD_PIN_MODE, pin, value)?;
        self.read_block::<1>()?;
        Ok(())
    }

    /// デジタル出力 (0 / 1)
    pub fn digital_write(&mut self, pin: u8, high: bool) -> Result<(), GroveError<I2C::Error>> {
        self.command(CMD_DIGITAL_WRITE, pin, high as u8)?;
        self.read_block::<1>()?;
        Ok(())
    }

    /// 10bit アナログ値を読み取る
    pub fn analog_read(&mut self, pin: u8) -> Result<u16, GroveError<I2C::Error>> {
        self.command(CMD_ANALOG_READ, pin, UNUSED)?;
        let block = self.read_block::<3>()?;
        Ok(u16::from(block[1]) << 8 | u16::from(block[2]))
    }

    /// DHT センサーから (温度, 湿度) を読み取る
    ///
    /// 測定値が物理的にありえない範囲の場合は両方とも NaN を返します。
    pub fn dht(&mut self, pin: u8, module: DhtType) -> Result<(f32, f32), GroveError<I2C::Error>> {
        self.command(CMD_DHT_READ, pin, module as u8)?;
        self.delay.delay_ms(DHT_MEASURE_MS);
        let block = self.read_block::<9>()?;

        let temperature = f32::from_le_bytes([block[1], block[2], block[3], block[4]]);
        let humidity = f32::from_le_bytes([block[5], block[6], block[7], block[8]]);

        Ok(sanitize_dht(temperature, humidity))
    }

    /// I2C バスを返却
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, cmd: u8, pin: u8, value: u8) -> Result<(), GroveError<I2C::Error>> {
        self.i2c
            .write(self.address, &[cmd, pin, value, UNUSED])
            .map_err(GroveError::I2c)?;
        self.delay.delay_ms(COMMAND_SETTLE_MS);
        Ok(())
    }

    fn read_block<const N: usize>(&mut self) -> Result<[u8; N], GroveError<I2C::Error>> {
        let mut buffer = [0u8; N];
        self.i2c
            .read(self.address, &mut buffer)
            .map_err(GroveError::I2c)?;
        Ok(buffer)
    }
}

/// DHT の生値を検証し、範囲外なら NaN の組に置き換える
pub fn sanitize_dht(temperature: f32, humidity: f32) -> (f32, f32) {
    let temperature = (temperature * 100.0).round() / 100.0;
    let humidity = (humidity * 100.0).round() / 100.0;

    if temperature > -100.0 && temperature < 150.0 && (0.0..=100.0).contains(&humidity) {
        (temperature, humidity)
    } else {
        (f32::NAN, f32::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use std::collections::VecDeque;

    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        responses: VecDeque<Vec<u8>>,
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => self.writes.push((address, bytes.to_vec())),
                    Operation::Read(buffer) => {
                        let data = self.responses.pop_front().unwrap_or_default();
                        for (dst, src) in buffer.iter_mut().zip(data.iter()) {
                            *dst = *src;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn grove(responses: Vec<Vec<u8>>) -> GrovePi<MockI2c, NoDelay> {
        let i2c = MockI2c {
            responses: responses.into(),
            ..Default::default()
        };
        GrovePi::new(i2c, NoDelay)
    }

    #[test]
    fn test_analog_read_combines_high_and_low_byte() {
        let mut board = grove(vec![vec![CMD_ANALOG_READ, 0x01, 0xF4]]);
        assert_eq!(board.analog_read(0).unwrap(), 500);

        let (i2c, _) = board.release();
        assert_eq!(i2c.writes, vec![(DEFAULT_ADDRESS, vec![3, 0, 0, 0])]);
    }

    #[test]
    fn test_pin_mode_frames() {
        let mut board = grove(vec![vec![CMD_PIN_MODE], vec![CMD_PIN_MODE]]);
        board.pin_mode(4, PinMode::Output).unwrap();
        board.pin_mode(0, PinMode::Input).unwrap();

        let (i2c, _) = board.release();
        assert_eq!(i2c.writes[0].1, vec![5, 4, 1, 0]);
        assert_eq!(i2c.writes[1].1, vec![5, 0, 0, 0]);
    }

    #[test]
    fn test_digital_write_frame() {
        let mut board = grove(vec![vec![CMD_DIGITAL_WRITE]]);
        board.digital_write(4, true).unwrap();

        let (i2c, _) = board.release();
        assert_eq!(i2c.writes[0].1, vec![2, 4, 1, 0]);
    }

    #[test]
    fn test_dht_decodes_little_endian_floats() {
        let mut response = vec![CMD_DHT_READ];
        response.extend_from_slice(&23.5f32.to_le_bytes());
        response.extend_from_slice(&41.0f32.to_le_bytes());
        let mut board = grove(vec![response]);

        let (temp, hum) = board.dht(7, DhtType::Blue).unwrap();
        assert_eq!(temp, 23.5);
        assert_eq!(hum, 41.0);

        let (i2c, _) = board.release();
        assert_eq!(i2c.writes[0].1, vec![40, 7, 0, 0]);
    }

    #[test]
    fn test_dht_out_of_range_becomes_nan() {
        let (temp, hum) = sanitize_dht(23.0, 180.0);
        assert!(temp.is_nan());
        assert!(hum.is_nan());

        let (temp, hum) = sanitize_dht(-120.0, 50.0);
        assert!(temp.is_nan() && hum.is_nan());
    }

    #[test]
    fn test_bus_error_is_reported() {
        let mut board = GrovePi::new(
            MockI2c {
                fail: true,
                ..Default::default()
            },
            NoDelay,
        );
        assert!(matches!(board.analog_read(1), Err(GroveError::I2c(ErrorKind::Other))));
    }
}
