//! Grove RGB バックライト LCD (16x2) ドライバー
//!
//! テキストコントローラー (0x3e) とバックライトコントローラー (0x62) の
//! 二つの I2C デバイスで構成されています。

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

pub const TEXT_ADDRESS: u8 = 0x3e;
pub const RGB_ADDRESS: u8 = 0x62;

pub const COLUMNS: usize = 16;
pub const ROWS: usize = 2;

const TEXT_COMMAND: u8 = 0x80;
const TEXT_DATA: u8 = 0x40;

const CMD_CLEAR: u8 = 0x01;
const CMD_HOME: u8 = 0x02;
const CMD_DISPLAY_ON_NO_CURSOR: u8 = 0x08 | 0x04;
const CMD_TWO_LINES: u8 = 0x28;
const CMD_SECOND_ROW: u8 = 0xc0;

const REFRESH_WAIT_MS: u32 = 50;

/// LCD 通信エラー
#[derive(Debug, thiserror::Error)]
pub enum LcdError<E> {
    #[error("LCD I2C通信エラー: {0:?}")]
    I2c(E),
}

/// テキスト書き込み時の操作列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOp {
    /// 2行目の先頭へ移動
    NextRow,
    /// 1文字書き込み
    Char(u8),
}

/// テキストを 16x2 の操作列に変換
///
/// `pad` が true の場合は 32 文字に満たない分を空白で埋め、
/// 前回の表示内容を上書きします。
pub fn layout(text: &str, pad: bool) -> Vec<TextOp> {
    let mut chars: Vec<char> = text.chars().collect();
    if pad {
        while chars.len() < COLUMNS * ROWS {
            chars.push(' ');
        }
    }

    let mut ops = Vec::with_capacity(chars.len() + 1);
    let mut count = 0;
    let mut row = 0;

    for c in chars {
        if c == '\n' || count == COLUMNS {
            count = 0;
            row += 1;
            if row == ROWS {
                break;
            }
            ops.push(TextOp::NextRow);
            if c == '\n' {
                continue;
            }
        }
        count += 1;
        let byte = if c.is_ascii() { c as u8 } else { b'?' };
        ops.push(TextOp::Char(byte));
    }

    ops
}

/// Grove RGB LCD ドライバー
pub struct RgbLcd<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C: I2c, D: DelayNs> RgbLcd<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// バックライト色を設定
    pub fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), LcdError<I2C::Error>> {
        for (register, value) in [(0x00, 0x00), (0x01, 0x00), (0x08, 0xaa), (0x04, r), (0x03, g), (0x02, b)] {
            self.i2c
                .write(RGB_ADDRESS, &[register, value])
                .map_err(LcdError::I2c)?;
        }
        Ok(())
    }

    /// 画面をクリアしてからテキストを書き込む
    pub fn set_text(&mut self, text: &str) -> Result<(), LcdError<I2C::Error>> {
        self.text_command(CMD_CLEAR)?;
        self.prepare()?;
        self.write_ops(&layout(text, false))
    }

    /// クリアせずにホーム位置から上書きする (ちらつき防止)
    pub fn set_text_no_refresh(&mut self, text: &str) -> Result<(), LcdError<I2C::Error>> {
        self.text_command(CMD_HOME)?;
        self.prepare()?;
        self.write_ops(&layout(text, true))
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn prepare(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.delay.delay_ms(REFRESH_WAIT_MS);
        self.text_command(CMD_DISPLAY_ON_NO_CURSOR)?;
        self.text_command(CMD_TWO_LINES)?;
        self.delay.delay_ms(REFRESH_WAIT_MS);
        Ok(())
    }

    fn write_ops(&mut self, ops: &[TextOp]) -> Result<(), LcdError<I2C::Error>> {
        for op in ops {
            match *op {
                TextOp::NextRow => self.text_command(CMD_SECOND_ROW)?,
                TextOp::Char(byte) => self
                    .i2c
                    .write(TEXT_ADDRESS, &[TEXT_DATA, byte])
                    .map_err(LcdError::I2c)?,
            }
        }
        Ok(())
    }

    fn text_command(&mut self, cmd: u8) -> Result<(), LcdError<I2C::Error>> {
        self.i2c
            .write(TEXT_ADDRESS, &[TEXT_COMMAND, cmd])
            .map_err(LcdError::I2c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    #[derive(Default)]
    struct RecordingI2c {
        writes: Vec<(u8, Vec<u8>)>,
    }

    impl ErrorType for RecordingI2c {
        type Error = ErrorKind;
    }

    impl I2c for RecordingI2c {
        fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn chars(ops: &[TextOp]) -> String {
        ops.iter()
            .map(|op| match op {
                TextOp::NextRow => '|',
                TextOp::Char(b) => *b as char,
            })
            .collect()
    }

    #[test]
    fn test_layout_breaks_on_newline() {
        let ops = layout("L:500\nH:40", false);
        assert_eq!(chars(&ops), "L:500|H:40");
    }

    #[test]
    fn test_layout_wraps_after_sixteen_columns() {
        let ops = layout("ABCDEFGHIJKLMNOPQR", false);
        assert_eq!(chars(&ops), "ABCDEFGHIJKLMNOP|QR");
    }

    #[test]
    fn test_layout_drops_third_row() {
        let ops = layout("a\nb\nc", false);
        assert_eq!(chars(&ops), "a|b");
    }

    #[test]
    fn test_layout_pads_to_full_screen() {
        let ops = layout("hi", true);
        let written = ops.iter().filter(|op| matches!(op, TextOp::Char(_))).count();
        assert_eq!(written, COLUMNS * ROWS);
    }

    #[test]
    fn test_set_rgb_register_sequence() {
        let mut lcd = RgbLcd::new(RecordingI2c::default(), NoDelay);
        lcd.set_rgb(0, 255, 0).unwrap();

        let (i2c, _) = lcd.release();
        assert_eq!(i2c.writes.len(), 6);
        assert!(i2c.writes.iter().all(|(addr, _)| *addr == RGB_ADDRESS));
        assert_eq!(i2c.writes[4].1, vec![0x03, 255]);
    }

    #[test]
    fn test_set_text_clears_first() {
        let mut lcd = RgbLcd::new(RecordingI2c::default(), NoDelay);
        lcd.set_text("").unwrap();

        let (i2c, _) = lcd.release();
        assert_eq!(i2c.writes[0], (TEXT_ADDRESS, vec![TEXT_COMMAND, CMD_CLEAR]));
        assert_eq!(i2c.writes.len(), 3);
    }

    #[test]
    fn test_set_text_no_refresh_returns_home() {
        let mut lcd = RgbLcd::new(RecordingI2c::default(), NoDelay);
        lcd.set_text_no_refresh("x").unwrap();

        let (i2c, _) = lcd.release();
        assert_eq!(i2c.writes[0], (TEXT_ADDRESS, vec![TEXT_COMMAND, CMD_HOME]));
        assert!(!i2c.writes.contains(&(TEXT_ADDRESS, vec![TEXT_COMMAND, CMD_CLEAR])));
        assert_eq!(i2c.writes[3], (TEXT_ADDRESS, vec![TEXT_DATA, b'x']));
    }
}
