/// ハードウェア制御モジュール
///
/// センサーボード・LCD・割り込み・スリープをトレイトで抽象化し、
/// 実機用とテスト用(Mock)の実装を切り替えられるようにしています。
use std::time::Duration;

pub mod grove_board;
pub mod grove_lcd;

#[cfg(feature = "esp")]
pub mod button;
#[cfg(feature = "esp")]
pub mod sleeper;

// Mock実装（テストとnon-espビルドで使用可能）
#[cfg(not(feature = "esp"))]
pub mod mock;

pub use grove_board::GroveSensorBoard;
pub use grove_lcd::GroveLcd;
pub use grovepi::{DhtType, PinMode};

/// ハードウェア操作のエラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HardwareError {
    /// バス通信の失敗（次の周期で回復しうる）
    #[error("I/Oエラー: {0}")]
    Io(String),

    /// 配線・設定の誤り（回復不能）
    #[error("致命的なハードウェアエラー: {0}")]
    Fatal(String),
}

pub type HardwareResult<T> = Result<T, HardwareError>;

/// デジタル出力レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// センサーボードのインターフェース
pub trait SensorBoard {
    /// チャンネルの入出力モードを設定
    fn configure(&mut self, channel: u8, mode: PinMode) -> HardwareResult<()>;

    /// アナログ値を読み取る（入力として設定済みのチャンネルのみ）
    fn read_analog(&mut self, channel: u8) -> HardwareResult<u16>;

    /// デジタル出力
    fn digital_write(&mut self, channel: u8, level: Level) -> HardwareResult<()>;

    /// 温湿度センサーから (温度, 湿度) を読み取る。失敗時は NaN を含む
    fn read_temperature_humidity(&mut self, port: u8, sensor: DhtType) -> HardwareResult<(f32, f32)>;
}

/// キャラクターディスプレイのインターフェース
pub trait CharacterDisplay {
    fn set_backlight_color(&mut self, r: u8, g: u8, b: u8) -> HardwareResult<()>;

    /// 画面を消去してから書き込む
    fn set_text(&mut self, text: &str) -> HardwareResult<()>;

    /// 画面を消去せずに上書きする
    fn set_text_no_refresh(&mut self, text: &str) -> HardwareResult<()>;
}

/// ユーザー割り込み（停止要求）
pub trait InterruptSignal {
    fn is_requested(&self) -> bool;
}

/// スリープ結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    Completed,
    Interrupted,
}

/// 割り込み可能なスリープ
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration, interrupt: &dyn InterruptSignal) -> SleepOutcome;
}
