use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    CharacterDisplay, DhtType, HardwareError, HardwareResult, InterruptSignal, Level, PinMode,
    SensorBoard, SleepOutcome, Sleeper,
};

/// テスト用のセンサーボード状態
#[derive(Debug, Default)]
pub struct MockBoardState {
    /// チャンネルごとのアナログ値
    pub analog_values: HashMap<u8, u16>,
    /// 温湿度センサーの値
    pub temperature_humidity: (f32, f32),
    /// configure の呼び出し記録
    pub configured: Vec<(u8, PinMode)>,
    /// digital_write の呼び出し記録
    pub digital_writes: Vec<(u8, Level)>,
    /// read_analog の呼び出し記録
    pub analog_reads: Vec<u8>,
    /// I/Oエラーを返すチャンネル
    pub io_error_channel: Option<u8>,
    /// 温湿度読み取りでI/Oエラーを返す
    pub dht_io_error: bool,
    /// 致命的エラーを返すチャンネル
    pub fatal_channel: Option<u8>,
}

/// テスト用のセンサーボードモック実装
///
/// 実際のI2Cバスを使わずにボードとの通信をシミュレートします。
#[derive(Debug, Clone, Default)]
pub struct MockSensorBoard {
    pub state: Arc<Mutex<MockBoardState>>,
}

impl MockSensorBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: アナログ値を設定
    pub fn set_analog(&self, channel: u8, value: u16) {
        self.state.lock().unwrap().analog_values.insert(channel, value);
    }

    /// テスト用: 温湿度を設定
    pub fn set_temperature_humidity(&self, temperature: f32, humidity: f32) {
        self.state.lock().unwrap().temperature_humidity = (temperature, humidity);
    }

    /// テスト用: 指定チャンネルのI/Oエラーをシミュレート
    pub fn set_io_error_channel(&self, channel: Option<u8>) {
        self.state.lock().unwrap().io_error_channel = channel;
    }

    /// テスト用: 温湿度センサーのI/Oエラーをシミュレート
    pub fn set_dht_io_error(&self, enable: bool) {
        self.state.lock().unwrap().dht_io_error = enable;
    }

    /// テスト用: 指定チャンネルの致命的エラーをシミュレート
    pub fn set_fatal_channel(&self, channel: Option<u8>) {
        self.state.lock().unwrap().fatal_channel = channel;
    }

    /// テスト用: デジタル出力の記録を取得
    pub fn get_digital_writes(&self) -> Vec<(u8, Level)> {
        self.state.lock().unwrap().digital_writes.clone()
    }

    /// テスト用: ピン設定の記録を取得
    pub fn get_configured(&self) -> Vec<(u8, PinMode)> {
        self.state.lock().unwrap().configured.clone()
    }
}

impl SensorBoard for MockSensorBoard {
    fn configure(&mut self, channel: u8, mode: PinMode) -> HardwareResult<()> {
        self.state.lock().unwrap().configured.push((channel, mode));
        Ok(())
    }

    fn read_analog(&mut self, channel: u8) -> HardwareResult<u16> {
        let mut state = self.state.lock().unwrap();
        state.analog_reads.push(channel);
        if state.fatal_channel == Some(channel) {
            return Err(HardwareError::Fatal(format!("Simulated fatal error on channel {}", channel)));
        }
        if state.io_error_channel == Some(channel) {
            return Err(HardwareError::Io(format!("Simulated I/O error on channel {}", channel)));
        }
        Ok(state.analog_values.get(&channel).copied().unwrap_or(0))
    }

    fn digital_write(&mut self, channel: u8, level: Level) -> HardwareResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.io_error_channel == Some(channel) {
            return Err(HardwareError::Io(format!("Simulated I/O error on channel {}", channel)));
        }
        state.digital_writes.push((channel, level));
        Ok(())
    }

    fn read_temperature_humidity(&mut self, _port: u8, _sensor: DhtType) -> HardwareResult<(f32, f32)> {
        let state = self.state.lock().unwrap();
        if state.dht_io_error {
            return Err(HardwareError::Io("Simulated DHT error".to_string()));
        }
        Ok(state.temperature_humidity)
    }
}

/// ディスプレイ操作の記録
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOp {
    Backlight(u8, u8, u8),
    Text(String),
    TextNoRefresh(String),
}

/// テスト用のディスプレイモック実装
#[derive(Debug, Clone, Default)]
pub struct MockDisplay {
    pub ops: Arc<Mutex<Vec<DisplayOp>>>,
    pub simulate_error: Arc<Mutex<bool>>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: 操作の記録を取得
    pub fn get_ops(&self) -> Vec<DisplayOp> {
        self.ops.lock().unwrap().clone()
    }

    /// テスト用: 画面消去 (空文字の set_text) の回数
    pub fn clear_count(&self) -> usize {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| matches!(op, DisplayOp::Text(text) if text.is_empty()))
            .count()
    }

    /// テスト用: 最後に上書き表示したテキスト
    pub fn last_rendered(&self) -> Option<String> {
        self.ops.lock().unwrap().iter().rev().find_map(|op| match op {
            DisplayOp::TextNoRefresh(text) => Some(text.clone()),
            _ => None,
        })
    }

    /// テスト用: 書き込みエラーをシミュレート
    pub fn set_error(&self, enable: bool) {
        *self.simulate_error.lock().unwrap() = enable;
    }

    fn record(&self, op: DisplayOp) -> HardwareResult<()> {
        if *self.simulate_error.lock().unwrap() {
            return Err(HardwareError::Io("Simulated display error".to_string()));
        }
        self.ops.lock().unwrap().push(op);
        Ok(())
    }
}

impl CharacterDisplay for MockDisplay {
    fn set_backlight_color(&mut self, r: u8, g: u8, b: u8) -> HardwareResult<()> {
        self.record(DisplayOp::Backlight(r, g, b))
    }

    fn set_text(&mut self, text: &str) -> HardwareResult<()> {
        self.record(DisplayOp::Text(text.to_string()))
    }

    fn set_text_no_refresh(&mut self, text: &str) -> HardwareResult<()> {
        self.record(DisplayOp::TextNoRefresh(text.to_string()))
    }
}

/// テスト用の割り込みフラグ
#[derive(Debug, Clone, Default)]
pub struct MockInterrupt {
    pub flag: Arc<AtomicBool>,
}

impl MockInterrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: 停止要求を発生させる
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl InterruptSignal for MockInterrupt {
    fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// テスト用のスリープ実装（実際には待機しない）
///
/// `interrupt_on_sleep` 回目のスリープ中に割り込みが発生したものとして扱います。
#[derive(Debug, Clone, Default)]
pub struct MockSleeper {
    pub sleeps: Arc<Mutex<Vec<Duration>>>,
    pub interrupt_on_sleep: Option<usize>,
}

impl MockSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// n 回目 (1始まり) のスリープで割り込みを発生させる
    pub fn interrupting_on(n: usize) -> Self {
        Self {
            interrupt_on_sleep: Some(n),
            ..Self::default()
        }
    }

    /// テスト用: スリープ呼び出しの記録を取得
    pub fn get_sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for MockSleeper {
    fn sleep(&mut self, duration: Duration, interrupt: &dyn InterruptSignal) -> SleepOutcome {
        let mut sleeps = self.sleeps.lock().unwrap();
        sleeps.push(duration);

        if interrupt.is_requested() || self.interrupt_on_sleep == Some(sleeps.len()) {
            SleepOutcome::Interrupted
        } else {
            SleepOutcome::Completed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_board_returns_configured_values() {
        let mut board = MockSensorBoard::new();
        board.set_analog(0, 512);
        assert_eq!(board.read_analog(0).unwrap(), 512);
        assert_eq!(board.read_analog(3).unwrap(), 0);
    }

    #[test]
    fn test_mock_board_io_error() {
        let mut board = MockSensorBoard::new();
        board.set_io_error_channel(Some(1));
        assert!(matches!(board.read_analog(1), Err(HardwareError::Io(_))));
        assert!(board.read_analog(0).is_ok());
    }

    #[test]
    fn test_mock_display_clear_count() {
        let mut display = MockDisplay::new();
        display.set_text("").unwrap();
        display.set_text_no_refresh("abc").unwrap();
        display.set_text("").unwrap();

        assert_eq!(display.clear_count(), 2);
        assert_eq!(display.last_rendered(), Some("abc".to_string()));
    }

    #[test]
    fn test_mock_sleeper_interrupts_on_requested_call() {
        let mut sleeper = MockSleeper::interrupting_on(2);
        let interrupt = MockInterrupt::new();

        assert_eq!(sleeper.sleep(Duration::from_secs(1), &interrupt), SleepOutcome::Completed);
        assert_eq!(sleeper.sleep(Duration::from_secs(1), &interrupt), SleepOutcome::Interrupted);
    }
}
