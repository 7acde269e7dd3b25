use log::{debug, error, info, warn};

use crate::communication::telemetry::TelemetryClient;
use crate::core::measured_data::{MeasuredData, SensorChannel, SensorReading};
use crate::core::StationConfig;
use crate::hardware::{
    CharacterDisplay, HardwareError, InterruptSignal, Level, PinMode, SensorBoard, SleepOutcome,
    Sleeper,
};
use crate::utils::sensor_calc::{
    is_sentinel_nan, led_should_be_on, light_resistance, soil_moisture_percentage,
};

/// ポーリング処理のエラー分類
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StationError {
    /// センサー・バス通信の失敗（回復可能）
    #[error("I/Oエラー: {0}")]
    Io(String),

    /// 温湿度センサーの NaN（回復可能）
    #[error("データ異常 (NaN): 温度={temperature}, 湿度={humidity}")]
    DataValidity { temperature: f32, humidity: f32 },

    /// 配線・設定の誤りなど（回復不能）
    #[error("致命的エラー: {0}")]
    Fatal(String),
}

impl From<HardwareError> for StationError {
    fn from(error: HardwareError) -> Self {
        match error {
            HardwareError::Io(msg) => StationError::Io(msg),
            HardwareError::Fatal(msg) => StationError::Fatal(msg),
        }
    }
}

/// 1周期の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Success,
    IoFault,
    DataValidityFault,
    Interrupted,
}

/// ループ全体の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    pub ticks: u64,
    pub io_faults: u64,
    pub data_faults: u64,
}

/// センサーを周期的に読み取り、送信・表示するループ
pub struct SensorPollLoop<B, D, T> {
    board: B,
    display: D,
    telemetry: T,
    config: StationConfig,
    /// 最後に表示したテキスト
    display_state: Option<String>,
}

impl<B: SensorBoard, D: CharacterDisplay, T: TelemetryClient> SensorPollLoop<B, D, T> {
    pub fn new(board: B, display: D, telemetry: T, config: StationConfig) -> Self {
        Self {
            board,
            display,
            telemetry,
            config,
            display_state: None,
        }
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn display_state(&self) -> Option<&str> {
        self.display_state.as_deref()
    }

    /// バックライトとピンモードを設定
    pub fn setup(&mut self) -> Result<(), StationError> {
        let (r, g, b) = self.config.backlight;
        self.display.set_backlight_color(r, g, b)?;

        for channel in [
            self.config.light_sensor_channel,
            self.config.sound_sensor_channel,
            self.config.soil_moisture_channel,
        ] {
            self.board.configure(channel, PinMode::Input)?;
        }
        self.board.configure(self.config.led_channel, PinMode::Output)?;

        info!("✓ センサーの設定が完了しました");
        Ok(())
    }

    /// 停止要求があるまで周期処理を繰り返す
    pub fn run<I: InterruptSignal, S: Sleeper>(
        &mut self,
        interrupt: &I,
        sleeper: &mut S,
    ) -> Result<LoopStats, StationError> {
        info!("=== ポーリングループを開始します (間隔: {:?}) ===", self.config.poll_interval);
        let mut stats = LoopStats::default();

        loop {
            let outcome = self.tick(interrupt, sleeper)?;
            stats.ticks += 1;

            match outcome {
                TickOutcome::Success => {}
                TickOutcome::IoFault => stats.io_faults += 1,
                TickOutcome::DataValidityFault => stats.data_faults += 1,
                TickOutcome::Interrupted => {
                    info!(
                        "停止要求を受信しました。ループを終了します ({}周期, I/Oエラー{}件, データ異常{}件)",
                        stats.ticks, stats.io_faults, stats.data_faults
                    );
                    return Ok(stats);
                }
            }
        }
    }

    /// 1周期分の処理: 読み取り → 送信 → 検証 → LED → 表示 → 待機
    pub fn tick<I: InterruptSignal, S: Sleeper>(
        &mut self,
        interrupt: &I,
        sleeper: &mut S,
    ) -> Result<TickOutcome, StationError> {
        if interrupt.is_requested() {
            self.clear_display();
            return Ok(TickOutcome::Interrupted);
        }

        let outcome = match self.poll_once() {
            Ok(data) => {
                info!("測定: {}", data.get_summary());
                TickOutcome::Success
            }
            Err(StationError::Io(msg)) => {
                error!("❌ I/Oエラー: {}", msg);
                self.clear_display();
                TickOutcome::IoFault
            }
            Err(StationError::DataValidity { temperature, humidity }) => {
                error!("❌ 温湿度データ異常 (温度={}, 湿度={})", temperature, humidity);
                self.clear_display();
                TickOutcome::DataValidityFault
            }
            Err(fatal) => {
                error!("{}", fatal);
                return Err(fatal);
            }
        };

        // エラー後も同じ間隔を空けてから次の周期に入る
        match sleeper.sleep(self.config.poll_interval, interrupt) {
            SleepOutcome::Completed => Ok(outcome),
            SleepOutcome::Interrupted => {
                self.clear_display();
                Ok(TickOutcome::Interrupted)
            }
        }
    }

    fn poll_once(&mut self) -> Result<MeasuredData, StationError> {
        let light_raw = self.board.read_analog(self.config.light_sensor_channel)?;
        self.publish(&SensorReading::raw(SensorChannel::Light, light_raw));

        let sound_raw = self.board.read_analog(self.config.sound_sensor_channel)?;
        self.publish(&SensorReading::raw(SensorChannel::Sound, sound_raw));

        let soil_raw = self.board.read_analog(self.config.soil_moisture_channel)?;
        let soil_moisture_percent =
            soil_moisture_percentage(soil_raw, self.config.soil_dry_raw, self.config.soil_wet_raw);
        self.publish(&SensorReading::raw(
            SensorChannel::SoilMoisture,
            u16::from(soil_moisture_percent),
        ));

        let (temperature, humidity) = self
            .board
            .read_temperature_humidity(self.config.dht_sensor_port, self.config.dht_sensor_type)?;
        self.publish(&SensorReading::checked(SensorChannel::Temperature, temperature));
        self.publish(&SensorReading::checked(SensorChannel::Humidity, humidity));

        if is_sentinel_nan(temperature, humidity) {
            return Err(StationError::DataValidity { temperature, humidity });
        }

        let resistance = light_resistance(light_raw);
        let led_on = led_should_be_on(resistance, self.config.resistance_threshold);
        self.board
            .digital_write(self.config.led_channel, Level::from(led_on))?;

        let data = MeasuredData {
            light_raw,
            sound_raw,
            soil_raw,
            soil_moisture_percent,
            temperature_celsius: temperature,
            humidity_percent: humidity,
            resistance_kohm: Some(resistance),
            led_on: Some(led_on),
        };

        let text = data.display_text();
        self.display.set_text_no_refresh(&text)?;
        self.display_state = Some(text);

        Ok(data)
    }

    /// 投げっぱなしで送信し、失敗は警告ログのみ
    fn publish(&mut self, reading: &SensorReading) {
        let name = reading.channel.metric_name();
        let value = reading.metric_value();
        match self.telemetry.publish(name, &value) {
            Ok(()) => debug!("送信: {}={}", name, value),
            Err(e) => warn!("{}の送信に失敗しました: {}", name, e),
        }
    }

    fn clear_display(&mut self) {
        if let Err(e) = self.display.set_text("") {
            warn!("ディスプレイの消去に失敗しました: {}", e);
        }
        self.display_state = None;
    }
}
