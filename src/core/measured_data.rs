use crate::communication::telemetry::{metric, MetricValue};

/// センサーチャンネルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorChannel {
    Light,
    Sound,
    SoilMoisture,
    Temperature,
    Humidity,
}

impl SensorChannel {
    /// 送信時のメトリクス名
    pub fn metric_name(&self) -> &'static str {
        match self {
            SensorChannel::Light => metric::LIGHT,
            SensorChannel::Sound => metric::SOUND,
            SensorChannel::SoilMoisture => metric::MOISTURE,
            SensorChannel::Temperature => metric::TEMPERATURE,
            SensorChannel::Humidity => metric::HUMIDITY,
        }
    }
}

/// 1回の読み取り結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub channel: SensorChannel,
    pub value: f32,
    /// 妥当性（検証しないチャンネルは None）
    pub valid: Option<bool>,
}

impl SensorReading {
    /// ADC 生値などの整数値
    pub fn raw(channel: SensorChannel, value: u16) -> Self {
        Self {
            channel,
            value: f32::from(value),
            valid: None,
        }
    }

    /// NaN 検証付きの浮動小数点値
    pub fn checked(channel: SensorChannel, value: f32) -> Self {
        Self {
            channel,
            value,
            valid: Some(!value.is_nan()),
        }
    }

    pub fn metric_value(&self) -> MetricValue {
        match self.channel {
            SensorChannel::Temperature | SensorChannel::Humidity => MetricValue::Float(self.value),
            _ => MetricValue::Integer(self.value as i64),
        }
    }
}

/// 1周期分の測定データ（ハードウェア非依存）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasuredData {
    pub light_raw: u16,
    pub sound_raw: u16,
    pub soil_raw: u16,
    pub soil_moisture_percent: u8,
    pub temperature_celsius: f32,
    pub humidity_percent: f32,
    pub resistance_kohm: Option<f32>,
    pub led_on: Option<bool>,
}

impl MeasuredData {
    /// LCD (16x2) 表示用テキスト
    ///
    /// 1行目: 光センサー値と温度、2行目: 湿度と音センサー値
    pub fn display_text(&self) -> String {
        let temperature = format!("{:.1}", self.temperature_celsius);
        format!(
            "L:{:>3} T:{:<4}C\nH:{:.1} S:{}",
            self.light_raw, temperature, self.humidity_percent, self.sound_raw
        )
    }

    /// ログ出力用のサマリ
    pub fn get_summary(&self) -> String {
        let mut parts = vec![
            format!("光:{}", self.light_raw),
            format!("音:{}", self.sound_raw),
            format!("土壌水分:{}%", self.soil_moisture_percent),
            format!("温度:{:.1}°C", self.temperature_celsius),
            format!("湿度:{:.1}%", self.humidity_percent),
        ];

        if let Some(resistance) = self.resistance_kohm {
            parts.push(format!("抵抗:{:.2}kΩ", resistance));
        }

        if let Some(led_on) = self.led_on {
            parts.push(format!("LED:{}", if led_on { "ON" } else { "OFF" }));
        }

        parts.join(", ")
    }
}
