/*!
 * # Grove Sensor Station Library
 *
 * GrovePi ボードに接続した光・音・温湿度・土壌水分センサーを周期的に読み取り、
 * MQTT でテレメトリ送信しつつ LED と RGB LCD を制御するためのライブラリ
 *
 * ## モジュール構成
 * - `core`: ポーリングループ、測定データ、設定
 * - `hardware`: センサーボード・LCD・割り込み・スリープの抽象化と実装
 * - `communication`: テレメトリ送信（MQTT、WiFi）
 * - `utils`: ハードウェア非依存の計算
 */

pub mod communication;
pub mod config;
pub mod core;
pub mod hardware;
pub mod utils;

// 内部で使用する型をまとめてエクスポート
pub use communication::{MetricValue, TelemetryClient, TelemetryError};
pub use config::{AppConfig, ConfigError, TelemetryConfig};
pub use crate::core::{MeasuredData, SensorPollLoop, StationConfig, StationError, TickOutcome};
pub use hardware::{CharacterDisplay, HardwareError, InterruptSignal, SensorBoard, Sleeper};
pub use utils::{light_resistance, soil_moisture_percentage};

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
