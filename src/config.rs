use std::time::Duration;

use crate::core::config_validation::{
    parse_dht_sensor_type, parse_poll_interval, parse_soil_calibration, require_credential,
};
pub use crate::core::config_validation::ConfigError;
use crate::core::StationConfig;

/// アプリケーション設定
///
/// この構造体はビルド時に`cfg.toml`ファイルから読み込まれた設定を保持します。
#[toml_cfg::toml_config]
pub struct Config {
    #[default("")]
    wifi_ssid: &'static str,

    #[default("")]
    wifi_password: &'static str,

    // Adafruit IO 認証情報
    #[default("")]
    adafruit_user: &'static str,

    #[default("")]
    adafruit_key: &'static str,

    #[default("")] // 空の場合は {user}/feeds を使う
    adafruit_topic: &'static str,

    #[default("mqtt://io.adafruit.com:1883")]
    mqtt_broker_url: &'static str,

    #[default("grove-sensor-station")]
    mqtt_client_id: &'static str,

    // センサー配線
    #[default(0)]
    light_sensor_channel: u8,

    #[default(1)]
    sound_sensor_channel: u8,

    #[default(2)]
    soil_moisture_channel: u8,

    #[default(4)]
    led_channel: u8,

    #[default(7)]
    dht_sensor_port: u8,

    #[default(0)] // 0: 青色 (DHT11), 1: 白色 (DHT22)
    dht_sensor_type: u8,

    #[default(10.0)]
    resistance_threshold: f32,

    #[default(10)]
    poll_interval_seconds: u64,

    // 土壌水分センサー校正値
    #[default(1024)]
    soil_dry_raw: u16,

    #[default(294)]
    soil_wet_raw: u16,

    // LCD バックライト
    #[default(0)]
    backlight_red: u8,

    #[default(255)]
    backlight_green: u8,

    #[default(0)]
    backlight_blue: u8,
}

/// テレメトリ接続設定
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub broker_url: String,
    pub client_id: String,
    pub username: String,
    pub key: String,
    /// トピックのプレフィックス（空なら既定の feeds レイアウト）
    pub topic_prefix: String,
}

/// アプリケーション設定を表す構造体
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// WiFi SSID
    pub wifi_ssid: String,

    /// WiFi パスワード
    pub wifi_password: String,

    /// テレメトリ設定
    pub telemetry: TelemetryConfig,

    /// センサーステーション設定
    pub station: StationConfig,
}

impl AppConfig {
    /// 設定ファイルから設定をロードします
    pub fn load() -> Result<Self, ConfigError> {
        // toml_cfg によって生成された定数
        Self::from_config(&CONFIG)
    }

    fn from_config(config: &Config) -> Result<Self, ConfigError> {
        // 認証情報は起動時に検証する
        let wifi_ssid = require_credential("wifi_ssid", config.wifi_ssid)?;
        let username = require_credential("adafruit_user", config.adafruit_user)?;
        let key = require_credential("adafruit_key", config.adafruit_key)?;

        let dht_sensor_type = parse_dht_sensor_type(config.dht_sensor_type)?;
        let poll_interval_seconds = parse_poll_interval(config.poll_interval_seconds)?;
        let (soil_dry_raw, soil_wet_raw) =
            parse_soil_calibration(config.soil_dry_raw, config.soil_wet_raw)?;

        let station = StationConfig {
            light_sensor_channel: config.light_sensor_channel,
            sound_sensor_channel: config.sound_sensor_channel,
            soil_moisture_channel: config.soil_moisture_channel,
            led_channel: config.led_channel,
            dht_sensor_port: config.dht_sensor_port,
            dht_sensor_type,
            resistance_threshold: config.resistance_threshold,
            poll_interval: Duration::from_secs(poll_interval_seconds),
            soil_dry_raw,
            soil_wet_raw,
            backlight: (
                config.backlight_red,
                config.backlight_green,
                config.backlight_blue,
            ),
        };
        station.validate()?;

        Ok(AppConfig {
            wifi_ssid,
            wifi_password: config.wifi_password.to_string(),
            telemetry: TelemetryConfig {
                broker_url: config.mqtt_broker_url.to_string(),
                client_id: config.mqtt_client_id.to_string(),
                username,
                key,
                topic_prefix: config.adafruit_topic.trim().to_string(),
            },
            station,
        })
    }
}
