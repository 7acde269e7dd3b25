use std::time::Duration;

use grovepi::DhtType;

use super::config_validation::{
    parse_poll_interval, parse_soil_calibration, validate_channels, validate_threshold, ConfigError,
};

/// センサーステーションの不変設定
///
/// 起動時に一度だけ作られ、ポーリングループに渡されます。
#[derive(Debug, Clone, PartialEq)]
pub struct StationConfig {
    /// 光センサー (アナログ)
    pub light_sensor_channel: u8,
    /// 音センサー (アナログ)
    pub sound_sensor_channel: u8,
    /// 土壌水分センサー (アナログ)
    pub soil_moisture_channel: u8,
    /// LED (デジタル出力)
    pub led_channel: u8,
    /// 温湿度センサーのポート (デジタル)
    pub dht_sensor_port: u8,
    pub dht_sensor_type: DhtType,
    /// LED を点灯する抵抗値の閾値 (kΩ)
    pub resistance_threshold: f32,
    /// ポーリング間隔
    pub poll_interval: Duration,
    /// 土壌水分センサーの乾燥時の生値 (0%)
    pub soil_dry_raw: u16,
    /// 土壌水分センサーの水中での生値 (100%)
    pub soil_wet_raw: u16,
    /// LCD バックライト色 (R, G, B)
    pub backlight: (u8, u8, u8),
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            light_sensor_channel: 0,
            sound_sensor_channel: 1,
            soil_moisture_channel: 2,
            led_channel: 4,
            dht_sensor_port: 7,
            dht_sensor_type: DhtType::Blue,
            resistance_threshold: 10.0,
            poll_interval: Duration::from_secs(10),
            soil_dry_raw: 1024,
            soil_wet_raw: 294,
            backlight: (0, 255, 0),
        }
    }
}

impl StationConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_resistance_threshold(mut self, threshold: f32) -> Self {
        self.resistance_threshold = threshold;
        self
    }

    /// 設定値の整合性を検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_channels(
            &[
                self.light_sensor_channel,
                self.sound_sensor_channel,
                self.soil_moisture_channel,
            ],
            self.led_channel,
            self.dht_sensor_port,
        )?;
        validate_threshold(self.resistance_threshold)?;
        parse_poll_interval(self.poll_interval.as_secs())?;
        parse_soil_calibration(self.soil_dry_raw, self.soil_wet_raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_board_wiring() {
        let config = StationConfig::default();
        assert_eq!(config.light_sensor_channel, 0);
        assert_eq!(config.sound_sensor_channel, 1);
        assert_eq!(config.led_channel, 4);
        assert_eq!(config.dht_sensor_port, 7);
        assert_eq!(config.resistance_threshold, 10.0);
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.soil_dry_raw - config.soil_wet_raw, 730);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_channel_rejected() {
        let config = StationConfig {
            sound_sensor_channel: 0,
            ..StationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DuplicateChannel(0)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = StationConfig::default().with_poll_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::InvalidPollInterval));
    }

    #[test]
    fn test_builder_overrides() {
        let config = StationConfig::default()
            .with_poll_interval(Duration::from_secs(30))
            .with_resistance_threshold(5.0);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.resistance_threshold, 5.0);
    }
}
