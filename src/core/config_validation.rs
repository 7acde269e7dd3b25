use grovepi::DhtType;

/// アナログポート A0-A7
pub const MAX_ANALOG_CHANNEL: u8 = 7;
/// デジタルポート D2-D8 (D0/D1 はシリアルと共用)
pub const MAX_DIGITAL_PORT: u8 = 8;

/// 設定エラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("認証情報が設定されていません: {0}。cfg.tomlを確認してください。")]
    MissingCredential(&'static str),
    #[error("dht_sensor_type の値が無効です (0-1): {0}")]
    InvalidDhtSensorType(u8),
    #[error("poll_interval_seconds は1以上である必要があります")]
    InvalidPollInterval,
    #[error("土壌水分センサーの校正値が無効です (dry={dry}, wet={wet})")]
    InvalidSoilCalibration { dry: u16, wet: u16 },
    #[error("チャンネル番号が範囲外です: {0}")]
    ChannelOutOfRange(u8),
    #[error("アナログチャンネルが重複しています: {0}")]
    DuplicateChannel(u8),
    #[error("resistance_threshold の値が無効です: {0}")]
    InvalidThreshold(f32),
}

/// 認証情報が空でないことを確認
pub fn require_credential(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ConfigError::MissingCredential(name))
    } else {
        Ok(value.to_string())
    }
}

pub fn parse_dht_sensor_type(value: u8) -> Result<DhtType, ConfigError> {
    match value {
        0 => Ok(DhtType::Blue),
        1 => Ok(DhtType::White),
        other => Err(ConfigError::InvalidDhtSensorType(other)),
    }
}

pub fn parse_poll_interval(seconds: u64) -> Result<u64, ConfigError> {
    if seconds == 0 {
        Err(ConfigError::InvalidPollInterval)
    } else {
        Ok(seconds)
    }
}

pub fn parse_soil_calibration(dry: u16, wet: u16) -> Result<(u16, u16), ConfigError> {
    if dry <= wet {
        Err(ConfigError::InvalidSoilCalibration { dry, wet })
    } else {
        Ok((dry, wet))
    }
}

pub fn validate_threshold(threshold: f32) -> Result<(), ConfigError> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold(threshold))
    }
}

/// アナログチャンネルの範囲と重複、デジタルポートの範囲を確認
pub fn validate_channels(analog: &[u8], led_port: u8, dht_port: u8) -> Result<(), ConfigError> {
    for (i, channel) in analog.iter().enumerate() {
        if *channel > MAX_ANALOG_CHANNEL {
            return Err(ConfigError::ChannelOutOfRange(*channel));
        }
        if analog[..i].contains(channel) {
            return Err(ConfigError::DuplicateChannel(*channel));
        }
    }

    for port in [led_port, dht_port] {
        if port > MAX_DIGITAL_PORT {
            return Err(ConfigError::ChannelOutOfRange(port));
        }
    }
    if led_port == dht_port {
        return Err(ConfigError::DuplicateChannel(led_port));
    }

    Ok(())
}
