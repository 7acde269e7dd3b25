use std::fmt;

/// テレメトリ送信のエラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TelemetryError {
    #[error("テレメトリ接続エラー: {0}")]
    Connection(String),

    #[error("テレメトリ送信エラー: {0}")]
    Publish(String),
}

/// 送信するメトリクス名
pub mod metric {
    pub const LIGHT: &str = "Light";
    pub const SOUND: &str = "Sound";
    pub const TEMPERATURE: &str = "Temperature";
    pub const HUMIDITY: &str = "Humidity";
    pub const MOISTURE: &str = "Moisture";
}

/// メトリクス値
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Integer(i64),
    Float(f32),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Integer(value) => write!(f, "{}", value),
            MetricValue::Float(value) if value.is_nan() => write!(f, "nan"),
            MetricValue::Float(value) => {
                // 小数点以下は最大2桁、最低1桁
                let text = format!("{:.2}", value);
                let trimmed = text.trim_end_matches('0');
                if trimmed.ends_with('.') {
                    write!(f, "{}0", trimmed)
                } else {
                    write!(f, "{}", trimmed)
                }
            }
        }
    }
}

impl From<u16> for MetricValue {
    fn from(value: u16) -> Self {
        MetricValue::Integer(i64::from(value))
    }
}

impl From<u8> for MetricValue {
    fn from(value: u8) -> Self {
        MetricValue::Integer(i64::from(value))
    }
}

impl From<f32> for MetricValue {
    fn from(value: f32) -> Self {
        MetricValue::Float(value)
    }
}

/// テレメトリ送信インターフェース
///
/// 送信は投げっぱなしで、サーバー側の応答は待ちません。
pub trait TelemetryClient {
    fn publish(&mut self, metric: &str, value: &MetricValue) -> Result<(), TelemetryError>;
}

/// メトリクス名から MQTT トピックを組み立てる
///
/// プレフィックスが空の場合は Adafruit IO の `{username}/feeds/{feed}` 形式を使います。
pub fn feed_topic(username: &str, prefix: &str, metric: &str) -> String {
    let feed = metric.to_lowercase();
    let prefix = prefix.trim_end_matches('/');

    if prefix.is_empty() {
        format!("{}/feeds/{}", username, feed)
    } else {
        format!("{}/{}", prefix, feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_metric_display() {
        assert_eq!(MetricValue::from(500u16).to_string(), "500");
        assert_eq!(MetricValue::from(42u8).to_string(), "42");
    }

    #[test]
    fn test_float_metric_display() {
        assert_eq!(MetricValue::Float(23.0).to_string(), "23.0");
        assert_eq!(MetricValue::Float(23.5).to_string(), "23.5");
        assert_eq!(MetricValue::Float(10.46).to_string(), "10.46");
        assert_eq!(MetricValue::Float(-4.25).to_string(), "-4.25");
    }

    #[test]
    fn test_nan_metric_display() {
        assert_eq!(MetricValue::Float(f32::NAN).to_string(), "nan");
    }

    #[test]
    fn test_feed_topic_default_layout() {
        assert_eq!(feed_topic("farmer", "", metric::LIGHT), "farmer/feeds/light");
    }

    #[test]
    fn test_feed_topic_with_prefix() {
        assert_eq!(feed_topic("farmer", "farmer/groups/station/", metric::HUMIDITY), "farmer/groups/station/humidity");
    }
}
