use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};
use log::{error, info, warn};

use super::telemetry::{feed_topic, MetricValue, TelemetryClient, TelemetryError};
use crate::config::TelemetryConfig;

/// ESP-IDF MQTT クライアントを使ったテレメトリ送信
///
/// 接続は生成時に開始され、再接続は ESP-IDF 側に任せます。
pub struct MqttTelemetry {
    client: EspMqttClient<'static>,
    username: String,
    topic_prefix: String,
}

impl MqttTelemetry {
    /// ブローカーへの接続を開始
    pub fn connect(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        info!("MQTTブローカーに接続します: {}", config.broker_url);

        let mqtt_config = MqttClientConfiguration {
            client_id: Some(&config.client_id),
            username: Some(&config.username),
            password: Some(&config.key),
            ..Default::default()
        };

        let client = EspMqttClient::new_cb(&config.broker_url, &mqtt_config, |event| {
            match event.payload() {
                EventPayload::Connected(_) => info!("✓ MQTT接続完了"),
                EventPayload::Disconnected => warn!("MQTT接続が切断されました"),
                EventPayload::Error(e) => error!("MQTTエラー: {:?}", e),
                _ => {}
            }
        })
        .map_err(|e| TelemetryError::Connection(format!("{:?}", e)))?;

        Ok(Self {
            client,
            username: config.username.clone(),
            topic_prefix: config.topic_prefix.clone(),
        })
    }
}

impl TelemetryClient for MqttTelemetry {
    fn publish(&mut self, metric: &str, value: &MetricValue) -> Result<(), TelemetryError> {
        let topic = feed_topic(&self.username, &self.topic_prefix, metric);
        let payload = value.to_string();

        // enqueue は送信完了を待たずに戻る
        self.client
            .enqueue(&topic, QoS::AtMostOnce, false, payload.as_bytes())
            .map_err(|e| TelemetryError::Publish(format!("{}: {:?}", topic, e)))?;
        Ok(())
    }
}
