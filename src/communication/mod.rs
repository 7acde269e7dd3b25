/// 通信モジュール
pub mod telemetry;

#[cfg(feature = "esp")]
pub mod mqtt;
#[cfg(feature = "esp")]
pub mod network_manager;

// Mock実装（テストとnon-espビルドで使用可能）
#[cfg(not(feature = "esp"))]
pub mod mock;

pub use telemetry::{feed_topic, MetricValue, TelemetryClient, TelemetryError};

#[cfg(feature = "esp")]
pub use mqtt::MqttTelemetry;
#[cfg(feature = "esp")]
pub use network_manager::NetworkManager;
