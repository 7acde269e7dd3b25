use std::sync::{Arc, Mutex};

use super::telemetry::{MetricValue, TelemetryClient, TelemetryError};

/// テスト用のテレメトリモック実装
///
/// 送信されたメトリクスを記録し、テストで検証できます。
#[derive(Debug, Clone, Default)]
pub struct MockTelemetry {
    /// 送信されたメトリクスの記録
    pub published: Arc<Mutex<Vec<(String, MetricValue)>>>,
    /// エラーシミュレーション用のフラグ
    pub simulate_error: Arc<Mutex<bool>>,
}

impl MockTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: 送信されたメトリクスを取得
    pub fn get_published(&self) -> Vec<(String, MetricValue)> {
        self.published.lock().unwrap().clone()
    }

    /// テスト用: 送信されたメトリクス名の一覧
    pub fn published_names(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// テスト用: 指定メトリクスの最後の値
    pub fn last_value(&self, metric: &str) -> Option<MetricValue> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _)| name == metric)
            .map(|(_, value)| *value)
    }

    /// テスト用: 送信エラーをシミュレート
    pub fn set_error(&self, enable: bool) {
        *self.simulate_error.lock().unwrap() = enable;
    }
}

impl TelemetryClient for MockTelemetry {
    fn publish(&mut self, metric: &str, value: &MetricValue) -> Result<(), TelemetryError> {
        if *self.simulate_error.lock().unwrap() {
            return Err(TelemetryError::Publish("Simulated publish error".to_string()));
        }
        self.published.lock().unwrap().push((metric.to_string(), *value));
        Ok(())
    }
}
