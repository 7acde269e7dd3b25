/// ユーティリティモジュール
/// ハードウェア非依存の純粋関数を提供

pub mod sensor_calc;

// 便利な再エクスポート
pub use sensor_calc::{is_sentinel_nan, led_should_be_on, light_resistance, soil_moisture_percentage};
