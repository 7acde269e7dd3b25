/// コアシステムモジュール
pub mod config_validation;
pub mod measured_data;
pub mod poll_loop;
pub mod station_config;

pub use measured_data::{MeasuredData, SensorChannel, SensorReading};
pub use poll_loop::{LoopStats, SensorPollLoop, StationError, TickOutcome};
pub use station_config::StationConfig;
