use std::cell::RefCell;

use embedded_hal_bus::i2c::RefCellDevice;
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    hal::{
        delay::Delay,
        i2c::{I2cConfig, I2cDriver},
        peripherals::Peripherals,
        prelude::*,
    },
    nvs::EspDefaultNvsPartition,
};
use log::{error, info};

use grove_sensor_station::communication::{MqttTelemetry, NetworkManager};
use grove_sensor_station::config::AppConfig;
use grove_sensor_station::core::SensorPollLoop;
use grove_sensor_station::hardware::button::InterruptButton;
use grove_sensor_station::hardware::sleeper::FreeRtosSleeper;
use grove_sensor_station::hardware::{GroveLcd, GroveSensorBoard};

/// アプリケーションのメインエントリーポイント
fn main() -> anyhow::Result<()> {
    // ESP-IDFの基本初期化
    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    info!("起動しています (v{})", grove_sensor_station::VERSION);

    // 設定ファイル読み込み
    let app_config = AppConfig::load().map_err(|e| {
        error!("設定ファイルの読み込みに失敗しました: {}", e);
        anyhow::anyhow!("設定ファイルの読み込みエラー: {}", e)
    })?;

    // ペリフェラルとシステムリソースの初期化
    info!("ペリフェラルを初期化しています");
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs_partition = EspDefaultNvsPartition::take()?;
    let pins = peripherals.pins;

    // WiFi / MQTT
    let _wifi = NetworkManager::connect_wifi(
        peripherals.modem,
        &sysloop,
        &nvs_partition,
        &app_config.wifi_ssid,
        &app_config.wifi_password,
    )?;
    let telemetry = MqttTelemetry::connect(&app_config.telemetry)?;

    // GrovePi と LCD は同じ I2C バスを共有する (SDA: GPIO5, SCL: GPIO6)
    let i2c_config = I2cConfig::new().baudrate(100.kHz().into());
    let i2c = RefCell::new(I2cDriver::new(
        peripherals.i2c0,
        pins.gpio5,
        pins.gpio6,
        &i2c_config,
    )?);

    let board = GroveSensorBoard::new(RefCellDevice::new(&i2c), Delay::new_default());
    let display = GroveLcd::new(RefCellDevice::new(&i2c), Delay::new_default());
    let stop_button = InterruptButton::new(pins.gpio0)?;

    let mut poll_loop = SensorPollLoop::new(board, display, telemetry, app_config.station.clone());
    poll_loop.setup()?;
    info!("✓ センサーの準備ができました");

    let stats = poll_loop.run(&stop_button, &mut FreeRtosSleeper)?;
    info!("終了しました ({}周期)", stats.ticks);

    Ok(())
}
