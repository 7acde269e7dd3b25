/// センサー値の計算ユーティリティ
/// ハードウェア非依存の純粋関数を提供

/// 10bit ADC の最大値
pub const ADC_MAX: u16 = 1023;

/// 光センサーの生値から抵抗値 (kΩ) を計算する
///
/// `(1023 - raw) * 10 / raw`。生値 0 は最も暗い表現可能な値 1 として扱い、
/// 有限の最大抵抗値 10230 を返します。1023 を超える値は 1023 に丸めます。
///
/// # Examples
/// ```
/// use grove_sensor_station::utils::sensor_calc::light_resistance;
///
/// let resistance = light_resistance(500);
/// assert!((resistance - 10.46).abs() < 1e-4);
/// ```
pub fn light_resistance(raw: u16) -> f32 {
    let raw = raw.clamp(1, ADC_MAX);
    f32::from(ADC_MAX - raw) * 10.0 / f32::from(raw)
}

/// 抵抗値が閾値を超えたら LED を点灯する
pub fn led_should_be_on(resistance: f32, threshold: f32) -> bool {
    resistance > threshold
}

/// 土壌水分センサーの生値をパーセンテージに変換する
///
/// # Arguments
/// - `raw`: ADC 生値
/// - `dry_raw`: 乾燥状態の生値（0%相当）
/// - `wet_raw`: 水中での生値（100%相当）
///
/// # Returns
/// - 0-100: 水分パーセンテージ
///
/// # Examples
/// ```
/// use grove_sensor_station::utils::sensor_calc::soil_moisture_percentage;
///
/// assert_eq!(soil_moisture_percentage(659, 1024, 294), 50);
/// ```
pub fn soil_moisture_percentage(raw: u16, dry_raw: u16, wet_raw: u16) -> u8 {
    let span = f32::from(dry_raw) - f32::from(wet_raw);

    let percentage = if span <= 0.0 {
        0.0
    } else {
        ((f32::from(dry_raw) - f32::from(raw)) / span * 100.0)
            .max(0.0)
            .min(100.0)
    };

    percentage.round() as u8
}

/// 温湿度センサーの読み取り失敗 (NaN) を判定
pub fn is_sentinel_nan(temperature: f32, humidity: f32) -> bool {
    temperature.is_nan() || humidity.is_nan()
}
