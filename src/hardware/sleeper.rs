use std::time::Duration;

use esp_idf_svc::hal::delay::FreeRtos;

use super::{InterruptSignal, SleepOutcome, Sleeper};

/// 割り込み確認の間隔
const SLICE_MS: u64 = 100;

/// FreeRTOS の遅延を使ったスリープ
///
/// 短い間隔で区切って待機し、停止要求があれば即座に戻ります。
pub struct FreeRtosSleeper;

impl Sleeper for FreeRtosSleeper {
    fn sleep(&mut self, duration: Duration, interrupt: &dyn InterruptSignal) -> SleepOutcome {
        let mut remaining_ms = duration.as_millis() as u64;

        while remaining_ms > 0 {
            if interrupt.is_requested() {
                return SleepOutcome::Interrupted;
            }
            let slice = remaining_ms.min(SLICE_MS);
            FreeRtos::delay_ms(slice as u32);
            remaining_ms -= slice;
        }

        if interrupt.is_requested() {
            SleepOutcome::Interrupted
        } else {
            SleepOutcome::Completed
        }
    }
}
