use std::sync::atomic::{AtomicBool, Ordering};

use esp_idf_svc::hal::gpio::{Gpio0, Input, InterruptType, PinDriver, Pull};
use log::info;

use super::InterruptSignal;

/// ISR から書き込まれる停止要求フラグ
static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

/// BOOTボタン (GPIO0) による停止要求
///
/// 立ち下がりエッジで割り込みが発生し、以降 `is_requested` が true を返します。
pub struct InterruptButton {
    _pin: PinDriver<'static, Gpio0, Input>,
}

impl InterruptButton {
    pub fn new(pin: Gpio0) -> anyhow::Result<Self> {
        let mut driver = PinDriver::input(pin)?;
        driver.set_pull(Pull::Up)?;
        driver.set_interrupt_type(InterruptType::NegEdge)?;

        // SAFETY: コールバックはアトミック変数の書き込みのみを行う
        unsafe {
            driver.subscribe(|| {
                STOP_REQUESTED.store(true, Ordering::SeqCst);
            })?;
        }
        driver.enable_interrupt()?;

        info!("BOOTボタンによる停止要求を受け付けます");
        Ok(Self { _pin: driver })
    }
}

impl InterruptSignal for InterruptButton {
    fn is_requested(&self) -> bool {
        STOP_REQUESTED.load(Ordering::SeqCst)
    }
}
