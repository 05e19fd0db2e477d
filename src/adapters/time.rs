//! Delay adapter for the resync back-off.
//!
//! - **`target_os = "espidf"`**: FreeRTOS `vTaskDelay` for millisecond
//!   waits (the worker yields the core), ROM busy-wait below one tick.
//! - **`not(target_os = "espidf")`**: `std::thread::sleep` for host-side
//!   testing and simulation.

use embedded_hal::delay::DelayNs;

/// Blocking delay that suspends the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDelay;

impl SystemDelay {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for SystemDelay {
    fn delay_ns(&mut self, ns: u32) {
        let ms = ns / 1_000_000;
        if ms > 0 {
            esp_idf_hal::delay::FreeRtos::delay_ms(ms);
        } else {
            esp_idf_hal::delay::Ets::delay_us(ns.div_ceil(1000));
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for SystemDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
