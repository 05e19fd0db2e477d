//! Receiver configuration parameters
//!
//! The serial parameters are fixed by the DR16 hardware and are applied
//! once when the UART is installed. Timing and task values can be
//! overridden at build time with a JSON document in `DR16_CONFIG_JSON`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Serial parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Line parameters of the receiver's serial output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub parity: Parity,
    pub data_bits: u8,
    pub stop_bits: u8,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 100_000,
            parity: Parity::Even,
            data_bits: 8,
            stop_bits: 1,
        }
    }
}

/// Worker thread placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Thread name (without NUL terminator).
    pub name: heapless::String<16>,
    /// Stack size in KiB.
    pub stack_kb: usize,
    /// FreeRTOS priority; ignored on the host.
    pub priority: u8,
}

impl Default for TaskConfig {
    fn default() -> Self {
        let mut name = heapless::String::new();
        let _ = name.push_str("uart_dr16");
        Self {
            name,
            stack_kb: 8,
            priority: 20,
        }
    }
}

/// Core receiver configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    pub serial: SerialConfig,
    pub task: TaskConfig,
    pub timing: TimingConfig,
}

/// Recovery and diagnostics timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Settle delay after a resync (milliseconds)
    pub resync_delay_ms: u32,
    /// Consecutive rejected cycles before the link is reported lost
    pub signal_lost_after: u32,
    /// Supervisor tick for watchdog feed and monitor hooks (milliseconds)
    pub monitor_interval_ms: u32,
    /// Task watchdog timeout of the supervisor (milliseconds); must exceed
    /// `monitor_interval_ms`
    pub watchdog_timeout_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            resync_delay_ms: 3,
            signal_lost_after: 100,
            monitor_interval_ms: 1000,
            watchdog_timeout_ms: 5000,
        }
    }
}

impl ReceiverConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the receive loop cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.serial.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be non-zero"));
        }
        if !(5..=8).contains(&self.serial.data_bits) {
            return Err(Error::Config("data_bits must be 5..=8"));
        }
        if !(1..=2).contains(&self.serial.stop_bits) {
            return Err(Error::Config("stop_bits must be 1 or 2"));
        }
        if self.timing.resync_delay_ms == 0 {
            return Err(Error::Config("resync_delay_ms must be non-zero"));
        }
        if self.timing.monitor_interval_ms == 0 {
            return Err(Error::Config("monitor_interval_ms must be non-zero"));
        }
        if self.timing.monitor_interval_ms >= self.timing.watchdog_timeout_ms {
            return Err(Error::Config(
                "monitor_interval_ms must be below watchdog_timeout_ms",
            ));
        }
        if self.task.stack_kb == 0 {
            return Err(Error::Config("stack_kb must be non-zero"));
        }
        if self.task.name.is_empty() {
            return Err(Error::Config("task name must not be empty"));
        }
        Ok(())
    }
}
