//! DR16 receiver firmware: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  UartTransport        TopicPublisher        SystemDelay        │
//! │  (FrameTransport)     (FramePublisher)      (DelayNs)          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │        Receiver (APP core, "uart_dr16" thread)         │    │
//! │  │  read 18 B · filter · decode · publish · resync        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Input tap ("dr16_tap" thread): every frame → InputTracker     │
//! │  Supervisor (main task): watchdog · monitor                    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::UartDriver;
use log::{debug, info, warn};

use dr16::adapters::time::SystemDelay;
use dr16::adapters::topic::{DR16_TOPIC, InputTap, TopicPublisher};
use dr16::adapters::uart::{UartTransport, uart_config};
use dr16::app::ports::Monitor;
use dr16::app::receiver::Receiver;
use dr16::config::ReceiverConfig;
use dr16::drivers::task_pin::{Core, spawn_on_core};
use dr16::drivers::watchdog::Watchdog;

/// Tap poll period; well inside the topic depth at 14 ms per frame.
const TAP_POLL_MS: u64 = 10;

fn load_config() -> ReceiverConfig {
    match option_env!("DR16_CONFIG_JSON") {
        Some(json) => match ReceiverConfig::from_json(json) {
            Ok(cfg) => {
                info!("Config: build-time override applied");
                cfg
            }
            Err(e) => {
                warn!("Config override rejected ({}), using defaults", e);
                ReceiverConfig::default()
            }
        },
        None => ReceiverConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  DR16 receiver v{}                ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = load_config();
    let watchdog = Watchdog::new(config.timing.watchdog_timeout_ms);

    // ── 2. UART (RX on GPIO18, TX unused on GPIO17) ───────────
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;
    let driver = UartDriver::new(
        peripherals.uart1,
        pins.gpio17,
        pins.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_config(&config.serial),
    )?;
    info!(
        "UART1: {} baud, {:?} parity, {} data, {} stop",
        config.serial.baud_rate,
        config.serial.parity,
        config.serial.data_bits,
        config.serial.stop_bits
    );

    // ── 3. Receiver worker ────────────────────────────────────
    let mut tap = InputTap::new(&DR16_TOPIC)?;
    let receiver = Receiver::new(
        UartTransport::new(driver),
        TopicPublisher::new(&DR16_TOPIC),
        SystemDelay::new(),
        &config,
    );
    let mut handle = receiver.spawn(&config.task)?;
    info!("Receiver running as '{}'", handle.name().unwrap_or("?"));

    // ── 4. Input tap (low priority, PRO core) ────────────────
    let _tap_thread = spawn_on_core(Core::Pro, 5, 4, "dr16_tap", move || {
        loop {
            tap.poll(|events| debug!("DR16 inputs: {:?}", events.as_slice()));
            std::thread::sleep(std::time::Duration::from_millis(TAP_POLL_MS));
        }
    })?;

    // ── 5. Supervision loop ───────────────────────────────────
    loop {
        watchdog.feed();
        handle.on_monitor();
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.timing.monitor_interval_ms,
        )));
    }
}
