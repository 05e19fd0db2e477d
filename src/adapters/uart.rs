//! Serial transport adapters.
//!
//! - **`UartTransport`** (ESP-IDF): blocking reads from an installed
//!   `UartDriver`; resync flushes the driver's RX ring buffer.
//! - **`IoTransport`** (any target): reads frames from a `std::io::Read`
//!   source through a `BufReader`; resync discards the buffered bytes.
//!   Used for host replay of captured streams and in tests.

use std::io::{BufRead, BufReader, ErrorKind, Read};

use log::{debug, warn};

use crate::app::ports::FrameTransport;
use crate::error::TransportError;
use crate::frame::FRAME_LEN;

// ───────────────────────────────────────────────────────────────
// ESP-IDF UART
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_hal::delay::BLOCK;
    use esp_idf_hal::sys::EspError;
    use esp_idf_hal::uart::{UartDriver, config};
    use esp_idf_hal::units::Hertz;
    use log::warn;

    use crate::app::ports::FrameTransport;
    use crate::config::{Parity, SerialConfig};
    use crate::frame::FRAME_LEN;

    /// Translate line parameters into an ESP-IDF UART configuration.
    pub fn uart_config(serial: &SerialConfig) -> config::Config {
        let data_bits = match serial.data_bits {
            5 => config::DataBits::DataBits5,
            6 => config::DataBits::DataBits6,
            7 => config::DataBits::DataBits7,
            _ => config::DataBits::DataBits8,
        };
        let stop_bits = match serial.stop_bits {
            2 => config::StopBits::STOP2,
            _ => config::StopBits::STOP1,
        };

        let cfg = config::Config::new()
            .baudrate(Hertz(serial.baud_rate))
            .data_bits(data_bits)
            .stop_bits(stop_bits);

        match serial.parity {
            Parity::None => cfg.parity_none(),
            Parity::Even => cfg.parity_even(),
            Parity::Odd => cfg.parity_odd(),
        }
    }

    pub struct UartTransport<'d> {
        driver: UartDriver<'d>,
    }

    impl<'d> UartTransport<'d> {
        pub fn new(driver: UartDriver<'d>) -> Self {
            Self { driver }
        }
    }

    impl FrameTransport for UartTransport<'_> {
        type Error = EspError;

        fn read_frame(&mut self, buf: &mut [u8; FRAME_LEN]) -> Result<(), EspError> {
            let mut filled = 0;
            while filled < FRAME_LEN {
                filled += self.driver.read(&mut buf[filled..], BLOCK)?;
            }
            Ok(())
        }

        fn resync(&mut self) {
            if let Err(e) = self.driver.clear_rx() {
                warn!("UART: RX flush failed: {:?}", e);
            }
        }
    }
}

#[cfg(target_os = "espidf")]
pub use esp::{UartTransport, uart_config};

// ───────────────────────────────────────────────────────────────
// Byte-stream transport
// ───────────────────────────────────────────────────────────────

/// Frame transport over any blocking byte source.
pub struct IoTransport<R> {
    reader: BufReader<R>,
}

impl<R: Read> IoTransport<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
        }
    }

    /// Buffer up to `capacity` bytes ahead of the frame being read.
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, inner),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: Read> FrameTransport for IoTransport<R> {
    type Error = TransportError;

    fn read_frame(&mut self, buf: &mut [u8; FRAME_LEN]) -> Result<(), TransportError> {
        self.reader.read_exact(buf).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => TransportError::EndOfStream,
            _ => {
                warn!("IoTransport: read failed: {}", e);
                TransportError::ReadFailed
            }
        })
    }

    fn resync(&mut self) {
        let pending = self.reader.buffer().len();
        self.reader.consume(pending);
        debug!("IoTransport: discarded {} buffered bytes", pending);
    }
}
