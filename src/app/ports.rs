//! Port traits at the boundary between the receive loop and the outside world.
//!
//! ```text
//!   UART adapter ──▶ FrameTransport ──▶ Receiver ──▶ FramePublisher ──▶ topic
//! ```
//!
//! The [`Receiver`](super::receiver::Receiver) is generic over these traits
//! and receives concrete handles at construction, so the loop never looks
//! hardware up by name and runs unchanged against mocks on the host.

use crate::frame::{DecodedFrame, FRAME_LEN};

// ───────────────────────────────────────────────────────────────
// Transport port (driven adapter: serial line → receiver)
// ───────────────────────────────────────────────────────────────

/// Byte source configured for the receiver's fixed serial parameters.
pub trait FrameTransport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Block until exactly `buf.len()` bytes have been read into `buf`.
    ///
    /// Implementations may block indefinitely; the receiver tolerates it.
    fn read_frame(&mut self, buf: &mut [u8; FRAME_LEN]) -> Result<(), Self::Error>;

    /// Discard any buffered or partially received bytes so the next read
    /// starts on a fresh frame boundary.
    fn resync(&mut self);
}

impl<T: FrameTransport + ?Sized> FrameTransport for &mut T {
    type Error = T::Error;

    fn read_frame(&mut self, buf: &mut [u8; FRAME_LEN]) -> Result<(), Self::Error> {
        (**self).read_frame(buf)
    }

    fn resync(&mut self) {
        (**self).resync();
    }
}

// ───────────────────────────────────────────────────────────────
// Publish port (driven adapter: receiver → subscribers)
// ───────────────────────────────────────────────────────────────

/// One-shot delivery of a decoded frame to every current subscriber.
///
/// Fire-and-forget: no acknowledgement, no retry, no backpressure. Must
/// not block appreciably, or it delays the next read.
pub trait FramePublisher {
    fn publish(&mut self, frame: &DecodedFrame);
}

impl<F: FnMut(&DecodedFrame)> FramePublisher for F {
    fn publish(&mut self, frame: &DecodedFrame) {
        self(frame);
    }
}

// ───────────────────────────────────────────────────────────────
// Lifecycle port (host supervisor → application)
// ───────────────────────────────────────────────────────────────

/// Health hook invoked periodically by the application supervisor.
pub trait Monitor {
    /// Called once per supervision tick. Default: nothing to report.
    fn on_monitor(&mut self) {}
}
