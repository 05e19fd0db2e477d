//! Mock link adapters for integration tests.
//!
//! Scripted transport reads, a recording publisher and a delay that only
//! counts, so tests can assert on the full receive history without a
//! serial line.

use std::collections::VecDeque;

use dr16::app::ports::{FramePublisher, FrameTransport};
use dr16::error::TransportError;
use dr16::frame::{CH_VALUE_MID, DecodedFrame, FRAME_LEN, encode};
use embedded_hal::delay::DelayNs;

/// Sticks centred, both switches code 1, everything else idle.
pub const CENTER: [u8; FRAME_LEN] = [
    0x00, 0x04, 0x20, 0x00, 0x01, 0x58, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Valid frame with `edit` applied on top of the centred sticks.
#[allow(dead_code)]
pub fn frame_with(edit: impl FnOnce(&mut DecodedFrame)) -> [u8; FRAME_LEN] {
    let mut f = DecodedFrame {
        ch_r_x: CH_VALUE_MID,
        ch_r_y: CH_VALUE_MID,
        ch_l_x: CH_VALUE_MID,
        ch_l_y: CH_VALUE_MID,
        sw_r: 1,
        sw_l: 1,
        ..DecodedFrame::default()
    };
    edit(&mut f);
    *encode(&f).as_bytes()
}

// ── Scripted transport ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum LinkRead {
    Frame([u8; FRAME_LEN]),
    Fail,
}

#[derive(Default)]
pub struct MockTransport {
    pub script: VecDeque<LinkRead>,
    pub reads: usize,
    pub resyncs: usize,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(frames: impl IntoIterator<Item = [u8; FRAME_LEN]>) -> Self {
        Self {
            script: frames.into_iter().map(LinkRead::Frame).collect(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, read: LinkRead) {
        self.script.push_back(read);
    }
}

impl FrameTransport for MockTransport {
    type Error = TransportError;

    fn read_frame(&mut self, buf: &mut [u8; FRAME_LEN]) -> Result<(), TransportError> {
        self.reads += 1;
        match self.script.pop_front() {
            Some(LinkRead::Frame(bytes)) => {
                *buf = bytes;
                Ok(())
            }
            Some(LinkRead::Fail) => Err(TransportError::ReadFailed),
            None => Err(TransportError::EndOfStream),
        }
    }

    fn resync(&mut self) {
        self.resyncs += 1;
    }
}

// ── Recording publisher ───────────────────────────────────────

#[derive(Default)]
pub struct MockPublisher {
    pub frames: Vec<DecodedFrame>,
}

impl FramePublisher for MockPublisher {
    fn publish(&mut self, frame: &DecodedFrame) {
        self.frames.push(*frame);
    }
}

// ── Counting delay ────────────────────────────────────────────

#[derive(Default)]
pub struct CountingDelay {
    /// Every millisecond wait requested, in order.
    pub waits_ms: Vec<u32>,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns.div_ceil(1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}
