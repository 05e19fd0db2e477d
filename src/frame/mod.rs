//! DR16 telemetry frame codec.
//!
//! The receiver emits one fixed 18-byte frame per transport read. There is
//! no header, length or checksum; framing is recovered by the
//! [`filter`] plus a transport resync.
//!
//! Wire layout (little-endian, bit-packed, no padding):
//! ```text
//!  bit/byte  field            width
//!  ───────── ──────────────── ─────────────
//!  b0..44    ch_r_x ch_r_y    4 × 11 bit
//!            ch_l_x ch_l_y
//!  b44..46   sw_r             2 bit
//!  b46..48   sw_l             2 bit
//!  [6..8]    mouse_x          i16 LE
//!  [8..10]   mouse_y          i16 LE
//!  [10..12]  mouse_z          i16 LE
//!  [12]      mouse_press_l    u8
//!  [13]      mouse_press_r    u8
//!  [14..16]  key_mask         u16 LE
//!  [16..18]  reserved         u16 LE
//! ```

pub mod filter;
pub mod input;
pub mod keys;

use serde::{Deserialize, Serialize};

use keys::{Key, SwitchPosition, SwitchSide};

/// Size of one frame on the wire.
pub const FRAME_LEN: usize = 18;

/// Lowest meaningful channel value.
pub const CH_VALUE_MIN: u16 = 364;
/// Resting (stick centred) channel value.
pub const CH_VALUE_MID: u16 = 1024;
/// Highest meaningful channel value.
pub const CH_VALUE_MAX: u16 = 1684;

const CH_MASK: u16 = 0x07FF;
const SW_MASK: u8 = 0x03;

// ───────────────────────────────────────────────────────────────
// Frame types
// ───────────────────────────────────────────────────────────────

/// One undecoded frame exactly as read from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawFrame([u8; FRAME_LEN]);

impl RawFrame {
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Read target for the transport; overwritten on every cycle.
    pub fn as_mut_bytes(&mut self) -> &mut [u8; FRAME_LEN] {
        &mut self.0
    }
}

impl From<[u8; FRAME_LEN]> for RawFrame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }
}

/// Joystick axis identity, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    RightX,
    RightY,
    LeftX,
    LeftY,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::RightX,
        Channel::RightY,
        Channel::LeftX,
        Channel::LeftY,
    ];
}

/// A frame with every field widened to a plain integer.
///
/// `Copy` on purpose: subscribers receive a value, never a view into the
/// worker's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodedFrame {
    pub ch_r_x: u16,
    pub ch_r_y: u16,
    pub ch_l_x: u16,
    pub ch_l_y: u16,
    pub sw_r: u8,
    pub sw_l: u8,
    pub mouse_x: i16,
    pub mouse_y: i16,
    pub mouse_z: i16,
    pub mouse_press_l: u8,
    pub mouse_press_r: u8,
    pub key_mask: u16,
    pub reserved: u16,
}

impl DecodedFrame {
    /// Raw value of one joystick axis.
    pub const fn channel(&self, channel: Channel) -> u16 {
        match channel {
            Channel::RightX => self.ch_r_x,
            Channel::RightY => self.ch_r_y,
            Channel::LeftX => self.ch_l_x,
            Channel::LeftY => self.ch_l_y,
        }
    }

    /// Signed deflection from centre (`value - 1024`).
    pub const fn stick_offset(&self, channel: Channel) -> i16 {
        (self.channel(channel) as i16).wrapping_sub(CH_VALUE_MID as i16)
    }

    /// Raw 2-bit switch code for one side.
    pub const fn switch_code(&self, side: SwitchSide) -> u8 {
        match side {
            SwitchSide::Left => self.sw_l,
            SwitchSide::Right => self.sw_r,
        }
    }

    /// Decoded switch position; `None` for the no-signal code 0.
    pub fn switch(&self, side: SwitchSide) -> Option<SwitchPosition> {
        SwitchPosition::from_code(self.switch_code(side))
    }

    /// Whether `key` is held according to `key_mask`.
    ///
    /// Mouse edge identities are derived by [`input::InputTracker`] and
    /// never appear in the mask, so they always report `false` here.
    pub fn is_key_held(&self, key: Key) -> bool {
        key.is_keyboard() && u32::from(self.key_mask) & key.raw_value() != 0
    }
}

// ───────────────────────────────────────────────────────────────
// Codec
// ───────────────────────────────────────────────────────────────

/// Re-express the packed wire fields as plain integers.
///
/// Pure and total: performs no validation (see [`filter::check`]).
pub fn decode(raw: &RawFrame) -> DecodedFrame {
    let b = raw.as_bytes();
    let w = |i: usize| u16::from(b[i]);

    DecodedFrame {
        ch_r_x: (w(0) | w(1) << 8) & CH_MASK,
        ch_r_y: (w(1) >> 3 | w(2) << 5) & CH_MASK,
        ch_l_x: (w(2) >> 6 | w(3) << 2 | w(4) << 10) & CH_MASK,
        ch_l_y: (w(4) >> 1 | w(5) << 7) & CH_MASK,
        sw_r: (b[5] >> 4) & SW_MASK,
        sw_l: (b[5] >> 6) & SW_MASK,
        mouse_x: i16::from_le_bytes([b[6], b[7]]),
        mouse_y: i16::from_le_bytes([b[8], b[9]]),
        mouse_z: i16::from_le_bytes([b[10], b[11]]),
        mouse_press_l: b[12],
        mouse_press_r: b[13],
        key_mask: u16::from_le_bytes([b[14], b[15]]),
        reserved: u16::from_le_bytes([b[16], b[17]]),
    }
}

/// Pack a decoded frame back into the wire layout.
///
/// Channels are truncated to 11 bits and switches to 2 bits, so
/// `decode(&encode(&decode(raw))) == decode(raw)` for every input.
pub fn encode(frame: &DecodedFrame) -> RawFrame {
    let r_x = frame.ch_r_x & CH_MASK;
    let r_y = frame.ch_r_y & CH_MASK;
    let l_x = frame.ch_l_x & CH_MASK;
    let l_y = frame.ch_l_y & CH_MASK;
    let sw = (frame.sw_r & SW_MASK) | (frame.sw_l & SW_MASK) << 2;

    let mut b = [0u8; FRAME_LEN];
    b[0] = r_x as u8;
    b[1] = (r_x >> 8) as u8 | (r_y << 3) as u8;
    b[2] = (r_y >> 5) as u8 | (l_x << 6) as u8;
    b[3] = (l_x >> 2) as u8;
    b[4] = (l_x >> 10) as u8 | (l_y << 1) as u8;
    b[5] = (l_y >> 7) as u8 | sw << 4;
    b[6..8].copy_from_slice(&frame.mouse_x.to_le_bytes());
    b[8..10].copy_from_slice(&frame.mouse_y.to_le_bytes());
    b[10..12].copy_from_slice(&frame.mouse_z.to_le_bytes());
    b[12] = frame.mouse_press_l;
    b[13] = frame.mouse_press_r;
    b[14..16].copy_from_slice(&frame.key_mask.to_le_bytes());
    b[16..18].copy_from_slice(&frame.reserved.to_le_bytes());
    RawFrame(b)
}
