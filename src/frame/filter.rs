//! Structural validity filter.
//!
//! The DR16 wire format carries no checksum. A torn or misaligned read
//! shows up as a channel outside the physical stick range or as a switch
//! reporting the no-signal code 0; both are rejected here.

use core::fmt;

use super::keys::SwitchSide;
use super::{CH_VALUE_MAX, CH_VALUE_MIN, Channel, DecodedFrame, RawFrame, decode};

/// Why a frame was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFault {
    /// A joystick channel lies outside `[364, 1684]`.
    ChannelOutOfRange { channel: Channel, value: u16 },
    /// A switch reported code 0.
    SwitchUnset(SwitchSide),
}

impl fmt::Display for FrameFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelOutOfRange { channel, value } => {
                write!(f, "channel {channel:?} out of range ({value})")
            }
            Self::SwitchUnset(side) => write!(f, "{side:?} switch unset"),
        }
    }
}

/// Whether `value` is a meaningful channel reading.
pub const fn channel_in_range(value: u16) -> bool {
    value >= CH_VALUE_MIN && value <= CH_VALUE_MAX
}

/// Check every field of `raw`, reporting the first fault found.
///
/// Check order only affects which fault is reported, never the verdict.
pub fn check(raw: &RawFrame) -> Result<(), FrameFault> {
    check_decoded(&decode(raw))
}

/// [`check`] over an already decoded frame.
pub fn check_decoded(frame: &DecodedFrame) -> Result<(), FrameFault> {
    for channel in Channel::ALL {
        let value = frame.channel(channel);
        if !channel_in_range(value) {
            return Err(FrameFault::ChannelOutOfRange { channel, value });
        }
    }
    if frame.sw_l == 0 {
        return Err(FrameFault::SwitchUnset(SwitchSide::Left));
    }
    if frame.sw_r == 0 {
        return Err(FrameFault::SwitchUnset(SwitchSide::Right));
    }
    Ok(())
}

/// `true` if `raw` must be discarded.
pub fn is_corrupted(raw: &RawFrame) -> bool {
    check(raw).is_err()
}
