//! Edge detection over consecutive decoded frames.
//!
//! A subscriber that wants "key pressed" / "switch moved" events rather
//! than level snapshots feeds each frame it receives into an
//! [`InputTracker`]. Mouse-button edges are synthesised here; they are the
//! only source of the `LeftPress`..`RightRelease` identities.

use heapless::Vec;

use super::DecodedFrame;
use super::keys::{Key, KEY_COUNT, SwitchPosition, SwitchSide};

/// Identities that fired on one update, in index order.
pub type InputEvents = Vec<u8, { KEY_COUNT as usize }>;

/// Remembers the previous frame and reports what changed.
#[derive(Debug, Default)]
pub struct InputTracker {
    last: Option<DecodedFrame>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget history; the next frame reports every held input again.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Compare `frame` with the previous one and collect fired identities.
    ///
    /// - switch: the identity of the new position when it changed
    /// - keyboard: keys that went from released to held
    /// - mouse: press / release edges of either button
    pub fn update(&mut self, frame: &DecodedFrame) -> InputEvents {
        let prev = self.last.unwrap_or_default();
        let mut events = InputEvents::new();

        for side in [SwitchSide::Left, SwitchSide::Right] {
            if frame.switch_code(side) != prev.switch_code(side) {
                if let Some(pos) = frame.switch(side) {
                    push(&mut events, pos.index(side));
                }
            }
        }

        let pressed = frame.key_mask & !prev.key_mask;
        for key in Key::KEYBOARD {
            if u32::from(pressed) & key.raw_value() != 0 {
                push(&mut events, key.index());
            }
        }

        let (was_l, is_l) = (prev.mouse_press_l != 0, frame.mouse_press_l != 0);
        let (was_r, is_r) = (prev.mouse_press_r != 0, frame.mouse_press_r != 0);
        if is_l && !was_l {
            push(&mut events, Key::LeftPress.index());
        }
        if is_r && !was_r {
            push(&mut events, Key::RightPress.index());
        }
        if was_l && !is_l {
            push(&mut events, Key::LeftRelease.index());
        }
        if was_r && !is_r {
            push(&mut events, Key::RightRelease.index());
        }

        self.last = Some(*frame);
        events
    }

    /// Current position of a switch as of the last update.
    pub fn switch(&self, side: SwitchSide) -> Option<SwitchPosition> {
        self.last.and_then(|f| f.switch(side))
    }
}

fn push(events: &mut InputEvents, id: u8) {
    // At most one identity per slot of the index space can fire.
    let _ = events.push(id);
}
