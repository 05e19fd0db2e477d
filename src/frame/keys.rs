//! Switch, key and mouse-edge identities.
//!
//! Every discrete input shares one flat `u8` index space:
//!
//! | Range  | Identity                                        |
//! |--------|-------------------------------------------------|
//! | 0..3   | left switch Top / Bottom / Middle               |
//! | 3..6   | right switch Top / Bottom / Middle              |
//! | 6..22  | keyboard W S A D Shift Ctrl Q E R F G Z X C V B |
//! | 22..26 | mouse LeftPress RightPress LeftRelease RightRelease |
//!
//! Modifier combinations (`shift_with` etc.) are offsets past
//! [`KEY_COUNT`]; they are lookup keys for consumers, not decoded state.

use serde::{Deserialize, Serialize};

/// Which physical toggle switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwitchSide {
    Left,
    Right,
}

/// Position of a three-way switch. Wire code 0 has no position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SwitchPosition {
    Top = 1,
    Bottom = 2,
    Middle = 3,
}

/// Number of switch-position identities (two switches × three positions).
pub const SWITCH_POSITION_COUNT: u8 = 6;

impl SwitchPosition {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Top),
            2 => Some(Self::Bottom),
            3 => Some(Self::Middle),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Flat identity of this position on `side`.
    pub const fn index(self, side: SwitchSide) -> u8 {
        let base = match side {
            SwitchSide::Left => 0,
            SwitchSide::Right => 3,
        };
        base + self as u8 - 1
    }
}

/// Keyboard keys followed by synthetic mouse-button edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    W = SWITCH_POSITION_COUNT,
    S,
    A,
    D,
    Shift,
    Ctrl,
    Q,
    E,
    R,
    F,
    G,
    Z,
    X,
    C,
    V,
    B,
    LeftPress,
    RightPress,
    LeftRelease,
    RightRelease,
}

/// One past the last identity in the flat index space.
pub const KEY_COUNT: u8 = Key::RightRelease as u8 + 1;

impl Key {
    /// The 16 keys carried in `key_mask`, in bit order.
    pub const KEYBOARD: [Key; 16] = [
        Key::W,
        Key::S,
        Key::A,
        Key::D,
        Key::Shift,
        Key::Ctrl,
        Key::Q,
        Key::E,
        Key::R,
        Key::F,
        Key::G,
        Key::Z,
        Key::X,
        Key::C,
        Key::V,
        Key::B,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Position relative to [`Key::W`]; equals the `key_mask` bit for
    /// keyboard keys.
    pub const fn bit(self) -> u8 {
        self as u8 - Key::W as u8
    }

    /// Single-bit presence mask.
    pub const fn raw_value(self) -> u32 {
        1 << self.bit()
    }

    /// Whether this key is carried in the 16-bit `key_mask`.
    pub const fn is_keyboard(self) -> bool {
        self.bit() < 16
    }

    /// Keyboard key for `key_mask` bit `bit`.
    pub const fn from_bit(bit: u8) -> Option<Key> {
        if bit < 16 {
            Some(Self::KEYBOARD[bit as usize])
        } else {
            None
        }
    }

    pub const fn shift_with(self) -> u32 {
        self as u32 + KEY_COUNT as u32
    }

    pub const fn ctrl_with(self) -> u32 {
        self as u32 + 2 * KEY_COUNT as u32
    }

    pub const fn shift_ctrl_with(self) -> u32 {
        self as u32 + 3 * KEY_COUNT as u32
    }
}
