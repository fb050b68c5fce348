//! Linux input event codes used by wireless controllers.

use serde::{Deserialize, Serialize};

/// Button codes (`EV_KEY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    A,
    B,
    X,
    Y,
    BumperLeft,
    BumperRight,
    Select,
    Start,
    Mode,
    ThumbLeft,
    ThumbRight,
}

impl Key {
    pub const fn code(self) -> u16 {
        match self {
            Key::A => 0x130,
            Key::B => 0x131,
            Key::X => 0x133,
            Key::Y => 0x134,
            Key::BumperLeft => 0x136,
            Key::BumperRight => 0x137,
            Key::Select => 0x13A,
            Key::Start => 0x13B,
            Key::Mode => 0x13C,
            Key::ThumbLeft => 0x13D,
            Key::ThumbRight => 0x13E,
        }
    }
}

/// Absolute axis codes (`EV_ABS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    Hat0X,
    Hat0Y,
}

impl Axis {
    pub const fn code(self) -> u16 {
        match self {
            Axis::X => 0x00,
            Axis::Y => 0x01,
            Axis::Z => 0x02,
            Axis::Rx => 0x03,
            Axis::Ry => 0x04,
            Axis::Rz => 0x05,
            Axis::Hat0X => 0x10,
            Axis::Hat0Y => 0x11,
        }
    }
}

/// Force-feedback capability codes (`EV_FF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Rumble,
}

impl FeedbackKind {
    pub const fn code(self) -> u16 {
        match self {
            FeedbackKind::Rumble => 0x50,
        }
    }
}
