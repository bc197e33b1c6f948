mod matrix;

pub use matrix::MatrixKeypad;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A key on the Master's 4x4 keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    A,
    B,
    C,
    D,
    Star,
    Hash,
}

impl Key {
    /// Physical layout, indexed `[row][column]`.
    pub const LAYOUT: [[Key; 4]; 4] = [
        [Key::Num1, Key::Num2, Key::Num3, Key::A],
        [Key::Num4, Key::Num5, Key::Num6, Key::B],
        [Key::Num7, Key::Num8, Key::Num9, Key::C],
        [Key::Star, Key::Num0, Key::Hash, Key::D],
    ];

    pub fn as_char(&self) -> char {
        match self {
            Key::Num0 => '0',
            Key::Num1 => '1',
            Key::Num2 => '2',
            Key::Num3 => '3',
            Key::Num4 => '4',
            Key::Num5 => '5',
            Key::Num6 => '6',
            Key::Num7 => '7',
            Key::Num8 => '8',
            Key::Num9 => '9',
            Key::A => 'A',
            Key::B => 'B',
            Key::C => 'C',
            Key::D => 'D',
            Key::Star => '*',
            Key::Hash => '#',
        }
    }
}

impl TryFrom<char> for Key {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Key::LAYOUT
            .iter()
            .flatten()
            .copied()
            .find(|key| key.as_char() == c.to_ascii_uppercase())
            .ok_or(Error::InvalidKey(c))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Polled key source. Returns the key held down right now, if any.
pub trait Keypad {
    fn read_key(&mut self) -> Option<Key>;
}

impl<K: Keypad + ?Sized> Keypad for &mut K {
    fn read_key(&mut self) -> Option<Key> {
        (**self).read_key()
    }
}
