//! Keypad geometry
//!
//! Keys are addressed by stable integer slot ids. A slot is a fixed position
//! on the pad; which digit it shows is decided by the [`SlotMap`](crate::SlotMap).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::controller::PinInput;

/// Number of digit slots on the pad
pub const SLOT_COUNT: usize = 10;

/// Number of rows in the key grid
pub const KEYPAD_ROW_COUNT: usize = 4;

/// Number of columns in the key grid
pub const KEYPAD_COLUMN_COUNT: usize = 3;

/// Fixed physical position of a digit key, in `0..SLOT_COUNT`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotId(u8);

impl SlotId {
    /// Create a slot id, or `None` when the index is off the pad
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < SLOT_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Index of this slot, in `0..SLOT_COUNT`
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every slot in index order
    pub fn all() -> impl Iterator<Item = SlotId> {
        (0..SLOT_COUNT as u8).map(SlotId)
    }
}

impl TryFrom<u8> for SlotId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("slot {} is outside 0..{}", value, SLOT_COUNT))
    }
}

impl From<SlotId> for u8 {
    fn from(slot: SlotId) -> Self {
        slot.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

/// A key on the pad
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeypadKey {
    /// One of the ten digit slots
    Slot(SlotId),
    /// Remove the last digit
    Backspace,
    /// Submit the pin
    Submit,
}

impl KeypadKey {
    /// Controller input produced by pressing this key
    pub fn input(self) -> PinInput {
        match self {
            KeypadKey::Slot(slot) => PinInput::Digit(slot),
            KeypadKey::Backspace => PinInput::Backspace,
            KeypadKey::Submit => PinInput::Submit,
        }
    }
}

const fn slot(index: u8) -> KeypadKey {
    KeypadKey::Slot(SlotId(index))
}

/// The key grid, top row first
pub const KEYPAD_ROWS: [[KeypadKey; KEYPAD_COLUMN_COUNT]; KEYPAD_ROW_COUNT] = [
    [slot(1), slot(2), slot(3)],
    [slot(4), slot(5), slot(6)],
    [slot(7), slot(8), slot(9)],
    [KeypadKey::Backspace, slot(0), KeypadKey::Submit],
];

/// Grid position of a key as `(row, column)`
pub const fn position_of(key: KeypadKey) -> (usize, usize) {
    match key {
        KeypadKey::Backspace => (3, 0),
        KeypadKey::Submit => (3, 2),
        KeypadKey::Slot(SlotId(0)) => (3, 1),
        KeypadKey::Slot(SlotId(n)) => {
            let offset = n as usize - 1;
            (offset / KEYPAD_COLUMN_COUNT, offset % KEYPAD_COLUMN_COUNT)
        }
    }
}

/// Keyboard focus on the key grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeypadCursor {
    row: usize,
    col: usize,
}

impl Default for KeypadCursor {
    fn default() -> Self {
        let (row, col) = position_of(slot(5));
        Self { row, col }
    }
}

impl KeypadCursor {
    /// Key under the cursor
    pub fn key(&self) -> KeypadKey {
        KEYPAD_ROWS[self.row][self.col]
    }

    /// Cursor position as `(row, column)`
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < KEYPAD_ROW_COUNT {
            self.row += 1;
        }
    }

    pub fn move_left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.col + 1 < KEYPAD_COLUMN_COUNT {
            self.col += 1;
        }
    }

    /// Move focus onto a specific key
    pub fn focus(&mut self, key: KeypadKey) {
        let (row, col) = position_of(key);
        self.row = row;
        self.col = col;
    }
}
