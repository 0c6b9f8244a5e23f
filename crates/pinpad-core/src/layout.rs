//! Digit placement on the keypad
//!
//! Each of the ten slots shows exactly one digit. With random placement
//! enabled the digits are dealt with a fresh Fisher-Yates shuffle every time
//! the pad is (re)configured, so the position of a digit cannot be learned by
//! watching earlier sessions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::keypad::{SlotId, SLOT_COUNT};

/// Bijection from slot to the digit it currently shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotMap {
    digits: [u8; SLOT_COUNT],
}

impl Default for SlotMap {
    fn default() -> Self {
        Self::ordered()
    }
}

impl SlotMap {
    /// Identity placement: slot i shows digit i
    pub const fn ordered() -> Self {
        Self {
            digits: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        }
    }

    /// Digit shown on a slot
    pub fn digit(&self, slot: SlotId) -> u8 {
        self.digits[slot.index()]
    }

    /// Digit shown on a slot, as the character appended to the pin
    pub fn digit_char(&self, slot: SlotId) -> char {
        char::from(b'0' + self.digit(slot))
    }

    /// Slot currently showing `digit`
    pub fn slot_of(&self, digit: u8) -> Option<SlotId> {
        self.digits
            .iter()
            .position(|&d| d == digit)
            .and_then(|index| SlotId::new(index as u8))
    }

    /// Label for every slot, in slot order
    pub fn labels(&self) -> impl Iterator<Item = (SlotId, char)> + '_ {
        SlotId::all().map(move |slot| (slot, self.digit_char(slot)))
    }

    /// Whether every slot shows its own index
    pub fn is_ordered(&self) -> bool {
        *self == Self::ordered()
    }

    /// Digits in slot order
    pub fn as_array(&self) -> [u8; SLOT_COUNT] {
        self.digits
    }
}

/// Shuffle in place, every permutation equally likely
pub fn shuffle_digits<R: Rng + ?Sized>(digits: &mut [u8], rng: &mut R) {
    for i in (1..digits.len()).rev() {
        let j = rng.gen_range(0..=i);
        digits.swap(i, j);
    }
}

/// Deals digits onto slots
pub struct DigitLayoutAssigner<R = StdRng> {
    rng: R,
}

impl DigitLayoutAssigner<StdRng> {
    /// Assigner seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic assigner for reproducible layouts
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DigitLayoutAssigner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Produce a new slot map; shuffled when `randomize` is set
    pub fn assign(&mut self, randomize: bool) -> SlotMap {
        let mut digits = SlotMap::ordered().digits;
        if randomize {
            shuffle_digits(&mut digits, &mut self.rng);
        }
        tracing::trace!(randomize, "Assigned keypad digits");
        SlotMap { digits }
    }
}

impl<R> std::fmt::Debug for DigitLayoutAssigner<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitLayoutAssigner").finish_non_exhaustive()
    }
}
