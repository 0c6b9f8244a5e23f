//! PinPad Core - PIN entry state machine
//!
//! This crate holds the logic behind an on-screen numeric PIN pad: the pin
//! buffer and its submit policy, the (optionally randomized) placement of
//! digits on the keypad, and the indicator row that mirrors how many digits
//! have been entered. Rendering is left to a [`PinPadSurface`] implementation.

pub mod config;
pub mod controller;
pub mod error;
pub mod indicator;
pub mod keypad;
pub mod layout;
pub mod surface;
pub mod widget;

pub use config::{PinPadConfig, DEFAULT_PIN_LENGTH, MAX_PIN_LENGTH};
pub use controller::{PinEntryController, PinInput, PinPadEvent};
pub use error::{PinPadError, Result};
pub use indicator::IndicatorStrip;
pub use keypad::{KeypadCursor, KeypadKey, SlotId, KEYPAD_ROWS, SLOT_COUNT};
pub use layout::{DigitLayoutAssigner, SlotMap};
pub use surface::{HapticPulse, NullSurface, PinPadSurface, RecordingSurface, SurfaceCommand};
pub use widget::{PinChangedListener, PinPad, SubmitListener};
