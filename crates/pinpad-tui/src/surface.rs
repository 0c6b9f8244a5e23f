//! Terminal rendering surface
//!
//! The widget pushes commands into a [`SurfaceState`] shared with the
//! renderer. The renderer only ever reads this state, so what is drawn is
//! exactly what the controller asked for.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use pinpad_core::{HapticPulse, PinPadSurface, SlotId, SLOT_COUNT};

/// Surface state shared between the widget and the renderer
pub type SharedSurface = Rc<RefCell<SurfaceState>>;

/// What the terminal currently shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceState {
    /// Digit label per slot
    pub labels: [char; SLOT_COUNT],
    /// Indicator row
    pub indicators: Vec<bool>,
    /// Prompt text, if visible
    pub prompt: Option<String>,
    /// Remaining ticks of the shake animation
    pub shake_ticks: u64,
    /// A bell should be rung on the next frame
    bell_pending: bool,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            labels: [' '; SLOT_COUNT],
            indicators: Vec::new(),
            prompt: None,
            shake_ticks: 0,
            bell_pending: false,
        }
    }
}

impl SurfaceState {
    /// Advance the shake animation
    pub fn tick(&mut self) {
        self.shake_ticks = self.shake_ticks.saturating_sub(1);
    }

    /// Horizontal offset of the indicator row while shaking
    pub fn shake_offset(&self) -> i16 {
        match self.shake_ticks {
            0 => 0,
            n if n % 2 == 0 => 1,
            _ => -1,
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_ticks > 0
    }

    /// Take the pending bell, if any
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    pub fn label(&self, slot: SlotId) -> char {
        self.labels[slot.index()]
    }
}

/// [`PinPadSurface`] backed by [`SurfaceState`]
pub struct TerminalSurface {
    state: SharedSurface,
    tick_rate: Duration,
}

impl TerminalSurface {
    /// Create a surface and the handle the renderer reads from
    pub fn new(tick_rate: Duration) -> (Self, SharedSurface) {
        let state = Rc::new(RefCell::new(SurfaceState::default()));
        let surface = Self {
            state: Rc::clone(&state),
            tick_rate,
        };
        (surface, state)
    }

    /// Number of ticks a pulse keeps the indicators shaking
    fn pulse_ticks(&self, pulse: HapticPulse) -> u64 {
        let tick_ms = self.tick_rate.as_millis().max(1);
        let ticks = pulse.duration.as_millis().div_ceil(tick_ms);
        u64::try_from(ticks).unwrap_or(u64::MAX).max(1)
    }
}

impl PinPadSurface for TerminalSurface {
    fn rebuild_indicators(&mut self, count: usize) {
        let mut state = self.state.borrow_mut();
        state.indicators.clear();
        state.indicators.resize(count, false);
    }

    fn set_indicator_filled(&mut self, index: usize, filled: bool) {
        if let Some(indicator) = self.state.borrow_mut().indicators.get_mut(index) {
            *indicator = filled;
        }
    }

    fn set_slot_label(&mut self, slot: SlotId, digit: char) {
        self.state.borrow_mut().labels[slot.index()] = digit;
    }

    fn set_prompt(&mut self, prompt: Option<&str>) {
        self.state.borrow_mut().prompt = prompt.map(str::to_owned);
    }

    fn request_haptic_feedback(&mut self, pulse: HapticPulse) {
        let ticks = self.pulse_ticks(pulse);
        let mut state = self.state.borrow_mut();
        state.shake_ticks = ticks;
        state.bell_pending = true;
        tracing::trace!(ticks, "Haptic pulse");
    }
}
