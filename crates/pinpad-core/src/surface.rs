//! Rendering collaborator seam
//!
//! The controller never draws anything. It pushes commands to a
//! [`PinPadSurface`] implemented by whatever renders the pad.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::DEFAULT_HAPTIC_DURATION_MS;
use crate::keypad::SlotId;

/// A fire-and-forget feedback pulse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HapticPulse {
    pub duration: Duration,
}

impl Default for HapticPulse {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_HAPTIC_DURATION_MS),
        }
    }
}

/// Commands the controller issues to the renderer
pub trait PinPadSurface {
    /// Replace the indicator row with `count` empty indicators
    fn rebuild_indicators(&mut self, count: usize);

    /// Set a single indicator's state
    fn set_indicator_filled(&mut self, index: usize, filled: bool);

    /// Show `digit` on the key at `slot`
    fn set_slot_label(&mut self, slot: SlotId, digit: char);

    /// Show or hide the prompt
    fn set_prompt(&mut self, prompt: Option<&str>) {
        let _ = prompt;
    }

    /// Request a feedback pulse; must not block
    fn request_haptic_feedback(&mut self, pulse: HapticPulse);
}

/// Surface that discards every command
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl PinPadSurface for NullSurface {
    fn rebuild_indicators(&mut self, _count: usize) {}

    fn set_indicator_filled(&mut self, _index: usize, _filled: bool) {}

    fn set_slot_label(&mut self, _slot: SlotId, _digit: char) {}

    fn request_haptic_feedback(&mut self, _pulse: HapticPulse) {}
}

/// A recorded surface command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCommand {
    RebuildIndicators(usize),
    IndicatorFilled { index: usize, filled: bool },
    SlotLabel { slot: SlotId, digit: char },
    Prompt(Option<String>),
    Haptic(HapticPulse),
}

/// Surface that records commands into a shared log
///
/// Clones share the same log, so a host keeps one handle while the
/// controller owns the other.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    log: Rc<RefCell<Vec<SurfaceCommand>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every command recorded so far
    pub fn commands(&self) -> Vec<SurfaceCommand> {
        self.log.borrow().clone()
    }

    /// Take and clear the recorded commands
    pub fn take(&self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Number of haptic pulses requested so far
    pub fn haptic_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::Haptic(_)))
            .count()
    }

    fn record(&self, command: SurfaceCommand) {
        self.log.borrow_mut().push(command);
    }
}

impl PinPadSurface for RecordingSurface {
    fn rebuild_indicators(&mut self, count: usize) {
        self.record(SurfaceCommand::RebuildIndicators(count));
    }

    fn set_indicator_filled(&mut self, index: usize, filled: bool) {
        self.record(SurfaceCommand::IndicatorFilled { index, filled });
    }

    fn set_slot_label(&mut self, slot: SlotId, digit: char) {
        self.record(SurfaceCommand::SlotLabel { slot, digit });
    }

    fn set_prompt(&mut self, prompt: Option<&str>) {
        self.record(SurfaceCommand::Prompt(prompt.map(str::to_owned)));
    }

    fn request_haptic_feedback(&mut self, pulse: HapticPulse) {
        self.record(SurfaceCommand::Haptic(pulse));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_shares_log() {
        let handle = RecordingSurface::new();
        let mut surface = handle.clone();

        surface.rebuild_indicators(4);
        surface.request_haptic_feedback(HapticPulse::default());
        surface.set_prompt(Some("Enter PIN"));

        assert_eq!(handle.haptic_count(), 1);
        assert_eq!(
            handle.take(),
            vec![
                SurfaceCommand::RebuildIndicators(4),
                SurfaceCommand::Haptic(HapticPulse::default()),
                SurfaceCommand::Prompt(Some("Enter PIN".to_string())),
            ]
        );
        assert!(handle.commands().is_empty());
    }

    #[test]
    fn test_default_pulse_duration() {
        assert_eq!(HapticPulse::default().duration, Duration::from_millis(300));
    }
}
