//! PIN entry state machine
//!
//! The controller owns the pin buffer, the slot map and the indicator strip.
//! Every input is applied synchronously: the buffer is mutated, the surface
//! is updated, and any resulting [`PinPadEvent`]s are queued in order for the
//! widget layer to deliver.
//!
//! Auto-submit is not decided at the time of the press. Appending a digit
//! queues a check that the widget resolves after the change has been
//! delivered, so a listener that edits the pin first is seen.
//!
//! Inputs that cannot apply (a digit on a full pin, backspace on an empty
//! one) are not errors. They leave the buffer alone and request a feedback
//! pulse instead.

use std::collections::VecDeque;
use std::fmt;

use zeroize::Zeroizing;

use crate::config::{PinPadConfig, MAX_PIN_LENGTH};
use crate::indicator::IndicatorStrip;
use crate::keypad::SlotId;
use crate::layout::{DigitLayoutAssigner, SlotMap};
use crate::surface::{HapticPulse, PinPadSurface};

/// A discrete press delivered by the input collaborator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinInput {
    /// A digit key at a fixed slot
    Digit(SlotId),
    Backspace,
    Submit,
}

/// Notification emitted by the controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PinPadEvent {
    /// The pin gained or lost digits
    Changed { old: String, new: String },
    /// The pin is complete, either submitted or auto-submitted
    Completed { pin: String },
    /// Submit was pressed before the pin was complete
    IncompleteSubmit { pin: String },
}

/// Entry in the delivery queue
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Queued {
    Event(PinPadEvent),
    /// Auto-submit if the buffer is still as left by edit `edit`
    AutoSubmitCheck { edit: u64 },
}

/// PIN entry controller
pub struct PinEntryController {
    /// Entered digits; never longer than `pin_length`
    buffer: Zeroizing<String>,
    pin_length: usize,
    randomize_digits: bool,
    auto_submit: bool,
    vibrate_on_incomplete_submit: bool,
    haptic: HapticPulse,
    prompt_text: Option<String>,
    slots: SlotMap,
    assigner: DigitLayoutAssigner,
    indicators: IndicatorStrip,
    surface: Box<dyn PinPadSurface>,
    events: VecDeque<Queued>,
    /// Bumped on every buffer mutation
    edit: u64,
}

impl PinEntryController {
    /// Create a controller with an entropy-seeded layout
    pub fn new(config: &PinPadConfig, surface: impl PinPadSurface + 'static) -> Self {
        Self::with_assigner(config, surface, DigitLayoutAssigner::from_entropy())
    }

    /// Create a controller drawing layouts from `assigner`
    pub fn with_assigner(
        config: &PinPadConfig,
        surface: impl PinPadSurface + 'static,
        mut assigner: DigitLayoutAssigner,
    ) -> Self {
        let pin_length = config.pin_length.min(MAX_PIN_LENGTH);
        let slots = assigner.assign(config.randomize_digits);

        let mut controller = Self {
            buffer: Zeroizing::new(String::with_capacity(MAX_PIN_LENGTH)),
            pin_length,
            randomize_digits: config.randomize_digits,
            auto_submit: config.auto_submit,
            vibrate_on_incomplete_submit: config.vibrate_on_incomplete_submit,
            haptic: config.haptic_pulse(),
            prompt_text: config.prompt_text.clone(),
            slots,
            assigner,
            indicators: IndicatorStrip::new(pin_length),
            surface: Box::new(surface),
            events: VecDeque::new(),
            edit: 0,
        };

        controller.push_labels();
        controller.push_prompt();
        controller.surface.rebuild_indicators(pin_length);

        tracing::debug!(
            pin_length,
            randomize = controller.randomize_digits,
            auto_submit = controller.auto_submit,
            "PIN entry controller initialized"
        );

        controller
    }

    /// Apply a single input
    pub fn handle(&mut self, input: PinInput) {
        match input {
            PinInput::Digit(slot) => self.digit_pressed(slot),
            PinInput::Backspace => self.backspace_pressed(),
            PinInput::Submit => self.submit_pressed(),
        }
    }

    /// A digit key was pressed
    pub fn digit_pressed(&mut self, slot: SlotId) {
        if self.buffer.len() >= self.pin_length {
            tracing::trace!(%slot, "Digit ignored, pin is full");
            self.pulse();
            return;
        }

        let old = self.pin();
        self.buffer.push(self.slots.digit_char(slot));
        self.edit += 1;
        self.sync_indicators();

        tracing::trace!(len = self.buffer.len(), "Digit appended");
        self.push_event(PinPadEvent::Changed {
            old,
            new: self.pin(),
        });
        self.events
            .push_back(Queued::AutoSubmitCheck { edit: self.edit });
    }

    /// The backspace key was pressed
    pub fn backspace_pressed(&mut self) {
        if self.buffer.is_empty() {
            tracing::trace!("Backspace ignored, pin is empty");
            self.pulse();
            return;
        }

        let old = self.pin();
        self.buffer.pop();
        self.edit += 1;
        self.sync_indicators();
        self.push_event(PinPadEvent::Changed {
            old,
            new: self.pin(),
        });
    }

    /// The submit key was pressed
    pub fn submit_pressed(&mut self) {
        let pin = self.pin();
        if self.is_complete() {
            tracing::debug!("PIN submitted");
            self.push_event(PinPadEvent::Completed { pin });
        } else {
            tracing::debug!(
                len = self.buffer.len(),
                pin_length = self.pin_length,
                "Incomplete PIN submitted"
            );
            if self.vibrate_on_incomplete_submit {
                self.pulse();
            }
            self.push_event(PinPadEvent::IncompleteSubmit { pin });
        }
    }

    /// Empty the buffer
    pub fn clear(&mut self) {
        let old = self.pin();
        self.reset();
        self.push_event(PinPadEvent::Changed {
            old,
            new: String::new(),
        });
    }

    /// Change the number of digits to collect.
    ///
    /// The indicator row is rebuilt. A buffer longer than the new length is
    /// truncated, which is reported as a change.
    pub fn set_pin_length(&mut self, length: usize) {
        let length = if length > MAX_PIN_LENGTH {
            tracing::warn!(length, max = MAX_PIN_LENGTH, "PIN length clamped");
            MAX_PIN_LENGTH
        } else {
            length
        };

        self.pin_length = length;
        self.indicators.rebuild(length);
        self.surface.rebuild_indicators(length);

        if self.buffer.len() > length {
            let old = self.pin();
            self.buffer.truncate(length);
            self.edit += 1;
            self.push_event(PinPadEvent::Changed {
                old,
                new: self.pin(),
            });
        }

        self.sync_indicators();
        tracing::debug!(pin_length = length, "PIN length changed");
    }

    /// Enable or disable random digit placement; redraws the layout
    pub fn set_randomize_digits(&mut self, randomize: bool) {
        self.randomize_digits = randomize;
        self.reshuffle();
    }

    /// Draw a fresh layout in the current placement mode
    pub fn reshuffle(&mut self) {
        self.slots = self.assigner.assign(self.randomize_digits);
        self.push_labels();
    }

    pub fn set_auto_submit(&mut self, auto_submit: bool) {
        self.auto_submit = auto_submit;
    }

    pub fn set_vibrate_on_incomplete_submit(&mut self, vibrate: bool) {
        self.vibrate_on_incomplete_submit = vibrate;
    }

    /// Set the prompt; `None` or empty hides it
    pub fn set_prompt_text(&mut self, prompt: Option<String>) {
        self.prompt_text = prompt;
        self.push_prompt();
    }

    /// Snapshot of the entered pin
    pub fn pin(&self) -> String {
        self.buffer.as_str().to_owned()
    }

    /// Number of digits entered
    pub fn pin_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn pin_length(&self) -> usize {
        self.pin_length
    }

    /// Whether the buffer holds exactly `pin_length` digits
    pub fn is_complete(&self) -> bool {
        self.buffer.len() == self.pin_length
    }

    pub fn randomize_digits(&self) -> bool {
        self.randomize_digits
    }

    pub fn auto_submit(&self) -> bool {
        self.auto_submit
    }

    pub fn vibrate_on_incomplete_submit(&self) -> bool {
        self.vibrate_on_incomplete_submit
    }

    /// The prompt, if visible
    pub fn prompt_text(&self) -> Option<&str> {
        self.prompt_text.as_deref().filter(|p| !p.is_empty())
    }

    pub fn slot_map(&self) -> &SlotMap {
        &self.slots
    }

    pub fn indicators(&self) -> &IndicatorStrip {
        &self.indicators
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Pop the oldest queue entry
    pub(crate) fn next_queued(&mut self) -> Option<Queued> {
        self.events.pop_front()
    }

    /// The auto-submit owed for edit `edit`, judged on the current state
    pub(crate) fn auto_submit_due(&self, edit: u64) -> Option<PinPadEvent> {
        if self.auto_submit && self.edit == edit && self.is_complete() {
            tracing::debug!("PIN complete, auto-submitting");
            Some(PinPadEvent::Completed { pin: self.pin() })
        } else {
            None
        }
    }

    /// Take every queued event, resolving auto-submit checks in place
    #[cfg(test)]
    pub(crate) fn drain_events(&mut self) -> Vec<PinPadEvent> {
        let mut events = Vec::new();
        while let Some(queued) = self.next_queued() {
            match queued {
                Queued::Event(event) => events.push(event),
                Queued::AutoSubmitCheck { edit } => events.extend(self.auto_submit_due(edit)),
            }
        }
        events
    }

    /// Zero and empty the buffer and the indicators without emitting an event
    pub(crate) fn reset(&mut self) {
        use zeroize::Zeroize;
        self.buffer.zeroize();
        self.buffer.clear();
        self.edit += 1;
        self.sync_indicators();
    }

    pub(crate) fn discard_events(&mut self) {
        self.events.clear();
    }

    fn push_event(&mut self, event: PinPadEvent) {
        self.events.push_back(Queued::Event(event));
    }

    fn sync_indicators(&mut self) {
        for index in self.indicators.sync(self.buffer.len()) {
            self.surface
                .set_indicator_filled(index, self.indicators.is_filled(index));
        }
    }

    fn push_labels(&mut self) {
        for (slot, digit) in self.slots.labels() {
            self.surface.set_slot_label(slot, digit);
        }
    }

    fn push_prompt(&mut self) {
        let prompt = self.prompt_text.as_deref().filter(|p| !p.is_empty());
        self.surface.set_prompt(prompt);
    }

    fn pulse(&mut self) {
        self.surface.request_haptic_feedback(self.haptic);
    }
}

impl fmt::Debug for PinEntryController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinEntryController")
            .field("pin_len", &self.buffer.len())
            .field("pin_length", &self.pin_length)
            .field("randomize_digits", &self.randomize_digits)
            .field("auto_submit", &self.auto_submit)
            .field(
                "vibrate_on_incomplete_submit",
                &self.vibrate_on_incomplete_submit,
            )
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceCommand};

    fn slot(index: u8) -> SlotId {
        SlotId::new(index).unwrap()
    }

    fn ordered(config: PinPadConfig) -> (PinEntryController, RecordingSurface) {
        let surface = RecordingSurface::new();
        let controller = PinEntryController::with_assigner(
            &config.with_randomize_digits(false),
            surface.clone(),
            DigitLayoutAssigner::seeded(0),
        );
        surface.take();
        (controller, surface)
    }

    #[test]
    fn test_initial_commands() {
        let surface = RecordingSurface::new();
        let config = PinPadConfig::default()
            .with_randomize_digits(false)
            .with_prompt_text("Enter card PIN");
        let _controller = PinEntryController::with_assigner(
            &config,
            surface.clone(),
            DigitLayoutAssigner::seeded(0),
        );

        let commands = surface.commands();
        assert_eq!(commands.len(), 12);
        assert_eq!(
            commands[3],
            SurfaceCommand::SlotLabel {
                slot: slot(3),
                digit: '3'
            }
        );
        assert_eq!(
            commands[10],
            SurfaceCommand::Prompt(Some("Enter card PIN".to_string()))
        );
        assert_eq!(commands[11], SurfaceCommand::RebuildIndicators(4));
    }

    #[test]
    fn test_digit_appends_and_fills_indicator() {
        let (mut controller, surface) = ordered(PinPadConfig::default());

        controller.digit_pressed(slot(7));
        assert_eq!(controller.pin(), "7");
        assert_eq!(controller.indicators().as_slice(), &[true, false, false, false]);
        assert_eq!(
            surface.take(),
            vec![SurfaceCommand::IndicatorFilled {
                index: 0,
                filled: true
            }]
        );
        assert_eq!(
            controller.drain_events(),
            vec![PinPadEvent::Changed {
                old: String::new(),
                new: "7".to_string()
            }]
        );
    }

    #[test]
    fn test_digit_uses_shuffled_layout() {
        let mut controller = PinEntryController::with_assigner(
            &PinPadConfig::default(),
            RecordingSurface::new(),
            DigitLayoutAssigner::seeded(11),
        );
        let expected = controller.slot_map().digit_char(slot(2));
        controller.digit_pressed(slot(2));
        assert_eq!(controller.pin(), expected.to_string());
    }

    #[test]
    fn test_full_pin_pulses_instead_of_appending() {
        let (mut controller, surface) = ordered(PinPadConfig::default().with_pin_length(2));
        controller.digit_pressed(slot(1));
        controller.digit_pressed(slot(2));
        controller.drain_events();
        surface.take();

        controller.digit_pressed(slot(3));
        assert_eq!(controller.pin(), "12");
        assert!(controller.drain_events().is_empty());
        assert_eq!(surface.haptic_count(), 1);
    }

    #[test]
    fn test_zero_length_pin_accepts_no_digits() {
        let (mut controller, surface) = ordered(PinPadConfig::default().with_pin_length(0));
        controller.digit_pressed(slot(1));
        assert_eq!(controller.pin(), "");
        assert_eq!(surface.haptic_count(), 1);

        controller.submit_pressed();
        assert_eq!(
            controller.drain_events(),
            vec![PinPadEvent::Completed { pin: String::new() }]
        );
    }

    #[test]
    fn test_completing_digit_queues_auto_submit_check() {
        let (mut controller, _surface) = ordered(PinPadConfig::default().with_pin_length(2));
        controller.digit_pressed(slot(4));
        controller.digit_pressed(slot(2));

        // Only the check left by the last append can still fire
        assert_eq!(
            controller.drain_events(),
            vec![
                PinPadEvent::Changed {
                    old: String::new(),
                    new: "4".to_string()
                },
                PinPadEvent::Changed {
                    old: "4".to_string(),
                    new: "42".to_string()
                },
                PinPadEvent::Completed {
                    pin: "42".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_auto_submit_check_sees_later_edits() {
        let (mut controller, _surface) = ordered(PinPadConfig::default().with_pin_length(2));
        controller.digit_pressed(slot(4));
        controller.digit_pressed(slot(2));
        controller.clear();

        let events = controller.drain_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, PinPadEvent::Completed { .. })));

        controller.digit_pressed(slot(1));
        controller.digit_pressed(slot(3));
        controller.set_auto_submit(false);
        assert!(!controller
            .drain_events()
            .iter()
            .any(|e| matches!(e, PinPadEvent::Completed { .. })));
    }

    #[test]
    fn test_reset_empties_indicators() {
        let (mut controller, surface) = ordered(PinPadConfig::default());
        controller.digit_pressed(slot(1));
        controller.digit_pressed(slot(2));
        surface.take();

        controller.reset();
        assert_eq!(controller.pin(), "");
        assert_eq!(controller.indicators().filled_count(), 0);
        assert_eq!(
            surface.take(),
            vec![
                SurfaceCommand::IndicatorFilled {
                    index: 0,
                    filled: false
                },
                SurfaceCommand::IndicatorFilled {
                    index: 1,
                    filled: false
                },
            ]
        );
    }

    #[test]
    fn test_backspace_on_empty_pulses() {
        let (mut controller, surface) = ordered(PinPadConfig::default());
        controller.backspace_pressed();
        assert!(!controller.has_pending_events());
        assert_eq!(surface.haptic_count(), 1);
    }

    #[test]
    fn test_submit_without_vibrate() {
        let (mut controller, surface) = ordered(
            PinPadConfig::default()
                .with_auto_submit(false)
                .with_vibrate_on_incomplete_submit(false),
        );
        controller.digit_pressed(slot(1));
        controller.drain_events();

        controller.submit_pressed();
        assert_eq!(surface.haptic_count(), 0);
        assert_eq!(
            controller.drain_events(),
            vec![PinPadEvent::IncompleteSubmit {
                pin: "1".to_string()
            }]
        );
    }

    #[test]
    fn test_shrinking_pin_length_truncates_buffer() {
        let (mut controller, _surface) = ordered(PinPadConfig::default().with_pin_length(6));
        for index in [1, 2, 3, 4, 5] {
            controller.digit_pressed(slot(index));
        }
        controller.drain_events();

        controller.set_pin_length(3);
        assert_eq!(controller.pin(), "123");
        assert!(controller.is_complete());
        assert_eq!(controller.indicators().as_slice(), &[true, true, true]);
        assert_eq!(
            controller.drain_events(),
            vec![PinPadEvent::Changed {
                old: "12345".to_string(),
                new: "123".to_string()
            }]
        );
    }

    #[test]
    fn test_pin_length_is_clamped() {
        let (mut controller, _surface) = ordered(PinPadConfig::default());
        controller.set_pin_length(MAX_PIN_LENGTH + 10);
        assert_eq!(controller.pin_length(), MAX_PIN_LENGTH);
        assert_eq!(controller.indicators().len(), MAX_PIN_LENGTH);
    }

    #[test]
    fn test_toggling_randomize_pushes_labels() {
        let (mut controller, surface) = ordered(PinPadConfig::default());
        controller.set_randomize_digits(true);
        assert!(controller.randomize_digits());

        let labels = surface
            .take()
            .into_iter()
            .filter(|c| matches!(c, SurfaceCommand::SlotLabel { .. }))
            .count();
        assert_eq!(labels, 10);

        controller.set_randomize_digits(false);
        assert!(controller.slot_map().is_ordered());
    }

    #[test]
    fn test_empty_prompt_is_hidden() {
        let (mut controller, surface) = ordered(PinPadConfig::default());
        controller.set_prompt_text(Some(String::new()));
        assert_eq!(controller.prompt_text(), None);
        assert_eq!(surface.take(), vec![SurfaceCommand::Prompt(None)]);
    }

    #[test]
    fn test_debug_does_not_reveal_pin() {
        let (mut controller, _surface) = ordered(PinPadConfig::default());
        controller.digit_pressed(slot(8));
        controller.digit_pressed(slot(6));
        let debug = format!("{:?}", controller);
        assert!(debug.contains("pin_len: 2"));
        assert!(!debug.contains("86"));
    }
}
