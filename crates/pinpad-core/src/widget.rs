//! PinPad widget instance
//!
//! Wraps a [`PinEntryController`] with its listener registrations. After
//! every operation the queued events are delivered to the listeners in
//! order. Listeners get the controller itself, so they may clear the pad or
//! reconfigure it from inside a notification; anything they trigger is
//! queued and delivered after the current event.

use std::fmt;

use crate::config::PinPadConfig;
use crate::controller::{PinEntryController, PinInput, PinPadEvent, Queued};
use crate::surface::PinPadSurface;

/// Receives pin changes
pub trait PinChangedListener {
    fn on_pin_changed(&mut self, pad: &mut PinEntryController, old_pin: &str, new_pin: &str);
}

impl<F> PinChangedListener for F
where
    F: FnMut(&mut PinEntryController, &str, &str),
{
    fn on_pin_changed(&mut self, pad: &mut PinEntryController, old_pin: &str, new_pin: &str) {
        self(pad, old_pin, new_pin)
    }
}

/// Receives submit outcomes
pub trait SubmitListener {
    /// The pin is complete, from submit or auto-submit
    fn on_completed(&mut self, pad: &mut PinEntryController, pin: &str);

    /// Submit was pressed before the pin was complete
    fn on_incomplete_submit(&mut self, pad: &mut PinEntryController, pin: &str);
}

#[derive(Default)]
struct Listeners {
    pin_changed: Option<Box<dyn PinChangedListener>>,
    submit: Option<Box<dyn SubmitListener>>,
}

/// A PIN pad widget
pub struct PinPad {
    controller: PinEntryController,
    listeners: Listeners,
    disposed: bool,
}

impl PinPad {
    /// Build a widget rendering onto `surface`
    pub fn new(config: &PinPadConfig, surface: impl PinPadSurface + 'static) -> Self {
        Self::from_controller(PinEntryController::new(config, surface))
    }

    pub fn from_controller(controller: PinEntryController) -> Self {
        Self {
            controller,
            listeners: Listeners::default(),
            disposed: false,
        }
    }

    /// Register the pin-changed listener, replacing any previous one
    pub fn set_on_pin_changed(&mut self, listener: impl PinChangedListener + 'static) {
        self.listeners.pin_changed = Some(Box::new(listener));
    }

    /// Register the submit listener, replacing any previous one
    pub fn set_on_submit(&mut self, listener: impl SubmitListener + 'static) {
        self.listeners.submit = Some(Box::new(listener));
    }

    pub fn clear_listeners(&mut self) {
        self.listeners = Listeners::default();
    }

    /// Apply an input and deliver the resulting events.
    ///
    /// Returns every event delivered, including those raised by listeners.
    pub fn handle(&mut self, input: PinInput) -> Vec<PinPadEvent> {
        self.apply(|pad| pad.handle(input))
    }

    /// Empty the pin
    pub fn clear(&mut self) -> Vec<PinPadEvent> {
        self.apply(PinEntryController::clear)
    }

    pub fn set_pin_length(&mut self, length: usize) -> Vec<PinPadEvent> {
        self.apply(|pad| pad.set_pin_length(length))
    }

    /// Run `f` against the controller, then deliver queued events
    pub fn apply(&mut self, f: impl FnOnce(&mut PinEntryController)) -> Vec<PinPadEvent> {
        if self.disposed {
            tracing::trace!("Input ignored, pinpad disposed");
            return Vec::new();
        }
        f(&mut self.controller);
        self.dispatch()
    }

    pub fn controller(&self) -> &PinEntryController {
        &self.controller
    }

    /// Snapshot of the entered pin
    pub fn pin(&self) -> String {
        self.controller.pin()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Drop listeners and wipe the pin; later inputs are ignored
    pub fn dispose(&mut self) {
        self.clear_listeners();
        self.controller.reset();
        self.controller.discard_events();
        self.disposed = true;
        tracing::debug!("Pinpad disposed");
    }

    fn dispatch(&mut self) -> Vec<PinPadEvent> {
        let mut delivered = Vec::new();

        while let Some(queued) = self.controller.next_queued() {
            let event = match queued {
                Queued::Event(event) => event,
                // Judged only now, after listeners have seen the append
                Queued::AutoSubmitCheck { edit } => match self.controller.auto_submit_due(edit) {
                    Some(event) => event,
                    None => continue,
                },
            };

            let Listeners {
                pin_changed,
                submit,
            } = &mut self.listeners;

            match &event {
                PinPadEvent::Changed { old, new } => {
                    if let Some(listener) = pin_changed {
                        listener.on_pin_changed(&mut self.controller, old, new);
                    }
                }
                PinPadEvent::Completed { pin } => {
                    if let Some(listener) = submit {
                        listener.on_completed(&mut self.controller, pin);
                    }
                }
                PinPadEvent::IncompleteSubmit { pin } => {
                    if let Some(listener) = submit {
                        listener.on_incomplete_submit(&mut self.controller, pin);
                    }
                }
            }

            delivered.push(event);
        }

        delivered
    }
}

impl fmt::Debug for PinPad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinPad")
            .field("controller", &self.controller)
            .field("has_pin_changed_listener", &self.listeners.pin_changed.is_some())
            .field("has_submit_listener", &self.listeners.submit.is_some())
            .field("disposed", &self.disposed)
            .finish()
    }
}
