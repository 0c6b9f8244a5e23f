//! Application state and event handling

mod config;
mod events;
mod state;

pub use config::{ConfigError, TuiConfig};
pub use events::{Event, EventHandler};
pub use state::{ActivityEntry, ActivityLevel, ActivityLog, Screen};

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use pinpad_core::{
    KeypadCursor, KeypadKey, PinEntryController, PinPad, PinPadEvent, SubmitListener,
};
use ratatui::prelude::*;

use crate::surface::{SharedSurface, TerminalSurface};
use crate::ui::{self, KeypadLayout, Theme};

/// Shortest pin length selectable from the keyboard
const MIN_INTERACTIVE_PIN_LENGTH: usize = 1;

/// Longest pin length selectable from the keyboard
const MAX_INTERACTIVE_PIN_LENGTH: usize = 12;

/// Main application struct
pub struct App {
    /// The pin pad widget
    pub pad: PinPad,

    /// What the widget asked the terminal to show
    pub surface: SharedSurface,

    /// Notifications received from the widget
    pub log: Rc<RefCell<ActivityLog>>,

    /// Current screen
    pub screen: Screen,

    /// Keyboard focus on the keypad
    pub cursor: KeypadCursor,

    /// Keypad geometry from the last frame, for mouse hit-testing
    pub keypad_layout: Option<KeypadLayout>,

    /// Visual theme
    pub theme: Theme,

    /// Active configuration
    pub config: TuiConfig,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Tick counter for animations
    pub tick: u64,
}

impl App {
    /// Create a new application instance
    pub fn new(config: TuiConfig) -> Self {
        let (surface, state) = TerminalSurface::new(config.tick_rate());
        let mut pad = PinPad::new(&config.pad, surface);
        let log = Rc::new(RefCell::new(ActivityLog::default()));

        let reveal = config.reveal_pin;
        let sink = Rc::clone(&log);
        pad.set_on_pin_changed(move |_: &mut PinEntryController, old: &str, new: &str| {
            sink.borrow_mut().info(format!(
                "Changed from: '{}' to '{}'",
                display_pin(old, reveal),
                display_pin(new, reveal)
            ));
        });
        pad.set_on_submit(LogSubmitListener {
            log: Rc::clone(&log),
            reveal,
        });

        let theme = if config.high_contrast {
            Theme::high_contrast()
        } else {
            Theme::default()
        };

        tracing::info!(pin_length = config.pad.pin_length, "PinPad ready");

        Self {
            pad,
            surface: state,
            log,
            screen: Screen::PinEntry,
            cursor: KeypadCursor::default(),
            keypad_layout: None,
            theme,
            config,
            should_quit: false,
            tick: 0,
        }
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut EventHandler,
    ) -> anyhow::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            match events.next().await {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key.code)
                }
                Some(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                Some(Event::Tick) => self.on_tick(),
                Some(Event::Resize) => self.on_resize(),
                Some(Event::Key(_)) => {}
                None => break,
            }

            if self.surface.borrow_mut().take_bell() && self.config.bell {
                let mut stdout = io::stdout();
                stdout.write_all(b"\x07")?;
                stdout.flush()?;
            }
        }

        self.pad.dispose();
        Ok(())
    }

    /// Advance animations
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.surface.borrow_mut().tick();
    }

    /// Forget key geometry until the next frame is drawn
    pub fn on_resize(&mut self) {
        self.keypad_layout = None;
    }

    /// Handle key press events
    pub fn handle_key(&mut self, key: KeyCode) {
        match self.screen {
            Screen::PinEntry => self.handle_pin_entry_key(key),
            Screen::Help => self.handle_help_key(key),
        }
    }

    fn handle_pin_entry_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.screen = Screen::Help,
            KeyCode::Up | KeyCode::Char('k') => self.cursor.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.move_down(),
            KeyCode::Left | KeyCode::Char('h') => self.cursor.move_left(),
            KeyCode::Right | KeyCode::Char('l') => self.cursor.move_right(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.press(self.cursor.key());
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.press(KeypadKey::Backspace);
            }
            KeyCode::Char('s') => {
                self.press(KeypadKey::Submit);
            }
            KeyCode::Char('c') => {
                self.pad.clear();
            }
            KeyCode::Char('r') => {
                let randomize = !self.pad.controller().randomize_digits();
                self.pad.apply(|pad| pad.set_randomize_digits(randomize));
                self.log.borrow_mut().info(format!(
                    "Random digit placement {}",
                    on_off(randomize)
                ));
            }
            KeyCode::Char('a') => {
                let auto_submit = !self.pad.controller().auto_submit();
                self.pad.apply(|pad| pad.set_auto_submit(auto_submit));
                self.log
                    .borrow_mut()
                    .info(format!("Auto-submit {}", on_off(auto_submit)));
            }
            KeyCode::Char('v') => {
                let vibrate = !self.pad.controller().vibrate_on_incomplete_submit();
                self.pad
                    .apply(|pad| pad.set_vibrate_on_incomplete_submit(vibrate));
                self.log
                    .borrow_mut()
                    .info(format!("Vibrate on incomplete submit {}", on_off(vibrate)));
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let length = self.pad.controller().pin_length() + 1;
                self.change_pin_length(length);
            }
            KeyCode::Char('-') => {
                let length = self.pad.controller().pin_length().saturating_sub(1);
                self.change_pin_length(length);
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
                self.screen = Screen::PinEntry;
            }
            _ => {}
        }
    }

    /// Handle mouse input; a left click on a key presses it
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::PinEntry {
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let key = self
                .keypad_layout
                .as_ref()
                .and_then(|layout| layout.key_at(mouse.column, mouse.row));
            if let Some(key) = key {
                self.cursor.focus(key);
                self.press(key);
            }
        }
    }

    /// Deliver a keypad press to the widget
    pub fn press(&mut self, key: KeypadKey) -> Vec<PinPadEvent> {
        let events = self.pad.handle(key.input());
        tracing::debug!(?key, events = events.len(), "Keypad press");
        events
    }

    fn change_pin_length(&mut self, length: usize) {
        let length = length.clamp(MIN_INTERACTIVE_PIN_LENGTH, MAX_INTERACTIVE_PIN_LENGTH);
        if length == self.pad.controller().pin_length() {
            return;
        }
        self.pad.set_pin_length(length);
        self.log
            .borrow_mut()
            .info(format!("PIN length set to {}", length));
    }
}

/// Logs submit outcomes; clears the pad once a pin is accepted
struct LogSubmitListener {
    log: Rc<RefCell<ActivityLog>>,
    reveal: bool,
}

impl SubmitListener for LogSubmitListener {
    fn on_completed(&mut self, pad: &mut PinEntryController, pin: &str) {
        self.log
            .borrow_mut()
            .success(format!("Submitted: {}", display_pin(pin, self.reveal)));
        pad.set_auto_submit(false);
        pad.clear();
    }

    fn on_incomplete_submit(&mut self, _pad: &mut PinEntryController, pin: &str) {
        self.log.borrow_mut().warning(format!(
            "Submitted Incomplete PIN: {}",
            display_pin(pin, self.reveal)
        ));
    }
}

/// Pin as shown in the activity log
fn display_pin(pin: &str, reveal: bool) -> String {
    if reveal {
        pin.to_string()
    } else {
        "*".repeat(pin.chars().count())
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pinpad_core::{PinPadConfig, SlotId};
    use rstest::rstest;

    fn ordered_app() -> App {
        App::new(TuiConfig {
            pad: PinPadConfig::default().with_randomize_digits(false),
            reveal_pin: true,
            ..TuiConfig::default()
        })
    }

    fn slot_key(index: u8) -> KeypadKey {
        KeypadKey::Slot(SlotId::new(index).unwrap())
    }

    fn last_message(app: &App) -> String {
        app.log
            .borrow()
            .last()
            .map(|e| e.message.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_surface_mirrors_initial_state() {
        let app = ordered_app();
        let surface = app.surface.borrow();
        assert_eq!(surface.labels, ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9']);
        assert_eq!(surface.indicators, vec![false; 4]);
    }

    #[test]
    fn test_enter_presses_focused_key() {
        let mut app = ordered_app();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.pad.pin(), "5");
        assert_eq!(last_message(&app), "Changed from: '' to '5'");

        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.pad.pin(), "51");
        assert_eq!(app.surface.borrow().indicators, vec![true, true, false, false]);
    }

    #[test]
    fn test_completion_logs_and_clears() {
        let mut app = ordered_app();
        for index in [1, 2, 3, 4] {
            app.press(slot_key(index));
        }

        let messages: Vec<_> = app
            .log
            .borrow()
            .recent(2)
            .map(|e| e.message.clone())
            .collect();
        assert_eq!(
            messages,
            vec!["Submitted: 1234", "Changed from: '1234' to ''"]
        );
        assert_eq!(app.pad.pin(), "");
        assert!(!app.pad.controller().auto_submit());
        assert_eq!(app.surface.borrow().indicators, vec![false; 4]);
    }

    #[test]
    fn test_incomplete_submit_shakes() {
        let mut app = ordered_app();
        app.press(slot_key(7));
        app.handle_key(KeyCode::Char('s'));

        assert_eq!(last_message(&app), "Submitted Incomplete PIN: 7");
        assert!(app.surface.borrow().is_shaking());
        assert!(app.surface.borrow_mut().take_bell());
    }

    #[test]
    fn test_pin_is_masked_by_default() {
        let mut app = App::new(TuiConfig::default());
        app.press(slot_key(3));
        assert_eq!(last_message(&app), "Changed from: '' to '*'");
    }

    #[rstest]
    #[case(KeyCode::Char('+'), 5)]
    #[case(KeyCode::Char('='), 5)]
    #[case(KeyCode::Char('-'), 3)]
    fn test_pin_length_keys(#[case] key: KeyCode, #[case] expected: usize) {
        let mut app = ordered_app();
        app.handle_key(key);
        assert_eq!(app.pad.controller().pin_length(), expected);
        assert_eq!(app.surface.borrow().indicators.len(), expected);
    }

    #[test]
    fn test_pin_length_keys_are_bounded() {
        let mut app = ordered_app();
        for _ in 0..10 {
            app.handle_key(KeyCode::Char('-'));
        }
        assert_eq!(app.pad.controller().pin_length(), MIN_INTERACTIVE_PIN_LENGTH);
        for _ in 0..20 {
            app.handle_key(KeyCode::Char('+'));
        }
        assert_eq!(app.pad.controller().pin_length(), MAX_INTERACTIVE_PIN_LENGTH);
    }

    #[rstest]
    #[case(KeyCode::Char('a'), "Auto-submit off")]
    #[case(KeyCode::Char('v'), "Vibrate on incomplete submit off")]
    #[case(KeyCode::Char('r'), "Random digit placement on")]
    fn test_toggle_keys(#[case] key: KeyCode, #[case] message: &str) {
        let mut app = ordered_app();
        app.handle_key(key);
        assert_eq!(last_message(&app), message);
    }

    #[test]
    fn test_help_screen_round_trip() {
        let mut app = ordered_app();
        app.handle_key(KeyCode::Char('?'));
        assert_eq!(app.screen, Screen::Help);

        // Keypad keys do nothing on the help screen
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.screen, Screen::PinEntry);
        assert_eq!(app.pad.pin(), "");

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_click_after_resize_is_ignored() {
        let mut app = ordered_app();
        let layout = KeypadLayout::new(Rect::new(0, 0, 30, 16));
        let target = layout.rect_of(slot_key(9)).unwrap();
        app.keypad_layout = Some(layout);
        app.on_resize();

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: target.x + 1,
            row: target.y + 1,
            modifiers: KeyModifiers::NONE,
        });

        assert!(app.keypad_layout.is_none());
        assert_eq!(app.pad.pin(), "");
    }

    #[test]
    fn test_mouse_click_presses_key() {
        let mut app = ordered_app();
        let layout = KeypadLayout::new(Rect::new(0, 0, 30, 16));
        let target = layout.rect_of(slot_key(9)).unwrap();
        app.keypad_layout = Some(layout);

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: target.x + 1,
            row: target.y + 1,
            modifiers: KeyModifiers::NONE,
        });

        assert_eq!(app.pad.pin(), "9");
        assert_eq!(app.cursor.key(), slot_key(9));
    }
}
