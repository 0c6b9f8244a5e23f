//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
mod theme;

pub use components::keypad::KeypadLayout;
pub use theme::Theme;

use ratatui::prelude::*;

use crate::app::{App, Screen};

/// Main render function - delegates to appropriate screen
pub fn render(frame: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::PinEntry => screens::pin_entry::render(frame, app),
        Screen::Help => screens::help::render(frame, app),
    }
}
