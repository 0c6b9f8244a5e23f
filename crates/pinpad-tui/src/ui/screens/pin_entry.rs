//! PIN entry screen

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::ui::components::{activity_log, indicator, keypad, status_bar};
use crate::ui::layout::{centered_rect_fixed, render_help_footer, ScreenLayout};

const DIALOG_WIDTH: u16 = 36;
const DIALOG_HEIGHT: u16 = 25;
const KEYPAD_WIDTH: u16 = 30;
const KEYPAD_HEIGHT: u16 = 16;
const ACTIVITY_HEIGHT: u16 = 8;

/// Render the pad dialog, activity log and footer
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let theme = &app.theme;
    let layout = ScreenLayout::new(area, ACTIVITY_HEIGHT);

    let dialog = centered_rect_fixed(DIALOG_WIDTH, DIALOG_HEIGHT, layout.content);
    let block = Block::default()
        .title(" PIN ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Prompt
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Indicators
            Constraint::Length(1), // Spacer
            Constraint::Min(4),    // Keypad
            Constraint::Length(1), // Flags
        ])
        .split(inner);

    let surface = app.surface.borrow();

    // Hidden when no prompt is set
    if let Some(prompt) = &surface.prompt {
        let prompt = Paragraph::new(prompt.as_str())
            .style(theme.text_secondary())
            .alignment(Alignment::Center);
        frame.render_widget(prompt, chunks[0]);
    }

    indicator::render(frame, chunks[2], &surface, theme);

    let keypad_area = centered_rect_fixed(KEYPAD_WIDTH, KEYPAD_HEIGHT, chunks[4]);
    let keypad_layout = keypad::render(frame, keypad_area, &surface, &app.cursor, theme);
    drop(surface);

    status_bar::render_status_bar(frame, chunks[5], app.pad.controller(), theme);
    activity_log::render(frame, layout.activity, &app.log.borrow(), theme);

    render_help_footer(
        frame,
        layout.footer,
        &[
            ("←↑↓→", "Move"),
            ("Enter", "Press"),
            ("⌫", "Delete"),
            ("s", "Submit"),
            ("c", "Clear"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        theme,
    );

    app.keypad_layout = Some(keypad_layout);
}
