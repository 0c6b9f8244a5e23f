//! Help screen

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, render_help_footer, section_block};

const KEY_BINDINGS: &[(&str, &str)] = &[
    ("←↑↓→ / hjkl", "Move keypad focus"),
    ("Enter / Space", "Press focused key"),
    ("Backspace", "Delete last digit"),
    ("s", "Submit"),
    ("c", "Clear"),
    ("r", "Toggle random digit placement"),
    ("a", "Toggle auto-submit"),
    ("v", "Toggle vibrate on incomplete submit"),
    ("+ / -", "Change PIN length"),
    ("Mouse", "Click a key to press it"),
    ("?", "Show this help"),
    ("q / Esc", "Quit"),
];

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let dialog = centered_rect_fixed(60, KEY_BINDINGS.len() as u16 + 6, chunks[0]);

    let mut lines = vec![
        Line::from(Span::styled(
            "Digits are entered on the on-screen keypad only.",
            theme.text_secondary(),
        )),
        Line::from(""),
    ];
    lines.extend(KEY_BINDINGS.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("  {:<16}", key), theme.text_highlight()),
            Span::styled(*action, theme.text()),
        ])
    }));

    let help = Paragraph::new(lines)
        .block(section_block("Key Bindings", theme))
        .wrap(Wrap { trim: false });
    frame.render_widget(help, dialog);

    render_help_footer(frame, chunks[1], &[("Esc", "Back")], theme);
}
