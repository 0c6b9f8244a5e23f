//! Status line showing the pad options

use pinpad_core::PinEntryController;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::Theme;

fn flag<'a>(label: &'a str, enabled: bool, theme: &Theme) -> Span<'a> {
    let indicator = if enabled { "●" } else { "○" };
    Span::styled(format!("{} {}  ", indicator, label), theme.flag(enabled))
}

/// Render the current flags and pin length
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    pad: &PinEntryController,
    theme: &Theme,
) {
    let line = Line::from(vec![
        flag("Random", pad.randomize_digits(), theme),
        flag("Auto-submit", pad.auto_submit(), theme),
        flag("Vibrate", pad.vibrate_on_incomplete_submit(), theme),
        Span::styled(
            format!("{}/{}", pad.pin_len(), pad.pin_length()),
            theme.text_secondary(),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
