//! Activity log panel

use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem};

use crate::app::{ActivityLevel, ActivityLog};
use crate::ui::layout::{section_block, visible_lines};
use crate::ui::Theme;

/// Render the newest entries that fit, oldest at the top
pub fn render(frame: &mut Frame, area: Rect, log: &ActivityLog, theme: &Theme) {
    let block = section_block("Activity", theme);

    let items: Vec<ListItem> = log
        .recent(visible_lines(area))
        .map(|entry| {
            let (marker, style) = match entry.level {
                ActivityLevel::Info => ("·", theme.text_secondary()),
                ActivityLevel::Success => ("✓", theme.success()),
                ActivityLevel::Warning => ("!", theme.warning()),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", marker), style),
                Span::styled(entry.message.clone(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
