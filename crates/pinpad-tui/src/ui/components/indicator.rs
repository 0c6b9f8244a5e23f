//! PIN indicator row

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::surface::SurfaceState;
use crate::ui::Theme;

const FILLED: &str = "●";
const EMPTY: &str = "○";

/// Build the indicator spans, one dot per expected digit
pub fn indicator_line<'a>(indicators: &[bool], theme: &Theme) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(indicators.len() * 2);
    for (i, filled) in indicators.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        if *filled {
            spans.push(Span::styled(FILLED, theme.pin_dot()));
        } else {
            spans.push(Span::styled(EMPTY, theme.pin_placeholder()));
        }
    }
    spans
}

/// Render the indicators centered in `area`, offset while shaking
pub fn render(frame: &mut Frame, area: Rect, surface: &SurfaceState, theme: &Theme) {
    let width = (surface.indicators.len() * 2).saturating_sub(1);
    let width = u16::try_from(width).unwrap_or(u16::MAX);
    let centered = area.width.saturating_sub(width) / 2;
    let padding = centered.saturating_add_signed(surface.shake_offset());

    let mut spans = vec![Span::raw(" ".repeat(padding as usize))];
    spans.extend(indicator_line(&surface.indicators, theme));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
