//! Keypad grid component

use pinpad_core::{KeypadCursor, KeypadKey, KEYPAD_ROWS};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::surface::SurfaceState;
use crate::ui::Theme;

const BACKSPACE_LABEL: &str = "⌫";
const SUBMIT_LABEL: &str = "✓";

/// Screen position of every key from the last render
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeypadLayout {
    cells: Vec<(KeypadKey, Rect)>,
}

impl KeypadLayout {
    /// Split `area` into the 4×3 key grid
    pub fn new(area: Rect) -> Self {
        let rows = KEYPAD_ROWS.len() as u16;
        let columns = KEYPAD_ROWS[0].len() as u16;
        let cell_width = area.width / columns;
        let cell_height = area.height / rows;

        let mut cells = Vec::with_capacity((rows * columns) as usize);
        for (row, keys) in KEYPAD_ROWS.iter().enumerate() {
            for (column, key) in keys.iter().enumerate() {
                let rect = Rect::new(
                    area.x + column as u16 * cell_width,
                    area.y + row as u16 * cell_height,
                    cell_width,
                    cell_height,
                );
                cells.push((*key, rect));
            }
        }

        Self { cells }
    }

    /// Key under a terminal cell, if any
    pub fn key_at(&self, column: u16, row: u16) -> Option<KeypadKey> {
        self.cells
            .iter()
            .find(|(_, rect)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(key, _)| *key)
    }

    pub fn rect_of(&self, key: KeypadKey) -> Option<Rect> {
        self.cells
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, rect)| *rect)
    }

    pub fn cells(&self) -> impl Iterator<Item = &(KeypadKey, Rect)> {
        self.cells.iter()
    }
}

fn label_for(key: KeypadKey, surface: &SurfaceState) -> String {
    match key {
        KeypadKey::Slot(slot) => surface.label(slot).to_string(),
        KeypadKey::Backspace => BACKSPACE_LABEL.to_string(),
        KeypadKey::Submit => SUBMIT_LABEL.to_string(),
    }
}

/// Render the keypad and return its geometry for hit-testing
pub fn render(
    frame: &mut Frame,
    area: Rect,
    surface: &SurfaceState,
    cursor: &KeypadCursor,
    theme: &Theme,
) -> KeypadLayout {
    let layout = KeypadLayout::new(area);

    for (key, rect) in layout.cells() {
        let focused = *key == cursor.key();
        let style = theme.key(focused);

        // Borders need at least three rows to leave room for the label
        let (inner, block) = if rect.height >= 3 && rect.width >= 3 {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.key_border(focused))
                .style(style);
            (block.inner(*rect), Some(block))
        } else {
            (*rect, None)
        };
        if let Some(block) = block {
            frame.render_widget(block, *rect);
        }

        let label_row = Rect::new(
            inner.x,
            inner.y + inner.height / 2,
            inner.width,
            inner.height.min(1),
        );
        let label = Paragraph::new(label_for(*key, surface))
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(label, label_row);
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinpad_core::SlotId;

    fn slot(index: u8) -> KeypadKey {
        KeypadKey::Slot(SlotId::new(index).unwrap())
    }

    #[test]
    fn test_grid_geometry() {
        let layout = KeypadLayout::new(Rect::new(2, 1, 30, 16));
        assert_eq!(layout.cells().count(), 12);
        assert_eq!(layout.rect_of(slot(1)), Some(Rect::new(2, 1, 10, 4)));
        assert_eq!(layout.rect_of(slot(0)), Some(Rect::new(12, 13, 10, 4)));
        assert_eq!(
            layout.rect_of(KeypadKey::Submit),
            Some(Rect::new(22, 13, 10, 4))
        );
    }

    #[test]
    fn test_key_at() {
        let layout = KeypadLayout::new(Rect::new(0, 0, 30, 16));
        assert_eq!(layout.key_at(0, 0), Some(slot(1)));
        assert_eq!(layout.key_at(15, 5), Some(slot(5)));
        assert_eq!(layout.key_at(1, 15), Some(KeypadKey::Backspace));
        assert_eq!(layout.key_at(29, 15), Some(KeypadKey::Submit));
        assert_eq!(layout.key_at(30, 0), None);
        assert_eq!(layout.key_at(0, 16), None);
    }

    #[test]
    fn test_labels() {
        let mut surface = SurfaceState::default();
        surface.labels[3] = '8';
        assert_eq!(label_for(slot(3), &surface), "8");
        assert_eq!(label_for(KeypadKey::Backspace, &surface), BACKSPACE_LABEL);
        assert_eq!(label_for(KeypadKey::Submit, &surface), SUBMIT_LABEL);
    }
}
