//! Visual theme and color palette

use ratatui::style::{Color, Modifier, Style};

/// PinPad color palette
#[derive(Clone, Debug)]
pub struct Theme {
    // Primary branding colors
    pub accent: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Keypad
    pub key_face: Color,
    pub key_label: Color,

    // Pin indicators
    pub indicator_filled: Color,
    pub indicator_empty: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Accent
            accent: Color::Rgb(1, 186, 242), // #01BAF2

            // Status colors
            success: Color::Rgb(76, 175, 80), // #4CAF50 - Green
            warning: Color::Rgb(255, 152, 0), // #FF9800 - Orange

            // UI elements
            border: Color::Rgb(66, 66, 66),            // #424242
            border_focused: Color::Rgb(1, 186, 242),   // #01BAF2
            text_primary: Color::Rgb(250, 250, 250),   // #FAFAFA
            text_secondary: Color::Rgb(189, 189, 189), // #BDBDBD
            text_muted: Color::Rgb(117, 117, 117),     // #757575
            selection: Color::Rgb(55, 55, 55),         // #373737

            // Keypad
            key_face: Color::Rgb(48, 48, 48),
            key_label: Color::Rgb(250, 250, 250),

            // Indicators
            indicator_filled: Color::Rgb(250, 250, 250),
            indicator_empty: Color::Rgb(117, 117, 117),
        }
    }
}

impl Theme {
    /// Get default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Get secondary text style
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Get muted text style
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Get highlighted text style
    pub fn text_highlight(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Get border style
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get focused border style
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Get keypad key style
    pub fn key(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .bg(self.selection)
                .fg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(self.key_face).fg(self.key_label)
        }
    }

    /// Get keypad key border style
    pub fn key_border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused()
        } else {
            self.border()
        }
    }

    /// Get PIN dot style
    pub fn pin_dot(&self) -> Style {
        Style::default()
            .fg(self.indicator_filled)
            .add_modifier(Modifier::BOLD)
    }

    /// Get PIN placeholder style
    pub fn pin_placeholder(&self) -> Style {
        Style::default().fg(self.indicator_empty)
    }

    /// Get flag style for status line
    pub fn flag(&self, enabled: bool) -> Style {
        if enabled {
            self.success()
        } else {
            self.text_muted()
        }
    }

    /// Create a high-contrast theme variant
    pub fn high_contrast() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::White,
            text_muted: Color::Gray,
            border: Color::White,
            border_focused: Color::Yellow,
            accent: Color::Yellow,
            key_face: Color::Black,
            key_label: Color::White,
            indicator_filled: Color::Yellow,
            indicator_empty: Color::White,
            ..Self::default()
        }
    }
}
