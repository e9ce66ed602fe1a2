use ratatui::style::Color;

use crate::parse::tag::TagKind;

/// Color theme for the task form
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub cyan: Color,
    pub purple: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
        }
    }
}

impl Theme {
    /// Accent used for a tag sigil and its dropdown border
    pub fn tag_color(&self, kind: TagKind) -> Color {
        match kind {
            TagKind::Project => self.cyan,
            TagKind::User => self.purple,
        }
    }
}
