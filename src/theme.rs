// Theme module - color scheme for the file picker
use crossterm::style::Color;

pub struct ParrotTheme;

impl ParrotTheme {
    pub fn header_bg() -> Color {
        Color::Rgb { r: 95, g: 158, b: 95 }  // Parrot green
    }

    pub fn header_text() -> Color {
        Color::Black
    }

    pub fn text_primary() -> Color {
        Color::Rgb { r: 248, g: 248, b: 242 }
    }

    pub fn text_secondary() -> Color {
        Color::Rgb { r: 180, g: 180, b: 180 }
    }

    pub fn text_dim() -> Color {
        Color::Rgb { r: 120, g: 120, b: 120 }
    }

    pub fn accent() -> Color {
        Color::Rgb { r: 176, g: 196, b: 222 }  // Light steel blue
    }

    pub fn selected() -> Color {
        Color::Rgb { r: 152, g: 195, b: 121 }  // Soft green
    }
}
