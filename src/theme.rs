//! Dark and light colour palettes.
//!
//! The active [`ThemeMode`] is the only theme state; every widget pulls its
//! colours from the matching [`Palette`] at draw time.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Dark => Palette::dark(),
            ThemeMode::Light => Palette::light(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    /// Secondary text: years, hints, footer.
    pub muted: Color,
    /// Focused borders and the selected card.
    pub accent: Color,
    pub highlight_bg: Color,
    pub button: Color,
    pub error: Color,
    pub warning: Color,
    pub good: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(20, 20, 24),
            text: Color::White,
            muted: Color::Gray,
            accent: Color::Cyan,
            highlight_bg: Color::DarkGray,
            button: Color::Yellow,
            error: Color::Red,
            warning: Color::Yellow,
            good: Color::Green,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(245, 245, 240),
            text: Color::Black,
            muted: Color::Rgb(90, 90, 90),
            accent: Color::Blue,
            highlight_bg: Color::Rgb(210, 215, 230),
            button: Color::Rgb(170, 90, 0),
            error: Color::Rgb(180, 0, 0),
            warning: Color::Rgb(170, 110, 0),
            good: Color::Rgb(0, 130, 0),
        }
    }

    /// Colour for an IMDb rating such as `"7.8"`.
    pub fn rating_color(&self, rating: &str) -> Color {
        match rating.parse::<f32>() {
            Ok(score) if score >= 7.0 => self.good,
            Ok(score) if score >= 5.0 => self.warning,
            Ok(_) => self.error,
            Err(_) => self.text,
        }
    }
}
