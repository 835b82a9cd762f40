//! Colours keyed by weather condition and theme.

use crossterm::style::Color;
use weather_core::{Condition, Theme};

/// Colours for one dashboard render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Headings and the chart line.
    pub accent: Color,
    /// Secondary labels.
    pub muted: Color,
    /// Error text.
    pub error: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

impl Palette {
    /// Palette for a dashboard showing `condition`.
    pub fn for_condition(condition: Condition, theme: Theme) -> Self {
        let accent = match (theme, condition) {
            (Theme::Dark, Condition::Clear) => rgb(0xa7, 0x8b, 0xfa),
            (Theme::Dark, Condition::PartlyCloudy) => rgb(0x93, 0xc5, 0xfd),
            (Theme::Dark, Condition::Cloudy) => rgb(0xd1, 0xd5, 0xdb),
            (Theme::Dark, Condition::Rain) => rgb(0x60, 0xa5, 0xfa),
            (Theme::Dark, Condition::Thunderstorm) => rgb(0xc0, 0x84, 0xfc),
            (Theme::Dark, Condition::Snow) => rgb(0xe0, 0xf2, 0xfe),
            (Theme::Light, Condition::Clear) => rgb(0xea, 0x58, 0x0c),
            (Theme::Light, Condition::PartlyCloudy) => rgb(0x25, 0x63, 0xeb),
            (Theme::Light, Condition::Cloudy) => rgb(0x4b, 0x55, 0x63),
            (Theme::Light, Condition::Rain) => rgb(0x43, 0x38, 0xca),
            (Theme::Light, Condition::Thunderstorm) => rgb(0x6d, 0x28, 0xd9),
            (Theme::Light, Condition::Snow) => rgb(0x1d, 0x4e, 0xd8),
        };
        Self {
            accent,
            ..Self::neutral(theme)
        }
    }

    /// Palette used before any weather data exists.
    pub fn neutral(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                accent: rgb(0x93, 0xc5, 0xfd),
                muted: rgb(0x9c, 0xa3, 0xaf),
                error: rgb(0xf8, 0x71, 0x71),
            },
            Theme::Light => Self {
                accent: rgb(0x25, 0x63, 0xeb),
                muted: rgb(0x6b, 0x72, 0x80),
                error: rgb(0xdc, 0x26, 0x26),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_condition_has_distinct_accent_per_theme() {
        for condition in Condition::all() {
            let light = Palette::for_condition(*condition, Theme::Light);
            let dark = Palette::for_condition(*condition, Theme::Dark);
            assert_ne!(light.accent, dark.accent, "{condition}");
        }
    }

    #[test]
    fn condition_palette_keeps_theme_neutrals() {
        let p = Palette::for_condition(Condition::Rain, Theme::Dark);
        assert_eq!(p.muted, Palette::neutral(Theme::Dark).muted);
        assert_eq!(p.error, Palette::neutral(Theme::Dark).error);
    }
}
