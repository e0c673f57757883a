//! Light and dark palettes

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Which palette is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Icon for the control that switches away from this mode
    pub fn toggle_icon(self) -> &'static str {
        match self {
            ThemeMode::Light => "☾",
            ThemeMode::Dark => "☀",
        }
    }

    /// Guess the terminal's scheme from a `COLORFGBG` value ("fg;bg" or
    /// "fg;default;bg"). Background colors 7 and 9..=15 are light, the rest
    /// of the ANSI range dark.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        match background {
            7 | 9..=15 => Some(ThemeMode::Light),
            0..=6 | 8 => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// The terminal's scheme, when it advertises one
    pub fn detect() -> Option<Self> {
        let detected = std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| Self::from_colorfgbg(&value));
        tracing::debug!(?detected, "Terminal color scheme");
        detected
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette::LIGHT,
            ThemeMode::Dark => Palette::DARK,
        }
    }
}

/// Colors used by every component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background
    pub background: Color,
    /// Todo rows, form and footer
    pub surface: Color,
    /// Row separators and borders
    pub border: Color,
    pub text: Color,
    /// Footer labels and placeholders
    pub muted: Color,
    /// Hover/focus text
    pub hover: Color,
    /// Completed titles
    pub done: Color,
    /// Active filter tab and selection marker
    pub accent: Color,
    /// Checked box, two ends of the gradient
    pub check_from: Color,
    pub check_to: Color,
    pub title: Color,
    pub error: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(250, 250, 250),
        surface: Color::Rgb(228, 229, 241),
        border: Color::Rgb(210, 211, 219),
        text: Color::Rgb(72, 75, 106),
        muted: Color::Rgb(148, 149, 165),
        hover: Color::Rgb(72, 75, 106),
        done: Color::Rgb(148, 149, 165),
        accent: Color::Rgb(58, 123, 253),
        check_from: Color::Rgb(87, 221, 255),
        check_to: Color::Rgb(192, 88, 243),
        title: Color::Rgb(72, 75, 106),
        error: Color::Rgb(214, 64, 69),
    };

    pub const DARK: Palette = Palette {
        background: Color::Rgb(22, 23, 34),
        surface: Color::Rgb(37, 39, 60),
        border: Color::Rgb(57, 58, 75),
        text: Color::Rgb(202, 205, 232),
        muted: Color::Rgb(119, 122, 146),
        hover: Color::Rgb(228, 229, 241),
        done: Color::Rgb(77, 80, 103),
        accent: Color::Rgb(58, 123, 253),
        check_from: Color::Rgb(87, 221, 255),
        check_to: Color::Rgb(192, 88, 243),
        title: Color::Rgb(250, 250, 250),
        error: Color::Rgb(255, 110, 110),
    };
}
