//! Colour themes for terminal output.
//!
//! Every colour used when printing results lives here. Render code asks a
//! [`Theme`] for the colour of a token class instead of naming colours itself.

use std::fmt;
use std::str::FromStr;

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use crate::results::TokenClass;

/// Dark palette, tuned for dark terminal backgrounds
pub mod dark {
    use super::Color;

    pub const KEY: Color = Color::Rgb { r: 0, g: 217, b: 255 };
    pub const STRING: Color = Color::Rgb { r: 107, g: 203, b: 119 };
    pub const NUMBER: Color = Color::Rgb { r: 255, g: 184, b: 108 };
    pub const BOOLEAN: Color = Color::Rgb { r: 189, g: 147, b: 249 };
    pub const NULL: Color = Color::Rgb { r: 130, g: 133, b: 158 };
    pub const PUNCTUATION: Color = Color::Rgb { r: 236, g: 236, b: 244 };

    pub const INFO: Color = Color::Rgb { r: 0, g: 217, b: 255 };
    pub const WARNING: Color = Color::Rgb { r: 255, g: 217, b: 61 };
    pub const ERROR: Color = Color::Rgb { r: 224, g: 108, b: 117 };
}

/// Light palette, darker hues for light terminal backgrounds
pub mod light {
    use super::Color;

    pub const KEY: Color = Color::Rgb { r: 0, g: 92, b: 197 };
    pub const STRING: Color = Color::Rgb { r: 34, g: 134, b: 58 };
    pub const NUMBER: Color = Color::Rgb { r: 176, g: 88, b: 0 };
    pub const BOOLEAN: Color = Color::Rgb { r: 111, g: 66, b: 193 };
    pub const NULL: Color = Color::Rgb { r: 106, g: 115, b: 125 };
    pub const PUNCTUATION: Color = Color::Rgb { r: 36, g: 41, b: 46 };

    pub const INFO: Color = Color::Rgb { r: 0, g: 92, b: 197 };
    pub const WARNING: Color = Color::Rgb { r: 176, g: 136, b: 0 };
    pub const ERROR: Color = Color::Rgb { r: 203, g: 36, b: 49 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Colour for a JSON token, `None` for tokens printed as-is
    pub fn token_color(self, class: TokenClass) -> Option<Color> {
        let color = match (self, class) {
            (_, TokenClass::Whitespace) => return None,
            (Theme::Dark, TokenClass::Key) => dark::KEY,
            (Theme::Dark, TokenClass::String) => dark::STRING,
            (Theme::Dark, TokenClass::Number) => dark::NUMBER,
            (Theme::Dark, TokenClass::Boolean) => dark::BOOLEAN,
            (Theme::Dark, TokenClass::Null) => dark::NULL,
            (Theme::Dark, TokenClass::Punctuation) => dark::PUNCTUATION,
            (Theme::Light, TokenClass::Key) => light::KEY,
            (Theme::Light, TokenClass::String) => light::STRING,
            (Theme::Light, TokenClass::Number) => light::NUMBER,
            (Theme::Light, TokenClass::Boolean) => light::BOOLEAN,
            (Theme::Light, TokenClass::Null) => light::NULL,
            (Theme::Light, TokenClass::Punctuation) => light::PUNCTUATION,
        };
        Some(color)
    }

    pub fn info(self) -> Color {
        match self {
            Theme::Dark => dark::INFO,
            Theme::Light => light::INFO,
        }
    }

    pub fn warning(self) -> Color {
        match self {
            Theme::Dark => dark::WARNING,
            Theme::Light => light::WARNING,
        }
    }

    pub fn error(self) -> Color {
        match self {
            Theme::Dark => dark::ERROR,
            Theme::Light => light::ERROR,
        }
    }

    /// Flip between dark and light
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{}' (expected dark or light)", other)),
        }
    }
}
