//! App and reader settings blobs.
//!
//! Settings restore is all-or-nothing per blob: the orchestrator overwrites
//! the whole struct, never merging field by field. Every field has a default
//! so partially-populated documents from older builds decode cleanly.

use serde::{Deserialize, Serialize};

/// Valid range for autoscroll speed, in screens per second.
pub const AUTOSCROLL_SPEED_MIN: f32 = 0.5;
pub const AUTOSCROLL_SPEED_MAX: f32 = 4.0;

/// Color theme. Persisted by name; unknown names decode to `Dark`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Amoled,
    System,
}

impl Theme {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Amoled => "amoled",
            Self::System => "system",
        }
    }

    /// Parse a name string, falling back to the default on unknown input.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "light" => Self::Light,
            "amoled" => Self::Amoled,
            "system" => Self::System,
            _ => Self::Dark,
        }
    }
}

impl From<String> for Theme {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.as_str().to_string()
    }
}

/// Paragraph alignment in the reader. Unknown names decode to `Left`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TextAlign {
    #[default]
    Left,
    Justify,
    Center,
    Right,
}

impl TextAlign {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Left => "left",
            Self::Justify => "justify",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "justify" => Self::Justify,
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::Left,
        }
    }
}

impl From<String> for TextAlign {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TextAlign> for String {
    fn from(align: TextAlign) -> Self {
        align.as_str().to_string()
    }
}

/// Application-level preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub theme: Theme,
    pub language: String,
    pub show_unread_badges: bool,
    pub confirm_removal: bool,
    pub update_library_on_launch: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: "en".to_string(),
            show_unread_badges: true,
            confirm_removal: true,
            update_library_on_launch: false,
        }
    }
}

/// Reader-view preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReaderSettings {
    pub font_size: u32,
    pub line_height: f32,
    pub font_family: String,
    pub text_align: TextAlign,
    pub theme: Theme,
    pub autoscroll: bool,
    /// Screens per second, clamped to 0.5–4.0 when set from foreign input.
    pub autoscroll_speed: f32,
    pub keep_screen_on: bool,
    pub fullscreen: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            font_size: 16,
            line_height: 1.5,
            font_family: "serif".to_string(),
            text_align: TextAlign::default(),
            theme: Theme::default(),
            autoscroll: false,
            autoscroll_speed: 1.0,
            keep_screen_on: true,
            fullscreen: false,
        }
    }
}
