// SPDX-License-Identifier: MPL-2.0
//! Light/dark theme selection.

use crate::ui::design_tokens::palette;
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            // Dark on detection error.
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }
}

/// Iced theme for an already resolved light/dark choice.
#[must_use]
pub fn theme(dark: bool) -> Theme {
    if dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Background of a tile whose image has not arrived yet.
#[must_use]
pub fn placeholder_color(rgb: Option<(u8, u8, u8)>, dark: bool, alpha: f32) -> Color {
    match rgb {
        Some((r, g, b)) => Color::from_rgba8(r, g, b, alpha),
        None if dark => Color {
            a: alpha,
            ..palette::GRAY_800
        },
        None => Color {
            a: alpha,
            ..palette::GRAY_100
        },
    }
}
