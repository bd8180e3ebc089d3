// SPDX-License-Identifier: MPL-2.0
//! Design tokens shared by every view.
//!
//! - **Palette**: Base colors
//! - **Opacity**: Overlay and placeholder alpha levels
//! - **Spacing**: Spacing scale (8px grid)
//! - **Sizing**: Search bar, preview and spinner dimensions
//! - **Typography**: Font size scale
//! - **Radius**: Border radii
//! - **Shadow**: Elevation of the search bar and preview card
//!
//! ```
//! use lumen_search::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let backdrop = Color {
//!     a: opacity::BACKDROP,
//!     ..palette::BLACK
//! };
//! let gap = spacing::SM;
//! # let _ = (backdrop, gap);
//! ```

use iced::Color;

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_800: Color = Color::from_rgb(0.16, 0.16, 0.17);
    pub const GRAY_500: Color = Color::from_rgb(0.5, 0.5, 0.52);
    pub const GRAY_200: Color = Color::from_rgb(0.82, 0.82, 0.84);
    pub const GRAY_100: Color = Color::from_rgb(0.93, 0.93, 0.94);

    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
}

pub mod opacity {
    /// Dimmed page behind the preview.
    pub const BACKDROP: f32 = 0.75;
    /// Tile placeholder tinted with the photo's dominant color.
    pub const PLACEHOLDER: f32 = 0.6;
    /// Caption strip over the preview image.
    pub const CAPTION: f32 = 0.55;
}

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

pub mod sizing {
    /// Maximum width of the search form.
    pub const SEARCH_BAR_WIDTH: f32 = 640.0;
    pub const INPUT_HEIGHT: f32 = 40.0;
    /// Spinner diameter in the status row.
    pub const SPINNER: f32 = 32.0;
    /// Preview card never grows beyond this fraction of the window.
    pub const PREVIEW_MAX_FRACTION: f32 = 0.9;
}

pub mod typography {
    pub const TITLE: f32 = 28.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
}

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const SM: Shadow = Shadow {
        color: Color {
            a: 0.25,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 6.0,
    };

    pub const LG: Shadow = Shadow {
        color: Color {
            a: 0.5,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 24.0,
    };
}

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::BACKDROP > 0.0 && opacity::BACKDROP < 1.0);
    assert!(sizing::PREVIEW_MAX_FRACTION > 0.0 && sizing::PREVIEW_MAX_FRACTION <= 1.0);

    assert!(typography::TITLE > typography::BODY_LG);
    assert!(typography::BODY > typography::CAPTION);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_follows_grid() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::XL, spacing::MD * 2.0);
    }
}
