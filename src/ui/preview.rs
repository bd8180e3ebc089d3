// SPDX-License-Identifier: MPL-2.0
//! Modal overlay showing one photo at `regular` resolution.
//!
//! The overlay is layered above the page with [`opaque`], so neither clicks
//! nor wheel scrolling reach the grid underneath. Clicking the dimmed
//! backdrop, pressing the close button or hitting Escape closes it.

use crate::i18n::fluent::I18n;
use crate::search::Photo;
use crate::ui::design_tokens::{opacity, palette, radius, shadow, sizing, spacing, typography};
use crate::ui::widgets::AnimatedSpinner;
use fluent_bundle::FluentValue;
use iced::widget::{button, center, container, image, mouse_area, opaque, stack, text, Column, Row};
use iced::{
    alignment::{Horizontal, Vertical},
    Color, ContentFit, Element, Length, Size, Theme,
};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub photo: &'a Photo,
    /// Decoded `regular` image, once downloaded.
    pub image: Option<&'a image::Handle>,
    pub window: Size,
    pub spinner_rotation: f32,
}

#[derive(Debug, Clone)]
pub enum Message {
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Closed,
}

#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::Close => Event::Closed,
    }
}

/// Largest box a photo of `width`×`height` can fill inside `window`
/// without upscaling.
#[must_use]
pub fn fitted_size(width: u32, height: u32, window: Size) -> Size {
    let max_w = (window.width * sizing::PREVIEW_MAX_FRACTION).max(1.0);
    let max_h = (window.height * sizing::PREVIEW_MAX_FRACTION - caption_height()).max(1.0);
    if width == 0 || height == 0 {
        return Size::new(max_w, max_h);
    }
    let (w, h) = (width as f32, height as f32);
    let scale = (max_w / w).min(max_h / h).min(1.0);
    Size::new(w * scale, h * scale)
}

fn caption_height() -> f32 {
    typography::BODY_LG + typography::CAPTION + spacing::MD * 2.0
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let photo = ctx.photo;
    let size = fitted_size(photo.width, photo.height, ctx.window);

    let picture: Element<'_, Message> = match ctx.image {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fixed(size.width))
            .height(Length::Fixed(size.height))
            .into(),
        None => container(
            Column::new()
                .spacing(spacing::SM)
                .align_x(Horizontal::Center)
                .push(AnimatedSpinner::new(palette::WHITE, ctx.spinner_rotation).into_element())
                .push(text(ctx.i18n.tr("preview-loading")).size(typography::BODY)),
        )
        .width(Length::Fixed(size.width))
        .height(Length::Fixed(size.height))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into(),
    };

    let card = Column::new()
        .push(picture)
        .push(caption(&ctx))
        .width(Length::Shrink);

    let framed = container(card)
        .clip(true)
        .style(|theme: &Theme| container::Style {
            background: Some(theme.palette().background.into()),
            border: iced::Border {
                radius: radius::LG.into(),
                ..Default::default()
            },
            shadow: shadow::LG,
            ..Default::default()
        });

    let backdrop = mouse_area(
        container(text(""))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme: &Theme| container::Style {
                background: Some(
                    Color {
                        a: opacity::BACKDROP,
                        ..palette::BLACK
                    }
                    .into(),
                ),
                ..Default::default()
            }),
    )
    .on_press(Message::Close);

    opaque(stack![backdrop, center(opaque(framed))])
}

fn caption<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let photo = ctx.photo;
    let mut details = Column::new().spacing(spacing::XXS).width(Length::Fill);

    let headline = photo
        .description
        .as_deref()
        .filter(|description| !description.trim().is_empty())
        .unwrap_or(photo.alt_description.as_str());
    if !headline.is_empty() {
        details = details.push(text(headline).size(typography::BODY_LG));
    }
    if let Some(author) = photo.user.as_ref().filter(|user| !user.name.is_empty()) {
        let byline = ctx.i18n.tr_with_args(
            "preview-by",
            &[("author", FluentValue::from(author.name.as_str()))],
        );
        details = details.push(
            text(byline)
                .size(typography::CAPTION)
                .style(|theme: &Theme| text::Style {
                    color: Some(Color {
                        a: 1.0 - opacity::CAPTION / 2.0,
                        ..theme.palette().text
                    }),
                }),
        );
    }

    let close = button(text(ctx.i18n.tr("preview-close")).size(typography::BODY))
        .style(button::secondary)
        .on_press(Message::Close);

    container(
        Row::new()
            .spacing(spacing::MD)
            .align_y(Vertical::Center)
            .push(details)
            .push(close),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_message_closes() {
        assert_eq!(update(&Message::Close), Event::Closed);
    }

    #[test]
    fn small_photo_is_not_upscaled() {
        let size = fitted_size(200, 100, Size::new(1600.0, 1200.0));
        assert_eq!(size, Size::new(200.0, 100.0));
    }

    #[test]
    fn large_photo_fits_window_keeping_aspect() {
        let window = Size::new(1000.0, 1000.0);
        let size = fitted_size(4000, 2000, window);
        assert!((size.width - 900.0).abs() < 1e-3);
        assert!((size.height - 450.0).abs() < 1e-3);
    }

    #[test]
    fn tall_photo_is_bounded_by_height() {
        let window = Size::new(1000.0, 800.0);
        let size = fitted_size(1000, 4000, window);
        let max_h = 800.0 * sizing::PREVIEW_MAX_FRACTION - caption_height();
        assert!((size.height - max_h).abs() < 1e-3);
        assert!((size.width - max_h / 4.0).abs() < 1e-3);
    }

    #[test]
    fn unknown_dimensions_fill_available_box() {
        let size = fitted_size(0, 0, Size::new(1000.0, 1000.0));
        assert!(size.width > 0.0 && size.height > 0.0);
    }
}
