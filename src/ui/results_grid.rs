// SPDX-License-Identifier: MPL-2.0
//! Responsive grid of search results.
//!
//! The grid lays photos out as fixed square tiles in wrapped rows and reports
//! every scroll viewport change so the application can feed the
//! infinite-scroll sensor. Tile geometry comes from [`GridMetrics`], the same
//! type the sensor uses to map a viewport back to tile indices.

use crate::media::ImageCache;
use crate::search::{GridMetrics, Photo, ViewportSnapshot};
use crate::ui::design_tokens::{opacity, radius, spacing, typography};
use crate::ui::theming::placeholder_color;
use iced::widget::scrollable::{RelativeOffset, Viewport};
use iced::widget::{
    container, image, mouse_area, operation, responsive, text, tooltip, Column, Id, Row,
    Scrollable,
};
use iced::{mouse, Border, ContentFit, Element, Length, Task, Theme};

/// Identifier of the grid's scrollable, used to jump back to the top.
pub const SCROLLABLE_ID: &str = "results-grid";

/// Contextual data needed to render the grid.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub photos: &'a [Photo],
    pub images: &'a ImageCache,
    pub metrics: GridMetrics,
    pub dark: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    Scrolled(ViewportSnapshot),
    TilePressed(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ViewportChanged(ViewportSnapshot),
    OpenPreview(usize),
}

#[must_use]
pub fn update(message: Message) -> Event {
    match message {
        Message::Scrolled(viewport) => Event::ViewportChanged(viewport),
        Message::TilePressed(index) => Event::OpenPreview(index),
    }
}

/// Scrolls the grid back to the first row.
#[must_use]
pub fn scroll_to_top<T>() -> Task<T> {
    operation::snap_to(Id::new(SCROLLABLE_ID), RelativeOffset::START)
}

/// Converts an Iced viewport into a toolkit-free snapshot.
#[must_use]
pub fn snapshot(viewport: &Viewport) -> ViewportSnapshot {
    let bounds = viewport.bounds();
    ViewportSnapshot {
        offset_y: viewport.absolute_offset().y,
        width: bounds.width,
        height: bounds.height,
    }
}

#[must_use]
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    responsive(move |size| {
        let columns = ctx.metrics.columns(size.width);

        let rows = ctx
            .photos
            .chunks(columns)
            .enumerate()
            .map(move |(row_index, chunk)| {
                let tiles = chunk.iter().enumerate().map(move |(column, photo)| {
                    tile(ctx, row_index * columns + column, photo)
                });
                Row::with_children(tiles).spacing(ctx.metrics.spacing).into()
            });

        let grid = Column::with_children(rows)
            .spacing(ctx.metrics.spacing)
            .padding(ctx.metrics.padding)
            .width(Length::Fill);

        Scrollable::new(grid)
            .id(Id::new(SCROLLABLE_ID))
            .width(Length::Fill)
            .height(Length::Fill)
            .on_scroll(|viewport: Viewport| Message::Scrolled(snapshot(&viewport)))
            .into()
    })
    .into()
}

fn tile<'a>(ctx: ViewContext<'a>, index: usize, photo: &'a Photo) -> Element<'a, Message> {
    let size = ctx.metrics.tile_size;

    let body: Element<'a, Message> = match ctx.images.handle(&photo.urls.small) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        None => {
            let tint = placeholder_color(photo.placeholder_rgb(), ctx.dark, opacity::PLACEHOLDER);
            container(text(""))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(move |_theme: &Theme| container::Style {
                    background: Some(tint.into()),
                    ..Default::default()
                })
                .into()
        }
    };

    let framed = container(body)
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .clip(true)
        .style(|_theme: &Theme| container::Style {
            border: Border {
                radius: radius::MD.into(),
                ..Default::default()
            },
            ..Default::default()
        });

    let clickable = mouse_area(framed)
        .on_press(Message::TilePressed(index))
        .interaction(mouse::Interaction::Pointer);

    if photo.alt_description.is_empty() {
        clickable.into()
    } else {
        tooltip(
            clickable,
            container(text(photo.alt_description.as_str()).size(typography::CAPTION))
                .padding(spacing::XXS)
                .style(container::rounded_box),
            tooltip::Position::Bottom,
        )
        .into()
    }
}
