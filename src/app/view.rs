// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Before the first search the form sits in the middle of the window. Once a
//! query was submitted it moves to the top, with a status line and the
//! result grid below. The preview overlay is stacked above everything.

use super::update::STATUS_LINE_HEIGHT;
use super::Message;
use crate::i18n::fluent::I18n;
use crate::media::ImageCache;
use crate::search::{GridMetrics, Photo, SearchFeedback, SearchSession};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::widgets::AnimatedSpinner;
use crate::ui::{preview, results_grid, search_bar};
use fluent_bundle::FluentValue;
use iced::widget::{center, container, stack, text, Column, Row};
use iced::{
    alignment::{Horizontal, Vertical},
    Color, Element, Length, Size, Theme,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub session: &'a SearchSession,
    pub search_bar: &'a search_bar::State,
    pub images: &'a ImageCache,
    pub selected: Option<&'a Photo>,
    pub metrics: GridMetrics,
    pub window_size: Size,
    pub dark: bool,
    pub spinner_rotation: f32,
    /// i18n key of a startup warning (e.g. unreadable settings).
    pub warning: Option<&'a str>,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let page = if ctx.session.has_searched() {
        view_results(&ctx)
    } else {
        view_landing(&ctx)
    };

    match ctx.selected {
        Some(photo) => {
            let overlay = preview::view(preview::ViewContext {
                i18n: ctx.i18n,
                photo,
                image: ctx.images.handle(&photo.urls.regular),
                window: ctx.window_size,
                spinner_rotation: ctx.spinner_rotation,
            })
            .map(Message::Preview);
            stack![page, overlay].into()
        }
        None => page,
    }
}

fn search_form<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    search_bar::view(search_bar::ViewContext { i18n: ctx.i18n }, ctx.search_bar)
        .map(Message::SearchBar)
}

fn view_landing<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(spacing::LG)
        .align_x(Horizontal::Center)
        .max_width(sizing::SEARCH_BAR_WIDTH)
        .push(text(ctx.i18n.tr("window-title")).size(typography::TITLE))
        .push(search_form(ctx))
        .push(muted(ctx.i18n.tr("empty-state-hint")));

    if let Some(key) = ctx.warning {
        content = content.push(warning_text(ctx.i18n.tr(key)));
    }

    center(content).padding(spacing::LG).into()
}

fn view_results<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let header = container(search_form(ctx))
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .padding([spacing::MD, spacing::LG]);

    let grid = results_grid::view(results_grid::ViewContext {
        photos: ctx.session.results(),
        images: ctx.images,
        metrics: ctx.metrics,
        dark: ctx.dark,
    })
    .map(Message::Grid);

    let body = Column::new()
        .push(header)
        .push(status_line(ctx))
        .push(container(grid).width(Length::Fill).height(Length::Fill));

    container(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn status_line<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let session = ctx.session;
    let mut row = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .height(Length::Fixed(STATUS_LINE_HEIGHT));

    if session.is_loading() {
        row = row.push(
            AnimatedSpinner::new(ctx.accent(), ctx.spinner_rotation)
                .size(sizing::SPINNER * 0.75)
                .into_element(),
        );
    }

    match session.error() {
        Some(feedback) => {
            let message = ctx.i18n.tr(feedback.i18n_key());
            row = row.push(match feedback {
                SearchFeedback::NoResults => muted(message),
                SearchFeedback::RateLimited | SearchFeedback::LoadFailed => warning_text(message),
            });
        }
        None if !session.results().is_empty() => {
            let count = ctx.i18n.tr_with_args(
                "results-count",
                &[("count", FluentValue::from(session.results().len()))],
            );
            row = row.push(muted(count));
        }
        None => {}
    }

    if let Some(key) = ctx.warning {
        row = row.push(warning_text(ctx.i18n.tr(key)));
    }

    container(row)
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .into()
}

impl ViewContext<'_> {
    fn accent(&self) -> Color {
        if self.dark {
            palette::PRIMARY_400
        } else {
            palette::PRIMARY_500
        }
    }
}

fn muted<'a>(content: String) -> Element<'a, Message> {
    text(content)
        .size(typography::BODY)
        .style(|theme: &Theme| text::Style {
            color: Some(theme.extended_palette().background.strong.text),
        })
        .into()
}

fn warning_text<'a>(content: String) -> Element<'a, Message> {
    text(content)
        .size(typography::BODY)
        .style(|theme: &Theme| text::Style {
            color: Some(theme.palette().danger),
        })
        .into()
}
