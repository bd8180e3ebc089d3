// SPDX-License-Identifier: MPL-2.0
//! Search form: query input, clear button and submit button.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, shadow, sizing, spacing, typography};
use iced::{
    alignment::Vertical,
    widget::{button, container, text, text_input, Row},
    Border, Element, Length, Theme,
};

/// Contextual data needed to render the search bar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

#[derive(Debug, Clone, Default)]
pub struct State {
    query: String,
}

impl State {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    Clear,
    Submit,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Raw input text; the session trims it and ignores blank queries.
    Submitted(String),
}

#[must_use]
pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::QueryChanged(query) => {
            state.query = query;
            Event::None
        }
        Message::Clear => {
            state.query.clear();
            Event::None
        }
        Message::Submit => Event::Submitted(state.query.clone()),
    }
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view<'a>(ctx: ViewContext<'a>, state: &'a State) -> Element<'a, Message> {
    let placeholder = ctx.i18n.tr("search-placeholder");
    let input = text_input(placeholder.as_str(), &state.query)
        .on_input(Message::QueryChanged)
        .on_submit(Message::Submit)
        .padding(spacing::XS)
        .size(typography::BODY_LG)
        .width(Length::Fill);

    let mut row = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(input);

    if !state.query.is_empty() {
        row = row.push(
            button(text("×").size(typography::BODY_LG))
                .style(button::text)
                .on_press(Message::Clear),
        );
    }

    row = row.push(
        button(text(ctx.i18n.tr("search-button")).size(typography::BODY))
            .padding([spacing::XS, spacing::MD])
            .on_press(Message::Submit),
    );

    container(row)
        .padding(spacing::XXS)
        .max_width(sizing::SEARCH_BAR_WIDTH)
        .height(Length::Fixed(sizing::INPUT_HEIGHT + spacing::XS))
        .style(search_bar_style)
        .into()
}

fn search_bar_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: radius::LG.into(),
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}
