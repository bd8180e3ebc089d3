// SPDX-License-Identifier: MPL-2.0
//! Loading indicator drawn on a canvas.
//!
//! The spinner is stateless: the application keeps the rotation angle and
//! advances it on each animation tick with [`advance`].

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, path, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Element, Length, Radians, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

/// Angular speed in radians per second.
pub const SPEED: f32 = TAU;

/// Returns `rotation` moved forward by `elapsed_secs`, wrapped to `[0, 2π)`.
#[must_use]
pub fn advance(rotation: f32, elapsed_secs: f32) -> f32 {
    (rotation + SPEED * elapsed_secs.max(0.0)).rem_euclid(TAU)
}

pub struct AnimatedSpinner {
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            rotation,
            color,
            size: sizing::SPINNER,
        }
    }

    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn into_element<'a, Message: 'a>(self) -> Element<'a, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let stroke_width = (self.size / 10.0).max(2.0);
        let radius = frame.width().min(frame.height()) / 2.0 - stroke_width;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default().with_width(stroke_width).with_color(Color {
                a: 0.2,
                ..self.color
            }),
        );

        // Quarter-turn offset so rotation 0 starts at twelve o'clock.
        let start = self.rotation - PI / 2.0;
        let arc = Path::new(|builder| {
            builder.arc(path::Arc {
                center,
                radius,
                start_angle: Radians(start),
                end_angle: Radians(start + PI * 0.75),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_width(stroke_width)
                .with_color(self.color)
                .with_line_cap(canvas::LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}
