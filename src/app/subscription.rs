// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use iced::keyboard::{self, key::Named, Key};
use iced::{event, time, window, Event, Subscription};
use std::time::Duration;

/// Spinner frame interval.
const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Window resizes and the Escape key.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(Named::Escape),
            ..
        }) => Some(Message::EscapePressed),
        _ => None,
    })
}

/// Drives the spinner while something is loading.
pub fn create_tick_subscription(animating: bool) -> Subscription<Message> {
    if animating {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
