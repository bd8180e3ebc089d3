// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.
//!
//! Every network effect starts here: the session hands back a
//! [`PageRequest`], this module runs it on the backend and routes the result
//! back as [`Message::PageLoaded`]. After each state change the
//! infinite-scroll sensor is re-evaluated against the last known viewport.

use super::Message;
use crate::media::{fetch_image, ImageCache};
use crate::search::cooldown::{self, CooldownTicket};
use crate::search::{
    ApiError, GridMetrics, PageRequest, Photo, ResponseOutcome, SearchBackend, SearchPage,
    SearchSession, SentinelSensor, ViewportSnapshot,
};
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::{preview, results_grid, search_bar};
use iced::{task, Size, Task};
use std::ops::Range;
use std::sync::Arc;

/// Height of the status line under the search bar.
pub const STATUS_LINE_HEIGHT: f32 = sizing::SPINNER;

/// Height reserved above the grid for the search bar and status line.
pub const HEADER_HEIGHT: f32 =
    spacing::MD * 2.0 + sizing::INPUT_HEIGHT + spacing::XS + STATUS_LINE_HEIGHT;

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub session: &'a mut SearchSession,
    pub sensor: &'a mut SentinelSensor,
    pub metrics: GridMetrics,
    pub viewport: &'a mut Option<ViewportSnapshot>,
    pub window_size: &'a mut Size,
    pub search_bar: &'a mut search_bar::State,
    pub images: &'a mut ImageCache,
    pub selected: &'a mut Option<Photo>,
    pub backend: &'a Arc<dyn SearchBackend>,
    pub http: Option<&'a reqwest::Client>,
    pub cooldown_handle: &'a mut Option<task::Handle>,
}

impl UpdateContext<'_> {
    /// Viewport of the grid, estimated from the window until the grid
    /// reports a real one.
    fn current_viewport(&self) -> ViewportSnapshot {
        self.viewport.unwrap_or_else(|| estimate_viewport(*self.window_size))
    }

    fn execute(&self, request: PageRequest) -> Task<Message> {
        let future = self.backend.search(request.clone());
        Task::perform(future, move |result| Message::PageLoaded { request, result })
    }

    fn fetch_images<'u, I>(&mut self, urls: I) -> Task<Message>
    where
        I: IntoIterator<Item = &'u str>,
    {
        let Some(http) = self.http else {
            return Task::none();
        };
        let tasks: Vec<_> = self
            .images
            .claim(urls)
            .into_iter()
            .map(|url| {
                let fetch = fetch_image(http.clone(), url.clone());
                Task::perform(fetch, move |result| Message::ImageLoaded { url, result })
            })
            .collect();
        Task::batch(tasks)
    }

    fn start_cooldown(&mut self, ticket: CooldownTicket) -> Task<Message> {
        tracing::info!(secs = ticket.duration().as_secs(), "paging paused by rate limit");
        let (task, handle) =
            Task::perform(cooldown::wait(ticket), Message::CooldownElapsed).abortable();
        // Replacing the handle aborts the previous timer.
        *self.cooldown_handle = Some(handle.abort_on_drop());
        task
    }

    /// Re-checks the sentinel and loads thumbnails for what is on screen.
    fn refresh_visible(&mut self) -> Task<Message> {
        let len = self.session.results().len();
        let visible = self.metrics.visible_range(self.current_viewport(), len);
        let gate_open = !self.session.is_loading() && self.session.requests_allowed();

        let mut tasks = vec![self.load_thumbnails(visible.clone())];
        if self.sensor.observe(len, visible, gate_open) {
            tracing::debug!(len, "sentinel visible, requesting next page");
            if let Some(request) = self.session.request_next_page() {
                tasks.push(self.execute(request));
            }
        }
        Task::batch(tasks)
    }

    /// Visible tiles plus one screenful below them.
    fn load_thumbnails(&mut self, visible: Range<usize>) -> Task<Message> {
        let results = self.session.results();
        let end = visible
            .end
            .saturating_add(visible.len())
            .min(results.len());
        let urls: Vec<String> = results[visible.start.min(end)..end]
            .iter()
            .map(|photo| photo.urls.small.clone())
            .collect();
        self.fetch_images(urls.iter().map(String::as_str))
    }
}

/// Viewport of a grid that fills the window below the header.
#[must_use]
pub fn estimate_viewport(window: Size) -> ViewportSnapshot {
    ViewportSnapshot {
        offset_y: 0.0,
        width: window.width,
        height: (window.height - HEADER_HEIGHT).max(0.0),
    }
}

pub fn handle_search_bar(ctx: &mut UpdateContext<'_>, message: search_bar::Message) -> Task<Message> {
    match search_bar::update(ctx.search_bar, message) {
        search_bar::Event::None => Task::none(),
        search_bar::Event::Submitted(text) => submit(ctx, &text),
    }
}

/// Starts a new search, superseding whatever is in flight.
pub fn submit(ctx: &mut UpdateContext<'_>, text: &str) -> Task<Message> {
    let Some(request) = ctx.session.submit_search(text) else {
        return Task::none();
    };

    // Dropping the handle aborts a pending cooldown timer.
    *ctx.cooldown_handle = None;
    *ctx.selected = None;
    // Previous results are gone; failed URLs get another chance.
    ctx.images.clear();
    ctx.sensor.reset();
    if let Some(viewport) = ctx.viewport.as_mut() {
        viewport.offset_y = 0.0;
    }

    Task::batch([ctx.execute(request), results_grid::scroll_to_top()])
}

pub fn handle_grid(ctx: &mut UpdateContext<'_>, message: results_grid::Message) -> Task<Message> {
    match results_grid::update(message) {
        results_grid::Event::ViewportChanged(viewport) => {
            *ctx.viewport = Some(viewport);
            ctx.refresh_visible()
        }
        results_grid::Event::OpenPreview(index) => open_preview(ctx, index),
    }
}

fn open_preview(ctx: &mut UpdateContext<'_>, index: usize) -> Task<Message> {
    let Some(photo) = ctx.session.results().get(index).cloned() else {
        return Task::none();
    };
    tracing::debug!(id = %photo.id, "opening preview");
    let url = photo.urls.regular.clone();
    *ctx.selected = Some(photo);
    ctx.fetch_images([url.as_str()])
}

pub fn handle_preview(ctx: &mut UpdateContext<'_>, message: &preview::Message) -> Task<Message> {
    match preview::update(message) {
        preview::Event::Closed => {
            *ctx.selected = None;
            Task::none()
        }
    }
}

pub fn handle_escape(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    *ctx.selected = None;
    Task::none()
}

pub fn handle_page_loaded(
    ctx: &mut UpdateContext<'_>,
    request: &PageRequest,
    result: Result<SearchPage, ApiError>,
) -> Task<Message> {
    match ctx.session.apply_response(request, result) {
        ResponseOutcome::Stale => Task::none(),
        ResponseOutcome::CooldownStarted(ticket) => {
            let cooldown = ctx.start_cooldown(ticket);
            Task::batch([cooldown, ctx.refresh_visible()])
        }
        ResponseOutcome::Appended { .. } | ResponseOutcome::NoResults | ResponseOutcome::Failed => {
            ctx.refresh_visible()
        }
    }
}

pub fn handle_cooldown_elapsed(ctx: &mut UpdateContext<'_>, ticket: CooldownTicket) -> Task<Message> {
    if !ctx.session.expire_cooldown(ticket) {
        return Task::none();
    }
    *ctx.cooldown_handle = None;
    ctx.refresh_visible()
}

pub fn handle_window_resized(ctx: &mut UpdateContext<'_>, size: Size) -> Task<Message> {
    *ctx.window_size = size;
    let estimate = estimate_viewport(size);
    if let Some(viewport) = ctx.viewport.as_mut() {
        viewport.width = estimate.width;
        viewport.height = estimate.height;
    }
    ctx.refresh_visible()
}
