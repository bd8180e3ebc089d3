// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the search form, the
//! result grid and the preview overlay.
//!
//! The `App` struct owns the search session and translates its page requests
//! into background tasks on the search backend. Component messages are
//! handled in [`update`], rendering lives in [`view`].

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media::ImageCache;
use crate::search::api::resolve_access_key;
use crate::search::{
    ApiError, GridMetrics, PageRequest, Photo, SearchBackend, SearchPage, SearchSession,
    SentinelSensor, UnsplashClient, ViewportSnapshot,
};
use crate::ui::design_tokens::spacing;
use crate::ui::search_bar;
use crate::ui::theming;
use crate::ui::widgets::animated_spinner;
use futures_util::future::BoxFuture;
use iced::{task, window, Element, Size, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

pub const WINDOW_DEFAULT_WIDTH: f32 = 1280.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 360.0;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    dark: bool,
    session: SearchSession,
    sensor: SentinelSensor,
    metrics: GridMetrics,
    /// Last viewport reported by the grid.
    viewport: Option<ViewportSnapshot>,
    window_size: Size,
    search_bar: search_bar::State,
    images: ImageCache,
    /// Photo shown in the preview overlay.
    selected: Option<Photo>,
    backend: Arc<dyn SearchBackend>,
    /// Shared with image downloads; `None` disables them.
    http: Option<reqwest::Client>,
    /// Aborts the pending cooldown timer when dropped.
    cooldown_handle: Option<task::Handle>,
    spinner_rotation: f32,
    last_tick: Option<Instant>,
    /// i18n key of a startup warning.
    warning: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("viewport", &self.viewport)
            .field("window_size", &self.window_size)
            .field("selected", &self.selected.as_ref().map(|photo| &photo.id))
            .field("images", &self.images)
            .field("cooldown_pending", &self.cooldown_handle.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.cooldown_handle = None;
        self.session.cancel_cooldown();
    }
}

/// Stand-in used when the HTTP client cannot be built; every search fails.
struct UnavailableBackend(ApiError);

impl SearchBackend for UnavailableBackend {
    fn search(&self, _request: PageRequest) -> BoxFuture<'static, Result<SearchPage, ApiError>> {
        let err = self.0.clone();
        Box::pin(async move { Err(err) })
    }
}

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot function; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads settings, builds the Unsplash client and submits the startup
    /// query, if any.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir.clone());

        let (config, warning) = config::load();
        if warning.is_none() {
            if let Err(err) = config::init_default_with_override(None) {
                tracing::warn!(error = %err, "could not write default settings");
            }
        }
        let i18n = I18n::new(flags.lang.clone(), &config);

        let access_key = resolve_access_key(flags.access_key.clone(), config.api.access_key.clone());
        if access_key.is_none() {
            tracing::warn!("no Unsplash access key configured; searches will fail");
        }

        let mut warning = warning;
        let (backend, http): (Arc<dyn SearchBackend>, _) =
            match UnsplashClient::new(config.api_settings(access_key)) {
                Ok(client) => {
                    let http = client.http();
                    (Arc::new(client), Some(http))
                }
                Err(err) => {
                    let notice = Error::from(err.clone());
                    tracing::error!(error = %notice, "failed to build HTTP client");
                    warning = Some(notice.i18n_key().to_string());
                    (Arc::new(UnavailableBackend(err)), None)
                }
            };

        let mut app = Self::with_backend(backend, http, &config, i18n);
        app.warning = warning;

        let task = match flags.initial_query {
            Some(query) => {
                app.search_bar = search_bar::State::new(query.clone());
                app.submit(&query)
            }
            None => Task::none(),
        };
        (app, task)
    }

    /// Builds the application around an arbitrary search backend.
    pub fn with_backend(
        backend: Arc<dyn SearchBackend>,
        http: Option<reqwest::Client>,
        config: &Config,
        i18n: I18n,
    ) -> Self {
        Self {
            i18n,
            dark: config.general.theme_mode.is_dark(),
            session: SearchSession::new(config.session_settings()),
            sensor: SentinelSensor::new(config.trail_offset()),
            metrics: GridMetrics {
                tile_size: config.thumbnail_size(),
                spacing: spacing::SM,
                padding: spacing::MD,
            },
            viewport: None,
            window_size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            search_bar: search_bar::State::default(),
            images: ImageCache::new(config.image_cache_capacity()),
            selected: None,
            backend,
            http,
            cooldown_handle: None,
            spinner_rotation: 0.0,
            last_tick: None,
            warning: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Photo> {
        self.selected.as_ref()
    }

    fn title(&self) -> String {
        let title = self.i18n.tr("window-title");
        if self.session.has_searched() {
            format!("{} - {}", self.session.query_text(), title)
        } else {
            title
        }
    }

    fn theme(&self) -> Theme {
        theming::theme(self.dark)
    }

    fn subscription(&self) -> Subscription<Message> {
        let preview_loading = self
            .selected
            .as_ref()
            .is_some_and(|photo| self.images.handle(&photo.urls.regular).is_none());
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.session.is_loading() || preview_loading),
        ])
    }

    fn context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            session: &mut self.session,
            sensor: &mut self.sensor,
            metrics: self.metrics,
            viewport: &mut self.viewport,
            window_size: &mut self.window_size,
            search_bar: &mut self.search_bar,
            images: &mut self.images,
            selected: &mut self.selected,
            backend: &self.backend,
            http: self.http.as_ref(),
            cooldown_handle: &mut self.cooldown_handle,
        }
    }

    fn submit(&mut self, query: &str) -> Task<Message> {
        update::submit(&mut self.context(), query)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchBar(message) => update::handle_search_bar(&mut self.context(), message),
            Message::Grid(message) => update::handle_grid(&mut self.context(), message),
            Message::Preview(message) => update::handle_preview(&mut self.context(), &message),
            Message::PageLoaded { request, result } => {
                update::handle_page_loaded(&mut self.context(), &request, result)
            }
            Message::ImageLoaded { url, result } => {
                self.images.complete(url, result);
                Task::none()
            }
            Message::CooldownElapsed(ticket) => {
                update::handle_cooldown_elapsed(&mut self.context(), ticket)
            }
            Message::WindowResized(size) => update::handle_window_resized(&mut self.context(), size),
            Message::EscapePressed => update::handle_escape(&mut self.context()),
            Message::Tick(now) => {
                let elapsed = self
                    .last_tick
                    .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
                self.spinner_rotation = animated_spinner::advance(self.spinner_rotation, elapsed);
                self.last_tick = Some(now);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            session: &self.session,
            search_bar: &self.search_bar,
            images: &self.images,
            selected: self.selected.as_ref(),
            metrics: self.metrics,
            window_size: self.window_size,
            dark: self.dark,
            spinner_rotation: self.spinner_rotation,
            warning: self.warning.as_deref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::photo::fixtures::photo;
    use crate::search::SearchFeedback;
    use crate::ui::{preview, results_grid};
    use std::sync::Mutex;

    /// Records requests; responses are fed back by the test itself.
    #[derive(Default)]
    struct RecordingBackend {
        requests: Mutex<Vec<PageRequest>>,
    }

    impl SearchBackend for RecordingBackend {
        fn search(
            &self,
            request: PageRequest,
        ) -> BoxFuture<'static, Result<SearchPage, ApiError>> {
            self.requests.lock().unwrap().push(request);
            Box::pin(async { Err(ApiError::Transport("not executed".into())) })
        }
    }

    fn app() -> (App, Arc<RecordingBackend>) {
        let backend = Arc::new(RecordingBackend::default());
        let app = App::with_backend(
            backend.clone(),
            None,
            &Config::default(),
            I18n::new(Some("en-US".into()), &Config::default()),
        );
        (app, backend)
    }

    fn page(prefix: &str, count: usize, total_pages: u32) -> SearchPage {
        SearchPage {
            photos: (0..count).map(|i| photo(&format!("{prefix}-{i}"))).collect(),
            total_pages,
            rate_limit_remaining: Some("10".into()),
        }
    }

    fn submit(app: &mut App, query: &str) {
        let _ = app.update(Message::SearchBar(search_bar::Message::QueryChanged(
            query.into(),
        )));
        let _ = app.update(Message::SearchBar(search_bar::Message::Submit));
    }

    fn last_request(backend: &RecordingBackend) -> PageRequest {
        backend.requests.lock().unwrap().last().cloned().unwrap()
    }

    #[test]
    fn submitting_issues_first_page_request() {
        let (mut app, backend) = app();
        submit(&mut app, "  apples ");

        assert!(app.session().is_loading());
        let request = last_request(&backend);
        assert_eq!(request.query, "apples");
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 30);
        assert!(app.title().starts_with("apples"));
    }

    #[test]
    fn new_search_forgets_cached_images() {
        let (mut app, _backend) = app();
        app.images.claim(["https://images.test/old/small"]);
        app.images.complete(
            "https://images.test/old/small".into(),
            Err(ApiError::Status(500)),
        );
        assert!(!app.images.is_empty());

        submit(&mut app, "apples");
        assert!(app.images.is_empty());
    }

    #[test]
    fn blank_submit_does_nothing() {
        let (mut app, backend) = app();
        submit(&mut app, "   ");
        assert!(backend.requests.lock().unwrap().is_empty());
        assert!(!app.session().has_searched());
    }

    #[test]
    fn visible_sentinel_after_first_page_requests_next() {
        let (mut app, backend) = app();
        submit(&mut app, "apples");
        let request = last_request(&backend);

        // The default window shows the sentinel of a 30-item list.
        let _ = app.update(Message::PageLoaded {
            request,
            result: Ok(page("a", 30, 3)),
        });

        assert_eq!(app.session().results().len(), 30);
        assert_eq!(app.session().current_page(), 2);
        assert!(app.session().is_loading());
        assert_eq!(last_request(&backend).page, 2);
    }

    #[test]
    fn hidden_sentinel_waits_for_scroll() {
        let (mut app, backend) = app();
        // Small viewport: only the first row is on screen.
        let _ = app.update(Message::Grid(results_grid::Message::Scrolled(
            ViewportSnapshot {
                offset_y: 0.0,
                width: 1280.0,
                height: 200.0,
            },
        )));
        submit(&mut app, "apples");
        let request = last_request(&backend);
        let _ = app.update(Message::PageLoaded {
            request,
            result: Ok(page("a", 30, 3)),
        });
        assert_eq!(app.session().current_page(), 1);
        assert!(!app.session().is_loading());

        // Scroll so row 2 (indices 10..15) comes into view.
        let _ = app.update(Message::Grid(results_grid::Message::Scrolled(
            ViewportSnapshot {
                offset_y: 400.0,
                width: 1280.0,
                height: 200.0,
            },
        )));
        assert_eq!(app.session().current_page(), 2);
        assert_eq!(last_request(&backend).page, 2);
    }

    #[test]
    fn stale_page_is_ignored() {
        let (mut app, backend) = app();
        submit(&mut app, "apples");
        let stale = last_request(&backend);
        submit(&mut app, "pears");

        let _ = app.update(Message::PageLoaded {
            request: stale,
            result: Ok(page("a", 30, 3)),
        });
        assert!(app.session().results().is_empty());
        assert!(app.session().is_loading());
    }

    #[test]
    fn rate_limit_arms_cooldown_and_new_search_cancels_it() {
        let (mut app, backend) = app();
        submit(&mut app, "apples");
        let request = last_request(&backend);
        let _ = app.update(Message::PageLoaded {
            request,
            result: Ok(SearchPage {
                rate_limit_remaining: Some("0".into()),
                ..page("a", 30, 3)
            }),
        });

        assert_eq!(app.session().error(), Some(SearchFeedback::RateLimited));
        assert!(!app.session().requests_allowed());
        assert!(app.cooldown_handle.is_some());

        submit(&mut app, "apples");
        assert!(app.session().requests_allowed());
        assert!(app.cooldown_handle.is_none());
    }

    #[test]
    fn preview_opens_on_tile_and_closes_on_escape_or_backdrop() {
        let (mut app, backend) = app();
        submit(&mut app, "apples");
        let request = last_request(&backend);
        let _ = app.update(Message::PageLoaded {
            request,
            result: Ok(page("a", 3, 1)),
        });

        let _ = app.update(Message::Grid(results_grid::Message::TilePressed(1)));
        assert_eq!(app.selected().map(|photo| photo.id.as_str()), Some("a-1"));

        let _ = app.update(Message::EscapePressed);
        assert!(app.selected().is_none());

        let _ = app.update(Message::Grid(results_grid::Message::TilePressed(0)));
        let _ = app.update(Message::Preview(preview::Message::Close));
        assert!(app.selected().is_none());
    }

    #[test]
    fn out_of_range_tile_is_ignored() {
        let (mut app, _backend) = app();
        let _ = app.update(Message::Grid(results_grid::Message::TilePressed(5)));
        assert!(app.selected().is_none());
    }

    #[test]
    fn tick_advances_spinner() {
        let (mut app, _backend) = app();
        let start = Instant::now();
        let _ = app.update(Message::Tick(start));
        assert_eq!(app.spinner_rotation, 0.0);
        let _ = app.update(Message::Tick(start + std::time::Duration::from_millis(250)));
        assert!(app.spinner_rotation > 0.0);
    }

    #[test]
    fn resize_updates_window_size() {
        let (mut app, _backend) = app();
        let _ = app.update(Message::WindowResized(Size::new(640.0, 480.0)));
        assert_eq!(app.window_size, Size::new(640.0, 480.0));
    }
}
