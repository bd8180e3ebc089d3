// SPDX-License-Identifier: MPL-2.0
//! Search session controller.
//!
//! `SearchSession` owns everything a search-and-browse interaction needs: the
//! submitted query, the page cursor, the accumulated results, loading and
//! error state, and the rate-limit cooldown. It performs no I/O. Triggers
//! (`submit_search`, `request_next_page`) return a [`PageRequest`] when a fetch
//! should happen; the caller executes it and reports back through
//! [`SearchSession::apply_response`].
//!
//! ```text
//! Idle ──submit / next page──▶ Fetching ──response──▶ Idle
//!            ▲
//!            └── blocked while the cooldown flag is raised
//! ```

use super::api::{ApiError, PageRequest, SearchPage};
use super::cooldown::{Cooldown, CooldownTicket};
use super::photo::Photo;
use crate::config::{DEFAULT_COOLDOWN_SECS, DEFAULT_PER_PAGE};
use std::time::Duration;

/// User-facing condition left behind by the last fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFeedback {
    /// The remote quota is exhausted; paging is paused until the cooldown ends.
    RateLimited,
    /// The query matched nothing.
    NoResults,
    /// Transport, status or decoding failure.
    LoadFailed,
}

impl SearchFeedback {
    /// Returns the i18n message key for this condition.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SearchFeedback::RateLimited => "error-rate-limit",
            SearchFeedback::NoResults => "error-no-results",
            SearchFeedback::LoadFailed => "error-load-failed",
        }
    }
}

/// What applying a response did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Photos were appended.
    Appended { added: usize },
    /// The query returned an empty page.
    NoResults,
    /// Quota exhausted. The caller must schedule the ticket's expiry.
    CooldownStarted(CooldownTicket),
    /// The fetch failed.
    Failed,
    /// The response belongs to a superseded search and was dropped.
    Stale,
}

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub per_page: u32,
    pub cooldown: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            cooldown: Duration::from_secs(DEFAULT_COOLDOWN_SECS),
        }
    }
}

#[derive(Debug)]
pub struct SearchSession {
    settings: SessionSettings,
    query_text: String,
    current_page: u32,
    total_pages: Option<u32>,
    results: Vec<Photo>,
    is_loading: bool,
    error: Option<SearchFeedback>,
    /// Bumped on every submitted search; tags outgoing requests.
    generation: u64,
    cooldown: Cooldown,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl SearchSession {
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            query_text: String::new(),
            current_page: 1,
            total_pages: None,
            results: Vec::new(),
            is_loading: false,
            error: None,
            generation: 0,
            cooldown: Cooldown::default(),
        }
    }

    /// Starts a new search for `query_text`.
    ///
    /// Blank input is ignored. Otherwise the previous results, cursor, error
    /// and cooldown are reset and the first page is requested. Any fetch still
    /// in flight for an older search will be discarded when it lands.
    pub fn submit_search(&mut self, query_text: &str) -> Option<PageRequest> {
        let query = query_text.trim();
        if query.is_empty() {
            return None;
        }

        self.query_text = query.to_string();
        self.results.clear();
        self.current_page = 1;
        self.total_pages = None;
        self.error = None;
        self.cooldown.disarm();
        self.generation = self.generation.wrapping_add(1);

        tracing::info!(query = %self.query_text, generation = self.generation, "search submitted");
        self.fetch_page()
    }

    /// Advances the cursor and requests the next page.
    ///
    /// No-op when nothing has been loaded yet, while a fetch is in flight,
    /// during the rate-limit cooldown, or once the last page was reached.
    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        if self.results.is_empty() || self.is_loading || !self.requests_allowed() {
            return None;
        }
        if self
            .total_pages
            .is_some_and(|total| self.current_page >= total)
        {
            tracing::debug!(page = self.current_page, "last page already loaded");
            return None;
        }

        self.current_page += 1;
        self.fetch_page()
    }

    fn fetch_page(&mut self) -> Option<PageRequest> {
        if self.query_text.is_empty() {
            return None;
        }
        if self
            .total_pages
            .is_some_and(|total| total < self.current_page)
        {
            return None;
        }

        self.error = None;
        self.is_loading = true;

        Some(PageRequest {
            generation: self.generation,
            query: self.query_text.clone(),
            page: self.current_page,
            per_page: self.settings.per_page,
        })
    }

    /// Folds the result of `request` into the session.
    pub fn apply_response(
        &mut self,
        request: &PageRequest,
        result: Result<SearchPage, ApiError>,
    ) -> ResponseOutcome {
        if request.generation != self.generation {
            tracing::debug!(
                query = %request.query,
                page = request.page,
                "dropping response from superseded search"
            );
            return ResponseOutcome::Stale;
        }

        self.is_loading = false;

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                tracing::error!(
                    query = %request.query,
                    page = request.page,
                    error = %err,
                    "error fetching photos"
                );
                self.error = Some(SearchFeedback::LoadFailed);
                return ResponseOutcome::Failed;
            }
        };

        if page.is_rate_limited() {
            tracing::warn!(
                cooldown_secs = self.settings.cooldown.as_secs(),
                "API rate limit reached"
            );
            self.error = Some(SearchFeedback::RateLimited);
            // The page was not delivered; step back so it is requested again
            // once the cooldown is over.
            if request.page > 1 && self.current_page == request.page {
                self.current_page -= 1;
            }
            let ticket = self.cooldown.arm(self.settings.cooldown);
            return ResponseOutcome::CooldownStarted(ticket);
        }

        if page.photos.is_empty() {
            self.error = Some(SearchFeedback::NoResults);
            return ResponseOutcome::NoResults;
        }

        let added = page.photos.len();
        self.results.extend(page.photos);
        self.total_pages = Some(page.total_pages);

        tracing::debug!(
            page = request.page,
            added,
            total_pages = page.total_pages,
            "page appended"
        );
        ResponseOutcome::Appended { added }
    }

    /// Ends the cooldown identified by `ticket`. Returns whether it did.
    pub fn expire_cooldown(&mut self, ticket: CooldownTicket) -> bool {
        let lifted = self.cooldown.expire(ticket);
        if lifted {
            tracing::info!("rate-limit cooldown over, paging resumed");
        }
        lifted
    }

    /// Cancels any pending cooldown, e.g. on teardown.
    pub fn cancel_cooldown(&mut self) {
        self.cooldown.disarm();
    }

    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    #[must_use]
    pub fn results(&self) -> &[Photo] {
        &self.results
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<SearchFeedback> {
        self.error
    }

    #[must_use]
    pub fn requests_allowed(&self) -> bool {
        !self.cooldown.is_active()
    }

    /// Whether a search has been submitted since startup.
    #[must_use]
    pub fn has_searched(&self) -> bool {
        !self.query_text.is_empty()
    }

    #[must_use]
    pub fn settings(&self) -> SessionSettings {
        self.settings
    }
}
