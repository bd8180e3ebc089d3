// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::search::{ApiError, CooldownTicket, PageRequest, SearchPage};
use crate::ui::{preview, results_grid, search_bar};
use iced::Size;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    SearchBar(search_bar::Message),
    Grid(results_grid::Message),
    Preview(preview::Message),
    /// A page request finished, successfully or not.
    PageLoaded {
        request: PageRequest,
        result: Result<SearchPage, ApiError>,
    },
    /// Bytes for a thumbnail or preview image arrived.
    ImageLoaded {
        url: String,
        result: Result<Vec<u8>, ApiError>,
    },
    /// The rate-limit pause armed with this ticket has elapsed.
    CooldownElapsed(CooldownTicket),
    WindowResized(Size),
    EscapePressed,
    Tick(Instant), // Spinner animation
}

/// Runtime flags passed in from the launcher.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 format (e.g., "ru").
    pub lang: Option<String>,
    /// Optional config directory override (`--config-dir`).
    pub config_dir: Option<String>,
    /// Unsplash access key from the command line.
    pub access_key: Option<String>,
    /// Query submitted as soon as the window opens.
    pub initial_query: Option<String>,
}
