// SPDX-License-Identifier: MPL-2.0
//! Search domain: the remote API contract, the session controller and the
//! infinite-scroll trigger.
//!
//! Nothing in here depends on Iced. The application layer drives a
//! [`SearchSession`], executes the [`PageRequest`]s it hands out through a
//! [`SearchBackend`], and feeds scroll positions to a [`SentinelSensor`].

pub mod api;
pub mod cooldown;
pub mod photo;
pub mod sentinel;
pub mod session;

pub use api::{ApiError, ApiSettings, PageRequest, SearchBackend, SearchPage, UnsplashClient};
pub use cooldown::CooldownTicket;
pub use photo::{Photo, PhotoAuthor, PhotoUrls};
pub use sentinel::{GridMetrics, SentinelSensor, ViewportSnapshot};
pub use session::{ResponseOutcome, SearchFeedback, SearchSession, SessionSettings};
