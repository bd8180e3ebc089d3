// SPDX-License-Identifier: MPL-2.0
//! `lumen_search` is a single-window Unsplash photo search client built with
//! the Iced GUI framework.
//!
//! It provides keyword search with infinite scrolling, a full-size preview
//! overlay, Fluent-based internationalization and user preferences stored in
//! a TOML file.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod media;
pub mod search;
pub mod ui;
