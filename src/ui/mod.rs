// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Each component follows the same shape: a `Message` it emits, an `Event` it
//! reports to the application after `update`, and a `view` taking a
//! `ViewContext` with borrowed application state.

pub mod design_tokens;
pub mod preview;
pub mod results_grid;
pub mod search_bar;
pub mod theming;
pub mod widgets;
