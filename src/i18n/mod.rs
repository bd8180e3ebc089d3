// SPDX-License-Identifier: MPL-2.0
//! Fluent translations for the user interface.
//!
//! The `.ftl` bundles under `assets/i18n` are embedded into the binary. The
//! active locale comes from `--lang`, then `[general] language`, then the
//! operating system, and falls back to `en-US`.

pub mod fluent;

pub use fluent::I18n;
