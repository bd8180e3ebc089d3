// SPDX-License-Identifier: MPL-2.0
//! Remote image loading and caching.

pub mod thumbnails;

pub use thumbnails::{fetch_image, CacheStats, ImageCache, ImageSlot};
