// SPDX-License-Identifier: MPL-2.0
//! Remote image cache for result tiles and the preview.
//!
//! # Design
//!
//! - **URL-keyed**: entries are indexed by the image URL
//! - **LRU eviction**: bounded by entry count, least recently used goes first,
//!   skipping entries whose download is still in flight
//! - **Tracks in-flight downloads** so a URL is fetched at most once
//! - **Failures are sticky** until the cache is cleared, so a broken URL
//!   does not hammer the CDN on every scroll event
//!
//! # Usage
//!
//! ```ignore
//! for url in cache.claim(visible_urls) {
//!     tasks.push(Task::perform(fetch_image(client.clone(), url.clone()), ...));
//! }
//! ```

use crate::config::{DEFAULT_IMAGE_CACHE_CAPACITY, MIN_IMAGE_CACHE_CAPACITY};
use crate::search::api::ApiError;
use iced::widget::image;
use lru::LruCache;
use std::num::NonZeroUsize;

/// State of one cached URL.
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Loading,
    Ready(image::Handle),
    Failed,
}

impl ImageSlot {
    #[must_use]
    pub fn handle(&self) -> Option<&image::Handle> {
        match self {
            ImageSlot::Ready(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Download and eviction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub downloads_started: u64,
    pub downloads_failed: u64,
    pub evictions: u64,
}

pub struct ImageCache {
    entries: LruCache<String, ImageSlot>,
    stats: CacheStats,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .field("stats", &self.stats)
            .finish()
    }
}

impl ImageCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(MIN_IMAGE_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Looks up a URL without touching the LRU order.
    #[must_use]
    pub fn peek(&self, url: &str) -> Option<&ImageSlot> {
        self.entries.peek(url)
    }

    /// Decoded handle for `url`, if ready.
    #[must_use]
    pub fn handle(&self, url: &str) -> Option<&image::Handle> {
        self.peek(url).and_then(ImageSlot::handle)
    }

    /// Marks every unknown URL as loading and returns those, in order.
    ///
    /// Known URLs are promoted in the LRU order so on-screen tiles are the
    /// last to be evicted.
    pub fn claim<'a, I>(&mut self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut claimed = Vec::new();
        for url in urls {
            if self.entries.get(url).is_some() {
                continue;
            }
            self.put(url.to_string(), ImageSlot::Loading);
            self.stats.downloads_started += 1;
            claimed.push(url.to_string());
        }
        claimed
    }

    /// Stores the outcome of a download.
    pub fn complete(&mut self, url: String, result: Result<Vec<u8>, ApiError>) {
        let slot = match result {
            Ok(bytes) => ImageSlot::Ready(image::Handle::from_bytes(bytes)),
            Err(err) => {
                tracing::warn!(%url, error = %err, "image download failed");
                self.stats.downloads_failed += 1;
                ImageSlot::Failed
            }
        };
        self.put(url, slot);
    }

    /// Inserts `slot`, evicting the least recently used entry that is not
    /// still downloading. Only a cache full of in-flight URLs drops one of them.
    fn put(&mut self, url: String, slot: ImageSlot) {
        if !self.entries.contains(&url) && self.entries.len() >= self.entries.cap().get() {
            let victim = self
                .entries
                .iter()
                .rev()
                .find(|(_, slot)| !matches!(slot, ImageSlot::Loading))
                .map(|(key, _)| key.clone());
            if let Some(victim) = victim {
                self.entries.pop(&victim);
                self.stats.evictions += 1;
            }
        }
        if let Some((evicted, _)) = self.entries.push(url.clone(), slot) {
            if evicted != url {
                self.stats.evictions += 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Downloads the bytes behind an image URL.
pub async fn fetch_image(client: reqwest::Client, url: String) -> Result<Vec<u8>, ApiError> {
    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
