// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **API**: Remote endpoint paging and timeouts
//! - **Search**: Infinite-scroll trigger and rate-limit cooldown
//! - **Display**: Result grid tiles and image cache

// ==========================================================================
// API Defaults
// ==========================================================================

/// Photos requested per page. Unsplash caps `per_page` at 30.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Minimum accepted page size.
pub const MIN_PER_PAGE: u32 = 1;

/// Maximum accepted page size.
pub const MAX_PER_PAGE: u32 = 30;

/// HTTP request timeout (in seconds).
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 20;

/// Minimum HTTP request timeout (in seconds).
pub const MIN_API_TIMEOUT_SECS: u64 = 1;

/// Maximum HTTP request timeout (in seconds).
pub const MAX_API_TIMEOUT_SECS: u64 = 120;

// ==========================================================================
// Search Defaults
// ==========================================================================

/// Distance of the infinite-scroll sentinel from the end of the list.
pub const DEFAULT_TRAIL_OFFSET: usize = 20;

/// Rate-limit cooldown before paging resumes (in seconds).
pub const DEFAULT_COOLDOWN_SECS: u64 = 300;

/// Minimum cooldown (in seconds).
pub const MIN_COOLDOWN_SECS: u64 = 1;

/// Maximum cooldown (in seconds). Unsplash quotas reset hourly.
pub const MAX_COOLDOWN_SECS: u64 = 3600;

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Edge length of a square result tile (in logical pixels).
pub const DEFAULT_THUMBNAIL_SIZE: f32 = 220.0;

/// Smallest tile edge length.
pub const MIN_THUMBNAIL_SIZE: f32 = 96.0;

/// Largest tile edge length.
pub const MAX_THUMBNAIL_SIZE: f32 = 480.0;

/// Number of decoded images kept in memory.
pub const DEFAULT_IMAGE_CACHE_CAPACITY: usize = 512;

/// Smallest image cache.
pub const MIN_IMAGE_CACHE_CAPACITY: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_page_default_within_bounds() {
        assert!((MIN_PER_PAGE..=MAX_PER_PAGE).contains(&DEFAULT_PER_PAGE));
    }

    #[test]
    fn cooldown_default_within_bounds() {
        assert!((MIN_COOLDOWN_SECS..=MAX_COOLDOWN_SECS).contains(&DEFAULT_COOLDOWN_SECS));
    }

    #[test]
    fn trail_offset_is_smaller_than_page() {
        assert!(DEFAULT_TRAIL_OFFSET < DEFAULT_PER_PAGE as usize);
    }

    #[test]
    fn thumbnail_default_within_bounds() {
        assert!(DEFAULT_THUMBNAIL_SIZE >= MIN_THUMBNAIL_SIZE);
        assert!(DEFAULT_THUMBNAIL_SIZE <= MAX_THUMBNAIL_SIZE);
    }
}
