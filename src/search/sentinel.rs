// SPDX-License-Identifier: MPL-2.0
//! Infinite-scroll trigger.
//!
//! The grid reports which tile indices are on screen; [`SentinelSensor`]
//! watches one of them, the *sentinel*, sitting `trail_offset` items before
//! the end of the list. When the sentinel scrolls into view the sensor fires
//! once. The observation target is re-attached whenever the list length or
//! the gate (`!is_loading && requests_allowed`) changes, and a freshly
//! attached target that is already visible fires immediately.

use crate::config::DEFAULT_TRAIL_OFFSET;
use std::ops::Range;

/// What the sensor is currently attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Target {
    list_len: usize,
    gate_open: bool,
}

#[derive(Debug, Clone)]
pub struct SentinelSensor {
    trail_offset: usize,
    target: Option<Target>,
    was_visible: bool,
}

impl Default for SentinelSensor {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_OFFSET)
    }
}

impl SentinelSensor {
    /// Creates a sensor; an offset of zero is treated as one.
    #[must_use]
    pub fn new(trail_offset: usize) -> Self {
        Self {
            trail_offset: trail_offset.max(1),
            target: None,
            was_visible: false,
        }
    }

    #[must_use]
    pub fn trail_offset(&self) -> usize {
        self.trail_offset
    }

    /// Index of the sentinel tile for a list of `len` items.
    ///
    /// Lists shorter than the trail offset have no sentinel.
    #[must_use]
    pub fn sentinel_index(&self, len: usize) -> Option<usize> {
        len.checked_sub(self.trail_offset)
    }

    /// Feeds the current visibility and returns `true` when the next page
    /// should be requested.
    pub fn observe(&mut self, list_len: usize, visible: Range<usize>, gate_open: bool) -> bool {
        let target = Target {
            list_len,
            gate_open,
        };
        if self.target != Some(target) {
            self.target = Some(target);
            self.was_visible = false;
        }

        if !gate_open || list_len == 0 {
            return false;
        }

        let Some(index) = self.sentinel_index(list_len) else {
            return false;
        };

        let visible_now = visible.contains(&index);
        let fire = visible_now && !self.was_visible;
        self.was_visible = visible_now;
        fire
    }

    /// Detaches from the current target.
    pub fn reset(&mut self) {
        self.target = None;
        self.was_visible = false;
    }
}

/// Scroll position of the result grid, independent of the GUI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSnapshot {
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Layout of the result grid: fixed square tiles in wrapped rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub tile_size: f32,
    pub spacing: f32,
    pub padding: f32,
}

impl GridMetrics {
    /// Number of tiles per row for a grid `width` pixels wide.
    #[must_use]
    pub fn columns(&self, width: f32) -> usize {
        let usable = (width - 2.0 * self.padding + self.spacing).max(0.0);
        let columns = (usable / (self.tile_size + self.spacing)).floor();
        (columns as usize).max(1)
    }

    #[must_use]
    pub fn row_height(&self) -> f32 {
        self.tile_size + self.spacing
    }

    /// Indices of the tiles at least partially inside `viewport`.
    #[must_use]
    pub fn visible_range(&self, viewport: ViewportSnapshot, len: usize) -> Range<usize> {
        let columns = self.columns(viewport.width);
        let row_height = self.row_height();
        if row_height <= 0.0 || viewport.height <= 0.0 {
            return 0..0;
        }

        let top = (viewport.offset_y - self.padding).max(0.0);
        let bottom = (viewport.offset_y + viewport.height - self.padding).max(0.0);
        let first_row = (top / row_height).floor() as usize;
        let end_row = (bottom / row_height).ceil() as usize;

        let start = (first_row * columns).min(len);
        let end = (end_row * columns).min(len);
        start..end
    }

    /// Estimated range for a grid that has not reported a scroll position yet.
    #[must_use]
    pub fn initial_range(&self, width: f32, height: f32, len: usize) -> Range<usize> {
        self.visible_range(
            ViewportSnapshot {
                offset_y: 0.0,
                width,
                height,
            },
            len,
        )
    }
}
