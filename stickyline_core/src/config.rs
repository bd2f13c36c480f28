// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spacing configuration and viewport state.

use kurbo::{Point, Rect, Size};

/// Spacing applied by the builder.
///
/// Passed to the [`StickyLayout`](crate::engine::StickyLayout); changing it
/// discards the cached layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal inset of every element from the leading edge.
    ///
    /// Section 0's header and super-header are not inset.
    pub interitem_spacing: f64,
    /// Vertical gap placed above every element.
    ///
    /// Section 0's header and super-header get no gap.
    pub interline_spacing: f64,
}

impl LayoutConfig {
    /// No horizontal inset, 5 points between lines.
    pub const DEFAULT: Self = Self {
        interitem_spacing: 0.0,
        interline_spacing: 5.0,
    };

    /// Returns a copy with the given horizontal inset.
    #[inline]
    #[must_use]
    pub const fn with_interitem_spacing(mut self, spacing: f64) -> Self {
        self.interitem_spacing = spacing;
        self
    }

    /// Returns a copy with the given vertical gap.
    #[inline]
    #[must_use]
    pub const fn with_interline_spacing(mut self, spacing: f64) -> Self {
        self.interline_spacing = spacing;
        self
    }

    /// Returns `(interitem, interline)` spacing for a header or super-header
    /// in `section`.
    #[inline]
    pub(crate) const fn supplementary_spacing(&self, section: usize) -> (f64, f64) {
        if section == 0 {
            (0.0, 0.0)
        } else {
            (self.interitem_spacing, self.interline_spacing)
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The part of the content the host currently shows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Visible rectangle in content coordinates. The origin is the scroll
    /// offset.
    pub bounds: Rect,
    /// Height of chrome (navigation bars and the like) overlapping the top
    /// of the viewport.
    pub top_inset: f64,
}

impl Viewport {
    /// Creates a viewport of `size` scrolled to the top, with no inset.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            bounds: Rect::from_origin_size(Point::ZERO, size),
            top_inset: 0.0,
        }
    }

    /// Returns a copy scrolled to `offset`.
    #[must_use]
    pub fn with_content_offset(self, offset: Point) -> Self {
        Self {
            bounds: self.bounds.with_origin(offset),
            ..self
        }
    }

    /// Returns a copy with the given top inset.
    #[must_use]
    pub const fn with_top_inset(mut self, top_inset: f64) -> Self {
        self.top_inset = top_inset;
        self
    }

    /// Visible size.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    /// Current scroll offset.
    #[inline]
    #[must_use]
    pub fn content_offset(&self) -> Point {
        self.bounds.origin()
    }

    /// Vertical scroll offset plus the top inset: the content coordinate that
    /// sits right below the host's chrome.
    #[inline]
    #[must_use]
    pub fn normalized_offset(&self) -> f64 {
        self.bounds.y0 + self.top_inset
    }
}
