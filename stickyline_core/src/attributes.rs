// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element layout attributes.
//!
//! The builder writes `frame`, `origin` and `z_index` once per build pass.
//! Only `transform` changes afterwards, when the sticky resolver runs for a
//! new scroll offset. Hosts draw an element at its [resolved
//! frame](LayoutAttributes::resolved_frame).

use kurbo::{Affine, Point, Rect, Vec2};

use crate::element::ElementKey;

/// Geometry and stacking of one element in content coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutAttributes {
    /// Which element these attributes describe.
    pub key: ElementKey,
    /// Static placement, after spacing.
    pub frame: Rect,
    /// Top-left of the element's slot: the build cursor before leading
    /// spacing was applied.
    pub origin: Point,
    /// Paint order; higher values draw on top.
    pub z_index: i32,
    /// Sticky translation applied on top of `frame`. Identity for cells.
    pub transform: Affine,
}

impl LayoutAttributes {
    /// Returns the translation component of [`transform`](Self::transform).
    #[inline]
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.transform.translation()
    }

    /// Returns the frame with the sticky transform applied.
    #[inline]
    #[must_use]
    pub fn resolved_frame(&self) -> Rect {
        self.transform.transform_rect_bbox(self.frame)
    }

    /// Returns whether the resolved frame overlaps `rect`.
    ///
    /// Rectangles that only share an edge do not intersect.
    #[inline]
    #[must_use]
    pub fn intersects(&self, rect: Rect) -> bool {
        overlaps(self.resolved_frame(), rect)
    }
}

/// Where a sticky element currently sits relative to the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PinState {
    /// At its static position. Cells are always resting.
    #[default]
    Resting,
    /// Held at the top of the viewport, under any pinned super-headers.
    Pinned,
    /// Pushed to the bottom edge of its own section by the section's content.
    HandedOff,
}

/// Strict overlap test: shared edges do not count.
#[inline]
pub(crate) fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}
