// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sticky resolution and change tracking.
//!
//! A resolve pass recomputes the vertical translation of every header and
//! super-header from two inputs: the static geometry written by the build,
//! and the normalized scroll offset `N` (scroll offset plus top inset). No
//! previous transform is consulted, so resolving the same offset twice is a
//! no-op and elements can be resolved in any order.
//!
//! # Section headers
//!
//! A header's *stack* is the total height of the super-headers at or before
//! its section; they occupy the top of the viewport while the header is
//! pinned. With `top` the header's static top edge:
//!
//! - `top - N - stack > 0`: the header is below the fold. No translation.
//! - Otherwise it pins at `N + stack`, until its own section's cells have
//!   scrolled past. From then on it hands off, translated by the section's
//!   cell extent so that its bottom edge rides on the section's last cell.
//!
//! # Super-headers
//!
//! Super-headers pin at `N` plus the height of every earlier super-header, so
//! a super-header joins the pinned band as soon as it reaches it and stays
//! there. The first section's super-header pins from the start.
//!
//! [`ResolveChanges`] uses raw slot indices so hosts can read the new
//! transforms through the `*_at()` accessors of [`GeometryCache`].

use alloc::vec::Vec;

use kurbo::Affine;

use super::store::GeometryCache;
use crate::attributes::PinState;
use crate::element::INVALID;

/// The set of changes produced by a single [`GeometryCache::resolve`] call.
#[derive(Clone, Debug, Default)]
pub struct ResolveChanges {
    /// Sticky elements whose transform changed.
    pub transforms: Vec<u32>,
    /// Sticky elements whose [`PinState`] changed.
    pub pins: Vec<u32>,
    /// Headers and super-headers visited.
    pub sticky_elements: usize,
}

impl ResolveChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.pins.clear();
        self.sticky_elements = 0;
    }

    /// Returns whether nothing moved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty() && self.pins.is_empty()
    }
}

impl GeometryCache {
    /// Resolves every sticky element for `normalized_offset` and returns the
    /// set of changes.
    pub fn resolve(&mut self, normalized_offset: f64) -> ResolveChanges {
        let mut changes = ResolveChanges::default();
        self.resolve_into(normalized_offset, &mut changes);
        changes
    }

    /// Like [`resolve`](Self::resolve), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn resolve_into(&mut self, normalized_offset: f64, changes: &mut ResolveChanges) {
        changes.clear();

        let Self {
            frames,
            transforms,
            pins,
            sections,
            ..
        } = self;
        let mut apply = |slot: u32, dy: f64, pin: PinState| {
            let idx = slot as usize;
            let transform = Affine::translate((0.0, dy));
            if transforms[idx] != transform {
                transforms[idx] = transform;
                changes.transforms.push(slot);
            }
            if pins[idx] != pin {
                pins[idx] = pin;
                changes.pins.push(slot);
            }
            changes.sticky_elements += 1;
        };

        // Super-header heights at or before the current section.
        let mut stack = 0.0;
        for (section, metrics) in sections.iter().enumerate() {
            let above = stack;
            stack += metrics.super_height;

            if metrics.super_slot != INVALID {
                let top = frames[metrics.super_slot as usize].y0;
                let (dy, pin) = super_header_offset(section == 0, top, above, normalized_offset);
                apply(metrics.super_slot, dy, pin);
            }

            if metrics.header_slot != INVALID {
                let top = frames[metrics.header_slot as usize].y0;
                let (dy, pin) =
                    section_header_offset(top, stack, metrics.items_extent, normalized_offset);
                apply(metrics.header_slot, dy, pin);
            }
        }
    }
}

/// Translation and pin state of a section header.
///
/// `stack` is the height of the super-headers pinned above it and
/// `lower_limit` the extent of its section's cells.
fn section_header_offset(
    top: f64,
    stack: f64,
    lower_limit: f64,
    normalized_offset: f64,
) -> (f64, PinState) {
    let relative = top - normalized_offset - stack;
    if relative < -lower_limit {
        (lower_limit, PinState::HandedOff)
    } else if relative <= 0.0 {
        let above_section = top - stack;
        (normalized_offset - above_section, PinState::Pinned)
    } else {
        (0.0, PinState::Resting)
    }
}

/// Translation and pin state of a super-header.
///
/// `above` is the height of the super-headers of earlier sections.
fn super_header_offset(
    first: bool,
    top: f64,
    above: f64,
    normalized_offset: f64,
) -> (f64, PinState) {
    let upper_limit = top - above;
    if first {
        let dy = upper_limit.max(normalized_offset);
        let pin = if normalized_offset >= upper_limit {
            PinState::Pinned
        } else {
            PinState::Resting
        };
        return (dy, pin);
    }
    let relative = top - normalized_offset - above;
    if relative <= 0.0 {
        (normalized_offset - upper_limit, PinState::Pinned)
    } else if normalized_offset < upper_limit {
        (upper_limit - upper_limit.max(normalized_offset), PinState::Resting)
    } else {
        (0.0, PinState::Resting)
    }
}
