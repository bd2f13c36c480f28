// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays attribute storage with key lookup and per-kind partitions.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Size};

use crate::attributes::{LayoutAttributes, PinState};
use crate::element::{ElementKey, ElementKind, INVALID};

/// Per-section values the resolver needs, recorded during the build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SectionMetrics {
    /// Slot of the super-header, or [`INVALID`].
    pub(crate) super_slot: u32,
    /// Slot of the section header, or [`INVALID`].
    pub(crate) header_slot: u32,
    /// Super-header height, 0 when absent.
    pub(crate) super_height: f64,
    /// Sum of height plus line spacing over the placed cells.
    pub(crate) items_extent: f64,
}

/// Cached layout attributes for every element of one build pass.
///
/// See the [module docs](super) for the lifecycle.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryCache {
    // -- Identity --
    pub(crate) keys: Vec<ElementKey>,

    // -- Static geometry (written by build) --
    pub(crate) frames: Vec<Rect>,
    pub(crate) origins: Vec<Point>,
    pub(crate) z_index: Vec<i32>,

    // -- Dynamic state (written by resolve) --
    pub(crate) transforms: Vec<Affine>,
    pub(crate) pins: Vec<PinState>,

    // -- Indexes --
    pub(crate) lookup: BTreeMap<ElementKey, u32>,
    pub(crate) by_kind: [Vec<u32>; ElementKind::COUNT],
    pub(crate) sections: Vec<SectionMetrics>,

    // -- Totals --
    pub(crate) content_height: f64,
    pub(crate) built_size: Size,
    pub(crate) built: bool,
}

impl Default for GeometryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            frames: Vec::new(),
            origins: Vec::new(),
            z_index: Vec::new(),
            transforms: Vec::new(),
            pins: Vec::new(),
            lookup: BTreeMap::new(),
            by_kind: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
            sections: Vec::new(),
            content_height: 0.0,
            built_size: Size::ZERO,
            built: false,
        }
    }

    /// Returns whether a build pass has populated this cache.
    ///
    /// A built cache may hold no elements when the provider had nothing to
    /// lay out.
    #[inline]
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Number of cached elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether no elements are cached.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of sections seen by the last build.
    #[inline]
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Bottom edge of the lowest element, or 0 for an empty cache.
    #[inline]
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Viewport size recorded when the cache was built.
    #[inline]
    #[must_use]
    pub fn built_size(&self) -> Size {
        self.built_size
    }

    /// Discards every slot, returning the cache to the empty state.
    ///
    /// Allocations are kept for the next build.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.frames.clear();
        self.origins.clear();
        self.z_index.clear();
        self.transforms.clear();
        self.pins.clear();
        self.lookup.clear();
        for partition in &mut self.by_kind {
            partition.clear();
        }
        self.sections.clear();
        self.content_height = 0.0;
        self.built_size = Size::ZERO;
        self.built = false;
    }

    // -- Lookup --

    /// Returns the slot holding `key`, if cached.
    #[inline]
    #[must_use]
    pub fn slot(&self, key: ElementKey) -> Option<u32> {
        self.lookup.get(&key).copied()
    }

    /// Returns a copy of the attributes for `key`, if cached.
    #[must_use]
    pub fn get(&self, key: ElementKey) -> Option<LayoutAttributes> {
        self.slot(key).map(|slot| self.attributes_at(slot))
    }

    /// Returns the pin state for `key`, if cached.
    #[must_use]
    pub fn pin_state(&self, key: ElementKey) -> Option<PinState> {
        self.slot(key).map(|slot| self.pin_state_at(slot))
    }

    /// Slots of every cached element of `kind`, in build order.
    #[inline]
    #[must_use]
    pub fn slots(&self, kind: ElementKind) -> &[u32] {
        &self.by_kind[kind.partition()]
    }

    /// Slot of the header of `section`, if it has one.
    #[must_use]
    pub fn section_header_slot(&self, section: usize) -> Option<u32> {
        self.sections
            .get(section)
            .map(|m| m.header_slot)
            .filter(|&slot| slot != INVALID)
    }

    /// Slot of the super-header of `section`, if it has one.
    #[must_use]
    pub fn super_header_slot(&self, section: usize) -> Option<u32> {
        self.sections
            .get(section)
            .map(|m| m.super_slot)
            .filter(|&slot| slot != INVALID)
    }

    /// Iterates over copies of every cached element's attributes in build
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = LayoutAttributes> + '_ {
        (0..self.keys.len()).map(|idx| self.attributes_at_index(idx))
    }

    // -- Slot accessors --

    /// Returns the attributes stored in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[must_use]
    pub fn attributes_at(&self, slot: u32) -> LayoutAttributes {
        self.attributes_at_index(slot as usize)
    }

    /// Returns the key stored in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    #[must_use]
    pub fn key_at(&self, slot: u32) -> ElementKey {
        self.keys[slot as usize]
    }

    /// Returns the static frame stored in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    #[must_use]
    pub fn frame_at(&self, slot: u32) -> Rect {
        self.frames[slot as usize]
    }

    /// Returns the frame in `slot` with its sticky transform applied.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    #[must_use]
    pub fn resolved_frame_at(&self, slot: u32) -> Rect {
        self.transforms[slot as usize].transform_rect_bbox(self.frames[slot as usize])
    }

    /// Returns the z-index stored in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    #[must_use]
    pub fn z_index_at(&self, slot: u32) -> i32 {
        self.z_index[slot as usize]
    }

    /// Returns the sticky transform stored in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    #[must_use]
    pub fn transform_at(&self, slot: u32) -> Affine {
        self.transforms[slot as usize]
    }

    /// Returns the pin state stored in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    #[must_use]
    pub fn pin_state_at(&self, slot: u32) -> PinState {
        self.pins[slot as usize]
    }

    fn attributes_at_index(&self, idx: usize) -> LayoutAttributes {
        LayoutAttributes {
            key: self.keys[idx],
            frame: self.frames[idx],
            origin: self.origins[idx],
            z_index: self.z_index[idx],
            transform: self.transforms[idx],
        }
    }

    // -- Mutation (builder only) --

    /// Appends a slot with an identity transform and returns its number.
    pub(crate) fn insert(
        &mut self,
        key: ElementKey,
        frame: Rect,
        origin: Point,
        z_index: i32,
    ) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a layout never holds u32::MAX elements"
        )]
        let slot = self.keys.len() as u32;
        debug_assert!(
            !self.lookup.contains_key(&key),
            "{key:?} placed twice in one build"
        );

        self.keys.push(key);
        self.frames.push(frame);
        self.origins.push(origin);
        self.z_index.push(z_index);
        self.transforms.push(Affine::IDENTITY);
        self.pins.push(PinState::Resting);
        self.lookup.insert(key, slot);
        self.by_kind[key.kind.partition()].push(slot);
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_frame(y: f64) -> Rect {
        Rect::from_origin_size((0.0, y), Size::new(100.0, 50.0))
    }

    #[test]
    fn new_cache_is_empty_and_unbuilt() {
        let cache = GeometryCache::new();
        assert!(cache.is_empty());
        assert!(!cache.is_built());
        assert_eq!(cache.content_height(), 0.0);
        assert!(cache.get(ElementKey::cell(0, 0)).is_none());
    }

    #[test]
    fn insert_assigns_sequential_slots_and_partitions() {
        let mut cache = GeometryCache::new();
        let a = cache.insert(ElementKey::section_header(0), cell_frame(0.0), Point::ZERO, 0);
        let b = cache.insert(ElementKey::cell(0, 0), cell_frame(50.0), Point::new(0.0, 50.0), 1);
        assert_eq!((a, b), (0, 1));
        assert_eq!(cache.slots(ElementKind::SectionHeader), &[0]);
        assert_eq!(cache.slots(ElementKind::Cell), &[1]);
        assert!(cache.slots(ElementKind::SuperHeader).is_empty());
        assert_eq!(cache.slot(ElementKey::cell(0, 0)), Some(1));
        assert_eq!(cache.transform_at(b), Affine::IDENTITY);
        assert_eq!(cache.pin_state_at(b), PinState::Resting);
    }

    #[test]
    fn get_returns_stored_attributes() {
        let mut cache = GeometryCache::new();
        let key = ElementKey::cell(2, 3);
        cache.insert(key, cell_frame(10.0), Point::new(0.0, 5.0), 7);
        let attrs = cache.get(key).unwrap();
        assert_eq!(attrs.key, key);
        assert_eq!(attrs.frame, cell_frame(10.0));
        assert_eq!(attrs.origin, Point::new(0.0, 5.0));
        assert_eq!(attrs.z_index, 7);
        assert_eq!(attrs.transform, Affine::IDENTITY);
    }

    #[test]
    fn clear_discards_everything() {
        let mut cache = GeometryCache::new();
        cache.insert(ElementKey::cell(0, 0), cell_frame(0.0), Point::ZERO, 0);
        cache.content_height = 50.0;
        cache.built = true;

        cache.clear();

        assert!(cache.is_empty());
        assert!(!cache.is_built());
        assert_eq!(cache.content_height(), 0.0);
        assert!(cache.slot(ElementKey::cell(0, 0)).is_none());
        assert!(cache.slots(ElementKind::Cell).is_empty());
        assert_eq!(cache, GeometryCache::new());
    }

    #[test]
    fn iter_follows_build_order() {
        let mut cache = GeometryCache::new();
        cache.insert(ElementKey::super_header(0), cell_frame(0.0), Point::ZERO, 0);
        cache.insert(ElementKey::section_header(0), cell_frame(50.0), Point::ZERO, 1);
        cache.insert(ElementKey::cell(0, 0), cell_frame(100.0), Point::ZERO, 2);
        let kinds: Vec<ElementKind> = cache.iter().map(|a| a.key.kind).collect();
        assert_eq!(
            kinds,
            [
                ElementKind::SuperHeader,
                ElementKind::SectionHeader,
                ElementKind::Cell
            ]
        );
    }
}
