// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single forward build pass over the provider's sections.

use kurbo::{Point, Rect, Size};

use super::store::{GeometryCache, SectionMetrics};
use crate::config::LayoutConfig;
use crate::element::{ElementKey, ElementKind, INVALID};
use crate::provider::SizeProvider;

/// Gap between consecutive z-indices handed out by the restacking pass.
const RESTACK_STRIDE: i32 = 5;

impl GeometryCache {
    /// Builds a complete cache for `provider`.
    ///
    /// `viewport_size` is recorded so the engine can tell later whether a
    /// viewport change invalidates the result.
    ///
    /// # Panics
    ///
    /// Panics if the provider reports a non-zero footer size for any section.
    #[must_use]
    pub fn build<P: SizeProvider + ?Sized>(
        provider: &P,
        config: &LayoutConfig,
        viewport_size: Size,
    ) -> Self {
        let mut cache = Self::new();
        cache.rebuild(provider, config, viewport_size);
        cache
    }

    /// Clears the cache and builds it again in place, reusing allocations.
    ///
    /// # Panics
    ///
    /// Panics if the provider reports a non-zero footer size for any section.
    pub fn rebuild<P: SizeProvider + ?Sized>(
        &mut self,
        provider: &P,
        config: &LayoutConfig,
        viewport_size: Size,
    ) {
        self.clear();
        let mut builder = Builder {
            provider,
            config,
            cache: self,
            cursor: 0.0,
            z_index: 0,
        };
        for section in 0..provider.section_count() {
            builder.place_section(section);
        }
        builder.restack();

        let cursor = builder.cursor;
        self.content_height = cursor;
        self.built_size = viewport_size;
        self.built = true;
    }
}

struct Builder<'a, P: ?Sized> {
    provider: &'a P,
    config: &'a LayoutConfig,
    cache: &'a mut GeometryCache,
    /// Bottom edge of the last placed element.
    cursor: f64,
    /// Next z-index to hand out.
    z_index: i32,
}

impl<P: SizeProvider + ?Sized> Builder<'_, P> {
    fn place_section(&mut self, section: usize) {
        let super_size = self.provider.super_header_size(section);
        let (super_slot, super_height) =
            self.place_supplementary(ElementKey::super_header(section), super_size);
        let header_size = self.provider.header_size(section);
        let (header_slot, _) =
            self.place_supplementary(ElementKey::section_header(section), header_size);
        let items_extent = self.place_cells(section);
        self.place_section_footer(section);

        self.cache.sections.push(SectionMetrics {
            super_slot,
            header_slot,
            super_height,
            items_extent,
        });
    }

    /// Places a header or super-header, returning its slot and height.
    ///
    /// Returns `(INVALID, 0.0)` when the provider reports a zero size.
    fn place_supplementary(&mut self, key: ElementKey, size: Size) -> (u32, f64) {
        if size == Size::ZERO {
            return (INVALID, 0.0);
        }
        let (dx, dy) = self.config.supplementary_spacing(key.section);
        let slot = self.place(key, size, dx, dy);
        (slot, size.height)
    }

    /// Places every non-empty item of `section` and returns the vertical
    /// extent they occupy, spacing included.
    fn place_cells(&mut self, section: usize) -> f64 {
        let LayoutConfig {
            interitem_spacing,
            interline_spacing,
        } = *self.config;
        let mut extent = 0.0;
        for item in 0..self.provider.item_count(section) {
            let size = self.provider.item_size(section, item);
            if size == Size::ZERO {
                continue;
            }
            self.place(
                ElementKey::cell(section, item),
                size,
                interitem_spacing,
                interline_spacing,
            );
            extent += size.height + interline_spacing;
        }
        extent
    }

    fn place_section_footer(&mut self, section: usize) {
        if self.provider.footer_size(section) != Size::ZERO {
            panic!("section footers are not supported (section {section})");
        }
    }

    fn place(&mut self, key: ElementKey, size: Size, dx: f64, dy: f64) -> u32 {
        let origin = Point::new(0.0, self.cursor);
        let frame = Rect::from_origin_size((origin.x + dx, origin.y + dy), size);
        self.cursor = frame.y1;
        let slot = self.cache.insert(key, frame, origin, self.z_index);
        self.z_index += 1;
        slot
    }

    /// Moves every header above the cells, then every super-header above the
    /// headers, in insertion order.
    fn restack(&mut self) {
        let cache = &mut *self.cache;
        let mut z = self.z_index;
        for kind in [ElementKind::SectionHeader, ElementKind::SuperHeader] {
            for &slot in &cache.by_kind[kind.partition()] {
                cache.z_index[slot as usize] = z;
                z += RESTACK_STRIDE;
            }
        }
        self.z_index = z;
    }
}
