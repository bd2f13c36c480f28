// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the sticky layout.
//!
//! For any list of sections and any spacing:
//!
//! 1. Content height equals the lowest bottom edge.
//! 2. Zero-size elements are never cached.
//! 3. Section headers stack above cells and super-headers above headers.
//! 4. Preparing twice leaves the cache unchanged.
//! 5. While scrolling, no sticky element moves further than the scroll step.
//! 6. A pinned section header sits below every super-header at or before its
//!    section, and never overlaps another section header.

use kurbo::{Point, Size};
use proptest::prelude::*;
use stickyline_core::attributes::PinState;
use stickyline_core::cache::GeometryCache;
use stickyline_core::config::{LayoutConfig, Viewport};
use stickyline_core::element::ElementKind;
use stickyline_core::engine::StickyLayout;
use stickyline_core::provider::{SectionSizes, SizeProvider, StaticSections};

const EPSILON: f64 = 1e-6;
const STEP: f64 = 4.0;

// ── Helpers ─────────────────────────────────────────────────────────────

fn size(height: u16) -> Size {
    if height == 0 {
        Size::ZERO
    } else {
        Size::new(320.0, f64::from(height))
    }
}

fn section_strategy() -> impl Strategy<Value = SectionSizes> {
    (
        prop_oneof![3 => Just(0u16), 1 => 20u16..=100],
        prop_oneof![1 => Just(0u16), 3 => 20u16..=160],
        proptest::collection::vec(prop_oneof![1 => Just(0u16), 6 => 10u16..=120], 0..=6),
    )
        .prop_map(|(super_header, header, items)| SectionSizes {
            super_header: size(super_header),
            header: size(header),
            items: items.into_iter().map(size).collect(),
        })
}

fn provider_strategy() -> impl Strategy<Value = StaticSections> {
    proptest::collection::vec(section_strategy(), 0..=8).prop_map(StaticSections::new)
}

fn config_strategy() -> impl Strategy<Value = LayoutConfig> {
    (0u8..=16, 0u8..=12).prop_map(|(interitem, interline)| {
        LayoutConfig::DEFAULT
            .with_interitem_spacing(f64::from(interitem))
            .with_interline_spacing(f64::from(interline))
    })
}

fn prepared(
    provider: StaticSections,
    config: LayoutConfig,
    top_inset: f64,
) -> StickyLayout<StaticSections> {
    let viewport = Viewport::new(Size::new(375.0, 667.0)).with_top_inset(top_inset);
    let mut layout = StickyLayout::with_provider(provider, viewport).with_config(config);
    assert!(layout.prepare());
    layout
}

fn z_range(cache: &GeometryCache, kind: ElementKind) -> Option<(i32, i32)> {
    let z = cache.slots(kind).iter().map(|&slot| cache.z_index_at(slot));
    let min = z.clone().min()?;
    let max = z.max()?;
    Some((min, max))
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Build invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn content_height_is_lowest_bottom_edge(
        provider in provider_strategy(),
        config in config_strategy(),
    ) {
        let layout = prepared(provider, config, 0.0);
        let cache = layout.cache();
        let lowest = cache.iter().map(|a| a.frame.y1).fold(0.0, f64::max);
        prop_assert_eq!(layout.content_extent().height, lowest);
    }

    #[test]
    fn zero_sizes_are_never_cached(
        provider in provider_strategy(),
        config in config_strategy(),
    ) {
        let layout = prepared(provider.clone(), config, 0.0);
        for section in 0..provider.section_count() {
            for item in 0..provider.item_count(section) {
                let cached = layout.attributes_for_item(section, item).is_some();
                prop_assert_eq!(cached, provider.item_size(section, item) != Size::ZERO);
            }
            let header = layout
                .attributes_for_supplementary(ElementKind::SectionHeader, section)
                .is_some();
            prop_assert_eq!(header, provider.header_size(section) != Size::ZERO);
            let super_header = layout
                .attributes_for_supplementary(ElementKind::SuperHeader, section)
                .is_some();
            prop_assert_eq!(super_header, provider.super_header_size(section) != Size::ZERO);
        }
    }

    #[test]
    fn stacking_order(
        provider in provider_strategy(),
        config in config_strategy(),
    ) {
        let layout = prepared(provider, config, 0.0);
        let cache = layout.cache();
        let cells = z_range(cache, ElementKind::Cell);
        let headers = z_range(cache, ElementKind::SectionHeader);
        let supers = z_range(cache, ElementKind::SuperHeader);

        if let (Some((_, cell_max)), Some((header_min, _))) = (cells, headers) {
            prop_assert!(cell_max < header_min);
        }
        if let (Some((_, cell_max)), Some((super_min, _))) = (cells, supers) {
            prop_assert!(cell_max < super_min);
        }
        if let (Some((_, header_max)), Some((super_min, _))) = (headers, supers) {
            prop_assert!(header_max < super_min);
        }
    }

    #[test]
    fn prepare_is_idempotent(
        provider in provider_strategy(),
        config in config_strategy(),
    ) {
        let mut layout = prepared(provider, config, 0.0);
        let first = layout.cache().clone();
        prop_assert!(layout.prepare());
        prop_assert_eq!(layout.cache(), &first);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-6. Scroll invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sweep_is_continuous_and_contained(
        provider in provider_strategy(),
        config in config_strategy(),
        top_inset in prop_oneof![Just(0u8), Just(64u8), 0u8..=100],
    ) {
        let mut layout = prepared(provider, config, f64::from(top_inset));
        let end = layout.content_extent().height + STEP;
        let sticky: Vec<u32> = [ElementKind::SectionHeader, ElementKind::SuperHeader]
            .into_iter()
            .flat_map(|kind| layout.cache().slots(kind).to_vec())
            .collect();

        let mut previous: Option<Vec<f64>> = None;
        let mut offset = 0.0;
        while offset <= end {
            layout.set_content_offset(Point::new(0.0, offset));
            layout.resolve();
            let cache = layout.cache();

            let tops: Vec<f64> = sticky
                .iter()
                .map(|&slot| cache.resolved_frame_at(slot).y0)
                .collect();
            if let Some(previous) = &previous {
                for (i, (&now, &before)) in tops.iter().zip(previous).enumerate() {
                    prop_assert!(
                        (now - before).abs() <= STEP + EPSILON,
                        "{:?} jumped {} at offset {}",
                        cache.key_at(sticky[i]),
                        now - before,
                        offset
                    );
                }
            }
            previous = Some(tops);

            for section in 0..cache.section_count() {
                let Some(header) = cache.section_header_slot(section) else {
                    continue;
                };
                if cache.pin_state_at(header) != PinState::Pinned {
                    continue;
                }
                let frame = cache.resolved_frame_at(header);
                for k in 0..=section {
                    if let Some(sup) = cache.super_header_slot(k) {
                        let bottom = cache.resolved_frame_at(sup).y1;
                        prop_assert!(
                            bottom <= frame.y0 + EPSILON,
                            "super-header {} covers header {} at offset {}",
                            k,
                            section,
                            offset
                        );
                    }
                }
                for other in (0..cache.section_count()).filter(|&s| s != section) {
                    if let Some(slot) = cache.section_header_slot(other) {
                        if cache.pin_state_at(slot) == PinState::Pinned {
                            let other_frame = cache.resolved_frame_at(slot);
                            prop_assert!(
                                other_frame.y1 <= frame.y0 + EPSILON
                                    || frame.y1 <= other_frame.y0 + EPSILON,
                                "pinned headers {} and {} overlap at offset {}",
                                section,
                                other,
                                offset
                            );
                        }
                    }
                }
            }

            offset += STEP;
        }
    }
}
