// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout engine facade.
//!
//! [`StickyLayout`] owns the provider, the spacing configuration, the current
//! viewport and the [`GeometryCache`]. It is a two-state machine:
//!
//! ```text
//!            prepare()
//!   Empty ─────────────► Built ──┐
//!     ▲                    │     │ set_content_offset()
//!     │   size change,     │     │ resolve()
//!     │   invalidate(),    │     │ attributes_in_rect()
//!     └── config/provider ─┘ ◄───┘
//!         change
//! ```
//!
//! Scrolling never rebuilds; it only re-resolves the sticky transforms.
//!
//! Operations that need a provider return an empty result when none is
//! attached and report a [`MissingProviderEvent`] to the tracer.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::attributes::LayoutAttributes;
use crate::cache::{GeometryCache, ResolveChanges};
use crate::config::{LayoutConfig, Viewport};
use crate::element::{ElementKey, ElementKind};
use crate::provider::SizeProvider;
use crate::trace::{
    BuildEvent, InvalidateEvent, InvalidationReason, LayoutOperation, MissingProviderEvent,
    ResolveEvent, Tracer,
};

/// Sticky two-tier header layout for a sectioned list.
#[derive(Clone, Debug)]
pub struct StickyLayout<P> {
    provider: Option<P>,
    config: LayoutConfig,
    viewport: Viewport,
    cache: GeometryCache,
    /// Scratch buffer for rect queries.
    scratch: ResolveChanges,
}

impl<P: SizeProvider> StickyLayout<P> {
    /// Creates an empty layout with no provider attached.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            provider: None,
            config: LayoutConfig::DEFAULT,
            viewport,
            cache: GeometryCache::new(),
            scratch: ResolveChanges::default(),
        }
    }

    /// Creates an empty layout for `provider`.
    #[must_use]
    pub fn with_provider(provider: P, viewport: Viewport) -> Self {
        Self {
            provider: Some(provider),
            ..Self::new(viewport)
        }
    }

    /// Returns a copy with the given spacing configuration.
    #[must_use]
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.set_config(config);
        self
    }

    // -- Provider and configuration --

    /// The attached provider, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Attaches `provider`, discarding any cached layout, and returns the
    /// previous provider.
    pub fn set_provider(&mut self, provider: P) -> Option<P> {
        let previous = self.provider.replace(provider);
        self.discard(InvalidationReason::ProviderChanged, &mut Tracer::none());
        previous
    }

    /// Detaches the provider, discarding any cached layout.
    pub fn take_provider(&mut self) -> Option<P> {
        let previous = self.provider.take();
        self.discard(InvalidationReason::ProviderChanged, &mut Tracer::none());
        previous
    }

    /// Current spacing configuration.
    #[must_use]
    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    /// Replaces the spacing configuration. A different configuration
    /// discards the cached layout.
    pub fn set_config(&mut self, config: LayoutConfig) {
        if config != self.config {
            self.config = config;
            self.discard(InvalidationReason::ConfigChanged, &mut Tracer::none());
        }
    }

    // -- Viewport --

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Records a new viewport. Returns whether the cached layout was
    /// discarded because the size differs from the size it was built for.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        self.set_viewport_traced(viewport, &mut Tracer::none())
    }

    /// Like [`set_viewport`](Self::set_viewport), reporting the invalidation
    /// to `tracer`.
    pub fn set_viewport_traced(&mut self, viewport: Viewport, tracer: &mut Tracer<'_>) -> bool {
        self.viewport = viewport;
        let stale = self.cache.is_built() && self.cache.built_size() != viewport.size();
        if stale {
            self.discard(InvalidationReason::SizeChanged, tracer);
        }
        stale
    }

    /// Scrolls to `offset`. Never discards the cached layout.
    pub fn set_content_offset(&mut self, offset: Point) {
        self.viewport = self.viewport.with_content_offset(offset);
    }

    // -- Build and invalidation --

    /// Returns whether a layout is cached.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.cache.is_built()
    }

    /// The geometry cache, for hosts that apply [`ResolveChanges`] by slot.
    #[must_use]
    pub fn cache(&self) -> &GeometryCache {
        &self.cache
    }

    /// Builds the layout if none is cached. Returns whether a layout is
    /// cached afterward, which is `false` only without a provider.
    ///
    /// # Panics
    ///
    /// Panics if the provider reports a non-zero footer size.
    pub fn prepare(&mut self) -> bool {
        self.prepare_traced(&mut Tracer::none())
    }

    /// Like [`prepare`](Self::prepare), reporting the build to `tracer`.
    ///
    /// # Panics
    ///
    /// Panics if the provider reports a non-zero footer size.
    pub fn prepare_traced(&mut self, tracer: &mut Tracer<'_>) -> bool {
        if self.cache.is_built() {
            return true;
        }
        let Some(provider) = &self.provider else {
            tracer.missing_provider(&MissingProviderEvent {
                operation: LayoutOperation::Prepare,
            });
            return false;
        };
        let size = self.viewport.size();
        self.cache.rebuild(provider, &self.config, size);

        if tracer.is_active() {
            tracer.build(&BuildEvent {
                sections: self.cache.section_count(),
                cells: self.cache.slots(ElementKind::Cell).len(),
                section_headers: self.cache.slots(ElementKind::SectionHeader).len(),
                super_headers: self.cache.slots(ElementKind::SuperHeader).len(),
                content_height: self.cache.content_height(),
                viewport_size: size,
            });
        }
        true
    }

    /// Discards the cached layout.
    ///
    /// `on_size_change` records whether the host attributes the request to a
    /// size change; it is reported in the trace event.
    pub fn invalidate(&mut self, on_size_change: bool) {
        self.invalidate_traced(on_size_change, &mut Tracer::none());
    }

    /// Like [`invalidate`](Self::invalidate), reporting to `tracer`.
    pub fn invalidate_traced(&mut self, on_size_change: bool, tracer: &mut Tracer<'_>) {
        self.discard(
            InvalidationReason::Explicit {
                size_changed: on_size_change,
            },
            tracer,
        );
    }

    fn discard(&mut self, reason: InvalidationReason, tracer: &mut Tracer<'_>) {
        if !self.cache.is_built() {
            return;
        }
        tracer.invalidate(&InvalidateEvent {
            reason,
            previous_size: self.cache.built_size(),
            new_size: self.viewport.size(),
        });
        self.cache.clear();
    }

    // -- Queries --

    /// Total scrollable size: the viewport width by the content height.
    ///
    /// The height is 0 until the layout is built.
    #[must_use]
    pub fn content_extent(&self) -> Size {
        Size::new(self.viewport.size().width, self.cache.content_height())
    }

    /// Attributes of the element identified by `kind`, `section` and `item`.
    ///
    /// Headers and super-headers live at item 0. Returns `None` for anything
    /// not cached, including every element of an unbuilt layout.
    #[must_use]
    pub fn attributes_for_element(
        &self,
        kind: ElementKind,
        section: usize,
        item: usize,
    ) -> Option<LayoutAttributes> {
        self.cache.get(ElementKey {
            kind,
            section,
            item,
        })
    }

    /// Attributes of the cell at `item` in `section`.
    #[must_use]
    pub fn attributes_for_item(&self, section: usize, item: usize) -> Option<LayoutAttributes> {
        self.cache.get(ElementKey::cell(section, item))
    }

    /// Attributes of the supplementary element of `kind` in `section`.
    ///
    /// Returns `None` for [`ElementKind::Cell`].
    #[must_use]
    pub fn attributes_for_supplementary(
        &self,
        kind: ElementKind,
        section: usize,
    ) -> Option<LayoutAttributes> {
        if !kind.is_supplementary() {
            return None;
        }
        self.cache.get(ElementKey::supplementary(kind, section))
    }

    /// Resolves sticky transforms for the current offset and returns the
    /// changes.
    ///
    /// Returns an empty set when the layout is not built.
    pub fn resolve(&mut self) -> ResolveChanges {
        self.resolve_traced(&mut Tracer::none())
    }

    /// Like [`resolve`](Self::resolve), reporting to `tracer`.
    pub fn resolve_traced(&mut self, tracer: &mut Tracer<'_>) -> ResolveChanges {
        let mut changes = ResolveChanges::default();
        self.resolve_into(&mut changes, tracer);
        changes
    }

    /// Like [`resolve_traced`](Self::resolve_traced), but reuses a
    /// caller-provided buffer. Returns whether a resolve pass ran.
    pub fn resolve_into(&mut self, changes: &mut ResolveChanges, tracer: &mut Tracer<'_>) -> bool {
        self.resolve_for(LayoutOperation::Resolve, changes, tracer)
    }

    fn resolve_for(
        &mut self,
        operation: LayoutOperation,
        changes: &mut ResolveChanges,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if self.provider.is_none() {
            changes.clear();
            tracer.missing_provider(&MissingProviderEvent { operation });
            return false;
        }
        if !self.cache.is_built() {
            changes.clear();
            return false;
        }

        let offset = self.viewport.normalized_offset();
        self.cache.resolve_into(offset, changes);
        tracer.resolve(&ResolveEvent {
            normalized_offset: offset,
            sticky_elements: changes.sticky_elements,
            changed: changes.transforms.len(),
        });

        #[cfg(feature = "trace-rich")]
        if tracer.is_active() && !changes.transforms.is_empty() {
            let moved: Vec<crate::trace::TransformChange> = changes
                .transforms
                .iter()
                .map(|&slot| crate::trace::TransformChange {
                    key: self.cache.key_at(slot),
                    translation: self.cache.transform_at(slot).translation().y,
                })
                .collect();
            tracer.transform_changes(&moved);
        }
        true
    }

    /// Resolves, then returns the attributes whose resolved frame intersects
    /// `rect`, in build order.
    pub fn attributes_in_rect(&mut self, rect: Rect) -> Vec<LayoutAttributes> {
        self.attributes_in_rect_traced(rect, &mut Tracer::none())
    }

    /// Like [`attributes_in_rect`](Self::attributes_in_rect), reporting to
    /// `tracer`.
    pub fn attributes_in_rect_traced(
        &mut self,
        rect: Rect,
        tracer: &mut Tracer<'_>,
    ) -> Vec<LayoutAttributes> {
        let mut out = Vec::new();
        self.attributes_in_rect_into(rect, &mut out, tracer);
        out
    }

    /// Like [`attributes_in_rect_traced`](Self::attributes_in_rect_traced),
    /// but reuses a caller-provided buffer.
    pub fn attributes_in_rect_into(
        &mut self,
        rect: Rect,
        out: &mut Vec<LayoutAttributes>,
        tracer: &mut Tracer<'_>,
    ) {
        out.clear();
        let mut changes = core::mem::take(&mut self.scratch);
        let resolved = self.resolve_for(LayoutOperation::AttributesInRect, &mut changes, tracer);
        self.scratch = changes;
        if resolved {
            out.extend(self.cache.iter().filter(|attrs| attrs.intersects(rect)));
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::attributes::PinState;
    use crate::provider::{SectionSizes, StaticSections};

    fn h(height: f64) -> Size {
        Size::new(320.0, height)
    }

    fn viewport() -> Viewport {
        Viewport::new(Size::new(375.0, 667.0))
    }

    fn three_sections() -> StaticSections {
        StaticSections::new(vec![
            SectionSizes::uniform(h(40.0), h(50.0), 5),
            SectionSizes::uniform(h(40.0), h(50.0), 5),
            SectionSizes::uniform(h(40.0), h(50.0), 5),
        ])
    }

    fn layout() -> StickyLayout<StaticSections> {
        let mut layout = StickyLayout::with_provider(three_sections(), viewport());
        assert!(layout.prepare());
        layout
    }

    #[test]
    fn prepare_is_idempotent() {
        let mut layout = layout();
        let first = layout.cache().clone();
        assert!(layout.prepare());
        assert_eq!(layout.cache(), &first);
    }

    #[test]
    fn content_extent_spans_viewport_width() {
        let layout = layout();
        assert_eq!(layout.content_extent(), Size::new(375.0, 955.0));
    }

    #[test]
    fn scrolling_keeps_the_cache() {
        let mut layout = layout();
        layout.set_content_offset(Point::new(0.0, 300.0));
        assert!(layout.is_built());
        let scrolled = layout
            .viewport()
            .with_content_offset(Point::new(0.0, 600.0));
        let stale = layout.set_viewport(scrolled);
        assert!(!stale);
        assert!(layout.is_built());
    }

    #[test]
    fn resizing_discards_the_cache() {
        let mut layout = layout();
        assert!(layout.set_viewport(Viewport::new(Size::new(375.0, 600.0))));
        assert!(!layout.is_built());
        assert_eq!(layout.content_extent().height, 0.0);

        assert!(layout.prepare());
        assert!(layout.set_viewport(Viewport::new(Size::new(400.0, 600.0))));
        assert!(!layout.is_built());
    }

    #[test]
    fn config_and_provider_changes_discard_the_cache() {
        let mut layout = layout();
        layout.set_config(LayoutConfig::DEFAULT);
        assert!(layout.is_built());
        layout.set_config(LayoutConfig::DEFAULT.with_interline_spacing(0.0));
        assert!(!layout.is_built());

        assert!(layout.prepare());
        assert_eq!(layout.content_extent().height, 3.0 * (40.0 + 250.0));
        let previous = layout.set_provider(StaticSections::default());
        assert!(previous.is_some());
        assert!(!layout.is_built());
    }

    #[test]
    fn explicit_invalidate_empties_and_prepare_rebuilds() {
        let mut layout = layout();
        layout.invalidate(false);
        assert!(!layout.is_built());
        assert!(layout.attributes_for_item(0, 0).is_none());
        assert!(layout.prepare());
        assert!(layout.attributes_for_item(0, 0).is_some());
    }

    #[test]
    fn zero_size_elements_are_absent() {
        let provider = StaticSections::new(vec![
            SectionSizes {
                super_header: Size::ZERO,
                header: Size::ZERO,
                items: vec![h(50.0), Size::ZERO],
            },
            SectionSizes::uniform(h(40.0), h(50.0), 1),
        ]);
        let mut layout = StickyLayout::with_provider(provider, viewport());
        layout.prepare();
        assert!(layout.attributes_for_item(0, 1).is_none());
        assert!(
            layout
                .attributes_for_supplementary(ElementKind::SectionHeader, 0)
                .is_none()
        );
        assert!(
            layout
                .attributes_for_supplementary(ElementKind::SuperHeader, 1)
                .is_none()
        );
        // 5 + 50, then 5 + 40, then 5 + 50.
        assert_eq!(layout.content_extent().height, 155.0);
    }

    #[test]
    fn element_lookups() {
        let layout = layout();
        let header = layout
            .attributes_for_element(ElementKind::SectionHeader, 1, 0)
            .unwrap();
        assert_eq!(header.frame.y0, 320.0);
        assert!(
            layout
                .attributes_for_element(ElementKind::SectionHeader, 1, 2)
                .is_none()
        );
        assert!(layout.attributes_for_supplementary(ElementKind::Cell, 0).is_none());
        assert!(layout.attributes_for_item(7, 0).is_none());
    }

    #[test]
    fn rect_query_resolves_first() {
        let mut layout = layout();
        layout.set_content_offset(Point::new(0.0, 100.0));
        let visible = Rect::from_origin_size((0.0, 100.0), Size::new(375.0, 667.0));
        let found = layout.attributes_in_rect(visible);

        let header = found
            .iter()
            .find(|a| a.key == ElementKey::section_header(0))
            .expect("pinned header is visible");
        assert_eq!(header.resolved_frame().y0, 100.0);
        assert_eq!(
            layout.cache().pin_state(ElementKey::section_header(0)),
            Some(PinState::Pinned)
        );
        // The first cell is fully scrolled out.
        assert!(found.iter().all(|a| a.key != ElementKey::cell(0, 0)));
        // Results keep build order.
        let slots: Vec<u32> = found
            .iter()
            .map(|a| layout.cache().slot(a.key).unwrap())
            .collect();
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn top_inset_shifts_the_pin_line() {
        let mut layout = layout();
        layout.set_viewport(layout.viewport().with_top_inset(64.0));
        let changes = layout.resolve();
        assert!(!changes.transforms.is_empty());
        let header = layout
            .attributes_for_supplementary(ElementKind::SectionHeader, 0)
            .unwrap();
        assert_eq!(header.translation().y, 64.0);
    }

    #[test]
    fn missing_provider_yields_empty_results() {
        let mut layout: StickyLayout<StaticSections> = StickyLayout::new(viewport());
        assert!(!layout.prepare());
        assert!(!layout.is_built());
        assert!(layout.attributes_in_rect(Rect::new(0.0, 0.0, 375.0, 667.0)).is_empty());
        assert!(layout.resolve().is_empty());
        assert_eq!(layout.content_extent(), Size::new(375.0, 0.0));
    }

    #[test]
    fn unbuilt_layout_answers_nothing() {
        let mut layout = StickyLayout::with_provider(three_sections(), viewport());
        assert!(layout.attributes_in_rect(Rect::new(0.0, 0.0, 375.0, 667.0)).is_empty());
        assert!(layout.attributes_for_item(0, 0).is_none());
    }

    struct WithFooter;

    impl SizeProvider for WithFooter {
        fn section_count(&self) -> usize {
            1
        }

        fn item_count(&self, _section: usize) -> usize {
            0
        }

        fn item_size(&self, _section: usize, _item: usize) -> Size {
            Size::ZERO
        }

        fn footer_size(&self, _section: usize) -> Size {
            Size::new(320.0, 30.0)
        }
    }

    #[test]
    #[should_panic(expected = "section footers are not supported")]
    fn footers_panic_on_prepare() {
        let mut layout = StickyLayout::with_provider(WithFooter, viewport());
        layout.prepare();
    }

    #[cfg(feature = "trace")]
    mod traced {
        use alloc::vec::Vec;

        use super::*;
        use crate::trace::LayoutTraceSink;

        #[derive(Default)]
        struct Recorder {
            builds: Vec<BuildEvent>,
            invalidations: Vec<InvalidationReason>,
            missing: Vec<LayoutOperation>,
            resolves: Vec<ResolveEvent>,
        }

        impl LayoutTraceSink for Recorder {
            fn on_build(&mut self, e: &BuildEvent) {
                self.builds.push(*e);
            }

            fn on_invalidate(&mut self, e: &InvalidateEvent) {
                self.invalidations.push(e.reason);
            }

            fn on_missing_provider(&mut self, e: &MissingProviderEvent) {
                self.missing.push(e.operation);
            }

            fn on_resolve(&mut self, e: &ResolveEvent) {
                self.resolves.push(*e);
            }
        }

        #[test]
        fn lifecycle_events() {
            let mut sink = Recorder::default();
            let mut layout = StickyLayout::with_provider(three_sections(), viewport());
            {
                let mut tracer = Tracer::new(&mut sink);
                layout.prepare_traced(&mut tracer);
                layout.prepare_traced(&mut tracer);
                layout.attributes_in_rect_traced(Rect::new(0.0, 0.0, 375.0, 667.0), &mut tracer);
                layout.set_viewport_traced(Viewport::new(Size::new(667.0, 375.0)), &mut tracer);
                layout.invalidate_traced(true, &mut tracer);
            }
            assert_eq!(sink.builds.len(), 1);
            assert_eq!(sink.builds[0].cells, 15);
            assert_eq!(sink.builds[0].section_headers, 3);
            assert_eq!(sink.builds[0].content_height, 955.0);
            assert_eq!(sink.resolves.len(), 1);
            assert_eq!(sink.resolves[0].sticky_elements, 3);
            // The explicit invalidate finds nothing left to discard.
            assert_eq!(sink.invalidations, [InvalidationReason::SizeChanged]);
        }

        #[test]
        fn missing_provider_is_reported_per_operation() {
            let mut sink = Recorder::default();
            let mut layout: StickyLayout<StaticSections> = StickyLayout::new(viewport());
            {
                let mut tracer = Tracer::new(&mut sink);
                layout.prepare_traced(&mut tracer);
                layout.resolve_traced(&mut tracer);
                layout.attributes_in_rect_traced(Rect::new(0.0, 0.0, 1.0, 1.0), &mut tracer);
            }
            assert_eq!(
                sink.missing,
                [
                    LayoutOperation::Prepare,
                    LayoutOperation::Resolve,
                    LayoutOperation::AttributesInRect
                ]
            );
        }
    }
}
