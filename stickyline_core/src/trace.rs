// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layout passes.
//!
//! This module provides a [`LayoutTraceSink`] trait with one method per
//! event the engine emits. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn LayoutTraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing. When **on**,
//! each method performs a single `Option` branch before dispatching.
//!
//! Engine operations that emit events come in pairs: `prepare` and
//! `prepare_traced`, `resolve` and `resolve_traced`, and so on. The plain
//! variant passes [`Tracer::none`].
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`TransformChange`] events and the
//!   corresponding `LayoutTraceSink` method.

use kurbo::Size;

#[cfg(feature = "trace-rich")]
use crate::element::ElementKey;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Engine operations that can be refused for lack of a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutOperation {
    /// Building the geometry cache.
    Prepare,
    /// Recomputing sticky transforms.
    Resolve,
    /// Answering a visible-rect query.
    AttributesInRect,
}

/// Why a built layout was discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvalidationReason {
    /// The viewport size differs from the size recorded at build time.
    SizeChanged,
    /// The host asked for it.
    Explicit {
        /// Whether the host attributed the request to a size change.
        size_changed: bool,
    },
    /// Spacing configuration changed.
    ConfigChanged,
    /// A provider was attached or detached.
    ProviderChanged,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a build pass populates the geometry cache.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildEvent {
    /// Sections reported by the provider.
    pub sections: usize,
    /// Cells placed (zero-size items excluded).
    pub cells: usize,
    /// Section headers placed.
    pub section_headers: usize,
    /// Super-headers placed.
    pub super_headers: usize,
    /// Total content height.
    pub content_height: f64,
    /// Viewport size the layout was built for.
    pub viewport_size: Size,
}

/// Emitted when a built geometry cache is discarded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidateEvent {
    /// Why the cache was discarded.
    pub reason: InvalidationReason,
    /// Viewport size the discarded layout was built for.
    pub previous_size: Size,
    /// Viewport size at the time of invalidation.
    pub new_size: Size,
}

/// Emitted when an operation runs before a provider is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissingProviderEvent {
    /// The operation that returned an empty result.
    pub operation: LayoutOperation,
}

/// Emitted after each resolve pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveEvent {
    /// Scroll offset plus top inset used for the pass.
    pub normalized_offset: f64,
    /// Headers and super-headers visited.
    pub sticky_elements: usize,
    /// Elements whose transform changed.
    pub changed: usize,
}

/// A sticky element whose transform changed during a resolve pass.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformChange {
    /// Element that moved.
    pub key: ElementKey,
    /// New vertical translation.
    pub translation: f64,
}

// ---------------------------------------------------------------------------
// LayoutTraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the layout engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait LayoutTraceSink {
    /// Called after a build pass.
    fn on_build(&mut self, e: &BuildEvent) {
        _ = e;
    }

    /// Called when a built layout is discarded.
    fn on_invalidate(&mut self, e: &InvalidateEvent) {
        _ = e;
    }

    /// Called when an operation finds no provider attached.
    fn on_missing_provider(&mut self, e: &MissingProviderEvent) {
        _ = e;
    }

    /// Called after each resolve pass.
    fn on_resolve(&mut self, e: &ResolveEvent) {
        _ = e;
    }

    /// Called with the transforms changed by a resolve pass (requires
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_transform_changes(&mut self, changes: &[TransformChange]) {
        _ = changes;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`LayoutTraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl LayoutTraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`LayoutTraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn LayoutTraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn LayoutTraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn LayoutTraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Returns whether events reach a sink. Always `false` without the `trace`
    /// feature.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits a [`BuildEvent`].
    #[inline]
    pub fn build(&mut self, e: &BuildEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_build(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`InvalidateEvent`].
    #[inline]
    pub fn invalidate(&mut self, e: &InvalidateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_invalidate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MissingProviderEvent`].
    #[inline]
    pub fn missing_provider(&mut self, e: &MissingProviderEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_missing_provider(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResolveEvent`].
    #[inline]
    pub fn resolve(&mut self, e: &ResolveEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resolve(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits transform changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn transform_changes(&mut self, changes: &[TransformChange]) {
        if let Some(s) = &mut self.sink {
            s.on_transform_changes(changes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
