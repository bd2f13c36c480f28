// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`LayoutTraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use kurbo::Size;
use stickyline_core::trace::{
    BuildEvent, InvalidateEvent, InvalidationReason, LayoutOperation, LayoutTraceSink,
    MissingProviderEvent, ResolveEvent, TransformChange,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn operation_name(operation: LayoutOperation) -> &'static str {
    match operation {
        LayoutOperation::Prepare => "prepare",
        LayoutOperation::Resolve => "resolve",
        LayoutOperation::AttributesInRect => "attributes_in_rect",
    }
}

fn reason_name(reason: InvalidationReason) -> &'static str {
    match reason {
        InvalidationReason::SizeChanged => "size",
        InvalidationReason::Explicit { size_changed: true } => "explicit(size)",
        InvalidationReason::Explicit {
            size_changed: false,
        } => "explicit",
        InvalidationReason::ConfigChanged => "config",
        InvalidationReason::ProviderChanged => "provider",
    }
}

fn size(s: Size) -> String {
    format!("{}x{}", s.width, s.height)
}

impl<W: Write> LayoutTraceSink for PrettyPrintSink<W> {
    fn on_build(&mut self, e: &BuildEvent) {
        let _ = writeln!(
            self.writer,
            "[build] sections={} cells={} headers={} supers={} height={:.1} viewport={}",
            e.sections,
            e.cells,
            e.section_headers,
            e.super_headers,
            e.content_height,
            size(e.viewport_size),
        );
    }

    fn on_invalidate(&mut self, e: &InvalidateEvent) {
        let _ = writeln!(
            self.writer,
            "[invalidate] reason={} {} -> {}",
            reason_name(e.reason),
            size(e.previous_size),
            size(e.new_size),
        );
    }

    fn on_missing_provider(&mut self, e: &MissingProviderEvent) {
        let _ = writeln!(
            self.writer,
            "[missing-provider] op={}",
            operation_name(e.operation),
        );
    }

    fn on_resolve(&mut self, e: &ResolveEvent) {
        let _ = writeln!(
            self.writer,
            "[resolve] offset={:.1} sticky={} changed={}",
            e.normalized_offset, e.sticky_elements, e.changed,
        );
    }

    fn on_transform_changes(&mut self, changes: &[TransformChange]) {
        for change in changes {
            let _ = writeln!(
                self.writer,
                "[transform] {:?} dy={:.1}",
                change.key, change.translation,
            );
        }
    }
}
