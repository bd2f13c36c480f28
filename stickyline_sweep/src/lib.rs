// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-sweep continuity and overlap checks for sticky layouts.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use stickyline_core::attributes::PinState;
use stickyline_core::cache::{GeometryCache, ResolveChanges};
use stickyline_core::element::ElementKind;
use stickyline_core::engine::StickyLayout;
use stickyline_core::provider::SizeProvider;
use stickyline_core::trace::Tracer;

/// Tolerance for floating-point comparisons.
const EPSILON: f64 = 1e-6;

/// Range of vertical scroll offsets visited by [`run`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepConfig {
    /// First offset.
    pub start: f64,
    /// Last offset (inclusive).
    pub end: f64,
    /// Distance between consecutive offsets. A non-positive step visits
    /// `start` only.
    pub step: f64,
}

impl SweepConfig {
    /// Creates a sweep from `start` to `end` in increments of `step`.
    #[must_use]
    pub const fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Returns the offset of frame `index`, or `None` past the end.
    #[must_use]
    pub fn offset_at(&self, index: u32) -> Option<f64> {
        if index == 0 {
            return Some(self.start);
        }
        if self.step <= 0.0 {
            return None;
        }
        let offset = self.start + f64::from(index) * self.step;
        (offset <= self.end + EPSILON).then_some(offset)
    }
}

/// Overall verdict of a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepGrade {
    /// Continuous motion and no overlaps.
    Clean,
    /// Some sticky element jumped by more than one step.
    Jumpy,
    /// A pinned section header was covered.
    Overlapping,
}

impl SweepGrade {
    /// Returns a short label for reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Jumpy => "jumpy",
            Self::Overlapping => "overlapping",
        }
    }
}

/// Aggregated report returned by [`SweepTracker::observe`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepReport {
    /// Frames observed.
    pub frames: u64,
    /// Largest per-frame movement of any sticky element's top edge.
    pub max_jump: f64,
    /// Movements larger than one step.
    pub jump_violations: u64,
    /// Pinned section headers found overlapping another sticky element.
    pub overlap_violations: u64,
    /// Current grade.
    pub grade: SweepGrade,
}

/// Observes resolved caches frame by frame.
#[derive(Clone, Debug)]
pub struct SweepTracker {
    step: f64,
    /// Resolved top edge per slot at the previous frame. NaN for cells and
    /// before the first frame.
    previous_tops: Vec<f64>,
    frames: u64,
    max_jump: f64,
    jump_violations: u64,
    overlap_violations: u64,
}

impl SweepTracker {
    /// Creates a tracker for offsets `step` apart.
    #[must_use]
    pub fn new(step: f64) -> Self {
        Self {
            step: step.abs(),
            previous_tops: Vec::new(),
            frames: 0,
            max_jump: 0.0,
            jump_violations: 0,
            overlap_violations: 0,
        }
    }

    /// Observes one resolved frame and returns an updated report.
    ///
    /// A cache with a different element count than the previous frame is
    /// treated as a rebuild: movement is not compared across it.
    pub fn observe(&mut self, cache: &GeometryCache) -> SweepReport {
        self.frames = self.frames.saturating_add(1);
        if self.previous_tops.len() != cache.len() {
            self.previous_tops.clear();
            self.previous_tops.resize(cache.len(), f64::NAN);
        }

        for kind in [ElementKind::SectionHeader, ElementKind::SuperHeader] {
            for &slot in cache.slots(kind) {
                let top = cache.resolved_frame_at(slot).y0;
                let previous = &mut self.previous_tops[slot as usize];
                if !previous.is_nan() {
                    let jump = (top - *previous).abs();
                    self.max_jump = self.max_jump.max(jump);
                    if jump > self.step + EPSILON {
                        self.jump_violations = self.jump_violations.saturating_add(1);
                    }
                }
                *previous = top;
            }
        }

        let overlaps = count_overlaps(cache);
        self.overlap_violations = self.overlap_violations.saturating_add(overlaps);
        self.report()
    }

    /// Returns the report for everything observed so far.
    #[must_use]
    pub fn report(&self) -> SweepReport {
        let grade = if self.overlap_violations > 0 {
            SweepGrade::Overlapping
        } else if self.jump_violations > 0 {
            SweepGrade::Jumpy
        } else {
            SweepGrade::Clean
        };
        SweepReport {
            frames: self.frames,
            max_jump: self.max_jump,
            jump_violations: self.jump_violations,
            overlap_violations: self.overlap_violations,
            grade,
        }
    }
}

/// Counts pinned section headers that overlap a super-header at or before
/// their section, or another section header.
fn count_overlaps(cache: &GeometryCache) -> u64 {
    let mut count = 0;
    for section in 0..cache.section_count() {
        let Some(header) = cache.section_header_slot(section) else {
            continue;
        };
        if cache.pin_state_at(header) != PinState::Pinned {
            continue;
        }
        let frame = cache.resolved_frame_at(header);

        let covered_by_super = (0..=section)
            .filter_map(|k| cache.super_header_slot(k))
            .any(|slot| cache.resolved_frame_at(slot).y1 > frame.y0 + EPSILON);
        let covers_header = cache
            .slots(ElementKind::SectionHeader)
            .iter()
            .filter(|&&slot| slot != header)
            .any(|&slot| overlaps(cache.resolved_frame_at(slot), frame));

        if covered_by_super || covers_header {
            count += 1;
        }
    }
    count
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 - EPSILON
        && b.x0 < a.x1 - EPSILON
        && a.y0 < b.y1 - EPSILON
        && b.y0 < a.y1 - EPSILON
}

/// Prepares `layout`, scrolls it through `config` and returns the report.
///
/// The original content offset is restored and resolved afterward. Returns
/// `None` when the layout has no provider.
pub fn run<P: SizeProvider>(
    layout: &mut StickyLayout<P>,
    config: SweepConfig,
) -> Option<SweepReport> {
    if !layout.prepare() {
        return None;
    }
    let original = layout.viewport().content_offset();
    let mut tracker = SweepTracker::new(config.step);
    let mut changes = ResolveChanges::default();

    let mut index = 0;
    while let Some(offset) = config.offset_at(index) {
        layout.set_content_offset(Point::new(original.x, offset));
        layout.resolve_into(&mut changes, &mut Tracer::none());
        tracker.observe(layout.cache());
        index += 1;
    }

    layout.set_content_offset(original);
    layout.resolve_into(&mut changes, &mut Tracer::none());
    Some(tracker.report())
}
