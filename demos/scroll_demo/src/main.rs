// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated scroll session over a mixed list of sections.
//!
//! Lays out fifteen sections of four shapes on a phone-sized viewport, scrolls
//! through a few positions while a
//! [`PrettyPrintSink`](stickyline_debug::pretty::PrettyPrintSink) prints every
//! trace event, rotates the viewport, sweeps the whole content for continuity
//! and overlap problems, then writes a JSON snapshot of the final layout.

use std::fs::File;
use std::io::BufWriter;

use kurbo::{Point, Size};
use stickyline_core::attributes::PinState;
use stickyline_core::config::Viewport;
use stickyline_core::element::ElementKind;
use stickyline_core::engine::StickyLayout;
use stickyline_core::provider::SizeProvider;
use stickyline_core::trace::Tracer;
use stickyline_debug::pretty::PrettyPrintSink;
use stickyline_sweep::SweepConfig;

const SCREEN: Size = Size::new(375.0, 667.0);
/// Navigation bar plus status bar.
const TOP_INSET: f64 = 64.0;
const ITEM_HEIGHT: f64 = 50.0;
const ITEMS_PER_SECTION: usize = 5;

/// The section shapes of the demo list.
#[derive(Clone, Copy, Debug)]
enum DemoSection {
    /// A 70-point super-header over five items.
    SuperHeader,
    /// A 100-point header over five items.
    Galaxy,
    /// A 151-point header with no items.
    Itemless,
    /// Five items and nothing else.
    Headerless,
}

impl DemoSection {
    fn super_header_height(self) -> f64 {
        match self {
            Self::SuperHeader => 70.0,
            _ => 0.0,
        }
    }

    fn header_height(self) -> f64 {
        match self {
            Self::Galaxy => 100.0,
            Self::Itemless => 151.0,
            Self::SuperHeader | Self::Headerless => 0.0,
        }
    }

    fn item_count(self) -> usize {
        match self {
            Self::Itemless => 0,
            _ => ITEMS_PER_SECTION,
        }
    }
}

const LIST: [DemoSection; 15] = [
    DemoSection::SuperHeader,
    DemoSection::Galaxy,
    DemoSection::Itemless,
    DemoSection::Galaxy,
    DemoSection::Headerless,
    DemoSection::Galaxy,
    DemoSection::SuperHeader,
    DemoSection::Headerless,
    DemoSection::Galaxy,
    DemoSection::Headerless,
    DemoSection::Headerless,
    DemoSection::Galaxy,
    DemoSection::Headerless,
    DemoSection::Headerless,
    DemoSection::Galaxy,
];

/// Full-width sections, like a table on a phone screen.
#[derive(Debug)]
struct DemoList {
    width: f64,
    sections: Vec<DemoSection>,
}

impl DemoList {
    fn sized(&self, height: f64) -> Size {
        if height > 0.0 {
            Size::new(self.width, height)
        } else {
            Size::ZERO
        }
    }
}

impl SizeProvider for DemoList {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.item_count())
    }

    fn item_size(&self, _section: usize, _item: usize) -> Size {
        self.sized(ITEM_HEIGHT)
    }

    fn header_size(&self, section: usize) -> Size {
        self.sized(self.sections.get(section).map_or(0.0, |s| s.header_height()))
    }

    fn super_header_size(&self, section: usize) -> Size {
        self.sized(
            self.sections
                .get(section)
                .map_or(0.0, |s| s.super_header_height()),
        )
    }
}

fn print_pinned(layout: &StickyLayout<DemoList>) {
    let cache = layout.cache();
    let pinned: Vec<String> = [ElementKind::SuperHeader, ElementKind::SectionHeader]
        .into_iter()
        .flat_map(|kind| cache.slots(kind).iter().copied())
        .filter(|&slot| cache.pin_state_at(slot) == PinState::Pinned)
        .map(|slot| {
            format!(
                "{:?}@{:.0}",
                cache.key_at(slot),
                cache.resolved_frame_at(slot).y0
            )
        })
        .collect();
    println!("  pinned: {}", pinned.join(", "));
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut tracer = Tracer::new(&mut pretty);

    // -- layout ------------------------------------------------------------
    let provider = DemoList {
        width: SCREEN.width,
        sections: LIST.to_vec(),
    };
    // At rest the content sits right below the navigation bar.
    let viewport = Viewport::new(SCREEN)
        .with_top_inset(TOP_INSET)
        .with_content_offset(Point::new(0.0, -TOP_INSET));
    let mut layout = StickyLayout::with_provider(provider, viewport);
    layout.prepare_traced(&mut tracer);
    println!("content extent: {:?}", layout.content_extent());

    // -- scroll ------------------------------------------------------------
    for offset in [-TOP_INSET, 120.0, 420.0, 900.0, 1600.0] {
        layout.set_content_offset(Point::new(0.0, offset));
        let visible = layout.viewport().bounds;
        let found = layout.attributes_in_rect_traced(visible, &mut tracer);
        println!("offset {offset}: {} visible", found.len());
        print_pinned(&layout);
    }

    // -- rotate ------------------------------------------------------------
    let landscape = Viewport::new(Size::new(SCREEN.height, SCREEN.width))
        .with_top_inset(TOP_INSET)
        .with_content_offset(Point::new(0.0, -TOP_INSET));
    layout.set_viewport_traced(landscape, &mut tracer);
    layout.prepare_traced(&mut tracer);
    drop(tracer);

    // -- sweep -------------------------------------------------------------
    let end = layout.content_extent().height;
    let report = stickyline_sweep::run(&mut layout, SweepConfig::new(-TOP_INSET, end, 1.0))
        .expect("provider is attached");
    println!(
        "sweep: {} frames, max jump {:.2}, {} jumps, {} overlaps -> {}",
        report.frames,
        report.max_jump,
        report.jump_violations,
        report.overlap_violations,
        report.grade.as_str(),
    );

    // -- snapshot ----------------------------------------------------------
    layout.set_content_offset(Point::new(0.0, 420.0));
    layout.resolve();
    let path = "stickyline_snapshot.json";
    let file = File::create(path).expect("failed to create snapshot file");
    let mut writer = BufWriter::new(file);
    stickyline_debug::snapshot::export(layout.cache(), &mut writer)
        .expect("failed to write snapshot");
    println!("Wrote {path} ({} elements)", layout.cache().len());
}
