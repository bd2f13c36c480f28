// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The size-provider contract.
//!
//! The engine knows nothing about the content of a list. Everything it lays
//! out comes from a [`SizeProvider`], usually backed by the host's section
//! objects. A zero size is the provider's way of saying "this element does
//! not exist": the builder drops it entirely.
//!
//! Providers are queried read-only and must answer consistently for the
//! duration of one build pass. Answers that change mid-pass produce an
//! unspecified layout.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::Size;

/// Supplies section structure and element sizes to the layout engine.
pub trait SizeProvider {
    /// Number of sections.
    fn section_count(&self) -> usize;

    /// Number of items in `section`.
    fn item_count(&self, section: usize) -> usize;

    /// Size of the item at `item` in `section`. [`Size::ZERO`] drops the item.
    fn item_size(&self, section: usize, item: usize) -> Size;

    /// Size of the header of `section`. [`Size::ZERO`] means no header.
    fn header_size(&self, section: usize) -> Size {
        _ = section;
        Size::ZERO
    }

    /// Size of the super-header of `section`. [`Size::ZERO`] means no
    /// super-header.
    fn super_header_size(&self, section: usize) -> Size {
        _ = section;
        Size::ZERO
    }

    /// Size of the footer of `section`.
    ///
    /// Footers are not supported: a non-zero answer makes the build panic.
    fn footer_size(&self, section: usize) -> Size {
        _ = section;
        Size::ZERO
    }
}

impl<T: SizeProvider + ?Sized> SizeProvider for &T {
    fn section_count(&self) -> usize {
        (**self).section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        (**self).item_count(section)
    }

    fn item_size(&self, section: usize, item: usize) -> Size {
        (**self).item_size(section, item)
    }

    fn header_size(&self, section: usize) -> Size {
        (**self).header_size(section)
    }

    fn super_header_size(&self, section: usize) -> Size {
        (**self).super_header_size(section)
    }

    fn footer_size(&self, section: usize) -> Size {
        (**self).footer_size(section)
    }
}

impl<T: SizeProvider + ?Sized> SizeProvider for Box<T> {
    fn section_count(&self) -> usize {
        (**self).section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        (**self).item_count(section)
    }

    fn item_size(&self, section: usize, item: usize) -> Size {
        (**self).item_size(section, item)
    }

    fn header_size(&self, section: usize) -> Size {
        (**self).header_size(section)
    }

    fn super_header_size(&self, section: usize) -> Size {
        (**self).super_header_size(section)
    }

    fn footer_size(&self, section: usize) -> Size {
        (**self).footer_size(section)
    }
}

/// Precomputed sizes for one section of a [`StaticSections`] provider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionSizes {
    /// Super-header size, or [`Size::ZERO`] for none.
    pub super_header: Size,
    /// Header size, or [`Size::ZERO`] for none.
    pub header: Size,
    /// One size per item.
    pub items: Vec<Size>,
}

impl SectionSizes {
    /// A section with a header and `count` items of the same size.
    #[must_use]
    pub fn uniform(header: Size, item: Size, count: usize) -> Self {
        Self {
            super_header: Size::ZERO,
            header,
            items: alloc::vec![item; count],
        }
    }

    /// Returns a copy with the given super-header size.
    #[must_use]
    pub fn with_super_header(mut self, size: Size) -> Self {
        self.super_header = size;
        self
    }
}

/// A [`SizeProvider`] answering from precomputed section sizes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticSections {
    /// Sections in layout order.
    pub sections: Vec<SectionSizes>,
}

impl StaticSections {
    /// Creates a provider over `sections`.
    #[must_use]
    pub fn new(sections: Vec<SectionSizes>) -> Self {
        Self { sections }
    }
}

impl SizeProvider for StaticSections {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.items.len())
    }

    fn item_size(&self, section: usize, item: usize) -> Size {
        self.sections
            .get(section)
            .and_then(|s| s.items.get(item))
            .copied()
            .unwrap_or(Size::ZERO)
    }

    fn header_size(&self, section: usize) -> Size {
        self.sections.get(section).map_or(Size::ZERO, |s| s.header)
    }

    fn super_header_size(&self, section: usize) -> Size {
        self.sections
            .get(section)
            .map_or(Size::ZERO, |s| s.super_header)
    }
}
