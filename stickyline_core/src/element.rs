// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identity types.

use core::fmt;

/// Sentinel value indicating "no slot" in index fields.
pub const INVALID: u32 = u32::MAX;

/// The kind of element a [`LayoutAttributes`](crate::attributes::LayoutAttributes)
/// record describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    /// A regular item.
    Cell,
    /// The header of one section. Pins to the top of the viewport while the
    /// section's items scroll beneath it.
    SectionHeader,
    /// A header that spans the following sections and pins above their
    /// section headers.
    SuperHeader,
    /// Reserved. Footers are never laid out.
    SectionFooter,
}

impl ElementKind {
    /// Every kind, in partition order.
    pub const ALL: [Self; 4] = [
        Self::Cell,
        Self::SectionHeader,
        Self::SuperHeader,
        Self::SectionFooter,
    ];

    pub(crate) const COUNT: usize = Self::ALL.len();

    /// Index of this kind's partition in the geometry cache.
    #[inline]
    pub(crate) const fn partition(self) -> usize {
        match self {
            Self::Cell => 0,
            Self::SectionHeader => 1,
            Self::SuperHeader => 2,
            Self::SectionFooter => 3,
        }
    }

    /// Returns whether this kind is a supplementary element, i.e. anything
    /// other than a cell.
    #[inline]
    #[must_use]
    pub const fn is_supplementary(self) -> bool {
        !matches!(self, Self::Cell)
    }

    /// Returns whether the sticky resolver computes a transform for this kind.
    #[inline]
    #[must_use]
    pub const fn is_sticky(self) -> bool {
        matches!(self, Self::SectionHeader | Self::SuperHeader)
    }

    /// Returns a short label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cell => "cell",
            Self::SectionHeader => "header",
            Self::SuperHeader => "super-header",
            Self::SectionFooter => "footer",
        }
    }
}

/// Identity of one element within a layout pass.
///
/// Headers and super-headers always use item index 0.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementKey {
    /// What the element is.
    pub kind: ElementKind,
    /// 0-based section index.
    pub section: usize,
    /// 0-based item index within the section.
    pub item: usize,
}

impl ElementKey {
    /// Key of the cell at `item` in `section`.
    #[inline]
    #[must_use]
    pub const fn cell(section: usize, item: usize) -> Self {
        Self {
            kind: ElementKind::Cell,
            section,
            item,
        }
    }

    /// Key of a supplementary element of `kind` in `section`.
    #[inline]
    #[must_use]
    pub const fn supplementary(kind: ElementKind, section: usize) -> Self {
        Self {
            kind,
            section,
            item: 0,
        }
    }

    /// Key of the header of `section`.
    #[inline]
    #[must_use]
    pub const fn section_header(section: usize) -> Self {
        Self::supplementary(ElementKind::SectionHeader, section)
    }

    /// Key of the super-header of `section`.
    #[inline]
    #[must_use]
    pub const fn super_header(section: usize) -> Self {
        Self::supplementary(ElementKind::SuperHeader, section)
    }
}

impl fmt::Debug for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ElementKind::Cell => write!(f, "Cell({}.{})", self.section, self.item),
            kind => write!(f, "{kind:?}({})", self.section),
        }
    }
}
