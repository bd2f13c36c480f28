// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout engine for sectioned lists with sticky headers and super-headers.
//!
//! `stickyline_core` lays out a vertical list of sections. Each section may
//! have a *super-header*, a *section header* and any number of items. While
//! the list scrolls, section headers pin to the top of the viewport until
//! their section's items have passed, and super-headers pin above them. It
//! is `no_std` compatible (with `alloc`) and stores geometry in
//! struct-of-arrays form addressed by `u32` slots.
//!
//! # Architecture
//!
//! ```text
//!   SizeProvider (host content)
//!       │
//!       ▼
//!   StickyLayout::prepare() ──► GeometryCache::build()
//!                                      │
//!                 ┌────────────────────┘
//!                 ▼
//!   scroll ──► GeometryCache::resolve() ──► ResolveChanges
//!                                               │
//!                 ┌─────────────────────────────┘
//!                 ▼
//!   StickyLayout::attributes_in_rect() ──► host draws resolved frames
//! ```
//!
//! **[`provider`]**: The [`SizeProvider`](provider::SizeProvider) trait
//! through which the host reports sections and element sizes. A zero size
//! means the element does not exist.
//!
//! **[`cache`]**: The [`GeometryCache`](cache::GeometryCache): a single
//! forward build pass, z-order restacking and the sticky resolver.
//!
//! **[`engine`]**: The [`StickyLayout`](engine::StickyLayout) facade with
//! its Empty/Built lifecycle and host queries.
//!
//! **[`attributes`]**, **[`element`]**: Per-element records and identity.
//!
//! **[`config`]**: Spacing configuration and viewport state.
//!
//! **[`trace`]**: [`LayoutTraceSink`](trace::LayoutTraceSink) trait and
//! event types, with the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Example
//!
//! ```
//! use kurbo::{Point, Size};
//! use stickyline_core::config::Viewport;
//! use stickyline_core::element::ElementKind;
//! use stickyline_core::engine::StickyLayout;
//! use stickyline_core::provider::{SectionSizes, StaticSections};
//!
//! let header = Size::new(320.0, 40.0);
//! let item = Size::new(320.0, 50.0);
//! let provider = StaticSections::new(vec![
//!     SectionSizes::uniform(header, item, 5),
//!     SectionSizes::uniform(header, item, 5),
//! ]);
//! let mut layout = StickyLayout::with_provider(provider, Viewport::new(Size::new(375.0, 667.0)));
//! assert!(layout.prepare());
//!
//! layout.set_content_offset(Point::new(0.0, 120.0));
//! layout.resolve();
//! let header = layout
//!     .attributes_for_supplementary(ElementKind::SectionHeader, 0)
//!     .unwrap();
//! assert_eq!(header.resolved_frame().y0, 120.0);
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-element
//!   transform change events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod attributes;
pub mod cache;
pub mod config;
pub mod element;
pub mod engine;
pub mod provider;
pub mod trace;
