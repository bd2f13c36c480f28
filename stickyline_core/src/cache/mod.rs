// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry cache, builder and sticky resolver.
//!
//! The [`GeometryCache`] holds one slot per laid-out element:
//!
//! - An identity ([`ElementKey`](crate::element::ElementKey)): kind, section
//!   and item index.
//! - **Static geometry** written once by [`build`](GeometryCache::build):
//!   frame, slot origin and z-index.
//! - **Dynamic state** written by [`resolve`](GeometryCache::resolve): the
//!   sticky transform and [`PinState`](crate::attributes::PinState).
//!
//! Slots are stored in struct-of-arrays layout, partitioned by kind through a
//! secondary index, and addressed by raw `u32` slot numbers that stay valid
//! until the cache is cleared.
//!
//! # Lifecycle
//!
//! A cache is either empty or fully built. [`build`](GeometryCache::build)
//! produces a complete cache in one forward pass over the provider's
//! sections; [`clear`](GeometryCache::clear) discards everything at once.
//! Resolve passes never add or remove slots.

mod build;
mod resolve;
mod store;

pub use resolve::ResolveChanges;
pub use store::GeometryCache;
