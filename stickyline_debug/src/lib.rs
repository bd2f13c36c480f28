// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON snapshot export for stickyline diagnostics.
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output,
//!   implementing [`LayoutTraceSink`](stickyline_core::trace::LayoutTraceSink).
//! - [`snapshot::export`]: writes a built geometry cache as JSON, including
//!   resolved frames and pin states.

pub mod pretty;
pub mod snapshot;
