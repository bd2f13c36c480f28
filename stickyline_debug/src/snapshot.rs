// Copyright 2026 the Stickyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshot export.
//!
//! [`export`] writes a whole [`GeometryCache`] as one JSON object, and
//! [`export_attributes`] writes the result of a rect query as a bare array.
//! Rectangles are `[x0, y0, x1, y1]` arrays.

use std::io::{self, Write};

use kurbo::Rect;
use serde_json::{Value, json};

use stickyline_core::attributes::{LayoutAttributes, PinState};
use stickyline_core::cache::GeometryCache;

/// Writes the cache as pretty-printed JSON.
///
/// The object carries the content height, the viewport size the cache was
/// built for, and one entry per element in build order.
pub fn export(cache: &GeometryCache, writer: &mut dyn Write) -> io::Result<()> {
    let elements: Vec<Value> = cache
        .iter()
        .map(|attrs| element(&attrs, cache.pin_state(attrs.key)))
        .collect();
    let size = cache.built_size();
    let snapshot = json!({
        "built": cache.is_built(),
        "content_height": cache.content_height(),
        "viewport": { "width": size.width, "height": size.height },
        "elements": elements,
    });
    serde_json::to_writer_pretty(writer, &snapshot)?;
    Ok(())
}

/// Writes a list of attributes as a pretty-printed JSON array.
///
/// Pin states are not part of [`LayoutAttributes`] and are omitted.
pub fn export_attributes(
    attributes: &[LayoutAttributes],
    writer: &mut dyn Write,
) -> io::Result<()> {
    let elements: Vec<Value> = attributes
        .iter()
        .map(|attrs| element(attrs, None))
        .collect();
    serde_json::to_writer_pretty(writer, &elements)?;
    Ok(())
}

fn element(attrs: &LayoutAttributes, pin: Option<PinState>) -> Value {
    let mut value = json!({
        "kind": attrs.key.kind.as_str(),
        "section": attrs.key.section,
        "item": attrs.key.item,
        "frame": rect(attrs.frame),
        "resolved_frame": rect(attrs.resolved_frame()),
        "origin": [attrs.origin.x, attrs.origin.y],
        "z_index": attrs.z_index,
        "translation": attrs.translation().y,
    });
    if let Some(pin) = pin {
        value["pin"] = json!(pin_name(pin));
    }
    value
}

fn rect(r: Rect) -> Value {
    json!([r.x0, r.y0, r.x1, r.y1])
}

fn pin_name(pin: PinState) -> &'static str {
    match pin {
        PinState::Resting => "resting",
        PinState::Pinned => "pinned",
        PinState::HandedOff => "handed-off",
    }
}
