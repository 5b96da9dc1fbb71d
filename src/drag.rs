//! Interactive repositioning controller.
//!
//! Turns a stream of pointer samples into bounded motion of a crop
//! rectangle's origin. The rectangle's size and aspect are never touched,
//! so the aspect invariant holds by construction. All state is an explicit
//! [`DragSession`] value passed through pure functions; the UI layer only
//! feeds pointer samples in and renders the returned rectangle.
//!
//! Clamping happens on the *rectangle*, not the pointer: samples far
//! outside `[0, 100]` are accepted, which keeps fast drags that overshoot
//! the image edge well-behaved. Every function here is O(1) and runs
//! within a single pointer-move event.

use crate::geometry::CropRect;

/// A pointer position in percentage-of-image coordinates.
///
/// May lie outside `[0, 100]` on either axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

/// Ephemeral drag state: the offset between the pointer and the crop
/// origin, captured once at drag start. Created by [`begin_drag`],
/// discarded by [`end_drag`]; never persisted.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    anchor_dx: f64,
    anchor_dy: f64,
}

/// Capture the anchor offset between the pointer and the rectangle
/// origin.
pub fn begin_drag(pointer: PointerPos, rect: &CropRect) -> DragSession {
    DragSession {
        anchor_dx: pointer.x - rect.x,
        anchor_dy: pointer.y - rect.y,
    }
}

/// Move the rectangle so its origin tracks the pointer minus the anchor
/// offset, clamped per axis so the rectangle stays fully inside the
/// image.
///
/// When the rectangle spans a full axis (`width >= 100` or
/// `height >= 100`) the clamp range collapses to a single point and the
/// rectangle is pinned at 0 on that axis.
///
/// # Panics
///
/// A rectangle larger than the image is an upstream invariant violation
/// (a bug in the geometry model, not bad user input) and panics rather
/// than being silently clamped.
pub fn update_drag(session: &DragSession, pointer: PointerPos, rect: &CropRect) -> CropRect {
    assert!(
        rect.width <= 100.0 && rect.height <= 100.0,
        "crop rectangle exceeds source bounds: {}x{}",
        rect.width,
        rect.height
    );

    let raw_x = pointer.x - session.anchor_dx;
    let raw_y = pointer.y - session.anchor_dy;

    CropRect {
        x: raw_x.clamp(0.0, 100.0 - rect.width),
        y: raw_y.clamp(0.0, 100.0 - rect.height),
        ..*rect
    }
}

/// Discard the session. No further effect.
pub fn end_drag(session: DragSession) {
    let _ = session;
}
