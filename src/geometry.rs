//! Crop rectangle model and pure dimension math.
//!
//! Crop state lives in **percentage space**: `{x, y, width, height}` in
//! `[0, 100]` relative to the source image. This keeps the rectangle
//! resolution-independent and trivially serializable; conversion to the
//! source pixel grid happens in exactly one place
//! ([`CropRect::to_source_pixels`]) so the rounding rule stays centralized
//! and testable.
//!
//! Invariants, held at every mutation:
//!
//! - `x >= 0`, `y >= 0`, `x + width <= 100`, `y + height <= 100`
//! - the rectangle's pixel aspect (`width% * source_width / height% *
//!   source_height`) equals the session's target aspect within 1e-6 for
//!   the lifetime of a crop session — interaction moves only the origin.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Tolerance for aspect-ratio comparisons.
pub const ASPECT_EPSILON: f64 = 1e-6;

/// A crop selection in percentage units relative to a source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A rectangle on the source pixel grid, produced by
/// [`CropRect::to_source_pixels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// The rectangle covering an entire `width x height` frame.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

impl CropRect {
    /// Map this rectangle onto the source pixel grid.
    ///
    /// Rounding rule: round-half-up on every edge (`f64::round` — half
    /// away from zero, identical for the non-negative values involved).
    /// Origin and size round independently, so the result is clamped back
    /// inside the frame when the sum overshoots by a pixel. The same
    /// rectangle against the same source always yields the same pixels.
    pub fn to_source_pixels(&self, source_width: u32, source_height: u32) -> PixelRect {
        let w = source_width as f64;
        let h = source_height as f64;

        let x = ((self.x / 100.0 * w).round() as u32).min(source_width);
        let y = ((self.y / 100.0 * h).round() as u32).min(source_height);
        let width = ((self.width / 100.0 * w).round() as u32).min(source_width - x);
        let height = ((self.height / 100.0 * h).round() as u32).min(source_height - y);

        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    /// The spatial width/height ratio of this rectangle on the given
    /// source, computed from the unrounded percent values.
    ///
    /// Percent units are relative to their own axis, so the raw
    /// `width / height` percent ratio only equals the target aspect for
    /// square sources; this is the number the aspect invariant speaks
    /// about.
    pub fn pixel_aspect(&self, source_width: u32, source_height: u32) -> f64 {
        (self.width * source_width as f64) / (self.height * source_height as f64)
    }

    /// Recompute the initial centered rectangle, discarding any operator
    /// positioning. Idempotent: resetting twice equals resetting once.
    pub fn reset(
        self,
        source_width: u32,
        source_height: u32,
        target_aspect: f64,
    ) -> Result<CropRect, PipelineError> {
        initial_crop(source_width, source_height, target_aspect)
    }
}

/// Reject zero, negative, and non-finite aspect ratios at the boundary.
pub(crate) fn validate_aspect(target_aspect: f64) -> Result<(), PipelineError> {
    if !target_aspect.is_finite() || target_aspect <= 0.0 {
        return Err(PipelineError::InvalidAspect(target_aspect));
    }
    Ok(())
}

/// Compute the largest centered rectangle with `target_aspect` that fits
/// inside a `source_width x source_height` image.
///
/// When the source is wider than the target aspect, height is the
/// limiting dimension; otherwise width is. The returned rectangle
/// satisfies every invariant in the module docs.
pub fn initial_crop(
    source_width: u32,
    source_height: u32,
    target_aspect: f64,
) -> Result<CropRect, PipelineError> {
    validate_aspect(target_aspect)?;

    let source_aspect = source_width as f64 / source_height as f64;
    let (width, height) = if source_aspect > target_aspect {
        (100.0 * target_aspect / source_aspect, 100.0)
    } else {
        (100.0, 100.0 * source_aspect / target_aspect)
    };

    Ok(CropRect {
        x: (100.0 - width) / 2.0,
        y: (100.0 - height) / 2.0,
        width,
        height,
    })
}
