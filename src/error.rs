//! Unified error type for both pipelines.
//!
//! One enum carries every failure the engine can surface, so callers can
//! match per branch instead of parsing strings. The variants split along
//! recovery lines:
//!
//! - [`InvalidAspect`](PipelineError::InvalidAspect) — programmer error,
//!   rejected at the boundary before any pixel work runs.
//! - [`SourceDecodeFailed`](PipelineError::SourceDecodeFailed) — bad or
//!   corrupt input; recoverable by supplying a different file.
//! - [`DimensionOverflow`](PipelineError::DimensionOverflow) — degenerate
//!   crop region; recoverable by resetting the crop rectangle.
//! - [`EncodeFailed`](PipelineError::EncodeFailed) — the destination
//!   buffer could not be serialized; recoverable only by retrying the
//!   commit.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The caller supplied a zero, negative, or non-finite target aspect.
    #[error("invalid target aspect {0}: expected a positive finite ratio")]
    InvalidAspect(f64),

    /// The source bytes are not a decodable image.
    #[error("source image could not be decoded: {0}")]
    SourceDecodeFailed(String),

    /// The crop region maps to zero pixels on the source grid.
    #[error("crop region maps to a degenerate {width}x{height} pixel area")]
    DimensionOverflow { width: u32, height: u32 },

    /// The output pixel buffer could not be serialized.
    #[error("encoding failed: {0}")]
    EncodeFailed(String),
}
