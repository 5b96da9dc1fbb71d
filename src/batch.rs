//! Batch downscale engine.
//!
//! The crop-free sibling of the interactive pipeline: N source images,
//! one bounding box, N independent results. Each image is decoded,
//! scaled to fit `max_width x max_height` (never upscaled), and encoded
//! through the same [`resample_and_encode`] primitive the crop engine
//! uses.
//!
//! Items are processed in parallel with [rayon](https://docs.rs/rayon) —
//! per-image tasks share no state — and results come back in input
//! order, one `Result` per item, so a batch of 10 with 1 corrupt file
//! still yields 9 encoded outputs.

use rayon::prelude::*;

use crate::error::PipelineError;
use crate::geometry::PixelRect;
use crate::raster::{EncodedResult, OutputSpec, SourceImage, resample_and_encode};

/// Compute the downscaled dimensions for a source inside the bounding
/// box, preserving aspect ratio.
///
/// The scale factor is capped at 1: a source already inside the box is
/// returned unchanged. Scaled edges round to the nearest pixel with a
/// floor of 1.
pub fn downscale_dimensions(
    source_width: u32,
    source_height: u32,
    max_width: u32,
    max_height: Option<u32>,
) -> (u32, u32) {
    let mut scale = f64::from(max_width) / f64::from(source_width);
    if let Some(max_height) = max_height {
        scale = scale.min(f64::from(max_height) / f64::from(source_height));
    }

    if scale >= 1.0 {
        return (source_width, source_height);
    }

    let width = ((f64::from(source_width) * scale).round() as u32).max(1);
    let height = ((f64::from(source_height) * scale).round() as u32).max(1);
    (width, height)
}

/// Downscale and re-encode a set of independent source images.
///
/// One result per input, in input order. A failing item never aborts its
/// neighbors.
pub fn downscale_and_encode_batch<B>(
    sources: &[B],
    spec: &OutputSpec,
) -> Vec<Result<EncodedResult, PipelineError>>
where
    B: AsRef<[u8]> + Sync,
{
    sources
        .par_iter()
        .enumerate()
        .map(|(index, bytes)| {
            downscale_one(bytes.as_ref(), spec).map_err(|e| {
                log::warn!("batch item {index} failed: {e}");
                e
            })
        })
        .collect()
}

fn downscale_one(bytes: &[u8], spec: &OutputSpec) -> Result<EncodedResult, PipelineError> {
    let source = SourceImage::decode(bytes)?;
    let (out_width, out_height) = downscale_dimensions(
        source.width(),
        source.height(),
        spec.max_width,
        spec.max_height,
    );

    resample_and_encode(
        source.image(),
        PixelRect::full(source.width(), source.height()),
        out_width,
        out_height,
        spec.quality,
        spec.format,
    )
}
