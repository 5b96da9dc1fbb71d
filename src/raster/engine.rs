//! Raster extraction, resampling, and encoding.
//!
//! [`resample_and_encode`] is the shared primitive: crop a pixel region,
//! Lanczos3-resample it to the destination size, and serialize at the
//! requested quality. The interactive pipeline calls it through
//! [`extract_and_encode`] with the operator's crop rectangle; the batch
//! engine calls it with the full frame. Keeping one implementation means
//! one set of interpolation-quality tests for both.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Extract | `DynamicImage::crop_imm` |
//! | Resample | `DynamicImage::resize_exact` + `Lanczos3` |
//! | Encode JPEG | `JpegEncoder::new_with_quality` |
//! | Encode PNG / WebP | `PngEncoder` / lossless `WebPEncoder` |
//! | Encode AVIF | `AvifEncoder::new_with_speed_quality` (speed 6) |

use std::io::Cursor;

use image::DynamicImage;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;

use super::params::{OutputFormat, OutputSpec, Quality};
use super::source::SourceImage;
use crate::error::PipelineError;
use crate::geometry::{CropRect, PixelRect};

/// An encoded output buffer with its final dimensions.
///
/// Produced once per pipeline run; ownership transfers to the caller.
#[derive(Debug, Clone)]
pub struct EncodedResult {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl EncodedResult {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Wrap the buffer as a named file for the storage collaborator.
    pub fn into_upload(self, stem: &str) -> UploadFile {
        UploadFile {
            filename: format!("{stem}.{}", self.format.extension()),
            mime_type: self.format.mime_type(),
            bytes: self.bytes,
        }
    }
}

/// File-like wrapper handed to the upload layer.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Extract the crop rectangle from a source and encode it within the
/// output bounds.
///
/// Output width is `min(spec.max_width, crop pixel width)` — a crop is
/// never upscaled past its native resolution. Output height derives from
/// the unrounded pixel aspect so the result matches the target aspect
/// exactly. Deterministic: identical inputs produce identical bytes.
///
/// # Errors
///
/// [`PipelineError::DimensionOverflow`] for a crop that maps to zero
/// pixels, [`PipelineError::EncodeFailed`] when serialization fails.
pub fn extract_and_encode(
    source: &SourceImage,
    rect: &CropRect,
    spec: &OutputSpec,
) -> Result<EncodedResult, PipelineError> {
    let region = rect.to_source_pixels(source.width(), source.height());
    if region.width == 0 || region.height == 0 {
        return Err(PipelineError::DimensionOverflow {
            width: region.width,
            height: region.height,
        });
    }

    let aspect = rect.pixel_aspect(source.width(), source.height());
    let out_width = spec.max_width.min(region.width);
    let out_height = (out_width as f64 / aspect).round() as u32;
    if out_width == 0 || out_height == 0 {
        return Err(PipelineError::DimensionOverflow {
            width: out_width,
            height: out_height,
        });
    }

    resample_and_encode(
        source.image(),
        region,
        out_width,
        out_height,
        spec.quality,
        spec.format,
    )
}

/// Crop `region` out of `image`, resample it to `out_width x out_height`
/// with Lanczos3, and encode.
///
/// The resample is skipped when the region already has the destination
/// size, so an unscaled pass-through is pixel-exact.
pub fn resample_and_encode(
    image: &DynamicImage,
    region: PixelRect,
    out_width: u32,
    out_height: u32,
    quality: Quality,
    format: OutputFormat,
) -> Result<EncodedResult, PipelineError> {
    debug_assert!(out_width >= 1 && out_height >= 1);
    debug_assert!(region.x + region.width <= image.width());
    debug_assert!(region.y + region.height <= image.height());

    let extracted = image.crop_imm(region.x, region.y, region.width, region.height);
    let resampled = if (extracted.width(), extracted.height()) == (out_width, out_height) {
        extracted
    } else {
        extracted.resize_exact(out_width, out_height, FilterType::Lanczos3)
    };

    let bytes = encode_pixels(&resampled, format, quality)?;
    log::debug!(
        "encoded {}x{} region to {out_width}x{out_height} {} ({} bytes)",
        region.width,
        region.height,
        format.mime_type(),
        bytes.len()
    );

    Ok(EncodedResult {
        bytes,
        width: out_width,
        height: out_height,
        format,
    })
}

/// Serialize a pixel buffer in the requested format.
///
/// JPEG cannot carry alpha, so that path flattens to RGB8 first.
fn encode_pixels(
    image: &DynamicImage,
    format: OutputFormat,
    quality: Quality,
) -> Result<Vec<u8>, PipelineError> {
    let mut buffer = Cursor::new(Vec::new());

    let encoded = match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.as_codec_scale());
            DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)
        }
        OutputFormat::Png => image.write_with_encoder(PngEncoder::new(&mut buffer)),
        OutputFormat::WebP => image.write_with_encoder(WebPEncoder::new_lossless(&mut buffer)),
        OutputFormat::Avif => {
            let encoder =
                AvifEncoder::new_with_speed_quality(&mut buffer, 6, quality.as_codec_scale());
            image.write_with_encoder(encoder)
        }
    };
    encoded.map_err(|e| PipelineError::EncodeFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
