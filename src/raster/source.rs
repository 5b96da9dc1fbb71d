//! Source image decoding.
//!
//! Callers hand the engine an opaque byte buffer; the real format is
//! sniffed from the byte stream rather than trusted from a declared MIME
//! type. Dimensions are probed from the header first so a hostile upload
//! is rejected before the full-frame allocation.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::PipelineError;

/// Upper bound on decoded pixels (512 MP). Memory for very large sources
/// is an operational limit; the ceiling turns a decompression bomb into a
/// typed error instead of an allocation failure.
pub const MAX_SOURCE_PIXELS: u64 = 512_000_000;

/// An immutable decoded raster, owned by exactly one pipeline run.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    format: ImageFormat,
}

impl SourceImage {
    /// Decode an image from raw bytes.
    ///
    /// Sniffs the format, probes header dimensions against
    /// [`MAX_SOURCE_PIXELS`], then decodes the full frame.
    ///
    /// # Errors
    ///
    /// [`PipelineError::SourceDecodeFailed`] when the bytes are not a
    /// decodable image or exceed the pixel ceiling.
    pub fn decode(bytes: &[u8]) -> Result<Self, PipelineError> {
        let format = image::guess_format(bytes)
            .map_err(|e| PipelineError::SourceDecodeFailed(format!("unrecognized format: {e}")))?;

        let (header_width, header_height) = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::SourceDecodeFailed(format!("unreadable header: {e}")))?
            .into_dimensions()
            .map_err(|e| PipelineError::SourceDecodeFailed(format!("unreadable header: {e}")))?;

        let pixels = u64::from(header_width) * u64::from(header_height);
        if pixels > MAX_SOURCE_PIXELS {
            return Err(PipelineError::SourceDecodeFailed(format!(
                "{header_width}x{header_height} exceeds the {MAX_SOURCE_PIXELS} pixel ceiling"
            )));
        }

        let image = image::load_from_memory(bytes)
            .map_err(|e| PipelineError::SourceDecodeFailed(e.to_string()))?;

        log::debug!(
            "decoded {:?} source {}x{}",
            format,
            image.width(),
            image.height()
        );

        Ok(Self { image, format })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The container format sniffed from the byte stream.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub(crate) fn image(&self) -> &DynamicImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{gradient_jpeg, gradient_png};

    #[test]
    fn decodes_png_and_sniffs_format() {
        let source = SourceImage::decode(&gradient_png(64, 48)).unwrap();
        assert_eq!(source.width(), 64);
        assert_eq!(source.height(), 48);
        assert_eq!(source.format(), ImageFormat::Png);
    }

    #[test]
    fn decodes_jpeg_and_sniffs_format() {
        let source = SourceImage::decode(&gradient_jpeg(80, 60)).unwrap();
        assert_eq!(source.width(), 80);
        assert_eq!(source.height(), 60);
        assert_eq!(source.format(), ImageFormat::Jpeg);
    }

    #[test]
    fn garbage_bytes_fail_with_decode_error() {
        let result = SourceImage::decode(b"definitely not an image");
        assert!(matches!(
            result,
            Err(PipelineError::SourceDecodeFailed(_))
        ));
    }

    #[test]
    fn truncated_image_fails_with_decode_error() {
        let mut bytes = gradient_png(64, 48);
        bytes.truncate(bytes.len() / 3);
        let result = SourceImage::decode(&bytes);
        assert!(matches!(
            result,
            Err(PipelineError::SourceDecodeFailed(_))
        ));
    }
}
