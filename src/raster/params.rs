//! Output parameter types.
//!
//! These structs describe *what* to produce, not *how*: the engines in
//! [`engine`](super::engine) and [`crate::batch`] consume them to decide
//! output dimensions, encoder, and compression level.

use serde::{Deserialize, Serialize};

/// Normalized lossy compression level in `[0, 1]`, clamped on
/// construction. `1.0` is best quality. Ignored by lossless formats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quality(f32);

impl Quality {
    /// Clamp `value` into `[0, 1]`. Non-finite values fall back to the
    /// default.
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self::default()
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// The 1-100 scale the `image` crate's lossy encoders take.
    pub(crate) fn as_codec_scale(self) -> u8 {
        ((self.0 * 100.0).round() as u8).clamp(1, 100)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(0.9)
    }
}

/// Encoding for the output buffer.
///
/// JPEG is the default lossy target for CMS uploads. PNG and WebP encode
/// losslessly (the `image` crate's WebP encoder is lossless-only), so
/// [`Quality`] does not apply to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    WebP,
    Avif,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Avif => "image/avif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Avif => "avif",
        }
    }

    /// Whether [`Quality`] affects the encoded bytes.
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg | Self::Avif)
    }
}

/// Bounds and encoding for one pipeline run.
///
/// The crop pipeline leaves `max_height` as `None` — output height is
/// implied by the target aspect and `max_width`. The batch engine sets
/// both bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub max_width: u32,
    pub max_height: Option<u32>,
    pub quality: Quality,
    pub format: OutputFormat,
}

impl OutputSpec {
    /// Spec for the interactive crop pipeline: width-bounded only.
    pub fn crop(max_width: u32) -> Self {
        Self {
            max_width,
            max_height: None,
            quality: Quality::default(),
            format: OutputFormat::default(),
        }
    }

    /// Spec for the batch engine: bounded on both axes.
    pub fn bounded(max_width: u32, max_height: u32) -> Self {
        Self {
            max_height: Some(max_height),
            ..Self::crop(max_width)
        }
    }

    pub fn with_quality(self, quality: Quality) -> Self {
        Self { quality, ..self }
    }

    pub fn with_format(self, format: OutputFormat) -> Self {
        Self { format, ..self }
    }
}
