//! # Framepress
//!
//! The image crop-and-compress engine behind a content-managed artist
//! site. Every admin upload surface — hero banners, bio photos, gallery
//! batches, product images, popup banners, track covers — funnels through
//! one of two pipelines:
//!
//! ```text
//! Interactive crop:  decode → position crop (drag) → extract → resample → encode
//! Batch downscale:   decode → fit bounding box     →           resample → encode
//! ```
//!
//! Both pipelines end in the same resample+encode primitive
//! ([`raster::resample_and_encode`]), so there is exactly one
//! implementation of the lossy interpolation step to test.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Percent-space crop rectangle: initial placement, invariants, the one percent→pixel conversion |
//! | [`drag`] | Pointer samples → bounded motion of the crop origin, as pure functions over an explicit drag session |
//! | [`raster`] | Decode (sniffed format, header-first limits), extraction, Lanczos3 resampling, JPEG/PNG/WebP/AVIF encoding |
//! | [`batch`] | Crop-free downscale of N independent images, parallel via rayon, one `Result` per item |
//! | [`session`] | Per-upload state machine: decode generations, cancel, one-shot commit |
//! | [`error`] | The [`PipelineError`] taxonomy |
//!
//! # Design Decisions
//!
//! ## Percentage-Space Geometry
//!
//! Crop state is stored in percent of the source image, not pixels. The
//! rectangle survives any rescaling of the preview the operator drags it
//! on, serializes without reference to a concrete resolution, and
//! converts to the pixel grid in a single audited function with a fixed
//! rounding rule (round-half-up).
//!
//! ## Engine Owns No I/O
//!
//! Callers hand in opaque byte buffers and take back encoded buffers
//! plus a file-like [`UploadFile`](raster::UploadFile) wrapper. Storage,
//! network, and UI chrome live with the caller; this crate is pure
//! computation and can be tested entirely in memory.
//!
//! ## Never Upscale
//!
//! A crop is bounded by `min(max_width, native crop width)`; a batch
//! image is scaled by `min(1, fit ratio)`. Output resolution never
//! exceeds what the source actually carries.
//!
//! ## One-Shot Sessions
//!
//! A committed session releases its pixel buffer and cannot be reopened;
//! re-cropping starts a new session from the original bytes, which the
//! caller retains. Sessions share no state, so concurrent uploads need
//! no coordination.

pub mod batch;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod session;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use batch::{downscale_and_encode_batch, downscale_dimensions};
pub use drag::{DragSession, PointerPos, begin_drag, end_drag, update_drag};
pub use error::PipelineError;
pub use geometry::{CropRect, PixelRect, initial_crop};
pub use raster::{
    EncodedResult, OutputFormat, OutputSpec, Quality, SourceImage, UploadFile, extract_and_encode,
};
pub use session::{CropSession, Generation, SessionState};
