//! Raster decode, extraction, resampling, and encoding.
//!
//! The module is split into:
//! - **Params**: [`OutputSpec`], [`Quality`], [`OutputFormat`] — what to
//!   produce
//! - **Source**: [`SourceImage`] — sniffing and decoding opaque upload
//!   bytes
//! - **Engine**: [`extract_and_encode`] and the shared
//!   [`resample_and_encode`] primitive both pipelines call

pub mod engine;
pub mod params;
pub mod source;

pub use engine::{EncodedResult, UploadFile, extract_and_encode, resample_and_encode};
pub use params::{OutputFormat, OutputSpec, Quality};
pub use source::{MAX_SOURCE_PIXELS, SourceImage};
