//! Shared synthetic image builders for tests. No fixture files on disk —
//! every source is generated in memory.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

pub(crate) const SPLIT_LEFT: [u8; 3] = [200, 30, 40];
pub(crate) const SPLIT_RIGHT: [u8; 3] = [20, 60, 220];

fn encode(img: RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, format)
        .unwrap();
    bytes.into_inner()
}

/// A PNG with a per-pixel gradient, so resampled outputs differ by
/// position.
pub(crate) fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    encode(img, ImageFormat::Png)
}

/// Same gradient, JPEG container.
pub(crate) fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    encode(img, ImageFormat::Jpeg)
}

/// A PNG whose left half is solid [`SPLIT_LEFT`] and right half solid
/// [`SPLIT_RIGHT`], for seam-detection by pixel sampling.
pub(crate) fn split_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb(SPLIT_LEFT)
        } else {
            Rgb(SPLIT_RIGHT)
        }
    });
    encode(img, ImageFormat::Png)
}

/// Decode PNG bytes back to raw RGB8 for pixel assertions.
pub(crate) fn decode_png_pixels(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let img = image::load_from_memory(bytes).unwrap();
    let rgb = img.to_rgb8();
    (rgb.width(), rgb.height(), rgb.into_raw())
}
