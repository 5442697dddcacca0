//! Shared helpers: synthetic images written into temp dirs.

// each test binary uses a different subset of these
#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage, Rgba, RgbaImage};

/// Smooth gradient with enough detail that lossy encoders produce
/// meaningfully different sizes across quality levels.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x * y * 7) % 256) as u8,
        ])
    }))
}

/// Image with a transparent left half.
pub fn half_transparent(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, _| {
        Rgba([180, 90, 45, if x < width / 2 { 0 } else { 255 }])
    }))
}

pub fn encode_to(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Vec::new();
    image.write_to(&mut Cursor::new(&mut out), format).unwrap();
    out
}

pub fn write_image(path: &Path, image: &DynamicImage, format: ImageFormat) {
    std::fs::write(path, encode_to(image, format)).unwrap();
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    write_image(path, &gradient(width, height), ImageFormat::Jpeg);
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    write_image(path, &gradient(width, height), ImageFormat::Png);
}
