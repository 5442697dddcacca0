//! WebP codec adapter backed by libwebp.

use image::DynamicImage;

use crate::error::{Error, Result};
use crate::format::Format;
use crate::parameters::Parameters;

pub(crate) fn decode(data: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory_with_format(data, image::ImageFormat::WebP)
        .map_err(|e| Error::decode(Format::WebP, e))
}

/// Encode to WebP: lossy at the configured quality, lossless when
/// `optimize` is set. Inputs without transparency take the RGB path to
/// avoid paying for an unused alpha plane.
pub(crate) fn encode(image: &DynamicImage, params: &Parameters) -> Result<Vec<u8>> {
    let quality = params.webp.quality.clamp(1, 100) as f32;

    let memory = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
        if params.optimize {
            encoder.encode_lossless()
        } else {
            encoder.encode(quality)
        }
    } else {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let encoder = webp::Encoder::from_rgb(rgb.as_raw(), width, height);
        if params.optimize {
            encoder.encode_lossless()
        } else {
            encoder.encode(quality)
        }
    };

    Ok(memory.to_vec())
}
