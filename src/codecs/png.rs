//! PNG codec adapter: imagequant for the lossy path, oxipng for the
//! lossless optimization pass.

use std::num::NonZeroU8;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

use crate::codecs::quantize::quantize_rgba;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::parameters::Parameters;

const ZOPFLI_ITERATIONS: NonZeroU8 = match NonZeroU8::new(15) {
    Some(n) => n,
    None => unreachable!(),
};

pub(crate) fn decode(data: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory_with_format(data, image::ImageFormat::Png)
        .map_err(|e| Error::decode(Format::Png, e))
}

/// Encode to PNG.
///
/// With `optimize` unset and quality below 100, pixels are palette
/// quantized first (lossy). Every output then goes through an oxipng
/// pass: a light one by default, or at the configured optimization level
/// (optionally with zopfli) when `optimize` is set.
pub(crate) fn encode(image: &DynamicImage, params: &Parameters) -> Result<Vec<u8>> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let quality = params.png.quality.clamp(1, 100);
    let lossy = !params.optimize && quality < 100;

    let pixels = if lossy {
        quantize_rgba(
            rgba.as_raw(),
            width as usize,
            height as usize,
            quality as u8,
            Format::Png,
        )?
    } else {
        rgba.into_raw()
    };

    let mut encoded = Vec::new();
    PngEncoder::new(&mut encoded)
        .write_image(&pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| Error::encode(Format::Png, e))?;

    let options = oxipng_options(params);
    oxipng::optimize_from_memory(&encoded, &options).map_err(|e| Error::encode(Format::Png, e))
}

fn oxipng_options(params: &Parameters) -> oxipng::Options {
    let level = if params.optimize {
        params.png.optimization_level.min(6)
    } else {
        2
    };
    let mut options = oxipng::Options::from_preset(level);
    options.strip = if params.keep_metadata {
        oxipng::StripChunks::None
    } else {
        oxipng::StripChunks::Safe
    };
    if params.optimize && params.png.force_zopfli {
        options.deflate = oxipng::Deflaters::Zopfli {
            iterations: ZOPFLI_ITERATIONS,
        };
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(image::RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8, 255])
        }))
    }

    #[test]
    fn produces_valid_png() {
        let data = encode(&gradient(32, 32), &Parameters::new()).unwrap();
        assert_eq!(&data[..8], &PNG_MAGIC);
    }

    #[test]
    fn lossless_when_optimize_set() {
        let image = gradient(32, 32);
        let mut params = Parameters::new();
        params.optimize = true;
        params.png.quality = 40;

        let data = encode(&image, &params).unwrap();
        let decoded = decode(&data).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), image.to_rgba8().as_raw());
    }

    #[test]
    fn lossy_path_still_decodes_to_same_dimensions() {
        let mut params = Parameters::new();
        params.png.quality = 30;
        let data = encode(&gradient(48, 32), &params).unwrap();
        let decoded = decode(&data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (48, 32));
    }

    #[test]
    fn preserves_transparency() {
        let image = DynamicImage::ImageRgba8(image::RgbaImage::from_fn(16, 16, |x, _| {
            image::Rgba([200, 100, 50, if x < 8 { 0 } else { 255 }])
        }));
        let mut params = Parameters::new();
        params.optimize = true;

        let data = encode(&image, &params).unwrap();
        let decoded = decode(&data).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0)[3], 0);
        assert_eq!(decoded.get_pixel(15, 0)[3], 255);
    }
}
