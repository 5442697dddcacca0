//! GIF codec adapter.
//!
//! Operates on the first frame; animations are flattened to a static
//! image by the decoder.

use image::codecs::gif::GifEncoder;
use image::{DynamicImage, ExtendedColorType};

use crate::codecs::quantize::quantize_rgba;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::parameters::Parameters;

pub(crate) fn decode(data: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory_with_format(data, image::ImageFormat::Gif)
        .map_err(|e| Error::decode(Format::Gif, e))
}

/// Encode to GIF, re-quantizing the palette when quality is below 100.
pub(crate) fn encode(image: &DynamicImage, params: &Parameters) -> Result<Vec<u8>> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let quality = params.gif.quality.clamp(1, 100);
    let pixels = if quality < 100 {
        quantize_rgba(
            rgba.as_raw(),
            width as usize,
            height as usize,
            quality as u8,
            Format::Gif,
        )?
    } else {
        rgba.into_raw()
    };

    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut out, 10);
        encoder
            .encode(&pixels, width, height, ExtendedColorType::Rgba8)
            .map_err(|e| Error::encode(Format::Gif, e))?;
    }
    Ok(out)
}
