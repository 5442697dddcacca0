//! TIFF codec adapter backed by the tiff crate.

use std::io::Cursor;

use image::DynamicImage;
use tiff::encoder::colortype::{self, ColorType};
use tiff::encoder::compression::{Deflate, DeflateLevel, Lzw, Packbits, Uncompressed};
use tiff::encoder::TiffEncoder;

use crate::error::{Error, Result};
use crate::format::Format;
use crate::parameters::{Parameters, TiffCompression, TiffDeflateLevel};

pub(crate) fn decode(data: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory_with_format(data, image::ImageFormat::Tiff)
        .map_err(|e| Error::decode(Format::Tiff, e))
}

/// Encode to TIFF with the configured compression algorithm.
///
/// TIFF has no scalar quality knob; size is driven entirely by the
/// algorithm choice and the deflate effort level.
pub(crate) fn encode(image: &DynamicImage, params: &Parameters) -> Result<Vec<u8>> {
    if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        write_frame::<colortype::RGBA8>(width, height, rgba.as_raw(), params)
    } else {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        write_frame::<colortype::RGB8>(width, height, rgb.as_raw(), params)
    }
}

fn write_frame<C: ColorType<Inner = u8>>(
    width: u32,
    height: u32,
    data: &[u8],
    params: &Parameters,
) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut encoder =
            TiffEncoder::new(&mut cursor).map_err(|e| Error::encode(Format::Tiff, e))?;
        let result = match params.tiff.algorithm {
            TiffCompression::Uncompressed => {
                encoder.write_image_with_compression::<C, _>(width, height, Uncompressed, data)
            }
            TiffCompression::Lzw => {
                encoder.write_image_with_compression::<C, _>(width, height, Lzw, data)
            }
            TiffCompression::Deflate => encoder.write_image_with_compression::<C, _>(
                width,
                height,
                Deflate::with_level(deflate_level(params.tiff.deflate_level)),
                data,
            ),
            TiffCompression::Packbits => {
                encoder.write_image_with_compression::<C, _>(width, height, Packbits, data)
            }
        };
        result.map_err(|e| Error::encode(Format::Tiff, e))?;
    }
    Ok(cursor.into_inner())
}

fn deflate_level(level: TiffDeflateLevel) -> DeflateLevel {
    match level {
        TiffDeflateLevel::Fast => DeflateLevel::Fast,
        TiffDeflateLevel::Balanced => DeflateLevel::Balanced,
        TiffDeflateLevel::Best => DeflateLevel::Best,
    }
}
