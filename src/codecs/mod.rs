//! Per-format codec adapters and dispatch.
//!
//! The format set is closed, so dispatch is a match over [`Format`]
//! rather than trait objects. Each adapter wraps an external encoder and
//! upholds two contracts the pipeline depends on: encoding is
//! deterministic for fixed inputs, and it returns a complete buffer or a
//! typed error, never a partial write.

pub(crate) mod gif;
pub(crate) mod jpeg;
pub(crate) mod png;
mod quantize;
pub(crate) mod tiff;
pub(crate) mod webp;

use image::DynamicImage;

use crate::error::{Error, Result};
use crate::format::Format;
use crate::parameters::Parameters;

pub(crate) fn decode(data: &[u8], format: Format) -> Result<DynamicImage> {
    match format {
        Format::Jpeg => jpeg::decode(data),
        Format::Png => png::decode(data),
        Format::Gif => gif::decode(data),
        Format::WebP => webp::decode(data),
        Format::Tiff => tiff::decode(data),
        Format::Unknown => Err(Error::UnknownFormat),
    }
}

pub(crate) fn encode(image: &DynamicImage, format: Format, params: &Parameters) -> Result<Vec<u8>> {
    match format {
        Format::Jpeg => jpeg::encode(image, params),
        Format::Png => png::encode(image, params),
        Format::Gif => gif::encode(image, params),
        Format::WebP => webp::encode(image, params),
        Format::Tiff => tiff::encode(image, params),
        Format::Unknown => Err(Error::InvalidTargetFormat(Format::Unknown)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_is_rejected_on_both_paths() {
        assert!(matches!(
            decode(b"????", Format::Unknown),
            Err(Error::UnknownFormat)
        ));
        let image = DynamicImage::new_rgb8(4, 4);
        assert!(matches!(
            encode(&image, Format::Unknown, &Parameters::new()),
            Err(Error::InvalidTargetFormat(Format::Unknown))
        ));
    }

    #[test]
    fn encode_decode_roundtrip_each_format() {
        let image = DynamicImage::ImageRgb8(image::RgbImage::from_fn(24, 18, |x, y| {
            image::Rgb([(x * 10 % 256) as u8, (y * 10 % 256) as u8, 77])
        }));
        let params = Parameters::new();

        for format in [
            Format::Jpeg,
            Format::Png,
            Format::Gif,
            Format::WebP,
            Format::Tiff,
        ] {
            let encoded = encode(&image, format, &params).unwrap();
            assert_eq!(Format::detect(&encoded), format, "{format:?} magic bytes");
            let decoded = decode(&encoded, format).unwrap();
            assert_eq!(
                (decoded.width(), decoded.height()),
                (24, 18),
                "{format:?} dimensions"
            );
        }
    }
}
