//! EXIF/ICC transfer between input and output containers.
//!
//! JPEG, PNG and WebP carry transferable metadata blocks; GIF and TIFF
//! outputs do not participate. Extraction is best-effort (a container we
//! cannot parse simply yields no blocks), embedding failures are typed
//! encode errors.

use img_parts::jpeg::Jpeg;
use img_parts::png::Png;
use img_parts::webp::WebP;
use img_parts::{Bytes, ImageEXIF, ImageICC};

use crate::error::{Error, Result};
use crate::format::Format;

#[derive(Default)]
pub(crate) struct MetadataBlocks {
    icc: Option<Bytes>,
    exif: Option<Bytes>,
}

impl MetadataBlocks {
    fn is_empty(&self) -> bool {
        self.icc.is_none() && self.exif.is_none()
    }
}

/// Pull EXIF and ICC blocks out of the original encoded input.
pub(crate) fn extract(data: &[u8], format: Format) -> MetadataBlocks {
    let bytes = Bytes::copy_from_slice(data);
    match format {
        Format::Jpeg => Jpeg::from_bytes(bytes)
            .map(|container| MetadataBlocks {
                icc: container.icc_profile(),
                exif: container.exif(),
            })
            .unwrap_or_default(),
        Format::Png => Png::from_bytes(bytes)
            .map(|container| MetadataBlocks {
                icc: container.icc_profile(),
                exif: container.exif(),
            })
            .unwrap_or_default(),
        Format::WebP => WebP::from_bytes(bytes)
            .map(|container| MetadataBlocks {
                icc: container.icc_profile(),
                exif: container.exif(),
            })
            .unwrap_or_default(),
        Format::Gif | Format::Tiff | Format::Unknown => MetadataBlocks::default(),
    }
}

/// Re-embed previously extracted blocks into a freshly encoded output.
pub(crate) fn embed(encoded: Vec<u8>, format: Format, blocks: &MetadataBlocks) -> Result<Vec<u8>> {
    if blocks.is_empty() {
        return Ok(encoded);
    }
    match format {
        Format::Jpeg => {
            let mut container =
                Jpeg::from_bytes(encoded.into()).map_err(|e| Error::encode(format, e))?;
            container.set_icc_profile(blocks.icc.clone());
            container.set_exif(blocks.exif.clone());
            let mut out = Vec::new();
            container
                .encoder()
                .write_to(&mut out)
                .map_err(|e| Error::encode(format, e))?;
            Ok(out)
        }
        Format::Png => {
            let mut container =
                Png::from_bytes(encoded.into()).map_err(|e| Error::encode(format, e))?;
            container.set_icc_profile(blocks.icc.clone());
            container.set_exif(blocks.exif.clone());
            let mut out = Vec::new();
            container
                .encoder()
                .write_to(&mut out)
                .map_err(|e| Error::encode(format, e))?;
            Ok(out)
        }
        Format::WebP => {
            let mut container =
                WebP::from_bytes(encoded.into()).map_err(|e| Error::encode(format, e))?;
            container.set_icc_profile(blocks.icc.clone());
            container.set_exif(blocks.exif.clone());
            let mut out = Vec::new();
            container
                .encoder()
                .write_to(&mut out)
                .map_err(|e| Error::encode(format, e))?;
            Ok(out)
        }
        Format::Gif | Format::Tiff | Format::Unknown => Ok(encoded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXIF_STUB: &[u8] = b"II\x2A\x00\x08\x00\x00\x00fake-exif-payload";

    fn tiny_jpeg() -> Vec<u8> {
        let image = image::DynamicImage::new_rgb8(8, 8);
        let mut out = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Jpeg)
            .unwrap();
        out
    }

    #[test]
    fn extract_from_plain_jpeg_is_empty() {
        let blocks = extract(&tiny_jpeg(), Format::Jpeg);
        assert!(blocks.is_empty());
    }

    #[test]
    fn jpeg_exif_roundtrip() {
        let mut tagged = Jpeg::from_bytes(tiny_jpeg().into()).unwrap();
        tagged.set_exif(Some(Bytes::copy_from_slice(EXIF_STUB)));
        let mut source = Vec::new();
        tagged.encoder().write_to(&mut source).unwrap();

        let blocks = extract(&source, Format::Jpeg);
        assert!(!blocks.is_empty());

        let output = embed(tiny_jpeg(), Format::Jpeg, &blocks).unwrap();
        let reread = Jpeg::from_bytes(output.into()).unwrap();
        assert_eq!(reread.exif().as_deref(), Some(EXIF_STUB));
    }

    #[test]
    fn embed_without_blocks_is_identity() {
        let encoded = tiny_jpeg();
        let output = embed(encoded.clone(), Format::Jpeg, &MetadataBlocks::default()).unwrap();
        assert_eq!(output, encoded);
    }

    #[test]
    fn gif_and_tiff_pass_through() {
        let blocks = MetadataBlocks {
            icc: Some(Bytes::from_static(b"icc")),
            exif: None,
        };
        let data = vec![1, 2, 3];
        assert_eq!(embed(data.clone(), Format::Gif, &blocks).unwrap(), data);
        assert_eq!(embed(data.clone(), Format::Tiff, &blocks).unwrap(), data);
    }
}
