//! JPEG codec adapter backed by mozjpeg.

use image::DynamicImage;
use mozjpeg::{ColorSpace, Compress, ScanMode};

use crate::error::{Error, Result};
use crate::format::Format;
use crate::parameters::{ChromaSubsampling, Parameters};

pub(crate) fn decode(data: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
        .map_err(|e| Error::decode(Format::Jpeg, e))
}

/// Encode to JPEG at the configured quality.
///
/// `optimize` additionally enables per-image Huffman tables and scan
/// optimization. Alpha is discarded.
pub(crate) fn encode(image: &DynamicImage, params: &Parameters) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let quality = params.jpeg.quality.clamp(1, 100) as f32;

    let mut compress = Compress::new(ColorSpace::JCS_RGB);
    compress.set_size(width as usize, height as usize);
    compress.set_quality(quality);

    if let Some((h, v)) = chroma_pixel_sizes(params.jpeg.chroma_subsampling) {
        compress.set_chroma_sampling_pixel_sizes((h, v), (h, v));
    }
    if params.jpeg.progressive {
        compress.set_progressive_mode();
    }
    if params.optimize {
        compress.set_optimize_coding(true);
        compress.set_optimize_scans(true);
        compress.set_scan_optimization_mode(ScanMode::AllComponentsTogether);
    }

    // rough guess to avoid repeated growth; typical photos land well below
    let estimate = (width as usize * height as usize * 3 / 10).max(4096);
    let mut output = Vec::with_capacity(estimate);

    let mut writer = compress
        .start_compress(&mut output)
        .map_err(|e| Error::encode(Format::Jpeg, e))?;

    let stride = width as usize * 3;
    for row in rgb.as_raw().chunks(stride) {
        writer
            .write_scanlines(row)
            .map_err(|e| Error::encode(Format::Jpeg, e))?;
    }
    writer
        .finish()
        .map_err(|e| Error::encode(Format::Jpeg, e))?;

    Ok(output)
}

/// Chroma "pixel" dimensions for mozjpeg, or None for encoder default.
fn chroma_pixel_sizes(mode: ChromaSubsampling) -> Option<(u8, u8)> {
    match mode {
        ChromaSubsampling::Auto => None,
        ChromaSubsampling::Cs444 => Some((1, 1)),
        ChromaSubsampling::Cs422 => Some((2, 1)),
        ChromaSubsampling::Cs420 => Some((2, 2)),
        ChromaSubsampling::Cs411 => Some((4, 1)),
    }
}
