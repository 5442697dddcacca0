//! Shared palette quantization for the lossy PNG and GIF paths.

use crate::error::{Error, Result};
use crate::format::Format;

/// Quantize an RGBA8 buffer to a palette and remap it back to RGBA8.
///
/// Quality follows the imagequant scale: at 100 the palette is as
/// faithful as 256 colors allow, lower values trade colors for size.
pub(crate) fn quantize_rgba(
    rgba: &[u8],
    width: usize,
    height: usize,
    quality: u8,
    format: Format,
) -> Result<Vec<u8>> {
    let pixels: Vec<imagequant::RGBA> = bytemuck::cast_slice::<u8, rgb::RGBA8>(rgba).to_vec();

    let mut attributes = imagequant::Attributes::new();
    attributes
        .set_quality(0, quality)
        .map_err(|e| Error::encode(format, e))?;

    let mut image = attributes
        .new_image(pixels, width, height, 0.0)
        .map_err(|e| Error::encode(format, e))?;
    let mut quantized = attributes
        .quantize(&mut image)
        .map_err(|e| Error::encode(format, e))?;
    quantized
        .set_dithering_level(1.0)
        .map_err(|e| Error::encode(format, e))?;

    let (palette, indices) = quantized
        .remapped(&mut image)
        .map_err(|e| Error::encode(format, e))?;

    let mut out = Vec::with_capacity(indices.len() * 4);
    for index in indices {
        let p = palette[index as usize];
        out.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }
    Ok(out)
}
