//! Compression parameters.
//!
//! One [`Parameters`] value bundles the per-format knobs plus the options
//! shared by every format (metadata handling, optimization, resize
//! targets). Only the sub-struct matching the active output format is
//! consulted during an operation; the others are ignored. Out-of-range
//! values are clamped to their documented domain at the point of use
//! rather than rejected.

use crate::format::Format;

/// JPEG chroma subsampling modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChromaSubsampling {
    /// Let the encoder choose.
    #[default]
    Auto,
    /// 4:4:4, full chroma resolution.
    Cs444,
    /// 4:2:2, half horizontal chroma resolution.
    Cs422,
    /// 4:2:0, quarter chroma resolution.
    Cs420,
    /// 4:1:1, quarter horizontal chroma resolution.
    Cs411,
}

/// TIFF compression algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TiffCompression {
    #[default]
    Uncompressed,
    Lzw,
    Deflate,
    Packbits,
}

/// Deflate effort for TIFF `Deflate` compression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TiffDeflateLevel {
    Fast,
    Balanced,
    #[default]
    Best,
}

/// JPEG-specific options.
#[derive(Clone, Debug)]
pub struct JpegParameters {
    /// Quality, 1-100.
    pub quality: u32,
    pub chroma_subsampling: ChromaSubsampling,
    /// Emit a progressive scan script.
    pub progressive: bool,
}

impl Default for JpegParameters {
    fn default() -> Self {
        Self {
            quality: 80,
            chroma_subsampling: ChromaSubsampling::Auto,
            progressive: true,
        }
    }
}

/// PNG-specific options.
#[derive(Clone, Debug)]
pub struct PngParameters {
    /// Quality, 1-100. Below 100 the image is palette-quantized (lossy)
    /// unless `optimize` is set on [`Parameters`].
    pub quality: u32,
    /// Lossless optimization effort, 0-6.
    pub optimization_level: u8,
    /// Use the zopfli deflater during the optimization pass. Much slower,
    /// slightly smaller output. Only honored when `optimize` is set.
    pub force_zopfli: bool,
}

impl Default for PngParameters {
    fn default() -> Self {
        Self {
            quality: 80,
            optimization_level: 3,
            force_zopfli: false,
        }
    }
}

/// GIF-specific options.
#[derive(Clone, Debug)]
pub struct GifParameters {
    /// Quality, 1-100. Below 100 the palette is re-quantized.
    pub quality: u32,
}

impl Default for GifParameters {
    fn default() -> Self {
        Self { quality: 80 }
    }
}

/// WebP-specific options.
#[derive(Clone, Debug)]
pub struct WebPParameters {
    /// Quality, 1-100.
    pub quality: u32,
}

impl Default for WebPParameters {
    fn default() -> Self {
        Self { quality: 60 }
    }
}

/// TIFF-specific options.
#[derive(Clone, Debug, Default)]
pub struct TiffParameters {
    pub algorithm: TiffCompression,
    /// Only consulted when `algorithm` is [`TiffCompression::Deflate`].
    pub deflate_level: TiffDeflateLevel,
}

/// Full option set for a compression or conversion operation.
#[derive(Clone, Debug, Default)]
pub struct Parameters {
    pub jpeg: JpegParameters,
    pub png: PngParameters,
    pub gif: GifParameters,
    pub webp: WebPParameters,
    pub tiff: TiffParameters,
    /// Carry EXIF and ICC blocks from the input over to the output
    /// (JPEG, PNG and WebP). Off by default: metadata is stripped.
    pub keep_metadata: bool,
    /// Enable the format-specific lossless optimization pass: optimized
    /// Huffman tables and scan order for JPEG, an oxipng pass for PNG,
    /// lossless mode for WebP.
    pub optimize: bool,
    /// Resize target width in pixels. 0 means unset; if only one of
    /// width/height is set the other is derived from the aspect ratio.
    pub width: u32,
    /// Resize target height in pixels. 0 means unset.
    pub height: u32,
    /// Allow the resize stage to upscale. When false, a computed target
    /// larger than the source leaves the image untouched.
    pub allow_magnify: bool,
    /// Size the shorter image side to this many pixels, deriving the
    /// other side from the aspect ratio. 0 means unset. Ignored when
    /// `width` or `height` is set.
    pub short_side_pixels: u32,
    /// Size the longer image side to this many pixels. 0 means unset.
    /// Ignored when `width`, `height` or `short_side_pixels` is set.
    pub long_side_pixels: u32,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// The quality knob for the given output format.
    pub(crate) fn quality_for(&self, format: Format) -> u32 {
        match format {
            Format::Jpeg => self.jpeg.quality,
            Format::Png => self.png.quality,
            Format::Gif => self.gif.quality,
            Format::WebP => self.webp.quality,
            Format::Tiff | Format::Unknown => 0,
        }
    }

    /// Override the quality knob for the given output format.
    pub(crate) fn set_quality_for(&mut self, format: Format, quality: u32) {
        match format {
            Format::Jpeg => self.jpeg.quality = quality,
            Format::Png => self.png.quality = quality,
            Format::Gif => self.gif.quality = quality,
            Format::WebP => self.webp.quality = quality,
            Format::Tiff | Format::Unknown => {}
        }
    }

    pub(crate) fn wants_resize(&self) -> bool {
        self.width > 0 || self.height > 0 || self.short_side_pixels > 0 || self.long_side_pixels > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = Parameters::new();
        assert_eq!(params.jpeg.quality, 80);
        assert!(params.jpeg.progressive);
        assert_eq!(params.jpeg.chroma_subsampling, ChromaSubsampling::Auto);
        assert_eq!(params.png.optimization_level, 3);
        assert_eq!(params.webp.quality, 60);
        assert_eq!(params.tiff.algorithm, TiffCompression::Uncompressed);
        assert!(!params.keep_metadata);
        assert!(!params.optimize);
        assert!(!params.wants_resize());
    }

    #[test]
    fn quality_roundtrip_per_format() {
        let mut params = Parameters::new();
        for format in [Format::Jpeg, Format::Png, Format::Gif, Format::WebP] {
            params.set_quality_for(format, 42);
            assert_eq!(params.quality_for(format), 42);
        }
        // TIFF has no scalar quality; setting is a no-op
        params.set_quality_for(Format::Tiff, 42);
        assert_eq!(params.quality_for(Format::Tiff), 0);
    }

    #[test]
    fn resize_detection() {
        let mut params = Parameters::new();
        params.width = 640;
        assert!(params.wants_resize());

        let mut params = Parameters::new();
        params.short_side_pixels = 1080;
        assert!(params.wants_resize());
    }
}
