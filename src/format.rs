//! Image format detection and per-format capabilities.

use core::ops::RangeInclusive;

/// Supported image formats.
///
/// `Unknown` is what detection yields when nothing matches; it is never a
/// valid conversion target.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Jpeg,
    Png,
    Gif,
    WebP,
    Tiff,
    Unknown,
}

impl Format {
    /// Detect format from magic bytes.
    ///
    /// Checks the first few bytes of the data for known format signatures
    /// and returns [`Format::Unknown`] rather than failing, so callers
    /// decide whether an unrecognized input is an error.
    pub fn detect(data: &[u8]) -> Self {
        // JPEG: FF D8 FF
        if data.len() >= 3 && data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF {
            return Format::Jpeg;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.len() >= 8 && data[..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }

        // GIF: "GIF87a" or "GIF89a"
        if data.len() >= 6
            && &data[..4] == b"GIF8"
            && (data[4] == b'7' || data[4] == b'9')
            && data[5] == b'a'
        {
            return Format::Gif;
        }

        // WebP: "RIFF....WEBP"
        if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Format::WebP;
        }

        // TIFF: "II*\0" (little endian) or "MM\0*" (big endian)
        if data.len() >= 4 && (&data[..4] == b"II\x2A\x00" || &data[..4] == b"MM\x00\x2A") {
            return Format::Tiff;
        }

        Format::Unknown
    }

    /// Detect format from file extension (case-insensitive).
    ///
    /// Used as a fallback when magic-byte sniffing is inconclusive.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "jpe" | "jfif" => Format::Jpeg,
            "png" => Format::Png,
            "gif" => Format::Gif,
            "webp" => Format::WebP,
            "tif" | "tiff" => Format::Tiff,
            _ => Format::Unknown,
        }
    }

    /// MIME type string.
    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Jpeg => "image/jpeg",
            Format::Png => "image/png",
            Format::Gif => "image/gif",
            Format::WebP => "image/webp",
            Format::Tiff => "image/tiff",
            Format::Unknown => "application/octet-stream",
        }
    }

    /// Common file extensions, primary first.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::Jpeg => &["jpg", "jpeg", "jpe", "jfif"],
            Format::Png => &["png"],
            Format::Gif => &["gif"],
            Format::WebP => &["webp"],
            Format::Tiff => &["tif", "tiff"],
            Format::Unknown => &[],
        }
    }

    /// The ordered scalar quality range the size-targeting search may
    /// probe for this format, lowest fidelity first.
    ///
    /// `None` means the format has no scalar quality knob (TIFF's
    /// compression choice is categorical); size targeting then degrades
    /// to a single probe at the configured parameters.
    pub fn quality_domain(self) -> Option<RangeInclusive<u32>> {
        match self {
            Format::Jpeg | Format::Png | Format::Gif | Format::WebP => Some(1..=100),
            Format::Tiff | Format::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_jpeg() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(Format::detect(&data), Format::Jpeg);
    }

    #[test]
    fn detect_png() {
        let data = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
        ];
        assert_eq!(Format::detect(&data), Format::Png);
    }

    #[test]
    fn detect_gif() {
        assert_eq!(Format::detect(b"GIF89a\x00\x00\x00\x00\x00\x00"), Format::Gif);
        assert_eq!(Format::detect(b"GIF87a\x00\x00\x00\x00\x00\x00"), Format::Gif);
    }

    #[test]
    fn detect_webp() {
        let data = b"RIFF\x00\x00\x00\x00WEBP";
        assert_eq!(Format::detect(data), Format::WebP);
    }

    #[test]
    fn detect_tiff_both_byte_orders() {
        assert_eq!(Format::detect(b"II\x2A\x00\x08\x00\x00\x00"), Format::Tiff);
        assert_eq!(Format::detect(b"MM\x00\x2A\x00\x00\x00\x08"), Format::Tiff);
    }

    #[test]
    fn detect_too_short() {
        let data = [0xFF, 0xD8];
        assert_eq!(Format::detect(&data), Format::Unknown);
    }

    #[test]
    fn detect_garbage() {
        assert_eq!(Format::detect(b"not an image at all"), Format::Unknown);
    }

    #[test]
    fn from_extension_case_insensitive() {
        assert_eq!(Format::from_extension("JPG"), Format::Jpeg);
        assert_eq!(Format::from_extension("WebP"), Format::WebP);
        assert_eq!(Format::from_extension("TIFF"), Format::Tiff);
        assert_eq!(Format::from_extension("bmp"), Format::Unknown);
    }

    #[test]
    fn quality_domains() {
        assert_eq!(Format::Jpeg.quality_domain(), Some(1..=100));
        assert_eq!(Format::Tiff.quality_domain(), None);
        assert_eq!(Format::Unknown.quality_domain(), None);
    }
}
