//! # imgpress
//!
//! Image compression and conversion engine with size-targeted encoding.
//!
//! Given an encoded raster image, imgpress re-encodes it (in the same or
//! a different format) to minimize byte size under quality and size
//! constraints, with optional resizing and metadata stripping. Codec
//! internals are delegated to external encoders; this crate is the
//! decision engine: format detection, parameter handling, the
//! size-targeting quality search, and output-sink safety.
//!
//! Each operation exists in three variants: file output, caller-owned
//! fixed-capacity buffer output, and an in-memory form returning the
//! encoded bytes. Buffer outputs are never grown and never overrun; a
//! result that does not fit fails without touching the buffer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use imgpress::{Format, Parameters};
//!
//! let mut params = Parameters::new();
//! params.jpeg.quality = 75;
//!
//! // Re-encode in the detected format
//! imgpress::compress("photo.jpg", "photo-small.jpg", &params)?;
//!
//! // Convert to WebP under a 200 KB budget
//! imgpress::convert_to_size(
//!     "photo.jpg",
//!     "photo.webp",
//!     Format::WebP,
//!     &params,
//!     200_000,
//!     false,
//! )?;
//! # Ok::<(), imgpress::Error>(())
//! ```
//!
//! Operations run synchronously on the calling thread with no shared
//! mutable state; concurrent calls with independent inputs and buffers
//! are safe.

#![forbid(unsafe_code)]

mod codecs;
mod error;
mod format;
mod metadata;
mod parameters;
mod pipeline;
mod report;
mod resize;
mod search;
mod sink;

use std::path::Path;

pub use error::{Error, Result};
pub use format::Format;
pub use parameters::{
    ChromaSubsampling, GifParameters, JpegParameters, Parameters, PngParameters, TiffCompression,
    TiffDeflateLevel, TiffParameters, WebPParameters,
};
pub use report::Report;
pub use sink::OutputSink;

/// Re-encode a file in its detected format, writing to `output`.
///
/// Returns the number of bytes written.
pub fn compress(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    params: &Parameters,
) -> Result<u64> {
    let data = pipeline::read_input(input.as_ref())?;
    let format = pipeline::detect_format(&data, Some(input.as_ref()))?;
    let encoded = pipeline::transcode(&data, format, format, params)?;
    OutputSink::File(output.as_ref()).write(&encoded)
}

/// Re-encode a file in its detected format into a caller-owned buffer.
///
/// Returns the number of bytes written. Fails with
/// [`Error::BufferTooSmall`] when the result does not fit, leaving the
/// buffer untouched.
pub fn compress_into(
    input: impl AsRef<Path>,
    output_buffer: &mut [u8],
    params: &Parameters,
) -> Result<u64> {
    let data = pipeline::read_input(input.as_ref())?;
    let format = pipeline::detect_format(&data, Some(input.as_ref()))?;
    let encoded = pipeline::transcode(&data, format, format, params)?;
    OutputSink::Buffer(output_buffer).write(&encoded)
}

/// Re-encode an in-memory image in its detected format into a
/// caller-owned buffer.
pub fn compress_from_slice(
    input: &[u8],
    output_buffer: &mut [u8],
    params: &Parameters,
) -> Result<u64> {
    let encoded = compress_in_memory(input, params)?;
    OutputSink::Buffer(output_buffer).write(&encoded)
}

/// Re-encode an in-memory image in its detected format.
pub fn compress_in_memory(input: &[u8], params: &Parameters) -> Result<Vec<u8>> {
    let format = pipeline::detect_format(input, None)?;
    pipeline::transcode(input, format, format, params)
}

/// Re-encode a file in its detected format at the highest quality whose
/// result is at most `max_output_size` bytes.
///
/// With `return_smallest` set, an unreachable budget still produces the
/// smallest achievable encoding; otherwise it fails with
/// [`Error::SizeTargetUnreachable`] and nothing is written.
pub fn compress_to_size(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    params: &Parameters,
    max_output_size: usize,
    return_smallest: bool,
) -> Result<u64> {
    let data = pipeline::read_input(input.as_ref())?;
    let format = pipeline::detect_format(&data, Some(input.as_ref()))?;
    let encoded = pipeline::transcode_to_size(
        &data,
        format,
        format,
        params,
        max_output_size,
        return_smallest,
    )?;
    OutputSink::File(output.as_ref()).write(&encoded)
}

/// Size-targeted variant of [`compress_into`].
///
/// The buffer capacity is enforced independently of the size target:
/// a result that does not fit the buffer is always
/// [`Error::BufferTooSmall`], regardless of `return_smallest`.
pub fn compress_to_size_into(
    input: impl AsRef<Path>,
    output_buffer: &mut [u8],
    params: &Parameters,
    max_output_size: usize,
    return_smallest: bool,
) -> Result<u64> {
    let data = pipeline::read_input(input.as_ref())?;
    let format = pipeline::detect_format(&data, Some(input.as_ref()))?;
    let encoded = pipeline::transcode_to_size(
        &data,
        format,
        format,
        params,
        max_output_size,
        return_smallest,
    )?;
    OutputSink::Buffer(output_buffer).write(&encoded)
}

/// Size-targeted variant of [`compress_from_slice`].
pub fn compress_to_size_from_slice(
    input: &[u8],
    output_buffer: &mut [u8],
    params: &Parameters,
    max_output_size: usize,
    return_smallest: bool,
) -> Result<u64> {
    let encoded = compress_to_size_in_memory(input, params, max_output_size, return_smallest)?;
    OutputSink::Buffer(output_buffer).write(&encoded)
}

/// Size-targeted variant of [`compress_in_memory`].
pub fn compress_to_size_in_memory(
    input: &[u8],
    params: &Parameters,
    max_output_size: usize,
    return_smallest: bool,
) -> Result<Vec<u8>> {
    let format = pipeline::detect_format(input, None)?;
    pipeline::transcode_to_size(input, format, format, params, max_output_size, return_smallest)
}

/// Re-encode a file to an explicitly requested format.
///
/// Cross-format conversion is always allowed, including converting to
/// the detected format (a plain re-encode). [`Format::Unknown`] is never
/// a valid target.
pub fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    target: Format,
    params: &Parameters,
) -> Result<u64> {
    pipeline::validate_target(target)?;
    let data = pipeline::read_input(input.as_ref())?;
    let source = pipeline::detect_format(&data, Some(input.as_ref()))?;
    let encoded = pipeline::transcode(&data, source, target, params)?;
    OutputSink::File(output.as_ref()).write(&encoded)
}

/// Convert a file into a caller-owned buffer.
pub fn convert_into(
    input: impl AsRef<Path>,
    output_buffer: &mut [u8],
    target: Format,
    params: &Parameters,
) -> Result<u64> {
    pipeline::validate_target(target)?;
    let data = pipeline::read_input(input.as_ref())?;
    let source = pipeline::detect_format(&data, Some(input.as_ref()))?;
    let encoded = pipeline::transcode(&data, source, target, params)?;
    OutputSink::Buffer(output_buffer).write(&encoded)
}

/// Convert an in-memory image into a caller-owned buffer.
pub fn convert_from_slice(
    input: &[u8],
    output_buffer: &mut [u8],
    target: Format,
    params: &Parameters,
) -> Result<u64> {
    let encoded = convert_in_memory(input, target, params)?;
    OutputSink::Buffer(output_buffer).write(&encoded)
}

/// Convert an in-memory image to an explicitly requested format.
pub fn convert_in_memory(input: &[u8], target: Format, params: &Parameters) -> Result<Vec<u8>> {
    pipeline::validate_target(target)?;
    let source = pipeline::detect_format(input, None)?;
    pipeline::transcode(input, source, target, params)
}

/// Convert a file to `target` at the highest quality whose result is at
/// most `max_output_size` bytes. See [`compress_to_size`] for the
/// `return_smallest` policy.
pub fn convert_to_size(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    target: Format,
    params: &Parameters,
    max_output_size: usize,
    return_smallest: bool,
) -> Result<u64> {
    pipeline::validate_target(target)?;
    let data = pipeline::read_input(input.as_ref())?;
    let source = pipeline::detect_format(&data, Some(input.as_ref()))?;
    let encoded = pipeline::transcode_to_size(
        &data,
        source,
        target,
        params,
        max_output_size,
        return_smallest,
    )?;
    OutputSink::File(output.as_ref()).write(&encoded)
}

/// Size-targeted variant of [`convert_into`].
pub fn convert_to_size_into(
    input: impl AsRef<Path>,
    output_buffer: &mut [u8],
    target: Format,
    params: &Parameters,
    max_output_size: usize,
    return_smallest: bool,
) -> Result<u64> {
    pipeline::validate_target(target)?;
    let data = pipeline::read_input(input.as_ref())?;
    let source = pipeline::detect_format(&data, Some(input.as_ref()))?;
    let encoded = pipeline::transcode_to_size(
        &data,
        source,
        target,
        params,
        max_output_size,
        return_smallest,
    )?;
    OutputSink::Buffer(output_buffer).write(&encoded)
}

/// Size-targeted variant of [`convert_from_slice`].
pub fn convert_to_size_from_slice(
    input: &[u8],
    output_buffer: &mut [u8],
    target: Format,
    params: &Parameters,
    max_output_size: usize,
    return_smallest: bool,
) -> Result<u64> {
    let encoded =
        convert_to_size_in_memory(input, target, params, max_output_size, return_smallest)?;
    OutputSink::Buffer(output_buffer).write(&encoded)
}

/// Size-targeted variant of [`convert_in_memory`].
pub fn convert_to_size_in_memory(
    input: &[u8],
    target: Format,
    params: &Parameters,
    max_output_size: usize,
    return_smallest: bool,
) -> Result<Vec<u8>> {
    pipeline::validate_target(target)?;
    let source = pipeline::detect_format(input, None)?;
    pipeline::transcode_to_size(input, source, target, params, max_output_size, return_smallest)
}
