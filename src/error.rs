//! Unified error type for compression operations.

use core::fmt;
use std::io;

use thiserror::Error;

use crate::format::Format;

pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for compression, conversion and output operations.
///
/// Every failure carries a stable numeric code (see [`Error::code`]) so
/// hosts that consume the flat [`Report`](crate::Report) contract can
/// classify failures without parsing messages.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Input file missing or unreadable.
    #[error("input not readable: {0}")]
    InputUnreadable(String),
    /// Filesystem failure while writing output.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// Input format not recognized from magic bytes or extension.
    #[error("unknown or unsupported image format")]
    UnknownFormat,
    /// Requested conversion target is not encodable.
    #[error("{0:?} is not a valid conversion target")]
    InvalidTargetFormat(Format),
    /// Malformed input data.
    #[error("decode failed ({format:?}): {message}")]
    Decode { format: Format, message: String },
    /// Invalid resize target.
    #[error("resize failed: {0}")]
    Resize(String),
    /// Codec-level encoding failure.
    #[error("encode failed ({format:?}): {message}")]
    Encode { format: Format, message: String },
    /// Caller-supplied output buffer cannot hold the encoded result.
    #[error("output buffer too small: need {needed} bytes, capacity is {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
    /// The size-targeting search exhausted the quality domain without
    /// meeting the budget and the caller did not opt into the smallest
    /// encoding.
    #[error("no quality setting produces at most {max_output_size} bytes (smallest attempt: {smallest} bytes)")]
    SizeTargetUnreachable {
        max_output_size: usize,
        smallest: usize,
    },
}

impl Error {
    /// Stable numeric classification, grouped by pipeline stage.
    pub fn code(&self) -> u64 {
        match self {
            Error::InputUnreadable(_) => 10100,
            Error::Io(_) => 10101,
            Error::UnknownFormat => 10200,
            Error::InvalidTargetFormat(_) => 10201,
            Error::Decode { .. } => 10300,
            Error::Resize(_) => 10301,
            Error::Encode { .. } => 10400,
            Error::BufferTooSmall { .. } => 10500,
            Error::SizeTargetUnreachable { .. } => 10600,
        }
    }

    pub(crate) fn decode(format: Format, err: impl fmt::Display) -> Self {
        Error::Decode {
            format,
            message: err.to_string(),
        }
    }

    pub(crate) fn encode(format: Format, err: impl fmt::Display) -> Self {
        Error::Encode {
            format,
            message: err.to_string(),
        }
    }
}
