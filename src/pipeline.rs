//! Transcoding pipeline: detect, decode, resize, encode, size-target.
//!
//! The facade functions in the crate root are thin wrappers over this
//! module plus an [`OutputSink`](crate::OutputSink). Everything here is
//! in-memory; nothing touches the output target until a complete encoded
//! result exists.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::format::Format;
use crate::parameters::Parameters;
use crate::{codecs, metadata, resize, search};

/// Read an input file, mapping failures to the input-stage error.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::InputUnreadable(format!("{}: {e}", path.display())))
}

/// Detect the input format from magic bytes, falling back to the file
/// extension only when sniffing is inconclusive.
pub(crate) fn detect_format(data: &[u8], path: Option<&Path>) -> Result<Format> {
    let format = Format::detect(data);
    if format != Format::Unknown {
        return Ok(format);
    }
    let from_extension = path
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(Format::from_extension)
        .unwrap_or(Format::Unknown);
    if from_extension == Format::Unknown {
        return Err(Error::UnknownFormat);
    }
    debug!("magic sniffing inconclusive, trusting extension: {from_extension:?}");
    Ok(from_extension)
}

/// Reject invalid conversion targets before any expensive work.
pub(crate) fn validate_target(target: Format) -> Result<()> {
    if target == Format::Unknown {
        return Err(Error::InvalidTargetFormat(target));
    }
    Ok(())
}

/// Decode, optionally resize, re-encode, and transfer metadata.
pub(crate) fn transcode(
    data: &[u8],
    source: Format,
    target: Format,
    params: &Parameters,
) -> Result<Vec<u8>> {
    debug!(
        "transcoding {source:?} -> {target:?} ({} bytes in)",
        data.len()
    );

    let mut image = codecs::decode(data, source)?;
    if params.wants_resize() {
        image = resize::resize(image, params)?;
    }

    let mut encoded = codecs::encode(&image, target, params)?;
    if params.keep_metadata {
        let blocks = metadata::extract(data, source);
        encoded = metadata::embed(encoded, target, &blocks)?;
    }

    debug!("transcoded to {} bytes", encoded.len());
    Ok(encoded)
}

/// Transcode under a byte budget via the size-targeting search.
///
/// Formats without a scalar quality domain get a single probe at the
/// configured parameters, with the same return-smallest policy applied
/// to its result.
pub(crate) fn transcode_to_size(
    data: &[u8],
    source: Format,
    target: Format,
    params: &Parameters,
    max_output_size: usize,
    return_smallest: bool,
) -> Result<Vec<u8>> {
    let Some(domain) = target.quality_domain() else {
        let encoded = transcode(data, source, target, params)?;
        if encoded.len() <= max_output_size {
            return Ok(encoded);
        }
        if return_smallest {
            warn!(
                "size target of {max_output_size} bytes unreachable for {target:?}; returning {} bytes",
                encoded.len()
            );
            return Ok(encoded);
        }
        return Err(Error::SizeTargetUnreachable {
            max_output_size,
            smallest: encoded.len(),
        });
    };

    let start_quality = params.quality_for(target);
    let outcome = search::search_to_size(
        |quality| {
            let mut attempt = params.clone();
            attempt.set_quality_for(target, quality);
            transcode(data, source, target, &attempt)
        },
        start_quality,
        domain,
        max_output_size,
        return_smallest,
    )?;

    debug!(
        "size target {} bytes: settled on quality {} ({} bytes, within budget: {})",
        max_output_size,
        outcome.quality,
        outcome.data.len(),
        outcome.within_budget
    );
    Ok(outcome.data)
}
