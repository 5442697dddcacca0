//! Size-targeting search over a format's quality domain.
//!
//! There is no closed-form mapping from a quality setting to an encoded
//! size, so meeting a byte budget means probing the encoder. The search
//! binary-searches the quality range for the highest quality whose output
//! fits the budget, bounded by O(log(range)) encode calls.
//!
//! The search assumes encoded size is non-increasing as quality
//! decreases. That holds for the DCT- and prediction-based encoders here;
//! palette quantization (GIF, lossy PNG) can violate it occasionally, in
//! which case the search terminates on a locally-best rather than
//! globally-best quality. This is a known limitation, not detected at
//! runtime.

use core::ops::RangeInclusive;

use log::{debug, warn};

use crate::error::{Error, Result};

/// A successful search result.
#[derive(Debug)]
pub(crate) struct SearchOutcome {
    /// The winning encoding.
    pub data: Vec<u8>,
    /// The quality it was produced at.
    pub quality: u32,
    /// False only when the return-smallest fallback delivered an encoding
    /// that exceeds the budget.
    pub within_budget: bool,
}

/// Find the highest quality in `domain` whose encoding fits
/// `max_output_size`.
///
/// The first probe is at `start_quality` (clamped into the domain); if it
/// already fits, it is returned as-is since quality is never raised above
/// the caller's request. Otherwise the search walks downward. When no
/// probed quality fits, `return_smallest` selects between delivering the
/// smallest encoding observed (flagged via
/// [`SearchOutcome::within_budget`]) and failing with
/// [`Error::SizeTargetUnreachable`].
pub(crate) fn search_to_size<F>(
    mut encode_at: F,
    start_quality: u32,
    domain: RangeInclusive<u32>,
    max_output_size: usize,
    return_smallest: bool,
) -> Result<SearchOutcome>
where
    F: FnMut(u32) -> Result<Vec<u8>>,
{
    let min_quality = *domain.start();
    let start = start_quality.clamp(min_quality, *domain.end());

    let first = encode_at(start)?;
    debug!(
        "size-target probe: quality {} -> {} bytes (budget {})",
        start,
        first.len(),
        max_output_size
    );
    if first.len() <= max_output_size {
        return Ok(SearchOutcome {
            data: first,
            quality: start,
            within_budget: true,
        });
    }

    let mut smallest = first;
    let mut smallest_quality = start;
    let mut best: Option<(Vec<u8>, u32)> = None;

    let mut low = min_quality;
    let mut high = start.saturating_sub(1);
    while low <= high {
        let mid = low + (high - low) / 2;
        let attempt = encode_at(mid)?;
        debug!(
            "size-target probe: quality {} -> {} bytes (budget {})",
            mid,
            attempt.len(),
            max_output_size
        );
        if attempt.len() <= max_output_size {
            best = Some((attempt, mid));
            low = mid + 1;
        } else {
            if attempt.len() < smallest.len() {
                smallest = attempt;
                smallest_quality = mid;
            }
            match mid.checked_sub(1) {
                Some(next) => high = next,
                None => break,
            }
        }
    }

    if let Some((data, quality)) = best {
        return Ok(SearchOutcome {
            data,
            quality,
            within_budget: true,
        });
    }

    if return_smallest {
        warn!(
            "size target of {} bytes unreachable; returning smallest encoding ({} bytes at quality {})",
            max_output_size,
            smallest.len(),
            smallest_quality
        );
        Ok(SearchOutcome {
            data: smallest,
            quality: smallest_quality,
            within_budget: false,
        })
    } else {
        Err(Error::SizeTargetUnreachable {
            max_output_size,
            smallest: smallest.len(),
        })
    }
}
