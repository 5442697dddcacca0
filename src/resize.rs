//! Pre-encode resize stage.
//!
//! Runs after decode and before encode. Targets come from
//! [`Parameters`]: explicit width/height (one side may be derived from
//! the aspect ratio), or short/long-side pixel counts.

use image::DynamicImage;
use image::imageops::FilterType;
use log::debug;

use crate::error::{Error, Result};
use crate::parameters::Parameters;

/// Apply the configured resize, if any.
///
/// Returns the input unchanged when no target is configured, or when the
/// computed target would upscale and `allow_magnify` is off.
pub(crate) fn resize(image: DynamicImage, params: &Parameters) -> Result<DynamicImage> {
    let (desired_width, desired_height) =
        requested_dimensions(image.width(), image.height(), params);
    if desired_width == 0 && desired_height == 0 {
        return Ok(image);
    }

    let (width, height) =
        compute_dimensions(image.width(), image.height(), desired_width, desired_height);
    if width == 0 || height == 0 {
        return Err(Error::Resize(format!(
            "target dimensions {width}x{height} are not usable"
        )));
    }

    if !params.allow_magnify && (width > image.width() || height > image.height()) {
        debug!(
            "skipping resize to {}x{}: would magnify {}x{}",
            width,
            height,
            image.width(),
            image.height()
        );
        return Ok(image);
    }

    debug!(
        "resizing {}x{} -> {}x{}",
        image.width(),
        image.height(),
        width,
        height
    );
    Ok(image.resize_exact(width, height, FilterType::Lanczos3))
}

/// Translate the parameter set into a width/height target.
///
/// Explicit width/height win; otherwise a short-side target pins the
/// smaller source dimension, and a long-side target the larger one. The
/// unset side stays 0 and is derived by [`compute_dimensions`].
fn requested_dimensions(source_width: u32, source_height: u32, params: &Parameters) -> (u32, u32) {
    if params.width > 0 || params.height > 0 {
        return (params.width, params.height);
    }
    if params.short_side_pixels > 0 {
        return if source_width <= source_height {
            (params.short_side_pixels, 0)
        } else {
            (0, params.short_side_pixels)
        };
    }
    if params.long_side_pixels > 0 {
        return if source_width >= source_height {
            (params.long_side_pixels, 0)
        } else {
            (0, params.long_side_pixels)
        };
    }
    (0, 0)
}

/// Resolve a partially-specified target against the source aspect ratio.
///
/// Both sides given: taken as-is. One side given: the other is derived,
/// picking floor or ceil of the exact value by whichever distorts the
/// aspect ratio less.
fn compute_dimensions(
    original_width: u32,
    original_height: u32,
    desired_width: u32,
    desired_height: u32,
) -> (u32, u32) {
    if desired_width > 0 && desired_height > 0 {
        return (desired_width, desired_height);
    }
    if desired_width == 0 && desired_height == 0 {
        return (original_width, original_height);
    }

    let ratio = original_width as f64 / original_height as f64;
    if desired_height == 0 {
        let height = round_preserving_aspect(desired_width as f64 / ratio, ratio, |h| {
            desired_width as f64 / h
        });
        (desired_width, height)
    } else {
        let width = round_preserving_aspect(desired_height as f64 * ratio, ratio, |w| {
            w / desired_height as f64
        });
        (width, desired_height)
    }
}

/// Pick floor or ceil of `exact` by minimal multiplicative aspect error.
fn round_preserving_aspect(exact: f64, ratio: f64, ratio_of: impl Fn(f64) -> f64) -> u32 {
    let error = |candidate: f64| {
        let r = ratio_of(candidate);
        if ratio > r { ratio / r } else { r / ratio }
    };
    let ceil = exact.ceil();
    let floor = exact.floor();
    if error(ceil) < error(floor) {
        ceil as u32
    } else {
        floor as u32
    }
}
