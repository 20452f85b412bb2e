//! Best-fit aspect ratio selection and preview size derivation.
//!
//! Both functions take their inputs as `Option` because the UI usually knows
//! one of them before the other. A missing input yields `Ok(None)`; anything
//! that goes wrong once both are known is an `Err` carrying the reason.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::FitError;
use crate::geometry::Dimensions;
use crate::ratio::AspectRatio;

/// How [`derive_size`] turns a container width and a ratio into a height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeDerivation {
    /// `height = width * numerator / denominator`, whatever the container
    /// orientation.
    #[default]
    Literal,
    /// Lay the ratio's long side along the container's long side.
    Oriented,
}

/// A chosen ratio and the preview size derived from it. Always produced together.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub ratio: String,
    pub size: Dimensions,
}

/// Pick the supported ratio numerically closest to the target's long/short ratio.
///
/// Ties go to the entry listed first. The returned string is the supplied
/// entry, untouched.
pub fn select_best_ratio<'a, S: AsRef<str>>(
    supported: Option<&'a [S]>,
    target: Option<Dimensions>,
) -> Result<Option<&'a str>, FitError> {
    let (Some(supported), Some(target)) = (supported, target) else {
        return Ok(None);
    };
    closest(supported, target)
        .map(Some)
        .inspect_err(|err| warn!(error = %err, "aspect ratio selection failed"))
}

fn closest<S: AsRef<str>>(supported: &[S], target: Dimensions) -> Result<&str, FitError> {
    let wanted = target.target_ratio()?;
    let mut candidates = Vec::with_capacity(supported.len());
    for entry in supported {
        let raw = entry.as_ref();
        let ratio: AspectRatio = raw.parse()?;
        candidates.push((raw, (wanted - ratio.value()).abs()));
    }
    // `min_by` keeps the first of equal elements.
    let (best, diff) = candidates
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .ok_or(FitError::NoSupportedRatios)?;
    debug!(ratio = best, target = wanted, diff, "selected aspect ratio");
    Ok(best)
}

/// Height for a preview that keeps the container width and follows `ratio`.
///
/// The width is never changed and no rounding is applied. The container
/// height is not consulted except to pick a side in
/// [`SizeDerivation::Oriented`].
pub fn derive_size(
    container: Option<Dimensions>,
    ratio: Option<&str>,
    mode: SizeDerivation,
) -> Result<Option<Dimensions>, FitError> {
    let (Some(container), Some(ratio)) = (container, ratio) else {
        return Ok(None);
    };
    derived(container, ratio, mode)
        .map(Some)
        .inspect_err(|err| warn!(error = %err, "preview size derivation failed"))
}

fn derived(
    container: Dimensions,
    ratio: &str,
    mode: SizeDerivation,
) -> Result<Dimensions, FitError> {
    if !(container.width.is_finite() && container.width > 0.0) {
        return Err(FitError::InvalidDimensions {
            width: container.width,
            height: container.height,
        });
    }
    let ratio: AspectRatio = ratio.parse()?;
    Ok(scaled(container, ratio, mode))
}

fn scaled(container: Dimensions, ratio: AspectRatio, mode: SizeDerivation) -> Dimensions {
    let width = container.width;
    let height = match mode {
        SizeDerivation::Literal => width * ratio.value(),
        SizeDerivation::Oriented if container.is_portrait() => width * ratio.long_side_ratio(),
        SizeDerivation::Oriented => width / ratio.long_side_ratio(),
    };
    Dimensions::new(width, height)
}

/// Select a ratio and derive its size in one step.
pub fn suggest<S: AsRef<str>>(
    supported: Option<&[S]>,
    target: Option<Dimensions>,
    mode: SizeDerivation,
) -> Result<Option<Suggestion>, FitError> {
    let Some(ratio) = select_best_ratio(supported, target)? else {
        return Ok(None);
    };
    let Some(size) = derive_size(target, Some(ratio), mode)? else {
        return Ok(None);
    };
    Ok(Some(Suggestion {
        ratio: ratio.to_owned(),
        size,
    }))
}
