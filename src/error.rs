use std::time::Duration;

use thiserror::Error;

/// Why a suggestion could not be produced.
///
/// Every variant collapses to "no suggestion" for the UI; the reason is kept so
/// callers and tests can tell the cases apart.
#[derive(Debug, Clone, Error)]
pub enum FitError {
    /// A supported ratio string was not of the form `W:H`.
    #[error("invalid aspect ratio {input:?}: {reason}")]
    InvalidRatio { input: String, reason: RatioReason },

    /// The target rectangle has a non-positive or non-finite side.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// The camera reported an empty ratio list.
    #[error("camera reported no supported aspect ratios")]
    NoSupportedRatios,

    /// The capability request was rejected by the camera handle, or it panicked.
    #[error("capability query failed: {0}")]
    QueryFailed(String),

    /// The capability request did not answer within the configured timeout.
    #[error("capability query timed out after {0:?}")]
    QueryTimedOut(Duration),
}

impl PartialEq for FitError {
    fn eq(&self, other: &Self) -> bool {
        use FitError::*;
        match (self, other) {
            (
                InvalidRatio { input, reason },
                InvalidRatio {
                    input: other_input,
                    reason: other_reason,
                },
            ) => input == other_input && reason == other_reason,
            // Bitwise, so a NaN side still equals itself.
            (
                InvalidDimensions { width, height },
                InvalidDimensions {
                    width: other_width,
                    height: other_height,
                },
            ) => {
                width.to_bits() == other_width.to_bits()
                    && height.to_bits() == other_height.to_bits()
            }
            (NoSupportedRatios, NoSupportedRatios) => true,
            (QueryFailed(a), QueryFailed(b)) => a == b,
            (QueryTimedOut(a), QueryTimedOut(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatioReason {
    #[error("missing ':' separator")]
    MissingSeparator,
    #[error("not an unsigned integer")]
    InvalidNumber,
    #[error("zero numerator")]
    ZeroNumerator,
    #[error("zero denominator")]
    ZeroDenominator,
}
