use std::fmt;
use std::str::FromStr;

use crate::error::{FitError, RatioReason};

/// A camera aspect ratio such as `4:3`, kept exactly as the hardware lists it.
///
/// The value is `numerator / denominator` and is never flipped to be >= 1, so
/// `3:4` and `4:3` are different ratios. Both parts are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    pub numerator: u32,
    pub denominator: u32,
}

impl AspectRatio {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn value(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    /// Long side over short side, orientation independent.
    pub fn long_side_ratio(&self) -> f64 {
        let long = self.numerator.max(self.denominator);
        let short = self.numerator.min(self.denominator);
        f64::from(long) / f64::from(short)
    }
}

impl FromStr for AspectRatio {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| FitError::InvalidRatio {
            input: s.to_owned(),
            reason,
        };
        let (num, den) = s
            .split_once(':')
            .ok_or_else(|| invalid(RatioReason::MissingSeparator))?;
        let numerator = parse_part(num).ok_or_else(|| invalid(RatioReason::InvalidNumber))?;
        let denominator = parse_part(den).ok_or_else(|| invalid(RatioReason::InvalidNumber))?;
        if numerator == 0 {
            return Err(invalid(RatioReason::ZeroNumerator));
        }
        if denominator == 0 {
            return Err(invalid(RatioReason::ZeroDenominator));
        }
        Ok(Self::new(numerator, denominator))
    }
}

// `u32::from_str` accepts a leading '+', which is not a valid ratio part.
fn parse_part(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_ratio() {
        let ratio: AspectRatio = "16:9".parse().unwrap();
        assert_eq!(ratio, AspectRatio::new(16, 9));
        assert!((ratio.value() - 16.0 / 9.0).abs() < f64::EPSILON);
        assert_eq!(ratio.to_string(), "16:9");
    }

    #[test]
    fn keeps_portrait_ratio_unnormalized() {
        let ratio: AspectRatio = "3:4".parse().unwrap();
        assert!((ratio.value() - 0.75).abs() < f64::EPSILON);
        assert!((ratio.long_side_ratio() - 4.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tolerates_whitespace_around_parts() {
        let ratio: AspectRatio = " 4 : 3 ".parse().unwrap();
        assert_eq!(ratio, AspectRatio::new(4, 3));
    }

    #[test]
    fn rejects_malformed_strings() {
        for (input, reason) in [
            ("abc", RatioReason::MissingSeparator),
            ("4-3", RatioReason::MissingSeparator),
            ("4:", RatioReason::InvalidNumber),
            (":3", RatioReason::InvalidNumber),
            ("4:3:2", RatioReason::InvalidNumber),
            ("-4:3", RatioReason::InvalidNumber),
            ("+4:3", RatioReason::InvalidNumber),
            ("4.5:3", RatioReason::InvalidNumber),
            ("4:0", RatioReason::ZeroDenominator),
            ("0:1", RatioReason::ZeroNumerator),
            ("0:0", RatioReason::ZeroNumerator),
        ] {
            let err = input.parse::<AspectRatio>().unwrap_err();
            assert_eq!(
                err,
                FitError::InvalidRatio {
                    input: input.to_owned(),
                    reason
                },
                "input {input:?}"
            );
        }
    }
}
