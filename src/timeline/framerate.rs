//! Rational frame rate representation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// A frame rate as a rational number (numerator/denominator).
///
/// Keeping the integer pair allows exact arithmetic for rates that have no
/// finite decimal form: 29.97 is exactly 30000/1001, 59.94 is 60000/1001.
///
/// Equality is structural — 60/2 and 30/1 are distinct values. Use
/// [`FrameRate::compare`] for magnitude comparison, which cross-multiplies
/// and never divides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    numerator: u32,
    denominator: u32,
}

impl FrameRate {
    /// 23.976 fps (24000/1001) - NTSC film
    pub const FPS_23_976: Self = Self {
        numerator: 24000,
        denominator: 1001,
    };

    /// 24 fps - Cinema standard
    pub const FPS_24: Self = Self {
        numerator: 24,
        denominator: 1,
    };

    /// 25 fps - PAL standard
    pub const FPS_25: Self = Self {
        numerator: 25,
        denominator: 1,
    };

    /// 29.97 fps (30000/1001) - NTSC video
    pub const FPS_29_97: Self = Self {
        numerator: 30000,
        denominator: 1001,
    };

    /// 30 fps - Common web video
    pub const FPS_30: Self = Self {
        numerator: 30,
        denominator: 1,
    };

    /// 50 fps - PAL high frame rate
    pub const FPS_50: Self = Self {
        numerator: 50,
        denominator: 1,
    };

    /// 59.94 fps (60000/1001) - NTSC high frame rate
    pub const FPS_59_94: Self = Self {
        numerator: 60000,
        denominator: 1001,
    };

    /// 60 fps - Common high frame rate
    pub const FPS_60: Self = Self {
        numerator: 60,
        denominator: 1,
    };

    /// Creates a frame rate from numerator and denominator.
    ///
    /// Both must be positive.
    pub fn new(numerator: u32, denominator: u32) -> CoreResult<Self> {
        if numerator == 0 {
            return Err(CoreError::invalid("numerator", "numerator must be positive"));
        }
        if denominator == 0 {
            return Err(CoreError::invalid(
                "denominator",
                "denominator must be positive",
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Returns the frame rate as a floating-point value.
    ///
    /// Lossy for fractional rates; use the rational pair for exact math.
    #[must_use]
    pub fn frames_per_second(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    /// Returns the numerator of the ratio.
    #[must_use]
    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Returns the denominator of the ratio.
    #[must_use]
    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Compares two rates by magnitude using cross-multiplication.
    ///
    /// Unlike `==`, this treats 60/2 and 30/1 as equal.
    #[must_use]
    pub fn compare(&self, other: &FrameRate) -> Ordering {
        let lhs = u64::from(self.numerator) * u64::from(other.denominator);
        let rhs = u64::from(other.numerator) * u64::from(self.denominator);
        lhs.cmp(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(FrameRate::FPS_24.frames_per_second(), 24.0);
        assert_eq!(FrameRate::FPS_25.frames_per_second(), 25.0);
        assert_eq!(FrameRate::FPS_30.frames_per_second(), 30.0);
        assert_eq!(FrameRate::FPS_60.frames_per_second(), 60.0);

        let ntsc = FrameRate::FPS_29_97.frames_per_second();
        assert!((ntsc - 29.970_029_970_029_97).abs() < 1e-10);
    }

    #[test]
    fn test_new_valid() {
        let fps = FrameRate::new(48, 1).unwrap();
        assert_eq!(fps.numerator(), 48);
        assert_eq!(fps.denominator(), 1);
    }

    #[test]
    fn test_new_zero_denominator() {
        assert!(FrameRate::new(30, 0).is_err());
    }

    #[test]
    fn test_new_zero_numerator() {
        assert!(FrameRate::new(0, 1).is_err());
    }

    #[test]
    fn test_equality_is_structural() {
        let a = FrameRate::new(30, 1).unwrap();
        let b = FrameRate::new(60, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_compare_cross_multiplies() {
        let a = FrameRate::new(30, 1).unwrap();
        let b = FrameRate::new(60, 2).unwrap();
        assert_eq!(a.compare(&b), Ordering::Equal);

        assert_eq!(
            FrameRate::FPS_29_97.compare(&FrameRate::FPS_30),
            Ordering::Less
        );
        assert_eq!(
            FrameRate::FPS_60.compare(&FrameRate::FPS_59_94),
            Ordering::Greater
        );
    }
}
