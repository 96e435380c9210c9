//! Timeline position as a frame count.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::{Duration, FrameRate};
use crate::{CoreError, CoreResult};

/// A point on the timeline, counted in frames from zero.
///
/// Distinct from [`Duration`] at the type level so absolute timestamps and
/// intervals cannot be mixed accidentally. `Position + Duration = Position`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position(u64);

impl Position {
    /// The start of the timeline (frame 0).
    pub const ZERO: Self = Self(0);

    /// Creates a position from a frame count.
    #[must_use]
    pub fn from_frames(frames: u64) -> Self {
        Self(frames)
    }

    /// Creates a position from seconds at the given frame rate.
    ///
    /// Rounds to the nearest frame, half away from zero. Negative seconds
    /// fail with `InvalidArgument`.
    pub fn from_seconds(seconds: f64, fps: FrameRate) -> CoreResult<Self> {
        if seconds < 0.0 {
            return Err(CoreError::invalid(
                "seconds",
                format!("seconds must be non-negative, got {seconds}"),
            ));
        }
        let frames =
            (seconds * f64::from(fps.numerator()) / f64::from(fps.denominator())).round() as u64;
        Ok(Self(frames))
    }

    /// Returns the frame count.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.0
    }

    /// Converts the position to seconds at the given frame rate.
    #[must_use]
    pub fn to_seconds(&self, fps: FrameRate) -> f64 {
        self.0 as f64 * f64::from(fps.denominator()) / f64::from(fps.numerator())
    }
}

impl Add<Duration> for Position {
    type Output = Position;

    fn add(self, rhs: Duration) -> Position {
        Position(self.0 + rhs.frames())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_frames() {
        assert_eq!(Position::from_frames(100).frames(), 100);
        assert_eq!(Position::ZERO.frames(), 0);
    }

    #[test]
    fn test_from_seconds_integral_rates() {
        let fps = FrameRate::FPS_24;
        assert_eq!(Position::from_seconds(0.0, fps).unwrap().frames(), 0);
        assert_eq!(Position::from_seconds(1.0, fps).unwrap().frames(), 24);
        assert_eq!(Position::from_seconds(2.5, fps).unwrap().frames(), 60);
    }

    #[test]
    fn test_from_seconds_negative_fails() {
        let err = Position::from_seconds(-0.5, FrameRate::FPS_30).unwrap_err();
        assert!(
            err.to_string().contains("non-negative"),
            "Expected bound in: {}",
            err
        );
    }

    #[test]
    fn test_from_seconds_rounds_to_nearest() {
        // 0.021s at 24fps = 0.504 frames -> 1
        let pos = Position::from_seconds(0.021, FrameRate::FPS_24).unwrap();
        assert_eq!(pos.frames(), 1);
        // 0.02s at 24fps = 0.48 frames -> 0
        let pos = Position::from_seconds(0.02, FrameRate::FPS_24).unwrap();
        assert_eq!(pos.frames(), 0);
    }

    #[test]
    fn test_fractional_rate_exact() {
        // 1001 seconds at 24000/1001 fps is exactly 24000 frames
        let pos = Position::from_seconds(1001.0, FrameRate::FPS_23_976).unwrap();
        assert_eq!(pos.frames(), 24000);
        let secs = pos.to_seconds(FrameRate::FPS_23_976);
        assert!((secs - 1001.0).abs() < 1e-9);
    }

    #[test]
    fn test_add_duration() {
        let pos = Position::from_frames(10) + Duration::from_frames(20);
        assert_eq!(pos.frames(), 30);
    }

    #[test]
    fn test_ordering() {
        assert!(Position::from_frames(5) < Position::from_frames(6));
    }

    proptest! {
        #[test]
        fn round_trip_is_exact_on_the_grid(frames in 0u64..10_000_000) {
            let fps = FrameRate::FPS_30;
            let pos = Position::from_frames(frames);
            let back = Position::from_seconds(pos.to_seconds(fps), fps).unwrap();
            prop_assert_eq!(back.frames(), frames);
        }

        #[test]
        fn to_seconds_preserves_order(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let fps = FrameRate::FPS_29_97;
            let pa = Position::from_frames(a);
            let pb = Position::from_frames(b);
            if a < b {
                prop_assert!(pa.to_seconds(fps) < pb.to_seconds(fps));
            }
        }
    }
}
