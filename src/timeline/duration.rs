//! Timeline duration as a frame count.

use serde::{Deserialize, Serialize};

use super::{FrameRate, Position};
use crate::{CoreError, CoreResult};

/// A span of time on the timeline, counted in frames.
///
/// Disjoint from [`Position`] at the type level.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Duration(u64);

impl Duration {
    /// Zero duration.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from a frame count.
    #[must_use]
    pub fn from_frames(frames: u64) -> Self {
        Self(frames)
    }

    /// Creates a duration from seconds at the given frame rate.
    ///
    /// Rounds to the nearest frame count; negative seconds fail.
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

    /// The duration between two positions.
    ///
    /// Fails with `InvalidArgument` when `end` is before `start`.
    pub fn between(start: Position, end: Position) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::invalid(
                "end",
                format!(
                    "end position {} is before start position {}",
                    end.frames(),
                    start.frames()
                ),
            ));
        }
        Ok(Self(end.frames() - start.frames()))
    }

    /// Returns the frame count.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.0
    }

    /// Converts the duration to seconds at the given frame rate.
    #[must_use]
    pub fn to_seconds(&self, fps: FrameRate) -> f64 {
        self.0 as f64 * f64::from(fps.denominator()) / f64::from(fps.numerator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_frames() {
        assert_eq!(Duration::from_frames(48).frames(), 48);
        assert_eq!(Duration::ZERO.frames(), 0);
    }

    #[test]
    fn test_from_seconds() {
        let d = Duration::from_seconds(1.0, FrameRate::FPS_30).unwrap();
        assert_eq!(d.frames(), 30);
    }

    #[test]
    fn test_from_seconds_negative_fails() {
        assert!(Duration::from_seconds(-1.0, FrameRate::FPS_30).is_err());
    }

    #[test]
    fn test_between() {
        let d = Duration::between(Position::from_frames(10), Position::from_frames(34)).unwrap();
        assert_eq!(d.frames(), 24);
    }

    #[test]
    fn test_between_equal_positions() {
        let p = Position::from_frames(7);
        assert_eq!(Duration::between(p, p).unwrap().frames(), 0);
    }

    #[test]
    fn test_between_reversed_fails() {
        let err =
            Duration::between(Position::from_frames(50), Position::from_frames(10)).unwrap_err();
        assert!(
            err.to_string().contains("before start"),
            "Expected order message in: {}",
            err
        );
    }

    #[test]
    fn test_to_seconds() {
        let d = Duration::from_frames(60);
        assert_eq!(d.to_seconds(FrameRate::FPS_24), 2.5);
    }
}
