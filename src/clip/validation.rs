//! Structural validation of clip in/out points against the source asset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sanitize::validate_path;
use crate::timeline::{Duration, Position};

/// A slice of a source asset placed on the timeline.
///
/// `source_duration` is optional because the asset may not have been
/// probed yet; duration-dependent checks are skipped when it is absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub source_path: String,
    pub in_point: Position,
    pub out_point: Position,
    pub source_duration: Option<Duration>,
}

impl Clip {
    /// Creates a clip. No validation happens here; call
    /// [`validate_clip`] to collect problems.
    pub fn new(
        source_path: impl Into<String>,
        in_point: Position,
        out_point: Position,
        source_duration: Option<Duration>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            in_point,
            out_point,
            source_duration,
        }
    }
}

/// One structural problem found in a clip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipValidationError {
    pub field: String,
    pub message: String,
    pub actual: Option<String>,
    pub expected: Option<String>,
}

impl ClipValidationError {
    /// A bare field/message error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            actual: None,
            expected: None,
        }
    }

    /// An error that also records the offending and expected values.
    pub fn with_values(
        field: impl Into<String>,
        message: impl Into<String>,
        actual: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            actual: Some(actual.into()),
            expected: Some(expected.into()),
        }
    }
}

impl fmt::Display for ClipValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let (Some(actual), Some(expected)) = (&self.actual, &self.expected) {
            write!(f, " (got: {actual}, expected: {expected})")?;
        }
        Ok(())
    }
}

/// Validates a clip and returns every applicable error.
///
/// Checks, in order: the source path, the in/out ordering, and (when the
/// source duration is known) that both points fit inside the source.
#[must_use]
pub fn validate_clip(clip: &Clip) -> Vec<ClipValidationError> {
    let mut errors = Vec::new();

    if let Err(e) = validate_path(&clip.source_path) {
        errors.push(ClipValidationError::new("source_path", e.to_string()));
    }

    if clip.out_point <= clip.in_point {
        errors.push(ClipValidationError::with_values(
            "out_point",
            "Out point must be greater than in point",
            clip.out_point.frames().to_string(),
            format!("> {}", clip.in_point.frames()),
        ));
    }

    if let Some(duration) = clip.source_duration {
        if clip.in_point.frames() >= duration.frames() {
            errors.push(ClipValidationError::with_values(
                "in_point",
                "In point must be less than the source duration",
                clip.in_point.frames().to_string(),
                format!("< {}", duration.frames()),
            ));
        }
        if clip.out_point.frames() > duration.frames() {
            errors.push(ClipValidationError::with_values(
                "out_point",
                "Out point must not exceed the source duration",
                clip.out_point.frames().to_string(),
                format!("<= {}", duration.frames()),
            ));
        }
    }

    errors
}

/// Validates a batch of clips, pairing each error with its clip index.
#[must_use]
pub fn validate_clips(clips: &[Clip]) -> Vec<(usize, ClipValidationError)> {
    clips
        .iter()
        .enumerate()
        .flat_map(|(index, clip)| {
            validate_clip(clip)
                .into_iter()
                .map(move |error| (index, error))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(path: &str, in_point: u64, out_point: u64, duration: Option<u64>) -> Clip {
        Clip::new(
            path,
            Position::from_frames(in_point),
            Position::from_frames(out_point),
            duration.map(Duration::from_frames),
        )
    }

    #[test]
    fn test_valid_clip_has_no_errors() {
        let errors = validate_clip(&clip("/media/a.mp4", 10, 50, Some(100)));
        assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
    }

    #[test]
    fn test_empty_path_and_reversed_points_both_reported() {
        let errors = validate_clip(&clip("", 100, 50, None));
        assert_eq!(errors.len(), 2, "Expected two errors, got: {:?}", errors);
        assert_eq!(errors[0].field, "source_path");
        assert_eq!(errors[1].field, "out_point");
        assert_eq!(errors[1].actual.as_deref(), Some("50"));
        assert_eq!(errors[1].expected.as_deref(), Some("> 100"));
    }

    #[test]
    fn test_equal_points_rejected() {
        let errors = validate_clip(&clip("/a.mp4", 30, 30, None));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "out_point");
    }

    #[test]
    fn test_null_byte_in_path() {
        let errors = validate_clip(&clip("a\0b.mp4", 0, 10, None));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "source_path");
        assert!(
            errors[0].message.contains("null"),
            "Expected null-byte message, got: {}",
            errors[0].message
        );
    }

    #[test]
    fn test_in_point_past_source_duration() {
        let errors = validate_clip(&clip("/a.mp4", 120, 150, Some(100)));
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"in_point"), "Expected in_point error in: {:?}", fields);
        assert!(fields.contains(&"out_point"), "Expected out_point error in: {:?}", fields);
    }

    #[test]
    fn test_out_point_at_duration_is_allowed() {
        let errors = validate_clip(&clip("/a.mp4", 0, 100, Some(100)));
        assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
    }

    #[test]
    fn test_out_point_past_duration() {
        let errors = validate_clip(&clip("/a.mp4", 0, 101, Some(100)));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "out_point");
        assert_eq!(errors[0].expected.as_deref(), Some("<= 100"));
    }

    #[test]
    fn test_display_includes_values() {
        let errors = validate_clip(&clip("/a.mp4", 100, 50, None));
        let rendered = errors[0].to_string();
        assert_eq!(
            rendered,
            "out_point: Out point must be greater than in point (got: 50, expected: > 100)"
        );
    }

    #[test]
    fn test_batch_validation_indexes_errors() {
        let clips = vec![
            clip("/ok.mp4", 0, 10, Some(20)),
            clip("", 5, 1, None),
            clip("/late.mp4", 0, 30, Some(20)),
        ];
        let errors = validate_clips(&clips);
        let indices: Vec<usize> = errors.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![1, 1, 2]);
    }
}
