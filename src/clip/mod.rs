//! Clip Model and Validation
//!
//! A clip references a slice of a source asset. Validation is total: every
//! applicable problem is reported, not just the first.

mod validation;

pub use validation::{validate_clip, validate_clips, Clip, ClipValidationError};
