//! Effect Builders and Registry
//!
//! Fluent builders for the individual filters (text overlay, speed control,
//! volume, fades, mixing, ducking, cross-fades), the closed transition set,
//! and the registry that dispatches `(effect_type, parameters)` requests to
//! the right builder.
//!
//! All parameter coercion happens on the setter, so an invalid builder
//! cannot exist; `build()` is total.

pub mod audio;
pub mod drawtext;
pub mod registry;
pub mod speed;
pub mod transitions;

pub use audio::{
    AfadeBuilder, AmixBuilder, DuckingPattern, DurationMode, FadeCurve, FadeType, VolumeBuilder,
    VolumePrecision,
};
pub use drawtext::{DrawtextBuilder, TextPosition};
pub use registry::{default_registry, EffectDefinition, EffectRegistry, EffectValidationError};
pub use speed::SpeedControl;
pub use transitions::{AcrossfadeBuilder, FadeBuilder, TransitionType, XfadeBuilder};
