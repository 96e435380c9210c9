//! Timeline Primitives
//!
//! Exact frame/time arithmetic for the editing timeline: rational frame
//! rates, frame-count positions and durations, and half-open time ranges
//! with merge/gap sweeps. Frame counts are the internal representation so
//! that fractional rates (29.97, 59.94) never accumulate floating-point
//! drift.

mod duration;
mod framerate;
mod position;
mod range;

pub use duration::Duration;
pub use framerate::FrameRate;
pub use position::Position;
pub use range::{find_gaps, merge_ranges, total_coverage, TimeRange};
