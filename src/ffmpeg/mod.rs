//! External Encoder Command Assembly
//!
//! Builds the argument vector for the external media encoder. The builder
//! validates paths, codecs, and quality settings on the setter; `build()`
//! checks structural completeness (at least one input and one output) and
//! emits arguments in a stable, insertion-determined order.

mod command;

pub use command::FfmpegCommand;
