//! Cinegraph Core Library
//!
//! Filter-graph construction engine for a non-linear video editing backend.
//! Given a declarative request ("apply this effect with these parameters",
//! "cross-fade these two clips over 1.5 seconds"), the engine produces a
//! syntactically valid, injection-safe filter string for the external
//! video-processing toolchain.
//!
//! The library is pure and synchronous: same inputs produce the same output
//! bytes. There is no I/O, no concurrency, and no hidden state. Surrounding
//! services (persistence, job queues, command runners) consume the values it
//! produces; they are not part of this crate.

pub mod audit;
pub mod clip;
pub mod effects;
pub mod ffmpeg;
pub mod filter;
pub mod sanitize;
pub mod search;
pub mod timeline;

mod error;
pub use error::*;
