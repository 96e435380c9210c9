//! Playback Speed Control
//!
//! Emits the video presentation-timestamp filter (`setpts=PTS/factor`) and
//! the audio tempo chain. The `atempo` filter only accepts factors in
//! [0.5, 2.0] per stage, so out-of-range factors are decomposed into a
//! chain of stages whose product equals the requested factor.

use serde::{Deserialize, Serialize};

use crate::filter::{format_value, Filter};
use crate::sanitize::validate_speed;
use crate::CoreResult;

/// Per-stage bounds accepted by the `atempo` filter.
const ATEMPO_MIN: f64 = 0.5;
const ATEMPO_MAX: f64 = 2.0;

/// Speed control for a clip: one video filter plus zero or more audio
/// tempo filters.
///
/// ```
/// use cinegraph::effects::SpeedControl;
///
/// let sc = SpeedControl::new(2.0).unwrap();
/// assert_eq!(sc.setpts_filter().to_string(), "setpts=PTS/2");
/// let audio: Vec<String> = sc.atempo_filters().iter().map(|f| f.to_string()).collect();
/// assert_eq!(audio, vec!["atempo=2"]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedControl {
    factor: f64,
    drop_audio: bool,
}

impl SpeedControl {
    /// Creates a speed control. The factor must be within [0.25, 4.0].
    pub fn new(factor: f64) -> CoreResult<Self> {
        validate_speed(factor)?;
        Ok(Self {
            factor,
            drop_audio: false,
        })
    }

    /// When set, no audio filters are emitted.
    #[must_use]
    pub fn drop_audio(mut self, drop: bool) -> Self {
        self.drop_audio = drop;
        self
    }

    /// Returns the speed factor.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// The video filter: `setpts=PTS/factor`.
    #[must_use]
    pub fn setpts_filter(&self) -> Filter {
        Filter::new(format!("setpts=PTS/{}", format_value(self.factor)))
    }

    /// The audio tempo filters, one per decomposition stage. Empty when
    /// the factor is 1.0 or audio is dropped.
    #[must_use]
    pub fn atempo_filters(&self) -> Vec<Filter> {
        if self.drop_audio {
            return Vec::new();
        }
        atempo_chain(self.factor)
            .into_iter()
            .map(|v| Filter::new(format!("atempo={}", format_value(v))))
            .collect()
    }

    /// All filters: video first, then the audio chain.
    #[must_use]
    pub fn build(&self) -> Vec<Filter> {
        let mut filters = vec![self.setpts_filter()];
        filters.extend(self.atempo_filters());
        filters
    }
}

/// Decomposes a speed factor into `atempo` stage values.
///
/// Strategy: a factor of 1.0 yields no stages; a factor already within
/// [0.5, 2.0] yields a single stage; otherwise repeated 2.0 (or 0.5)
/// stages are emitted until the residual lands in range, and the residual
/// is the final stage. The stage product equals the factor within 1e-9
/// relative error, with the fewest stages this scheme allows.
#[must_use]
pub fn atempo_chain(factor: f64) -> Vec<f64> {
    if (factor - 1.0).abs() < 1e-9 {
        return Vec::new();
    }
    if (ATEMPO_MIN..=ATEMPO_MAX).contains(&factor) {
        return vec![factor];
    }
    let mut stages = Vec::new();
    let mut remaining = factor;
    if factor > ATEMPO_MAX {
        while remaining > ATEMPO_MAX {
            stages.push(ATEMPO_MAX);
            remaining /= ATEMPO_MAX;
        }
    } else {
        while remaining < ATEMPO_MIN {
            stages.push(ATEMPO_MIN);
            remaining /= ATEMPO_MIN;
        }
    }
    stages.push(remaining);
    stages
}
