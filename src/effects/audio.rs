//! Audio Effect Builders
//!
//! Volume adjustment, audio fades, multi-input mixing, and the sidechain
//! ducking pattern. Each builder validates on the setter and renders on
//! `build()`, which never fails.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::filter::{format_value, Filter, FilterChain, FilterGraph};
use crate::sanitize::validate_volume;
use crate::{CoreError, CoreResult};

// =============================================================================
// Shared Enums
// =============================================================================

/// Fade direction, shared by the audio and video fade builders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeType {
    In,
    Out,
}

impl FadeType {
    /// The `t=` parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl fmt::Display for FadeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FadeType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(CoreError::invalid(
                "fade_type",
                format!("value '{other}' is not valid. Allowed: in, out"),
            )),
        }
    }
}

/// The closed set of fade curve shapes accepted by `afade` and
/// `acrossfade`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    Tri,
    Qsin,
    Hsin,
    Esin,
    Log,
    Ipar,
    Qua,
    Cub,
    Squ,
    Cbr,
    Par,
}

impl FadeCurve {
    /// All curves, in parameter-documentation order.
    pub const ALL: &'static [FadeCurve] = &[
        Self::Tri,
        Self::Qsin,
        Self::Hsin,
        Self::Esin,
        Self::Log,
        Self::Ipar,
        Self::Qua,
        Self::Cub,
        Self::Squ,
        Self::Cbr,
        Self::Par,
    ];

    /// The curve identifier used in filter parameters.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tri => "tri",
            Self::Qsin => "qsin",
            Self::Hsin => "hsin",
            Self::Esin => "esin",
            Self::Log => "log",
            Self::Ipar => "ipar",
            Self::Qua => "qua",
            Self::Cub => "cub",
            Self::Squ => "squ",
            Self::Cbr => "cbr",
            Self::Par => "par",
        }
    }
}

impl fmt::Display for FadeCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FadeCurve {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(FadeCurve::as_str).collect();
                CoreError::invalid(
                    "curve",
                    format!("value '{}' is not valid. Allowed: {}", s, allowed.join(", ")),
                )
            })
    }
}

/// How `amix` reconciles inputs of differing length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationMode {
    Longest,
    Shortest,
    First,
}

impl DurationMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Longest => "longest",
            Self::Shortest => "shortest",
            Self::First => "first",
        }
    }
}

/// Sample precision for the `volume` filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumePrecision {
    Fixed,
    Float,
    Double,
}

impl VolumePrecision {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

// =============================================================================
// VolumeBuilder
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
enum VolumeLevel {
    Linear(f64),
    Decibels(String),
}

fn db_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?\d+(\.\d+)?dB$").expect("valid dB pattern"))
}

/// Builds a `volume` filter from a linear multiplier or a decibel string.
///
/// ```
/// use cinegraph::effects::VolumeBuilder;
///
/// let f = VolumeBuilder::new(0.5).unwrap().build();
/// assert_eq!(f.to_string(), "volume=volume=0.5");
///
/// let f = VolumeBuilder::from_db("-6dB").unwrap().build();
/// assert_eq!(f.to_string(), "volume=volume=-6dB");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeBuilder {
    level: VolumeLevel,
    precision: Option<VolumePrecision>,
}

impl VolumeBuilder {
    /// Creates a volume filter from a linear multiplier in [0.0, 10.0].
    pub fn new(linear: f64) -> CoreResult<Self> {
        validate_volume(linear)?;
        Ok(Self {
            level: VolumeLevel::Linear(linear),
            precision: None,
        })
    }

    /// Creates a volume filter from a decibel string such as `-6dB` or
    /// `3.5dB`. The string is rendered verbatim.
    pub fn from_db(db: &str) -> CoreResult<Self> {
        if !db_pattern().is_match(db) {
            return Err(CoreError::invalid(
                "volume",
                format!("value '{db}' is not a valid decibel level (expected e.g. '-6dB')"),
            ));
        }
        Ok(Self {
            level: VolumeLevel::Decibels(db.to_string()),
            precision: None,
        })
    }

    /// Sets the sample precision.
    #[must_use]
    pub fn precision(mut self, precision: VolumePrecision) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Renders the `volume` filter.
    #[must_use]
    pub fn build(&self) -> Filter {
        let value = match &self.level {
            VolumeLevel::Linear(v) => format_value(*v),
            VolumeLevel::Decibels(s) => s.clone(),
        };
        let mut filter = Filter::new("volume").param("volume", value);
        if let Some(p) = self.precision {
            filter = filter.param("precision", p.as_str());
        }
        filter
    }
}

// =============================================================================
// AfadeBuilder
// =============================================================================

/// Builds an `afade` filter: `afade=t=T:d=D[:st=S][:curve=C]`.
#[derive(Clone, Debug, PartialEq)]
pub struct AfadeBuilder {
    fade_type: FadeType,
    duration: f64,
    start_time: Option<f64>,
    curve: Option<FadeCurve>,
}

impl AfadeBuilder {
    /// Creates an audio fade. The duration must be positive.
    pub fn new(fade_type: FadeType, duration: f64) -> CoreResult<Self> {
        if duration <= 0.0 {
            return Err(CoreError::invalid(
                "duration",
                format!("value {duration} is out of range (must be > 0)"),
            ));
        }
        Ok(Self {
            fade_type,
            duration,
            start_time: None,
            curve: None,
        })
    }

    /// Sets the fade start time in seconds. Must be non-negative.
    pub fn start_time(mut self, seconds: f64) -> CoreResult<Self> {
        if seconds < 0.0 {
            return Err(CoreError::invalid(
                "start_time",
                format!("value {seconds} is out of range (must be >= 0)"),
            ));
        }
        self.start_time = Some(seconds);
        Ok(self)
    }

    /// Sets the fade curve shape.
    #[must_use]
    pub fn curve(mut self, curve: FadeCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Renders the `afade` filter.
    #[must_use]
    pub fn build(&self) -> Filter {
        let mut filter = Filter::new("afade")
            .param("t", self.fade_type.as_str())
            .param("d", format_value(self.duration));
        if let Some(st) = self.start_time {
            filter = filter.param("st", format_value(st));
        }
        if let Some(curve) = self.curve {
            filter = filter.param("curve", curve.as_str());
        }
        filter
    }
}

// =============================================================================
// AmixBuilder
// =============================================================================

/// Builds an `amix` filter mixing 2 to 32 inputs.
///
/// Unset options are omitted from the output, so the minimal form is
/// `amix=inputs=N`.
#[derive(Clone, Debug, PartialEq)]
pub struct AmixBuilder {
    inputs: u32,
    duration_mode: Option<DurationMode>,
    weights: Option<Vec<f64>>,
    normalize: Option<bool>,
}

impl AmixBuilder {
    /// Creates a mixer for `inputs` streams, which must be in [2, 32].
    pub fn new(inputs: u32) -> CoreResult<Self> {
        if !(2..=32).contains(&inputs) {
            return Err(CoreError::invalid(
                "inputs",
                format!("value {inputs} is out of range (must be 2-32)"),
            ));
        }
        Ok(Self {
            inputs,
            duration_mode: None,
            weights: None,
            normalize: None,
        })
    }

    /// Sets how the output duration is derived from the inputs.
    #[must_use]
    pub fn duration_mode(mut self, mode: DurationMode) -> Self {
        self.duration_mode = Some(mode);
        self
    }

    /// Sets per-input weights, rendered space-separated.
    #[must_use]
    pub fn weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Enables or disables loudness normalization.
    #[must_use]
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = Some(normalize);
        self
    }

    /// Renders the `amix` filter.
    #[must_use]
    pub fn build(&self) -> Filter {
        let mut filter = Filter::new("amix").param("inputs", self.inputs);
        if let Some(mode) = self.duration_mode {
            filter = filter.param("duration", mode.as_str());
        }
        if let Some(weights) = &self.weights {
            let rendered: Vec<String> = weights.iter().map(|w| format_value(*w)).collect();
            filter = filter.param("weights", rendered.join(" "));
        }
        if let Some(normalize) = self.normalize {
            filter = filter.param("normalize", u8::from(normalize));
        }
        filter
    }
}

// =============================================================================
// DuckingPattern
// =============================================================================

/// Sidechain ducking: lowers the program signal under the envelope of a
/// voice signal.
///
/// Unlike the other builders this produces a [`FilterGraph`] of exactly
/// three chains: an `asplit` duplicating the sidechain source, the
/// `sidechaincompress` stage, and a terminating `anull`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuckingPattern {
    threshold: f64,
    ratio: f64,
    attack: f64,
    release: f64,
}

impl Default for DuckingPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl DuckingPattern {
    /// Creates a ducking pattern with the stock defaults
    /// (threshold 0.125, ratio 2, attack 20ms, release 250ms).
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: 0.125,
            ratio: 2.0,
            attack: 20.0,
            release: 250.0,
        }
    }

    /// Sets the compression threshold, in [0.00097563, 1.0].
    pub fn threshold(mut self, threshold: f64) -> CoreResult<Self> {
        if !(0.00097563..=1.0).contains(&threshold) {
            return Err(CoreError::invalid(
                "threshold",
                format!("value {threshold} is out of range (must be 0.00097563-1.0)"),
            ));
        }
        self.threshold = threshold;
        Ok(self)
    }

    /// Sets the compression ratio, in [1, 20].
    pub fn ratio(mut self, ratio: f64) -> CoreResult<Self> {
        if !(1.0..=20.0).contains(&ratio) {
            return Err(CoreError::invalid(
                "ratio",
                format!("value {ratio} is out of range (must be 1-20)"),
            ));
        }
        self.ratio = ratio;
        Ok(self)
    }

    /// Sets the attack time in milliseconds, in [0.01, 2000].
    pub fn attack(mut self, attack: f64) -> CoreResult<Self> {
        if !(0.01..=2000.0).contains(&attack) {
            return Err(CoreError::invalid(
                "attack",
                format!("value {attack} is out of range (must be 0.01-2000)"),
            ));
        }
        self.attack = attack;
        Ok(self)
    }

    /// Sets the release time in milliseconds, in [0.01, 9000].
    pub fn release(mut self, release: f64) -> CoreResult<Self> {
        if !(0.01..=9000.0).contains(&release) {
            return Err(CoreError::invalid(
                "release",
                format!("value {release} is out of range (must be 0.01-9000)"),
            ));
        }
        self.release = release;
        Ok(self)
    }

    /// Renders the three-chain ducking graph.
    ///
    /// `program` and `sidechain` are input pad labels such as `0:a` and
    /// `1:a`; `output` is the final pad label.
    #[must_use]
    pub fn build(&self, program: &str, sidechain: &str, output: &str) -> FilterGraph {
        let split = FilterChain::new()
            .input(sidechain)
            .filter(Filter::new("asplit=2"))
            .output("duck_side")
            .output("duck_key");
        let compress = FilterChain::new()
            .input(program)
            .input("duck_key")
            .filter(
                Filter::new("sidechaincompress")
                    .param("threshold", format_value(self.threshold))
                    .param("ratio", format_value(self.ratio))
                    .param("attack", format_value(self.attack))
                    .param("release", format_value(self.release)),
            )
            .output("duck_out");
        let terminate = FilterChain::new()
            .input("duck_out")
            .filter(Filter::new("anull"))
            .output(output);
        FilterGraph::new()
            .chain(split)
            .chain(compress)
            .chain(terminate)
    }
}
