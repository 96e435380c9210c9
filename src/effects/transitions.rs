//! Transitions and Fades
//!
//! The closed transition identifier set used by `xfade`, the video fade
//! builder, and the audio/video cross-fade builders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::audio::{FadeCurve, FadeType};
use crate::filter::{format_value, Filter};
use crate::{CoreError, CoreResult};

// =============================================================================
// TransitionType
// =============================================================================

/// The closed, ordered set of `xfade` transition identifiers.
///
/// `from_str` is case-sensitive and exact; `as_str` is its inverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionType {
    Fade,
    Fadeblack,
    Fadewhite,
    Fadegrays,
    Fadefast,
    Fadeslow,
    Wipeleft,
    Wiperight,
    Wipeup,
    Wipedown,
    Wipetl,
    Wipetr,
    Wipebl,
    Wipebr,
    Slideleft,
    Slideright,
    Slideup,
    Slidedown,
    Smoothleft,
    Smoothright,
    Smoothup,
    Smoothdown,
    Circlecrop,
    Rectcrop,
    Circleopen,
    Circleclose,
    Radial,
    Vertopen,
    Vertclose,
    Horzopen,
    Horzclose,
    Dissolve,
    Pixelize,
    Distance,
    Hblur,
    Diagtl,
    Diagtr,
    Diagbl,
    Diagbr,
    Hlslice,
    Hrslice,
    Vuslice,
    Vdslice,
    Squeezeh,
    Squeezev,
    Zoomin,
    Hlwind,
    Hrwind,
    Vuwind,
    Vdwind,
    Coverleft,
    Coverright,
    Coverup,
    Coverdown,
    Revealleft,
    Revealright,
    Revealup,
    Revealdown,
    Custom,
}

impl TransitionType {
    /// All transitions, in canonical order.
    pub const ALL: &'static [TransitionType] = &[
        Self::Fade,
        Self::Fadeblack,
        Self::Fadewhite,
        Self::Fadegrays,
        Self::Fadefast,
        Self::Fadeslow,
        Self::Wipeleft,
        Self::Wiperight,
        Self::Wipeup,
        Self::Wipedown,
        Self::Wipetl,
        Self::Wipetr,
        Self::Wipebl,
        Self::Wipebr,
        Self::Slideleft,
        Self::Slideright,
        Self::Slideup,
        Self::Slidedown,
        Self::Smoothleft,
        Self::Smoothright,
        Self::Smoothup,
        Self::Smoothdown,
        Self::Circlecrop,
        Self::Rectcrop,
        Self::Circleopen,
        Self::Circleclose,
        Self::Radial,
        Self::Vertopen,
        Self::Vertclose,
        Self::Horzopen,
        Self::Horzclose,
        Self::Dissolve,
        Self::Pixelize,
        Self::Distance,
        Self::Hblur,
        Self::Diagtl,
        Self::Diagtr,
        Self::Diagbl,
        Self::Diagbr,
        Self::Hlslice,
        Self::Hrslice,
        Self::Vuslice,
        Self::Vdslice,
        Self::Squeezeh,
        Self::Squeezev,
        Self::Zoomin,
        Self::Hlwind,
        Self::Hrwind,
        Self::Vuwind,
        Self::Vdwind,
        Self::Coverleft,
        Self::Coverright,
        Self::Coverup,
        Self::Coverdown,
        Self::Revealleft,
        Self::Revealright,
        Self::Revealup,
        Self::Revealdown,
        Self::Custom,
    ];

    /// The identifier used in the `transition=` parameter.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Fadeblack => "fadeblack",
            Self::Fadewhite => "fadewhite",
            Self::Fadegrays => "fadegrays",
            Self::Fadefast => "fadefast",
            Self::Fadeslow => "fadeslow",
            Self::Wipeleft => "wipeleft",
            Self::Wiperight => "wiperight",
            Self::Wipeup => "wipeup",
            Self::Wipedown => "wipedown",
            Self::Wipetl => "wipetl",
            Self::Wipetr => "wipetr",
            Self::Wipebl => "wipebl",
            Self::Wipebr => "wipebr",
            Self::Slideleft => "slideleft",
            Self::Slideright => "slideright",
            Self::Slideup => "slideup",
            Self::Slidedown => "slidedown",
            Self::Smoothleft => "smoothleft",
            Self::Smoothright => "smoothright",
            Self::Smoothup => "smoothup",
            Self::Smoothdown => "smoothdown",
            Self::Circlecrop => "circlecrop",
            Self::Rectcrop => "rectcrop",
            Self::Circleopen => "circleopen",
            Self::Circleclose => "circleclose",
            Self::Radial => "radial",
            Self::Vertopen => "vertopen",
            Self::Vertclose => "vertclose",
            Self::Horzopen => "horzopen",
            Self::Horzclose => "horzclose",
            Self::Dissolve => "dissolve",
            Self::Pixelize => "pixelize",
            Self::Distance => "distance",
            Self::Hblur => "hblur",
            Self::Diagtl => "diagtl",
            Self::Diagtr => "diagtr",
            Self::Diagbl => "diagbl",
            Self::Diagbr => "diagbr",
            Self::Hlslice => "hlslice",
            Self::Hrslice => "hrslice",
            Self::Vuslice => "vuslice",
            Self::Vdslice => "vdslice",
            Self::Squeezeh => "squeezeh",
            Self::Squeezev => "squeezev",
            Self::Zoomin => "zoomin",
            Self::Hlwind => "hlwind",
            Self::Hrwind => "hrwind",
            Self::Vuwind => "vuwind",
            Self::Vdwind => "vdwind",
            Self::Coverleft => "coverleft",
            Self::Coverright => "coverright",
            Self::Coverup => "coverup",
            Self::Coverdown => "coverdown",
            Self::Revealleft => "revealleft",
            Self::Revealright => "revealright",
            Self::Revealup => "revealup",
            Self::Revealdown => "revealdown",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| {
                CoreError::invalid("transition", format!("value '{s}' is not a known transition"))
            })
    }
}

// =============================================================================
// FadeBuilder (video)
// =============================================================================

/// Builds a video `fade` filter.
///
/// If `nb_frames` is set it replaces the duration; whichever of the two
/// was set last wins.
#[derive(Clone, Debug, PartialEq)]
pub struct FadeBuilder {
    fade_type: FadeType,
    duration: f64,
    nb_frames: Option<u64>,
    start_time: Option<f64>,
    color: Option<String>,
    alpha: bool,
}

impl FadeBuilder {
    /// Creates a video fade. The duration must be positive.
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
            nb_frames: None,
            start_time: None,
            color: None,
            alpha: false,
        })
    }

    /// Sets the fade length in frames instead of seconds.
    #[must_use]
    pub fn nb_frames(mut self, frames: u64) -> Self {
        self.nb_frames = Some(frames);
        self
    }

    /// Sets the fade length in seconds, replacing any frame count.
    pub fn duration(mut self, seconds: f64) -> CoreResult<Self> {
        if seconds <= 0.0 {
            return Err(CoreError::invalid(
                "duration",
                format!("value {seconds} is out of range (must be > 0)"),
            ));
        }
        self.duration = seconds;
        self.nb_frames = None;
        Ok(self)
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

    /// Sets the fade color (default black).
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Fades the alpha channel only.
    #[must_use]
    pub fn alpha(mut self, alpha: bool) -> Self {
        self.alpha = alpha;
        self
    }

    /// Renders the `fade` filter.
    #[must_use]
    pub fn build(&self) -> Filter {
        let mut filter = Filter::new("fade").param("t", self.fade_type.as_str());
        match self.nb_frames {
            Some(frames) => filter = filter.param("nb_frames", frames),
            None => filter = filter.param("d", format_value(self.duration)),
        }
        if let Some(st) = self.start_time {
            filter = filter.param("st", format_value(st));
        }
        if let Some(color) = &self.color {
            filter = filter.param("color", color);
        }
        if self.alpha {
            filter = filter.param("alpha", 1);
        }
        filter
    }
}

// =============================================================================
// XfadeBuilder
// =============================================================================

/// Builds an `xfade` video cross-fade:
/// `xfade=transition=T:duration=D:offset=O`.
///
/// ```
/// use cinegraph::effects::{TransitionType, XfadeBuilder};
///
/// let f = XfadeBuilder::new(TransitionType::Dissolve, 1.5, 3.0).unwrap().build();
/// assert_eq!(f.to_string(), "xfade=transition=dissolve:duration=1.5:offset=3");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XfadeBuilder {
    transition: TransitionType,
    duration: f64,
    offset: f64,
}

impl XfadeBuilder {
    /// Creates a cross-fade. Duration must be in [0, 60] seconds and
    /// offset must be non-negative.
    pub fn new(transition: TransitionType, duration: f64, offset: f64) -> CoreResult<Self> {
        if !(0.0..=60.0).contains(&duration) {
            return Err(CoreError::invalid(
                "duration",
                format!("value {duration} is out of range (must be 0-60)"),
            ));
        }
        if offset < 0.0 {
            return Err(CoreError::invalid(
                "offset",
                format!("value {offset} is out of range (must be >= 0)"),
            ));
        }
        Ok(Self {
            transition,
            duration,
            offset,
        })
    }

    /// Renders the `xfade` filter.
    #[must_use]
    pub fn build(&self) -> Filter {
        Filter::new("xfade")
            .param("transition", self.transition.as_str())
            .param("duration", format_value(self.duration))
            .param("offset", format_value(self.offset))
    }
}

// =============================================================================
// AcrossfadeBuilder
// =============================================================================

/// Builds an `acrossfade` audio cross-fade:
/// `acrossfade=d=D[:c1=…][:c2=…][:o=…]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcrossfadeBuilder {
    duration: f64,
    curve1: Option<FadeCurve>,
    curve2: Option<FadeCurve>,
    overlap: Option<bool>,
}

impl AcrossfadeBuilder {
    /// Creates an audio cross-fade. Duration must be in (0, 60] seconds.
    pub fn new(duration: f64) -> CoreResult<Self> {
        if duration <= 0.0 || duration > 60.0 {
            return Err(CoreError::invalid(
                "duration",
                format!("value {duration} is out of range (must be > 0 and <= 60)"),
            ));
        }
        Ok(Self {
            duration,
            curve1: None,
            curve2: None,
            overlap: None,
        })
    }

    /// Sets the fade-out curve of the first input.
    #[must_use]
    pub fn curve1(mut self, curve: FadeCurve) -> Self {
        self.curve1 = Some(curve);
        self
    }

    /// Sets the fade-in curve of the second input.
    #[must_use]
    pub fn curve2(mut self, curve: FadeCurve) -> Self {
        self.curve2 = Some(curve);
        self
    }

    /// Enables or disables input overlap during the fade.
    #[must_use]
    pub fn overlap(mut self, overlap: bool) -> Self {
        self.overlap = Some(overlap);
        self
    }

    /// Renders the `acrossfade` filter.
    #[must_use]
    pub fn build(&self) -> Filter {
        let mut filter = Filter::new("acrossfade").param("d", format_value(self.duration));
        if let Some(c1) = self.curve1 {
            filter = filter.param("c1", c1.as_str());
        }
        if let Some(c2) = self.curve2 {
            filter = filter.param("c2", c2.as_str());
        }
        if let Some(overlap) = self.overlap {
            filter = filter.param("o", u8::from(overlap));
        }
        filter
    }
}
