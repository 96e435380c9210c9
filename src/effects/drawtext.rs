//! Text Overlay Filter Builder
//!
//! Builds the `drawtext` filter. The text is escaped at construction time,
//! so grammar characters in user input can never break out of the
//! parameter. Only explicitly-set options are emitted; the downstream
//! toolchain supplies its own defaults for the rest.

use serde::{Deserialize, Serialize};

use crate::filter::{format_value, Filter};
use crate::sanitize::escape_drawtext_text;
use crate::{CoreError, CoreResult};

// =============================================================================
// Position Presets
// =============================================================================

/// Named screen positions for text placement.
///
/// Each preset expands to an `x`/`y` expression pair; `m` is the margin in
/// pixels (default 10).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPosition {
    Center,
    BottomCenter,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl TextPosition {
    /// Returns the canonical preset name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::BottomCenter => "bottom_center",
            Self::TopLeft => "top_left",
            Self::TopRight => "top_right",
            Self::BottomLeft => "bottom_left",
            Self::BottomRight => "bottom_right",
        }
    }

    /// Parses a preset name (exact match).
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "center" => Ok(Self::Center),
            "bottom_center" => Ok(Self::BottomCenter),
            "top_left" => Ok(Self::TopLeft),
            "top_right" => Ok(Self::TopRight),
            "bottom_left" => Ok(Self::BottomLeft),
            "bottom_right" => Ok(Self::BottomRight),
            _ => Err(CoreError::invalid(
                "position",
                format!(
                    "value '{s}' is not valid. Allowed: center, bottom_center, top_left, \
                     top_right, bottom_left, bottom_right"
                ),
            )),
        }
    }

    /// Expands the preset to an `(x, y)` expression pair for the given
    /// margin.
    fn to_xy(self, margin: u32) -> (String, String) {
        let m = margin;
        match self {
            Self::Center => ("(w-text_w)/2".to_string(), "(h-text_h)/2".to_string()),
            Self::BottomCenter => ("(w-text_w)/2".to_string(), format!("h-text_h-{m}")),
            Self::TopLeft => (m.to_string(), m.to_string()),
            Self::TopRight => (format!("w-text_w-{m}"), m.to_string()),
            Self::BottomLeft => (m.to_string(), format!("h-text_h-{m}")),
            Self::BottomRight => (format!("w-text_w-{m}"), format!("h-text_h-{m}")),
        }
    }
}

// =============================================================================
// Drawtext Builder
// =============================================================================

/// Font selection: fontconfig name or explicit file. The two are mutually
/// exclusive; the later setter wins.
#[derive(Clone, Debug, PartialEq, Eq)]
enum FontSource {
    Named(String),
    File(String),
}

/// Fluent builder for the `drawtext` text overlay filter.
///
/// ```
/// use cinegraph::effects::{DrawtextBuilder, TextPosition};
///
/// let filter = DrawtextBuilder::new("Hello")
///     .fontsize(48)
///     .unwrap()
///     .position(TextPosition::BottomCenter)
///     .margin(20)
///     .build();
/// assert_eq!(
///     filter.to_string(),
///     "drawtext=text=Hello:fontsize=48:x=(w-text_w)/2:y=h-text_h-20"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct DrawtextBuilder {
    text: String,
    font: Option<FontSource>,
    fontsize: Option<u32>,
    fontcolor: Option<String>,
    position: Option<TextPosition>,
    margin: u32,
    shadow: Option<(i32, i32, String)>,
    box_background: Option<(String, u32)>,
    alpha: Option<f64>,
}

impl DrawtextBuilder {
    /// Creates a builder for the given text. The text is escaped here.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: escape_drawtext_text(text.as_ref()),
            font: None,
            fontsize: None,
            fontcolor: None,
            position: None,
            margin: 10,
            shadow: None,
            box_background: None,
            alpha: None,
        }
    }

    /// Sets the font by fontconfig name (e.g. "monospace", "Sans").
    #[must_use]
    pub fn font(mut self, name: impl Into<String>) -> Self {
        self.font = Some(FontSource::Named(name.into()));
        self
    }

    /// Sets the font by file path. Replaces any previously set font name.
    #[must_use]
    pub fn font_file(mut self, path: impl Into<String>) -> Self {
        self.font = Some(FontSource::File(path.into()));
        self
    }

    /// Sets the font size in pixels. Must be positive.
    pub fn fontsize(mut self, size: u32) -> CoreResult<Self> {
        if size == 0 {
            return Err(CoreError::invalid("fontsize", "fontsize must be positive"));
        }
        self.fontsize = Some(size);
        Ok(self)
    }

    /// Sets the font color (name or hex; passed through verbatim).
    #[must_use]
    pub fn fontcolor(mut self, color: impl Into<String>) -> Self {
        self.fontcolor = Some(color.into());
        self
    }

    /// Sets a position preset. The `x`/`y` expressions are computed at
    /// build time from the preset and the current margin.
    #[must_use]
    pub fn position(mut self, preset: TextPosition) -> Self {
        self.position = Some(preset);
        self
    }

    /// Sets the margin in pixels used by the position presets (default 10).
    #[must_use]
    pub fn margin(mut self, pixels: u32) -> Self {
        self.margin = pixels;
        self
    }

    /// Adds a drop shadow with the given offset and color.
    #[must_use]
    pub fn shadow(mut self, x: i32, y: i32, color: impl Into<String>) -> Self {
        self.shadow = Some((x, y, color.into()));
        self
    }

    /// Draws a background box behind the text with the given color and
    /// border padding.
    #[must_use]
    pub fn box_background(mut self, color: impl Into<String>, padding: u32) -> Self {
        self.box_background = Some((color.into(), padding));
        self
    }

    /// Sets text opacity. Must be within [0.0, 1.0].
    pub fn alpha(mut self, alpha: f64) -> CoreResult<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(CoreError::invalid(
                "alpha",
                format!("value {alpha} is out of range (must be 0.0-1.0)"),
            ));
        }
        self.alpha = Some(alpha);
        Ok(self)
    }

    /// Builds the drawtext [`Filter`]. Emission order is fixed: text,
    /// font, fontsize, fontcolor, x, y, shadow, box, alpha.
    #[must_use]
    pub fn build(&self) -> Filter {
        let mut filter = Filter::new("drawtext").param("text", &self.text);

        match &self.font {
            Some(FontSource::Named(name)) => filter = filter.param("font", name),
            Some(FontSource::File(path)) => filter = filter.param("fontfile", path),
            None => {}
        }
        if let Some(size) = self.fontsize {
            filter = filter.param("fontsize", size);
        }
        if let Some(ref color) = self.fontcolor {
            filter = filter.param("fontcolor", color);
        }
        if let Some(preset) = self.position {
            let (x, y) = preset.to_xy(self.margin);
            filter = filter.param("x", x).param("y", y);
        }
        if let Some((x, y, ref color)) = self.shadow {
            filter = filter
                .param("shadowx", x)
                .param("shadowy", y)
                .param("shadowcolor", color);
        }
        if let Some((ref color, padding)) = self.box_background {
            filter = filter
                .param("box", 1)
                .param("boxcolor", color)
                .param("boxborderw", padding);
        }
        if let Some(alpha) = self.alpha {
            filter = filter.param("alpha", format!("'{}'", format_value(alpha)));
        }
        filter
    }
}
