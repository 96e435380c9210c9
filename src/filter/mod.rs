//! Filter Composition Primitives
//!
//! The three building blocks of a filter graph and their canonical text
//! rendering:
//!
//! - [`Filter`] — a named, ordered parameter tuple (`scale=w=1920:h=1080`)
//! - [`FilterChain`] — input labels, filters, output labels
//!   (`[0:v]scale=...,fade=...[out]`)
//! - [`FilterGraph`] — chains joined with `;`
//!
//! Rendering is total and preserves insertion order everywhere; downstream
//! tooling sometimes depends on parameter order, so order is part of the
//! public contract. No connectivity validation is performed — the core
//! records what the caller specifies.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Numeric Rendering
// =============================================================================

/// Renders a float as the shortest decimal text that round-trips, with a
/// trailing `.0` stripped. Integral values render without a fraction
/// (`2.0` -> `"2"`, `1.5` -> `"1.5"`).
#[must_use]
pub fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let s = format!("{value:.10}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

// =============================================================================
// Filter
// =============================================================================

/// A single filter: a name plus an ordered sequence of key/value parameters.
///
/// Zero parameters render as just the name; otherwise
/// `name=k1=v1:k2=v2:...`. Keys may repeat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    name: String,
    params: Vec<(String, String)>,
}

impl Filter {
    /// Creates a filter with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Appends a key/value parameter, preserving insertion order.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Returns the filter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // ===== Convenience constructors =====

    /// `scale=w=W:h=H`
    #[must_use]
    pub fn scale(width: u32, height: u32) -> Self {
        Self::new("scale").param("w", width).param("h", height)
    }

    /// Scale that fits inside WxH while keeping the aspect ratio.
    #[must_use]
    pub fn scale_fit(width: u32, height: u32) -> Self {
        Self::new("scale")
            .param("w", width)
            .param("h", height)
            .param("force_original_aspect_ratio", "decrease")
    }

    /// Pad to WxH with the content centered.
    #[must_use]
    pub fn pad(width: u32, height: u32, color: &str) -> Self {
        Self::new("pad")
            .param("w", width)
            .param("h", height)
            .param("x", "(ow-iw)/2")
            .param("y", "(oh-ih)/2")
            .param("color", color)
    }

    /// `format=pix_fmts=...`
    #[must_use]
    pub fn format(pixel_format: &str) -> Self {
        Self::new("format").param("pix_fmts", pixel_format)
    }

    /// `concat=n=N:v=V:a=A`
    #[must_use]
    pub fn concat(segments: u32, video_streams: u32, audio_streams: u32) -> Self {
        Self::new("concat")
            .param("n", segments)
            .param("v", video_streams)
            .param("a", audio_streams)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            return write!(f, "{}", self.name);
        }
        let params: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        write!(f, "{}={}", self.name, params.join(":"))
    }
}

// =============================================================================
// FilterChain
// =============================================================================

/// A linear run of filters with labeled input and output pads.
///
/// Renders as `[in1][in2]...f1,f2,...[out1][out2]...`. Empty label
/// sequences are allowed on either side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChain {
    inputs: Vec<String>,
    filters: Vec<Filter>,
    outputs: Vec<String>,
}

impl FilterChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input pad label. The label is stored bracketed.
    #[must_use]
    pub fn input(mut self, label: impl Into<String>) -> Self {
        self.inputs.push(format!("[{}]", label.into()));
        self
    }

    /// Appends a filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds an output pad label. The label is stored bracketed.
    #[must_use]
    pub fn output(mut self, label: impl Into<String>) -> Self {
        self.outputs.push(format!("[{}]", label.into()));
        self
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters: Vec<String> = self.filters.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{}{}{}",
            self.inputs.join(""),
            filters.join(","),
            self.outputs.join("")
        )
    }
}

// =============================================================================
// FilterGraph
// =============================================================================

/// An ordered set of chains, joined with `;` in the rendered output.
///
/// The graph does not validate label connectivity; producing a coherent
/// graph is the caller's responsibility.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGraph {
    chains: Vec<FilterChain>,
}

impl FilterGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chain.
    #[must_use]
    pub fn chain(mut self, chain: FilterChain) -> Self {
        self.chains.push(chain);
        self
    }

    /// Returns the number of chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if the graph has no chains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chains: Vec<String> = self.chains.iter().map(ToString::to_string).collect();
        write!(f, "{}", chains.join(";"))
    }
}
