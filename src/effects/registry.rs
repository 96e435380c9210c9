//! Effect Registry and Dispatch
//!
//! Maps an effect type identifier to its definition: a parameter schema,
//! hints for assistant-driven tooling, a zero-argument preview, and the
//! build function that turns a parameter map into rendered filter text.
//!
//! The registry is conventionally populated once at startup and read
//! thereafter; it holds no interior locking.

use serde_json::{json, Map, Value};
use tracing::debug;

use super::drawtext::{DrawtextBuilder, TextPosition};
use super::speed::SpeedControl;
use crate::{CoreError, CoreResult};

// =============================================================================
// Definition
// =============================================================================

/// One problem found while checking a parameter map against a schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectValidationError {
    /// Parameter name, or empty for map-level problems.
    pub path: String,
    pub message: String,
}

impl EffectValidationError {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A registered effect: schema, hints, preview, and builder.
#[derive(Clone)]
pub struct EffectDefinition {
    pub display_name: String,
    pub description: String,
    /// JSON-schema-shaped parameter description: `required`, `properties`
    /// with `type` / `enum` / `minimum` / `maximum` / `default`.
    pub parameter_schema: Value,
    /// Free-form guidance strings surfaced to assistant tooling.
    pub ai_hints: Vec<String>,
    /// Renders the effect with representative defaults.
    pub preview_fn: fn() -> CoreResult<String>,
    /// Renders the effect from a caller-supplied parameter map.
    pub build_fn: fn(&Map<String, Value>) -> CoreResult<String>,
}

// =============================================================================
// Registry
// =============================================================================

/// Ordered effect registry. Last writer wins on re-registration, keeping
/// the original position.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    effects: Vec<(String, EffectDefinition)>,
}

impl EffectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition under `effect_type`. Re-registering the
    /// same type replaces the definition in place.
    pub fn register(&mut self, effect_type: impl Into<String>, definition: EffectDefinition) {
        let effect_type = effect_type.into();
        debug!(effect_type = %effect_type, "effect registered");
        if let Some(slot) = self.effects.iter_mut().find(|(t, _)| *t == effect_type) {
            slot.1 = definition;
        } else {
            self.effects.push((effect_type, definition));
        }
    }

    /// Looks up a definition.
    #[must_use]
    pub fn get(&self, effect_type: &str) -> Option<&EffectDefinition> {
        self.effects
            .iter()
            .find(|(t, _)| t == effect_type)
            .map(|(_, d)| d)
    }

    /// All registered effects, in registration order.
    #[must_use]
    pub fn list_all(&self) -> Vec<(&str, &EffectDefinition)> {
        self.effects
            .iter()
            .map(|(t, d)| (t.as_str(), d))
            .collect()
    }

    /// Renders the preview of an effect.
    pub fn preview(&self, effect_type: &str) -> CoreResult<String> {
        let definition = self
            .get(effect_type)
            .ok_or_else(|| CoreError::EffectNotFound(effect_type.to_string()))?;
        (definition.preview_fn)()
    }

    /// Builds an effect from a parameter map. Builder failures propagate
    /// unchanged.
    pub fn apply(&self, effect_type: &str, parameters: &Map<String, Value>) -> CoreResult<String> {
        let definition = self
            .get(effect_type)
            .ok_or_else(|| CoreError::EffectNotFound(effect_type.to_string()))?;
        (definition.build_fn)(parameters)
    }

    /// Checks a parameter map against the effect's schema. An empty
    /// vector means the parameters are acceptable.
    pub fn validate(
        &self,
        effect_type: &str,
        parameters: &Map<String, Value>,
    ) -> CoreResult<Vec<EffectValidationError>> {
        let definition = self
            .get(effect_type)
            .ok_or_else(|| CoreError::EffectNotFound(effect_type.to_string()))?;
        Ok(validate_against_schema(
            &definition.parameter_schema,
            parameters,
        ))
    }
}

// =============================================================================
// Schema Checking
// =============================================================================

/// Checks `required`, `type`, `enum`, `minimum`, and `maximum` from the
/// schema's `properties`. Unknown parameters are reported too.
fn validate_against_schema(schema: &Value, parameters: &Map<String, Value>) -> Vec<EffectValidationError> {
    let mut errors = Vec::new();
    let empty = Map::new();
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if !parameters.contains_key(name) {
                errors.push(EffectValidationError::new(
                    name,
                    "required parameter is missing",
                ));
            }
        }
    }

    for (name, value) in parameters {
        let Some(property) = properties.get(name) else {
            errors.push(EffectValidationError::new(name, "unknown parameter"));
            continue;
        };
        if let Some(expected) = property.get("type").and_then(Value::as_str) {
            if !value_matches_type(value, expected) {
                errors.push(EffectValidationError::new(
                    name,
                    format!("expected type {expected}"),
                ));
                continue;
            }
        }
        if let Some(allowed) = property.get("enum").and_then(Value::as_array) {
            if !allowed.contains(value) {
                let rendered: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                errors.push(EffectValidationError::new(
                    name,
                    format!("value must be one of {}", rendered.join(", ")),
                ));
            }
        }
        if let (Some(minimum), Some(v)) = (
            property.get("minimum").and_then(Value::as_f64),
            value.as_f64(),
        ) {
            if v < minimum {
                errors.push(EffectValidationError::new(
                    name,
                    format!("value {v} is below the minimum {minimum}"),
                ));
            }
        }
        if let (Some(maximum), Some(v)) = (
            property.get("maximum").and_then(Value::as_f64),
            value.as_f64(),
        ) {
            if v > maximum {
                errors.push(EffectValidationError::new(
                    name,
                    format!("value {v} is above the maximum {maximum}"),
                ));
            }
        }
    }

    errors
}

fn value_matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        _ => true,
    }
}

// =============================================================================
// Parameter Extraction
// =============================================================================

fn str_param<'a>(
    parameters: &'a Map<String, Value>,
    name: &str,
    default: &'a str,
) -> CoreResult<&'a str> {
    match parameters.get(name) {
        None => Ok(default),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(CoreError::invalid(name, "must be a string")),
    }
}

fn required_str_param<'a>(parameters: &'a Map<String, Value>, name: &str) -> CoreResult<&'a str> {
    match parameters.get(name) {
        None => Err(CoreError::invalid(name, "required parameter is missing")),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(CoreError::invalid(name, "must be a string")),
    }
}

fn f64_param(parameters: &Map<String, Value>, name: &str, default: f64) -> CoreResult<f64> {
    match parameters.get(name) {
        None => Ok(default),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| CoreError::invalid(name, "must be a number")),
    }
}

fn u32_param(parameters: &Map<String, Value>, name: &str, default: u32) -> CoreResult<u32> {
    match parameters.get(name) {
        None => Ok(default),
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| CoreError::invalid(name, "must be a non-negative integer")),
    }
}

fn bool_param(parameters: &Map<String, Value>, name: &str, default: bool) -> CoreResult<bool> {
    match parameters.get(name) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(CoreError::invalid(name, "must be a boolean")),
    }
}

// =============================================================================
// Built-in Effects
// =============================================================================

fn text_overlay_preview() -> CoreResult<String> {
    let filter = DrawtextBuilder::new("Sample Text")
        .fontsize(48)?
        .fontcolor("white")
        .position(TextPosition::BottomCenter)
        .margin(20)
        .build();
    Ok(filter.to_string())
}

fn text_overlay_build(parameters: &Map<String, Value>) -> CoreResult<String> {
    let text = required_str_param(parameters, "text")?;
    let fontsize = u32_param(parameters, "fontsize", 48)?;
    let fontcolor = str_param(parameters, "fontcolor", "white")?;
    let position = TextPosition::parse(str_param(parameters, "position", "bottom_center")?)?;
    let margin = u32_param(parameters, "margin", 10)?;

    let mut builder = DrawtextBuilder::new(text)
        .fontsize(fontsize)?
        .fontcolor(fontcolor)
        .position(position)
        .margin(margin);
    if let Some(font) = parameters.get("font") {
        let font = font
            .as_str()
            .ok_or_else(|| CoreError::invalid("font", "must be a string"))?;
        builder = builder.font(font);
    }
    Ok(builder.build().to_string())
}

fn speed_control_preview() -> CoreResult<String> {
    let control = SpeedControl::new(2.0)?;
    let parts: Vec<String> = control.build().iter().map(ToString::to_string).collect();
    Ok(parts.join(";"))
}

fn speed_control_build(parameters: &Map<String, Value>) -> CoreResult<String> {
    let factor = f64_param(parameters, "factor", 2.0)?;
    let drop_audio = bool_param(parameters, "drop_audio", false)?;
    let control = SpeedControl::new(factor)?.drop_audio(drop_audio);
    let parts: Vec<String> = control.build().iter().map(ToString::to_string).collect();
    Ok(parts.join(";"))
}

fn text_overlay_definition() -> EffectDefinition {
    EffectDefinition {
        display_name: "Text Overlay".to_string(),
        description: "Draws a text caption over the video at a preset position".to_string(),
        parameter_schema: json!({
            "type": "object",
            "required": ["text"],
            "properties": {
                "text": { "type": "string" },
                "fontsize": { "type": "integer", "minimum": 1, "default": 48 },
                "fontcolor": { "type": "string", "default": "white" },
                "position": {
                    "type": "string",
                    "enum": [
                        "center", "bottom_center", "top_left",
                        "top_right", "bottom_left", "bottom_right"
                    ],
                    "default": "bottom_center"
                },
                "margin": { "type": "integer", "minimum": 0, "default": 10 },
                "font": { "type": "string" }
            }
        }),
        ai_hints: vec![
            "Use bottom_center for subtitles and lower-third captions".to_string(),
            "Fontsize 48 reads well at 1080p; scale proportionally".to_string(),
        ],
        preview_fn: text_overlay_preview,
        build_fn: text_overlay_build,
    }
}

fn speed_control_definition() -> EffectDefinition {
    EffectDefinition {
        display_name: "Speed Control".to_string(),
        description: "Changes playback speed, keeping audio pitch-corrected".to_string(),
        parameter_schema: json!({
            "type": "object",
            "required": ["factor"],
            "properties": {
                "factor": { "type": "number", "minimum": 0.25, "maximum": 4.0, "default": 2.0 },
                "drop_audio": { "type": "boolean", "default": false }
            }
        }),
        ai_hints: vec![
            "Factors above 2.0 chain multiple audio tempo stages".to_string(),
            "Set drop_audio for footage whose audio will be replaced".to_string(),
        ],
        preview_fn: speed_control_preview,
        build_fn: speed_control_build,
    }
}

/// A registry pre-populated with the built-in effects.
#[must_use]
pub fn default_registry() -> EffectRegistry {
    let mut registry = EffectRegistry::new();
    registry.register("text_overlay", text_overlay_definition());
    registry.register("speed_control", speed_control_definition());
    registry
}
