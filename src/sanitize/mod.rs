//! Input Sanitization and Whitelists
//!
//! Every string that ends up inside a filter parameter or command-line
//! argument passes through here first. The module provides the filter-text
//! escaper, the path validator, the closed numeric range validators, and the
//! codec / preset whitelists.
//!
//! Escaping is total: any input string produces a defined output, and the
//! output contains no unescaped grammar characters.

use crate::{CoreError, CoreResult};

// =============================================================================
// Escaping
// =============================================================================

/// Escapes text for safe embedding in a filter parameter value.
///
/// Mapping, applied in a single left-to-right pass:
///
/// | Input | Output |
/// |-------|--------|
/// | `\`   | `\\`   |
/// | `'`   | `'\''` |
/// | `:`   | `\:`   |
/// | `[`   | `\[`   |
/// | `]`   | `\]`   |
/// | `;`   | `\;`   |
/// | newline | literal `\n` |
/// | carriage return | literal `\r` |
///
/// Every other codepoint, including non-ASCII Unicode, passes through
/// unchanged. The escaper never introduces control characters.
#[must_use]
pub fn escape_filter_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("'\\''"),
            ':' => escaped.push_str("\\:"),
            '[' => escaped.push_str("\\["),
            ']' => escaped.push_str("\\]"),
            ';' => escaped.push_str("\\;"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes text for the drawtext filter.
///
/// Same mapping as [`escape_filter_text`], plus `%` becomes `%%` because
/// drawtext expands `%{...}` sequences.
#[must_use]
pub fn escape_drawtext_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("'\\''"),
            ':' => escaped.push_str("\\:"),
            '[' => escaped.push_str("\\["),
            ']' => escaped.push_str("\\]"),
            ';' => escaped.push_str("\\;"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '%' => escaped.push_str("%%"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// Path Validation
// =============================================================================

/// Validates a filesystem path string.
///
/// Rejects empty strings and strings containing null bytes. Traversal
/// syntax (`..`) is deliberately not rejected here; that policy belongs to
/// the caller's scan-path allow-list.
pub fn validate_path(path: &str) -> CoreResult<()> {
    if path.is_empty() {
        return Err(CoreError::invalid("path", "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(CoreError::invalid("path", "Path cannot contain null bytes"));
    }
    Ok(())
}

// =============================================================================
// Numeric Range Validators
// =============================================================================

/// Validates a CRF quality value (0-51).
pub fn validate_crf(crf: u8) -> CoreResult<()> {
    if crf > 51 {
        return Err(CoreError::invalid(
            "crf",
            format!("value {crf} is out of range (must be 0-51)"),
        ));
    }
    Ok(())
}

/// Validates a playback speed factor (0.25-4.0).
pub fn validate_speed(speed: f64) -> CoreResult<()> {
    if !(0.25..=4.0).contains(&speed) {
        return Err(CoreError::invalid(
            "speed",
            format!("value {speed} is out of range (must be 0.25-4.0)"),
        ));
    }
    Ok(())
}

/// Validates a linear volume multiplier (0.0-10.0).
pub fn validate_volume(volume: f64) -> CoreResult<()> {
    if !(0.0..=10.0).contains(&volume) {
        return Err(CoreError::invalid(
            "volume",
            format!("value {volume} is out of range (must be 0.0-10.0)"),
        ));
    }
    Ok(())
}

// =============================================================================
// Whitelists
// =============================================================================

/// Allowed video codec identifiers.
pub const VIDEO_CODECS: &[&str] = &[
    "libx264",
    "libx265",
    "libvpx",
    "libvpx-vp9",
    "libaom-av1",
    "prores",
    "copy",
];

/// Allowed audio codec identifiers.
pub const AUDIO_CODECS: &[&str] = &[
    "aac",
    "libmp3lame",
    "libopus",
    "libvorbis",
    "flac",
    "pcm_s16le",
    "copy",
];

/// Allowed encoder preset names.
pub const PRESETS: &[&str] = &[
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
];

fn check_whitelist(field: &str, value: &str, allowed: &[&str]) -> CoreResult<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::invalid(
            field,
            format!("value '{}' is not valid. Allowed: {}", value, allowed.join(", ")),
        ))
    }
}

/// Validates a video codec against the whitelist. Exact case match, no
/// normalization.
pub fn validate_video_codec(codec: &str) -> CoreResult<()> {
    check_whitelist("video_codec", codec, VIDEO_CODECS)
}

/// Validates an audio codec against the whitelist.
pub fn validate_audio_codec(codec: &str) -> CoreResult<()> {
    check_whitelist("audio_codec", codec, AUDIO_CODECS)
}

/// Validates an encoder preset against the whitelist.
pub fn validate_preset(preset: &str) -> CoreResult<()> {
    check_whitelist("preset", preset, PRESETS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== Escaping =====

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_filter_text("Hello World"), "Hello World");
    }

    #[test]
    fn test_escape_backslash() {
        assert_eq!(escape_filter_text("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_escape_single_quote() {
        assert_eq!(escape_filter_text("it's"), "it'\\''s");
    }

    #[test]
    fn test_escape_colon() {
        assert_eq!(escape_filter_text("12:34"), "12\\:34");
    }

    #[test]
    fn test_escape_brackets_and_semicolon() {
        assert_eq!(escape_filter_text("[a];[b]"), "\\[a\\]\\;\\[b\\]");
    }

    #[test]
    fn test_escape_newline_and_carriage_return() {
        assert_eq!(escape_filter_text("a\nb\rc"), "a\\nb\\rc");
    }

    #[test]
    fn test_escape_unicode_passthrough() {
        assert_eq!(escape_filter_text("日本語 café"), "日本語 café");
    }

    #[test]
    fn test_escape_injection_attempt() {
        // A payload trying to terminate the filter and start a new chain
        let escaped = escape_filter_text("x];[0:v]drawtext=text=pwned");
        assert!(!escaped.contains("];["), "Expected no raw chain break in: {}", escaped);
    }

    #[test]
    fn test_escape_drawtext_percent() {
        assert_eq!(escape_drawtext_text("100%"), "100%%");
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape_filter_text(""), "");
    }

    proptest! {
        #[test]
        fn escape_never_leaves_raw_grammar_chars(s in "\\PC*") {
            let escaped = escape_filter_text(&s);
            // Every grammar character must be preceded by a backslash.
            let bytes = escaped.as_bytes();
            for (i, b) in bytes.iter().enumerate() {
                if matches!(b, b':' | b'[' | b']' | b';') {
                    prop_assert!(i > 0 && bytes[i - 1] == b'\\');
                }
            }
            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains('\r'));
        }

        #[test]
        fn escape_is_total_and_idempotent_in_domain(s in "\\PC*") {
            // Escaping an already-escaped string is well-defined (no panic).
            let once = escape_filter_text(&s);
            let _twice = escape_filter_text(&once);
        }
    }

    // ===== Path validation =====

    #[test]
    fn test_validate_path_ok() {
        assert!(validate_path("/media/clips/a.mp4").is_ok());
        assert!(validate_path("../relative/ok.mp4").is_ok());
    }

    #[test]
    fn test_validate_path_empty() {
        let err = validate_path("").unwrap_err();
        assert_eq!(err.to_string(), "path: Path cannot be empty");
    }

    #[test]
    fn test_validate_path_null_byte() {
        let err = validate_path("a\0b").unwrap_err();
        assert_eq!(err.to_string(), "path: Path cannot contain null bytes");
    }

    // ===== Numeric validators =====

    #[test]
    fn test_crf_bounds() {
        assert!(validate_crf(0).is_ok());
        assert!(validate_crf(51).is_ok());
        assert!(validate_crf(52).is_err());
    }

    #[test]
    fn test_speed_bounds() {
        assert!(validate_speed(0.25).is_ok());
        assert!(validate_speed(4.0).is_ok());
        assert!(validate_speed(0.24).is_err());
        assert!(validate_speed(4.01).is_err());
    }

    #[test]
    fn test_volume_bounds() {
        assert!(validate_volume(0.0).is_ok());
        assert!(validate_volume(10.0).is_ok());
        assert!(validate_volume(-0.1).is_err());
        assert!(validate_volume(10.1).is_err());
    }

    // ===== Whitelists =====

    #[test]
    fn test_video_codec_whitelist() {
        assert!(validate_video_codec("libx264").is_ok());
        assert!(validate_video_codec("prores").is_ok());
        assert!(validate_video_codec("copy").is_ok());
        assert!(validate_video_codec("h264").is_err());
        // Exact case match, no normalization
        assert!(validate_video_codec("LIBX264").is_err());
    }

    #[test]
    fn test_audio_codec_whitelist() {
        assert!(validate_audio_codec("aac").is_ok());
        assert!(validate_audio_codec("pcm_s16le").is_ok());
        assert!(validate_audio_codec("mp3").is_err());
    }

    #[test]
    fn test_preset_whitelist() {
        assert!(validate_preset("medium").is_ok());
        assert!(validate_preset("veryslow").is_ok());
        assert!(validate_preset("placebo").is_err());
    }

    #[test]
    fn test_whitelist_error_lists_allowed() {
        let err = validate_preset("turbo").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ultrafast"), "Expected allowed list in: {}", msg);
    }
}
