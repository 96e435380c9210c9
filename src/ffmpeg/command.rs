//! Argument-vector builder for the encoder invocation.

use serde::{Deserialize, Serialize};

use crate::sanitize::{
    validate_audio_codec, validate_crf, validate_path, validate_preset, validate_video_codec,
};
use crate::{CoreError, CoreResult};

/// One input file and the options that precede its `-i`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct InputSpec {
    path: String,
    seek: Option<f64>,
    duration: Option<f64>,
    stream_loop: Option<i64>,
}

/// One output file and the options that precede its path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct OutputSpec {
    path: String,
    video_codec: Option<String>,
    audio_codec: Option<String>,
    preset: Option<String>,
    crf: Option<u8>,
    format: Option<String>,
}

/// Fluent builder for the external encoder argument vector.
///
/// Emission order is stable: global options, then per-input options
/// followed by `-i path`, then `-filter_complex` and all `-map` entries,
/// then per-output options followed by the output path.
///
/// ```
/// use cinegraph::ffmpeg::FfmpegCommand;
///
/// let args = FfmpegCommand::new()
///     .overwrite(true)
///     .input("in.mp4").unwrap()
///     .output("out.mp4").unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(args, vec!["-y", "-i", "in.mp4", "out.mp4"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FfmpegCommand {
    overwrite: bool,
    loglevel: Option<String>,
    inputs: Vec<InputSpec>,
    filter_complex: Option<String>,
    maps: Vec<String>,
    outputs: Vec<OutputSpec>,
}

impl FfmpegCommand {
    /// Creates an empty command.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Global options =====

    /// Overwrite the output file without prompting (`-y`).
    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets the encoder log level (`-loglevel`).
    #[must_use]
    pub fn loglevel(mut self, level: impl Into<String>) -> Self {
        self.loglevel = Some(level.into());
        self
    }

    // ===== Inputs =====

    /// Adds an input file. The path must be non-empty and null-free.
    pub fn input(mut self, path: impl Into<String>) -> CoreResult<Self> {
        let path = path.into();
        validate_path(&path)?;
        self.inputs.push(InputSpec {
            path,
            ..InputSpec::default()
        });
        Ok(self)
    }

    /// Seeks the most recently added input to `seconds` (`-ss`).
    pub fn seek(mut self, seconds: f64) -> CoreResult<Self> {
        if seconds < 0.0 {
            return Err(CoreError::invalid(
                "seek",
                format!("value {seconds} is out of range (must be >= 0)"),
            ));
        }
        let input = self.last_input_mut()?;
        input.seek = Some(seconds);
        Ok(self)
    }

    /// Limits the read duration of the most recently added input (`-t`).
    pub fn duration(mut self, seconds: f64) -> CoreResult<Self> {
        if seconds <= 0.0 {
            return Err(CoreError::invalid(
                "duration",
                format!("value {seconds} is out of range (must be > 0)"),
            ));
        }
        let input = self.last_input_mut()?;
        input.duration = Some(seconds);
        Ok(self)
    }

    /// Loops the most recently added input (`-stream_loop`); -1 loops
    /// forever.
    pub fn stream_loop(mut self, count: i64) -> CoreResult<Self> {
        let input = self.last_input_mut()?;
        input.stream_loop = Some(count);
        Ok(self)
    }

    fn last_input_mut(&mut self) -> CoreResult<&mut InputSpec> {
        self.inputs
            .last_mut()
            .ok_or_else(|| CoreError::invalid("input", "no input to apply the option to"))
    }

    // ===== Filtering and stream selection =====

    /// Sets the `-filter_complex` graph text.
    #[must_use]
    pub fn filter_complex(mut self, graph: impl ToString) -> Self {
        self.filter_complex = Some(graph.to_string());
        self
    }

    /// Adds a `-map` stream selector. Maps are global and emitted after
    /// the filter graph, in insertion order.
    #[must_use]
    pub fn map(mut self, selector: impl Into<String>) -> Self {
        self.maps.push(selector.into());
        self
    }

    // ===== Outputs =====

    /// Adds an output file. The path must be non-empty and null-free.
    pub fn output(mut self, path: impl Into<String>) -> CoreResult<Self> {
        let path = path.into();
        validate_path(&path)?;
        self.outputs.push(OutputSpec {
            path,
            ..OutputSpec::default()
        });
        Ok(self)
    }

    /// Sets the video codec of the most recently added output (`-c:v`).
    pub fn video_codec(mut self, codec: impl Into<String>) -> CoreResult<Self> {
        let codec = codec.into();
        validate_video_codec(&codec)?;
        let output = self.last_output_mut()?;
        output.video_codec = Some(codec);
        Ok(self)
    }

    /// Sets the audio codec of the most recently added output (`-c:a`).
    pub fn audio_codec(mut self, codec: impl Into<String>) -> CoreResult<Self> {
        let codec = codec.into();
        validate_audio_codec(&codec)?;
        let output = self.last_output_mut()?;
        output.audio_codec = Some(codec);
        Ok(self)
    }

    /// Sets the encoder preset of the most recently added output.
    pub fn preset(mut self, preset: impl Into<String>) -> CoreResult<Self> {
        let preset = preset.into();
        validate_preset(&preset)?;
        let output = self.last_output_mut()?;
        output.preset = Some(preset);
        Ok(self)
    }

    /// Sets the CRF quality of the most recently added output (0-51).
    pub fn crf(mut self, crf: u8) -> CoreResult<Self> {
        validate_crf(crf)?;
        let output = self.last_output_mut()?;
        output.crf = Some(crf);
        Ok(self)
    }

    /// Forces the container format of the most recently added output
    /// (`-f`).
    pub fn format(mut self, format: impl Into<String>) -> CoreResult<Self> {
        let output = self.last_output_mut()?;
        output.format = Some(format.into());
        Ok(self)
    }

    fn last_output_mut(&mut self) -> CoreResult<&mut OutputSpec> {
        self.outputs
            .last_mut()
            .ok_or_else(|| CoreError::invalid("output", "no output to apply the option to"))
    }

    // ===== Assembly =====

    /// Assembles the argument vector.
    ///
    /// Fails when no input or no output has been added.
    pub fn build(&self) -> CoreResult<Vec<String>> {
        if self.inputs.is_empty() {
            return Err(CoreError::MissingInput);
        }
        if self.outputs.is_empty() {
            return Err(CoreError::MissingOutput);
        }

        let mut args: Vec<String> = Vec::new();
        if self.overwrite {
            args.push("-y".to_string());
        }
        if let Some(level) = &self.loglevel {
            args.push("-loglevel".to_string());
            args.push(level.clone());
        }
        for input in &self.inputs {
            if let Some(seek) = input.seek {
                args.push("-ss".to_string());
                args.push(format!("{seek:.3}"));
            }
            if let Some(duration) = input.duration {
                args.push("-t".to_string());
                args.push(format!("{duration:.3}"));
            }
            if let Some(count) = input.stream_loop {
                args.push("-stream_loop".to_string());
                args.push(count.to_string());
            }
            args.push("-i".to_string());
            args.push(input.path.clone());
        }
        if let Some(graph) = &self.filter_complex {
            args.push("-filter_complex".to_string());
            args.push(graph.clone());
        }
        for selector in &self.maps {
            args.push("-map".to_string());
            args.push(selector.clone());
        }
        for output in &self.outputs {
            if let Some(codec) = &output.video_codec {
                args.push("-c:v".to_string());
                args.push(codec.clone());
            }
            if let Some(codec) = &output.audio_codec {
                args.push("-c:a".to_string());
                args.push(codec.clone());
            }
            if let Some(preset) = &output.preset {
                args.push("-preset".to_string());
                args.push(preset.clone());
            }
            if let Some(crf) = output.crf {
                args.push("-crf".to_string());
                args.push(crf.to_string());
            }
            if let Some(format) = &output.format {
                args.push("-f".to_string());
                args.push(format.clone());
            }
            args.push(output.path.clone());
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Filter, FilterChain, FilterGraph};

    #[test]
    fn test_minimal_command() {
        let args = FfmpegCommand::new()
            .overwrite(true)
            .input("in.mp4")
            .unwrap()
            .output("out.mp4")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(args, vec!["-y", "-i", "in.mp4", "out.mp4"]);
    }

    #[test]
    fn test_missing_output_fails() {
        let err = FfmpegCommand::new()
            .input("in.mp4")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(
            err.to_string().contains("output"),
            "Expected output mention in: {}",
            err
        );
    }

    #[test]
    fn test_missing_input_fails() {
        let err = FfmpegCommand::new()
            .output("out.mp4")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(
            err.to_string().contains("input"),
            "Expected input mention in: {}",
            err
        );
    }

    #[test]
    fn test_input_options_precede_their_input() {
        let args = FfmpegCommand::new()
            .input("a.mp4")
            .unwrap()
            .seek(1.5)
            .unwrap()
            .duration(10.0)
            .unwrap()
            .input("b.mp4")
            .unwrap()
            .output("out.mp4")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            args,
            vec![
                "-ss", "1.500", "-t", "10.000", "-i", "a.mp4", "-i", "b.mp4", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_stream_loop() {
        let args = FfmpegCommand::new()
            .input("loop.mp4")
            .unwrap()
            .stream_loop(-1)
            .unwrap()
            .output("out.mp4")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(args, vec!["-stream_loop", "-1", "-i", "loop.mp4", "out.mp4"]);
    }

    #[test]
    fn test_filter_complex_and_global_maps() {
        let graph = FilterGraph::new().chain(
            FilterChain::new()
                .input("0:v")
                .filter(Filter::scale(1280, 720))
                .output("vout"),
        );
        let args = FfmpegCommand::new()
            .input("in.mp4")
            .unwrap()
            .filter_complex(graph)
            .map("[vout]")
            .map("0:a")
            .output("out.mp4")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            args,
            vec![
                "-i",
                "in.mp4",
                "-filter_complex",
                "[0:v]scale=w=1280:h=720[vout]",
                "-map",
                "[vout]",
                "-map",
                "0:a",
                "out.mp4"
            ]
        );
    }

    #[test]
    fn test_output_options_precede_path() {
        let args = FfmpegCommand::new()
            .input("in.mp4")
            .unwrap()
            .output("out.mp4")
            .unwrap()
            .video_codec("libx264")
            .unwrap()
            .audio_codec("aac")
            .unwrap()
            .preset("medium")
            .unwrap()
            .crf(23)
            .unwrap()
            .format("mp4")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            args,
            vec![
                "-i", "in.mp4", "-c:v", "libx264", "-c:a", "aac", "-preset", "medium", "-crf",
                "23", "-f", "mp4", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_loglevel_is_global() {
        let args = FfmpegCommand::new()
            .loglevel("error")
            .input("in.mp4")
            .unwrap()
            .output("out.mp4")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(args, vec!["-loglevel", "error", "-i", "in.mp4", "out.mp4"]);
    }

    #[test]
    fn test_setters_reject_invalid_values() {
        assert!(FfmpegCommand::new().input("").is_err());
        assert!(FfmpegCommand::new()
            .input("in.mp4")
            .unwrap()
            .seek(-1.0)
            .is_err());
        assert!(FfmpegCommand::new()
            .input("in.mp4")
            .unwrap()
            .output("out.mp4")
            .unwrap()
            .video_codec("h264")
            .is_err());
        assert!(FfmpegCommand::new()
            .input("in.mp4")
            .unwrap()
            .output("out.mp4")
            .unwrap()
            .crf(52)
            .is_err());
    }

    #[test]
    fn test_option_without_target_fails() {
        assert!(FfmpegCommand::new().seek(1.0).is_err());
        assert!(FfmpegCommand::new().crf(23).is_err());
    }

    #[test]
    fn test_multiple_outputs() {
        let args = FfmpegCommand::new()
            .input("in.mp4")
            .unwrap()
            .output("low.mp4")
            .unwrap()
            .crf(30)
            .unwrap()
            .output("high.mp4")
            .unwrap()
            .crf(18)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            args,
            vec![
                "-i", "in.mp4", "-crf", "30", "low.mp4", "-crf", "18", "high.mp4"
            ]
        );
    }
}
