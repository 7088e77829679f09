//! Runtime configuration settings

use super::cli::{BitDepth, Cli};
use crate::types::OutputEncoding;
use std::path::PathBuf;

/// Default semitone offsets: one octave down and one octave up
pub const DEFAULT_STEPS: [f64; 2] = [-12.0, 12.0];

/// Runtime settings for the shifting pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory scanned for source samples
    pub input_dir: PathBuf,
    /// Directory receiving generated samples
    pub output_dir: PathBuf,
    /// Requested semitone offsets, in the order given
    pub steps: Vec<f64>,
    /// Optional resample target applied to every file
    pub sample_rate: Option<u32>,
    /// WAV sample encoding
    pub encoding: OutputEncoding,
    /// Show progress bar
    pub show_progress: bool,
    /// Dry run mode - list outputs without processing
    pub dry_run: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let encoding = match cli.bit_depth {
            BitDepth::Pcm16 => OutputEncoding::Pcm16,
            BitDepth::Float32 => OutputEncoding::Float32,
        };

        Self {
            input_dir: cli.input_dir.clone(),
            output_dir: cli.output_dir.clone(),
            steps: cli.down_up_steps.clone(),
            sample_rate: cli.sample_rate,
            encoding,
            show_progress: !cli.quiet,
            dry_run: cli.dry_run,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("Piano"),
            output_dir: PathBuf::from("Piano"),
            steps: DEFAULT_STEPS.to_vec(),
            sample_rate: None,
            encoding: OutputEncoding::default(),
            show_progress: true,
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "sampleshift",
            "--input-dir",
            "raw",
            "--output-dir",
            "out",
            "--bit-depth",
            "16",
            "-q",
        ])
        .unwrap();
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.input_dir, PathBuf::from("raw"));
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.encoding, OutputEncoding::Pcm16);
        assert!(!settings.show_progress);
    }

    #[test]
    fn test_default_matches_cli_defaults() {
        let from_cli = Settings::from_cli(&Cli::try_parse_from(["sampleshift"]).unwrap());
        let default = Settings::default();
        assert_eq!(from_cli.input_dir, default.input_dir);
        assert_eq!(from_cli.output_dir, default.output_dir);
        assert_eq!(from_cli.steps, default.steps);
        assert_eq!(from_cli.sample_rate, default.sample_rate);
        assert_eq!(from_cli.encoding, default.encoding);
    }
}
