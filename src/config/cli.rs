//! CLI argument parsing and configuration

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// sampleshift - Batch pitch-shifting for instrument samples
///
/// Reads every source sample in the input directory and writes one
/// pitch-shifted copy per requested semitone offset.
#[derive(Parser, Debug)]
#[command(name = "sampleshift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the original samples
    #[arg(long, value_name = "DIR", default_value = "Piano")]
    pub input_dir: PathBuf,

    /// Directory where the shifted samples will be written
    #[arg(long, value_name = "DIR", default_value = "Piano")]
    pub output_dir: PathBuf,

    /// Semitone offsets to generate (duplicates are dropped)
    #[arg(
        long,
        value_name = "STEPS",
        num_args = 1..,
        allow_negative_numbers = true,
        default_values_t = [-12.0, 12.0],
        value_parser = parse_step
    )]
    pub down_up_steps: Vec<f64>,

    /// Resample every file to this rate (keeps the native rate if omitted)
    #[arg(long, value_name = "HZ", value_parser = clap::value_parser!(u32).range(1..))]
    pub sample_rate: Option<u32>,

    /// Sample encoding of the written WAV files
    #[arg(long, value_enum, default_value_t = BitDepth::Float32)]
    pub bit_depth: BitDepth,

    /// Dry run - list the files that would be written without processing
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only, no progress bar)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// WAV sample encoding selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BitDepth {
    /// 16-bit integer PCM
    #[value(name = "16")]
    Pcm16,
    /// 32-bit float PCM
    #[value(name = "32")]
    Float32,
}

impl Cli {
    /// Get the log level based on verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Parse a semitone offset, rejecting values no file name can represent
fn parse_step(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("'{raw}' is not a finite number of semitones"));
    }
    Ok(value)
}
