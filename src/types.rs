//! Core data types for sampleshift
//!
//! These types represent the domain model and flow through the pipeline.

use std::fmt;

// =============================================================================
// Semitone offsets
// =============================================================================

/// A pitch offset in semitones. Positive shifts up, negative shifts down.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SemitoneOffset(f64);

impl SemitoneOffset {
    pub fn new(semitones: f64) -> Self {
        Self(semitones)
    }

    pub fn semitones(self) -> f64 {
        self.0
    }

    /// Frequency ratio of this offset (2 for +12, 0.5 for -12)
    pub fn frequency_ratio(self) -> f64 {
        2.0f64.powf(self.0 / 12.0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// File name suffix: `p12`, `m12`, `p0.5`, `m0.5`
    ///
    /// Whole offsets drop the fractional part; others keep the shortest
    /// float representation of the magnitude. Magnitudes are always written
    /// in plain decimal, never exponent form, so `1e-7` becomes `p0.0000001`.
    pub fn suffix(self) -> String {
        let sign = if self.0 >= 0.0 { 'p' } else { 'm' };
        let magnitude = self.0.abs();
        if magnitude.fract() == 0.0 {
            format!("{sign}{magnitude:.0}")
        } else {
            format!("{sign}{magnitude}")
        }
    }
}

impl fmt::Display for SemitoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} st", self.0)
    }
}

// =============================================================================
// Audio buffer types
// =============================================================================

/// Decoded mono waveform
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Mono samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration in seconds
    pub duration: f64,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        // Guard against division by zero - use 0 duration for invalid sample rate
        let duration = if sample_rate > 0 {
            samples.len() as f64 / sample_rate as f64
        } else {
            0.0
        };
        Self {
            samples,
            sample_rate,
            duration,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// =============================================================================
// Formats
// =============================================================================

/// Input file extensions, in scan order
pub const SCAN_EXTENSIONS: [&str; 8] = ["wav", "mp3", "ogg", "flac", "m4a", "aiff", "aif", "aifc"];

/// Extension of every generated file
pub const OUTPUT_EXTENSION: &str = "wav";

/// Audio formats accepted as source files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    Flac,
    M4a,
    Aiff,
    Aifc,
}

impl AudioFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "wav" => Some(AudioFormat::Wav),
            "mp3" => Some(AudioFormat::Mp3),
            "ogg" => Some(AudioFormat::Ogg),
            "flac" => Some(AudioFormat::Flac),
            "m4a" => Some(AudioFormat::M4a),
            "aiff" | "aif" => Some(AudioFormat::Aiff),
            "aifc" => Some(AudioFormat::Aifc),
            _ => None,
        }
    }
}

/// Sample encoding of written WAV files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputEncoding {
    /// 16-bit signed integer PCM
    Pcm16,
    /// 32-bit IEEE float, lossless for the processed waveform
    #[default]
    Float32,
}

impl OutputEncoding {
    pub fn bits_per_sample(self) -> u16 {
        match self {
            OutputEncoding::Pcm16 => 16,
            OutputEncoding::Float32 => 32,
        }
    }
}
